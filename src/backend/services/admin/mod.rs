//! Services bound to the admin backend.

mod auth;
mod evacuation_areas;
mod families;
mod resources;

pub use auth::AdminAuthService;
pub use evacuation_areas::EvacuationAreaService;
pub use families::FamilyService;
pub use resources::ResourceService;

use crate::backend::api::ApiClient;
use crate::backend::session::{Session, SharedStore, Tenant};

#[derive(Debug, Clone)]
pub struct AdminServices {
    pub auth: AdminAuthService,
    pub evacuation_areas: EvacuationAreaService,
    pub families: FamilyService,
    pub predictions: ResourceService,
    pub facilities: ResourceService,
    pub updates: ResourceService,
    pub emergency_alerts: ResourceService,
}

impl AdminServices {
    pub fn new(client: ApiClient, store: SharedStore) -> Self {
        let session = Session::new(store, Tenant::Admin);
        Self {
            auth: AdminAuthService::new(client.clone(), session),
            evacuation_areas: EvacuationAreaService::new(client.clone()),
            families: FamilyService::new(client.clone()),
            predictions: ResourceService::new(client.clone(), "/predictions", "prediction"),
            facilities: ResourceService::new(client.clone(), "/facilities", "facility"),
            updates: ResourceService::new(client.clone(), "/updates", "update"),
            emergency_alerts: ResourceService::new(client, "/emergency-alerts", "emergency alert"),
        }
    }
}
