//! Services bound to the resident backend.

mod auth;
mod dashboard;
mod evacuation;
mod family;
mod feeds;
mod notifications;

pub use auth::ResidentAuthService;
pub use dashboard::ResidentDashboardService;
pub use evacuation::ResidentEvacuationService;
pub use family::ResidentFamilyService;
pub use feeds::{
    ResidentEmergencyAlertsService, ResidentFacilitiesService, ResidentPredictionsService,
    ResidentUpdatesService,
};
pub use notifications::ResidentNotificationService;

use crate::backend::api::ApiClient;
use crate::backend::session::{Session, SharedStore, Tenant};

#[derive(Debug, Clone)]
pub struct ResidentServices {
    pub auth: ResidentAuthService,
    pub dashboard: ResidentDashboardService,
    pub family: ResidentFamilyService,
    pub evacuation: ResidentEvacuationService,
    pub facilities: ResidentFacilitiesService,
    pub predictions: ResidentPredictionsService,
    pub emergency_alerts: ResidentEmergencyAlertsService,
    pub updates: ResidentUpdatesService,
    pub notifications: ResidentNotificationService,
}

impl ResidentServices {
    pub fn new(client: ApiClient, store: SharedStore) -> Self {
        let session = Session::new(store, Tenant::Resident);
        Self {
            auth: ResidentAuthService::new(client.clone(), session),
            dashboard: ResidentDashboardService::new(client.clone()),
            family: ResidentFamilyService::new(client.clone()),
            evacuation: ResidentEvacuationService::new(client.clone()),
            facilities: ResidentFacilitiesService::new(client.clone()),
            predictions: ResidentPredictionsService::new(client.clone()),
            emergency_alerts: ResidentEmergencyAlertsService::new(client.clone()),
            updates: ResidentUpdatesService::new(client.clone()),
            notifications: ResidentNotificationService::new(client),
        }
    }
}
