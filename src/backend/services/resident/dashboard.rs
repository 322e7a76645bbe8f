use serde_json::Value;

use crate::backend::api::ApiClient;
use crate::backend::api::models::ResidentOverview;
use crate::backend::services::logged;
use crate::utils::Result;

#[derive(Debug, Clone)]
pub struct ResidentDashboardService {
    client: ApiClient,
}

impl ResidentDashboardService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn get_dashboard(&self) -> Result<Value> {
        let result = self.client.get("/dashboard").await;
        logged(self.client.logger(), "fetching resident dashboard", result)
    }

    pub async fn get_evacuation_info(&self) -> Result<Value> {
        let result = self.client.get("/evacuation-info").await;
        logged(self.client.logger(), "fetching evacuation info", result)
    }

    pub async fn get_disaster_alerts(&self) -> Result<Value> {
        let result = self.client.get("/alerts").await;
        logged(self.client.logger(), "fetching disaster alerts", result)
    }

    /// All three dashboard feeds in flight at once. The first failure wins.
    pub async fn load_overview(&self) -> Result<ResidentOverview> {
        let (dashboard, evacuation_info, alerts) = tokio::try_join!(
            self.get_dashboard(),
            self.get_evacuation_info(),
            self.get_disaster_alerts()
        )?;
        Ok(ResidentOverview {
            dashboard,
            evacuation_info,
            alerts,
        })
    }
}
