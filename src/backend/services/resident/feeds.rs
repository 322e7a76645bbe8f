//! Read-only resident feeds: facilities, predictions, alerts and updates.

use serde_json::Value;

use crate::backend::api::ApiClient;
use crate::backend::api::models::Id;
use crate::backend::services::logged;
use crate::utils::Result;

#[derive(Debug, Clone)]
pub struct ResidentFacilitiesService {
    client: ApiClient,
}

impl ResidentFacilitiesService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn get_nearby_facilities(&self) -> Result<Value> {
        let result = self.client.get("/facilities/nearby").await;
        logged(self.client.logger(), "fetching nearby facilities", result)
    }

    pub async fn get_facilities(&self) -> Result<Value> {
        let result = self.client.get("/facilities").await;
        logged(self.client.logger(), "fetching facilities", result)
    }

    pub async fn get_facility_details(&self, id: Id) -> Result<Value> {
        let result = self.client.get(&format!("/facilities/{id}")).await;
        logged(
            self.client.logger(),
            format_args!("fetching facility {id}"),
            result,
        )
    }
}

#[derive(Debug, Clone)]
pub struct ResidentPredictionsService {
    client: ApiClient,
}

impl ResidentPredictionsService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn get_disaster_predictions(&self) -> Result<Value> {
        let result = self.client.get("/disaster-predictions").await;
        logged(self.client.logger(), "fetching disaster predictions", result)
    }

    pub async fn get_prediction_details(&self, id: Id) -> Result<Value> {
        let result = self
            .client
            .get(&format!("/disaster-predictions/{id}"))
            .await;
        logged(
            self.client.logger(),
            format_args!("fetching disaster prediction {id}"),
            result,
        )
    }

    pub async fn get_personal_risk_assessment(&self) -> Result<Value> {
        let result = self.client.get("/risk-assessment").await;
        logged(self.client.logger(), "fetching risk assessment", result)
    }
}

#[derive(Debug, Clone)]
pub struct ResidentEmergencyAlertsService {
    client: ApiClient,
}

impl ResidentEmergencyAlertsService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn get_emergency_alerts(&self) -> Result<Value> {
        let result = self.client.get("/emergency-alerts").await;
        logged(self.client.logger(), "fetching emergency alerts", result)
    }

    pub async fn get_emergency_alert(&self, id: Id) -> Result<Value> {
        let result = self.client.get(&format!("/emergency-alerts/{id}")).await;
        logged(
            self.client.logger(),
            format_args!("fetching emergency alert {id}"),
            result,
        )
    }
}

#[derive(Debug, Clone)]
pub struct ResidentUpdatesService {
    client: ApiClient,
}

impl ResidentUpdatesService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn get_disaster_updates(&self) -> Result<Value> {
        let result = self.client.get("/disaster-updates").await;
        logged(self.client.logger(), "fetching disaster updates", result)
    }

    pub async fn get_disaster_update(&self, id: Id) -> Result<Value> {
        let result = self.client.get(&format!("/disaster-updates/{id}")).await;
        logged(
            self.client.logger(),
            format_args!("fetching disaster update {id}"),
            result,
        )
    }
}
