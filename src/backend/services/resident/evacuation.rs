use serde::Serialize;
use serde_json::Value;

use crate::backend::api::ApiClient;
use crate::backend::api::models::Id;
use crate::backend::services::{coordinates_query, logged};
use crate::utils::Result;

#[derive(Debug, Clone)]
pub struct ResidentEvacuationService {
    client: ApiClient,
}

impl ResidentEvacuationService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn get_available_areas(&self) -> Result<Value> {
        let result = self.client.get("/evacuation-areas").await;
        logged(self.client.logger(), "fetching evacuation areas", result)
    }

    pub async fn get_evacuation_area(&self, id: Id) -> Result<Value> {
        let result = self.client.get(&format!("/evacuation-areas/{id}")).await;
        logged(
            self.client.logger(),
            format_args!("fetching evacuation area {id}"),
            result,
        )
    }

    pub async fn register_evacuation<B: Serialize + ?Sized>(
        &self,
        area_id: Id,
        data: &B,
    ) -> Result<Value> {
        let result = self
            .client
            .post(&format!("/evacuation-areas/{area_id}/go"), data)
            .await;
        logged(
            self.client.logger(),
            format_args!("registering evacuation to area {area_id}"),
            result,
        )
    }

    pub async fn get_nearest_areas(&self, lat: f64, lng: f64) -> Result<Value> {
        let result = self
            .client
            .get_with("/evacuation-areas/nearest", coordinates_query(lat, lng))
            .await;
        logged(
            self.client.logger(),
            "fetching nearest evacuation areas",
            result,
        )
    }

    pub async fn get_recommended_area(&self, lat: f64, lng: f64, predicted: f64) -> Result<Value> {
        let mut query = coordinates_query(lat, lng);
        query.push(("predicted".to_string(), predicted.to_string()));
        let result = self
            .client
            .get_with("/evacuation-areas/recommend", query)
            .await;
        logged(
            self.client.logger(),
            "fetching recommended evacuation area",
            result,
        )
    }
}
