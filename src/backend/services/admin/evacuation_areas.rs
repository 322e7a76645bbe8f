use serde::Serialize;
use serde_json::Value;

use crate::backend::api::models::{Coordinates, Id};
use crate::backend::api::{ApiClient, Query};
use crate::backend::services::{coordinates_query, logged};
use crate::utils::Result;

#[derive(Debug, Clone)]
pub struct EvacuationAreaService {
    client: ApiClient,
}

impl EvacuationAreaService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// The backend's list as sent, whatever its shape.
    pub async fn get_all(&self) -> Result<Value> {
        let result = self.client.get("/evacuation-areas").await;
        logged(self.client.logger(), "fetching evacuation areas", result)
    }

    /// Coordinates, when given, let the backend compute distance to the area.
    pub async fn get_by_id(&self, id: Id, origin: Option<Coordinates>) -> Result<Value> {
        let query = origin
            .map(|c| coordinates_query(c.latitude, c.longitude))
            .unwrap_or_default();
        let result = self
            .client
            .get_with(&format!("/evacuation-areas/{id}"), query)
            .await;
        logged(
            self.client.logger(),
            format_args!("fetching evacuation area {id}"),
            result,
        )
    }

    pub async fn create<B: Serialize + ?Sized>(&self, data: &B) -> Result<Value> {
        let result = self.client.post("/evacuation-areas", data).await;
        logged(self.client.logger(), "creating evacuation area", result)
    }

    pub async fn update<B: Serialize + ?Sized>(&self, id: Id, data: &B) -> Result<Value> {
        let result = self
            .client
            .put(&format!("/evacuation-areas/{id}"), data)
            .await;
        logged(
            self.client.logger(),
            format_args!("updating evacuation area {id}"),
            result,
        )
    }

    pub async fn delete(&self, id: Id) -> Result<Value> {
        let result = self.client.delete(&format!("/evacuation-areas/{id}")).await;
        logged(
            self.client.logger(),
            format_args!("deleting evacuation area {id}"),
            result,
        )
    }

    pub async fn get_nearest_areas(&self, latitude: f64, longitude: f64) -> Result<Value> {
        let result = self
            .client
            .get_with(
                "/evacuation-areas/nearest",
                coordinates_query(latitude, longitude),
            )
            .await;
        logged(
            self.client.logger(),
            "fetching nearest evacuation areas",
            result,
        )
    }

    /// `predicted` is the forecast value; callers without one pass
    /// [`DEFAULT_PREDICTED`](crate::backend::api::models::DEFAULT_PREDICTED).
    pub async fn get_recommended_areas(
        &self,
        latitude: f64,
        longitude: f64,
        predicted: f64,
    ) -> Result<Value> {
        let mut query: Query = coordinates_query(latitude, longitude);
        query.push(("predicted".to_string(), predicted.to_string()));
        let result = self
            .client
            .get_with("/evacuation-areas/recommend", query)
            .await;
        logged(
            self.client.logger(),
            "fetching recommended evacuation areas",
            result,
        )
    }

    pub async fn register_family_to_area<B: Serialize + ?Sized>(
        &self,
        id: Id,
        family: &B,
    ) -> Result<Value> {
        let result = self
            .client
            .post(&format!("/evacuation-areas/{id}/go"), family)
            .await;
        logged(
            self.client.logger(),
            format_args!("registering family to evacuation area {id}"),
            result,
        )
    }
}
