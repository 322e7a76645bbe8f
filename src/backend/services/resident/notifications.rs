use serde_json::Value;

use crate::backend::api::ApiClient;
use crate::backend::api::models::Id;
use crate::backend::services::logged;
use crate::utils::Result;

#[derive(Debug, Clone)]
pub struct ResidentNotificationService {
    client: ApiClient,
}

impl ResidentNotificationService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn get_notifications(&self) -> Result<Value> {
        let result = self.client.get("/notifications").await;
        logged(self.client.logger(), "fetching notifications", result)
    }

    pub async fn mark_as_read(&self, id: Id) -> Result<Value> {
        let result = self
            .client
            .patch_empty(&format!("/notifications/{id}/read"))
            .await;
        logged(
            self.client.logger(),
            format_args!("marking notification {id} as read"),
            result,
        )
    }

    pub async fn delete_notification(&self, id: Id) -> Result<Value> {
        let result = self.client.delete(&format!("/notifications/{id}")).await;
        logged(
            self.client.logger(),
            format_args!("deleting notification {id}"),
            result,
        )
    }
}
