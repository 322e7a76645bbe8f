use serde::Serialize;
use serde_json::Value;

use crate::backend::api::ApiClient;
use crate::backend::api::models::Id;
use crate::backend::services::logged;
use crate::utils::Result;

/// The logged-in resident's own household.
#[derive(Debug, Clone)]
pub struct ResidentFamilyService {
    client: ApiClient,
}

impl ResidentFamilyService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn get_my_family(&self) -> Result<Value> {
        let result = self.client.get("/family").await;
        logged(self.client.logger(), "fetching family", result)
    }

    pub async fn update_family_info<B: Serialize + ?Sized>(&self, data: &B) -> Result<Value> {
        let result = self.client.put("/family", data).await;
        logged(self.client.logger(), "updating family", result)
    }

    pub async fn get_family_members(&self) -> Result<Value> {
        let result = self.client.get("/family/members").await;
        logged(self.client.logger(), "fetching family members", result)
    }

    pub async fn add_family_member<B: Serialize + ?Sized>(&self, data: &B) -> Result<Value> {
        let result = self.client.post("/family/members", data).await;
        logged(self.client.logger(), "adding family member", result)
    }

    pub async fn update_family_member<B: Serialize + ?Sized>(
        &self,
        id: Id,
        data: &B,
    ) -> Result<Value> {
        let result = self
            .client
            .put(&format!("/family/members/{id}"), data)
            .await;
        logged(
            self.client.logger(),
            format_args!("updating family member {id}"),
            result,
        )
    }

    pub async fn delete_family_member(&self, id: Id) -> Result<Value> {
        let result = self.client.delete(&format!("/family/members/{id}")).await;
        logged(
            self.client.logger(),
            format_args!("deleting family member {id}"),
            result,
        )
    }
}
