use serde::Serialize;
use serde_json::Value;

use crate::backend::api::ApiClient;
use crate::backend::api::models::Id;
use crate::backend::services::logged;
use crate::utils::Result;

#[derive(Debug, Clone)]
pub struct FamilyService {
    client: ApiClient,
}

impl FamilyService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn get_all(&self) -> Result<Value> {
        let result = self.client.get("/families").await;
        logged(self.client.logger(), "fetching families", result)
    }

    pub async fn get_by_id(&self, id: Id) -> Result<Value> {
        let result = self.client.get(&format!("/families/{id}")).await;
        logged(self.client.logger(), format_args!("fetching family {id}"), result)
    }

    pub async fn create<B: Serialize + ?Sized>(&self, data: &B) -> Result<Value> {
        let result = self.client.post("/families", data).await;
        logged(self.client.logger(), "creating family", result)
    }

    pub async fn update<B: Serialize + ?Sized>(&self, id: Id, data: &B) -> Result<Value> {
        let result = self.client.put(&format!("/families/{id}"), data).await;
        logged(self.client.logger(), format_args!("updating family {id}"), result)
    }

    pub async fn delete(&self, id: Id) -> Result<Value> {
        let result = self.client.delete(&format!("/families/{id}")).await;
        logged(self.client.logger(), format_args!("deleting family {id}"), result)
    }

    /// Marks the family as having left its evacuation area.
    pub async fn checkout_family(&self, family_id: Id) -> Result<Value> {
        let result = self
            .client
            .post_empty(&format!("/families/{family_id}/checkout"))
            .await;
        logged(
            self.client.logger(),
            format_args!("checking out family {family_id}"),
            result,
        )
    }
}
