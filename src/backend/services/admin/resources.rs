use serde::Serialize;
use serde_json::Value;

use crate::backend::api::ApiClient;
use crate::backend::api::models::Id;
use crate::backend::services::logged;
use crate::utils::Result;

/// Plain REST collection: list, show, create, update, delete.
#[derive(Debug, Clone)]
pub struct ResourceService {
    client: ApiClient,
    path: &'static str,
    label: &'static str,
}

impl ResourceService {
    pub fn new(client: ApiClient, path: &'static str, label: &'static str) -> Self {
        Self {
            client,
            path,
            label,
        }
    }

    pub fn path(&self) -> &'static str {
        self.path
    }

    pub async fn list(&self) -> Result<Value> {
        let result = self.client.get(self.path).await;
        logged(
            self.client.logger(),
            format_args!("fetching {} list", self.label),
            result,
        )
    }

    pub async fn get(&self, id: Id) -> Result<Value> {
        let result = self.client.get(&self.member(id)).await;
        logged(
            self.client.logger(),
            format_args!("fetching {} {id}", self.label),
            result,
        )
    }

    pub async fn create<B: Serialize + ?Sized>(&self, data: &B) -> Result<Value> {
        let result = self.client.post(self.path, data).await;
        logged(
            self.client.logger(),
            format_args!("creating {}", self.label),
            result,
        )
    }

    pub async fn update<B: Serialize + ?Sized>(&self, id: Id, data: &B) -> Result<Value> {
        let result = self.client.put(&self.member(id), data).await;
        logged(
            self.client.logger(),
            format_args!("updating {} {id}", self.label),
            result,
        )
    }

    pub async fn delete(&self, id: Id) -> Result<Value> {
        let result = self.client.delete(&self.member(id)).await;
        logged(
            self.client.logger(),
            format_args!("deleting {} {id}", self.label),
            result,
        )
    }

    fn member(&self, id: Id) -> String {
        format!("{}/{id}", self.path)
    }
}
