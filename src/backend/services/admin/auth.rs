use serde::Serialize;
use serde_json::Value;

use crate::backend::api::models::{AuthResponse, Credentials};
use crate::backend::api::{ApiClient, Query};
use crate::backend::services::logged;
use crate::backend::session::Session;
use crate::utils::Result;

/// Admin login, registration and raw passthrough calls.
#[derive(Debug, Clone)]
pub struct AdminAuthService {
    client: ApiClient,
    session: Session,
}

impl AdminAuthService {
    pub fn new(client: ApiClient, session: Session) -> Self {
        Self { client, session }
    }

    /// `POST /login`; stores the returned token on success.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse> {
        let credentials = Credentials {
            email: email.to_string(),
            password: password.to_string(),
        };
        let result = self.client.post::<_, AuthResponse>("/login", &credentials).await;
        let auth = logged(self.client.logger(), "logging in", result)?;
        self.set_token(Some(&auth.token))?;
        Ok(auth)
    }

    pub async fn register<B: Serialize + ?Sized>(&self, body: &B) -> Result<Value> {
        let result = self.client.post("/register", body).await;
        logged(self.client.logger(), "registering", result)
    }

    pub async fn post<B: Serialize + ?Sized>(&self, endpoint: &str, body: &B) -> Result<Value> {
        let result = self.client.post(endpoint, body).await;
        logged(self.client.logger(), format_args!("posting to {endpoint}"), result)
    }

    pub async fn get(&self, endpoint: &str, query: Query) -> Result<Value> {
        let result = self.client.get_with(endpoint, query).await;
        logged(self.client.logger(), format_args!("fetching {endpoint}"), result)
    }

    /// Local only: the admin backend has no logout endpoint.
    pub fn logout(&self) -> Result<()> {
        self.session.clear()
    }

    /// Stores `token`, or clears the session when `None`.
    pub fn set_token(&self, token: Option<&str>) -> Result<()> {
        self.session.set_token(token)
    }

    pub fn is_logged_in(&self) -> bool {
        self.session.has_token()
    }
}
