use serde::Serialize;
use serde_json::Value;

use crate::backend::api::ApiClient;
use crate::backend::api::models::{AuthResponse, Credentials};
use crate::backend::services::logged;
use crate::backend::session::Session;
use crate::log_warn;
use crate::utils::Result;

#[derive(Debug, Clone)]
pub struct ResidentAuthService {
    client: ApiClient,
    session: Session,
}

impl ResidentAuthService {
    pub fn new(client: ApiClient, session: Session) -> Self {
        Self { client, session }
    }

    pub async fn register<B: Serialize + ?Sized>(&self, data: &B) -> Result<Value> {
        let result = self.client.post("/auth/register", data).await;
        logged(self.client.logger(), "registering resident", result)
    }

    /// Stores `resident_token` and, when the backend sends one,
    /// `resident_user`.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse> {
        let credentials = Credentials {
            email: email.to_string(),
            password: password.to_string(),
        };
        let result = self
            .client
            .post::<_, AuthResponse>("/auth/login", &credentials)
            .await;
        let auth = logged(self.client.logger(), "logging in resident", result)?;
        self.session.set_token(Some(&auth.token))?;
        if let Some(user) = &auth.user {
            self.session.set_user(user)?;
        }
        Ok(auth)
    }

    /// Ends the session on the server, then locally. The local session is
    /// cleared even when the server call fails.
    pub async fn logout(&self) -> Result<()> {
        let result = self.client.post_empty::<Value>("/auth/logout").await;
        if let Err(e) = &result {
            log_warn!(
                self.client.logger(),
                "services",
                "Resident logout request failed, clearing local session anyway: {e}"
            );
        }
        self.session.clear()
    }

    pub async fn get_current_user(&self) -> Result<Value> {
        let result = self.client.get("/auth/me").await;
        logged(self.client.logger(), "fetching current resident", result)
    }

    pub async fn update_profile<B: Serialize + ?Sized>(&self, data: &B) -> Result<Value> {
        let result = self.client.put("/auth/profile", data).await;
        logged(self.client.logger(), "updating resident profile", result)
    }

    /// The `resident_user` cached at login.
    pub fn cached_user(&self) -> Option<Value> {
        self.session.user()
    }

    pub fn is_logged_in(&self) -> bool {
        self.session.has_token()
    }
}
