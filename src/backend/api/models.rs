//! Wire models shared by both backends.
//!
//! Only request payloads and the login answer are typed. Records and lists
//! come back as `serde_json::Value`, exactly as the backend sent them.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub type Id = u64;

/// Fallback forecast value the recommendation endpoint expects when the
/// caller has no prediction of its own.
pub const DEFAULT_PREDICTED: f64 = 29.41;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Login answer from either backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthResponse {
    #[serde(alias = "access_token")]
    pub token: String,
    #[serde(default)]
    pub user: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The three resident dashboard feeds, fetched together.
#[derive(Debug, Clone, PartialEq)]
pub struct ResidentOverview {
    pub dashboard: Value,
    pub evacuation_info: Value,
    pub alerts: Value,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn auth_response_accepts_access_token_alias() {
        let auth: AuthResponse =
            serde_json::from_value(json!({ "access_token": "abc", "token_type": "Bearer" }))
                .unwrap();
        assert_eq!(auth.token, "abc");
        assert_eq!(auth.user, None);
        assert_eq!(auth.extra["token_type"], json!("Bearer"));
    }
}
