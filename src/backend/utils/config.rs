use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::backend::session::Tenant;
use crate::utils::{Error, Result};

pub const DEFAULT_ADMIN_API_URL: &str = "http://127.0.0.1:8000/api";
pub const DEFAULT_RESIDENT_API_URL: &str = "http://127.0.0.1:8001/api";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub admin: ApiConfig,
    pub resident: ApiConfig,
    pub http: HttpConfig,
    /// Session file location. Defaults to the user data directory.
    pub session_file: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    /// Fallback bearer token baked into the client's default headers.
    pub static_token: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub retry: RetryPolicy,
    /// No timeout when unset.
    pub timeout_secs: Option<u64>,
}

/// Retries apply to transport failures of idempotent requests only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub backoff_ms: u64,
}

impl RetryPolicy {
    pub const fn none() -> Self {
        Self {
            max_retries: 0,
            backoff_ms: 0,
        }
    }

    /// Delay before retry number `attempt` (1-based).
    pub const fn delay(&self, attempt: u32) -> Duration {
        Duration::from_millis(self.backoff_ms.saturating_mul(attempt as u64))
    }
}

impl HttpConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

impl ApiConfig {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: normalize_base_url(base_url),
            static_token: None,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            admin: ApiConfig::new(DEFAULT_ADMIN_API_URL),
            resident: ApiConfig::new(DEFAULT_RESIDENT_API_URL),
            http: HttpConfig::default(),
            session_file: None,
        }
    }
}

impl AppConfig {
    /// Builds the configuration from process environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let mut config = Self::default();

        if let Some(url) = var("ADMIN_API_URL") {
            config.admin.base_url = normalize_base_url(&url);
        }
        if let Some(url) = var("RESIDENT_API_URL") {
            config.resident.base_url = normalize_base_url(&url);
        }
        config.admin.static_token = var("ADMIN_API_TOKEN");
        config.resident.static_token = var("RESIDENT_API_TOKEN");
        config.session_file = var("EVAC_SESSION_FILE").map(PathBuf::from);

        if let Some(retries) = var("EVAC_HTTP_RETRIES") {
            config.http.retry.max_retries = parse_number("EVAC_HTTP_RETRIES", &retries)?;
        }
        if let Some(backoff) = var("EVAC_HTTP_RETRY_BACKOFF_MS") {
            config.http.retry.backoff_ms = parse_number("EVAC_HTTP_RETRY_BACKOFF_MS", &backoff)?;
        }
        if let Some(timeout) = var("EVAC_HTTP_TIMEOUT_SECS") {
            config.http.timeout_secs = Some(parse_number("EVAC_HTTP_TIMEOUT_SECS", &timeout)?);
        }

        Ok(config)
    }

    /// Loads a JSON configuration file. Missing fields take their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("cannot read {}: {e}", path.display())))?;
        let mut config: Self = serde_json::from_str(&content)
            .map_err(|e| Error::Config(format!("invalid {}: {e}", path.display())))?;
        config.admin.base_url = normalize_base_url(&config.admin.base_url);
        config.resident.base_url = normalize_base_url(&config.resident.base_url);
        Ok(config)
    }

    pub const fn api(&self, tenant: Tenant) -> &ApiConfig {
        match tenant {
            Tenant::Admin => &self.admin,
            Tenant::Resident => &self.resident,
        }
    }
}

fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| Error::Config(format!("{key} must be a number, got {value:?}")))
}
