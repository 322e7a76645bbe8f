//! Session context shared by the router and the API clients.
//!
//! Sessions live in a [`SessionStore`] injected at construction. Each tenant
//! owns its own keys, so the admin and resident sessions never collide.

mod store;

pub use store::{FileStore, MemoryStore};

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::utils::Result;

/// Key/value persistence for session state.
pub trait SessionStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

pub type SharedStore = Arc<dyn SessionStore>;

/// The two user populations served by separate backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tenant {
    Admin,
    Resident,
}

impl Tenant {
    pub const fn token_key(self) -> &'static str {
        match self {
            Self::Admin => "token",
            Self::Resident => "resident_token",
        }
    }

    pub const fn user_key(self) -> Option<&'static str> {
        match self {
            Self::Admin => None,
            Self::Resident => Some("resident_user"),
        }
    }

    /// Where a missing or rejected session sends the user.
    pub const fn login_path(self) -> &'static str {
        match self {
            Self::Admin => "/login",
            Self::Resident => "/resident/login",
        }
    }

    pub const fn landing_path(self) -> &'static str {
        match self {
            Self::Admin => "/dashboard",
            Self::Resident => "/resident_pages/dashboard",
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Resident => "resident",
        }
    }
}

impl fmt::Display for Tenant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One tenant's view of the session store.
#[derive(Clone)]
pub struct Session {
    store: SharedStore,
    tenant: Tenant,
}

impl Session {
    pub fn new(store: SharedStore, tenant: Tenant) -> Self {
        Self { store, tenant }
    }

    pub const fn tenant(&self) -> Tenant {
        self.tenant
    }

    /// The bearer token, if one is stored. Empty strings count as absent.
    pub fn token(&self) -> Option<String> {
        self.store
            .get(self.tenant.token_key())
            .filter(|token| !token.is_empty())
    }

    pub fn has_token(&self) -> bool {
        self.token().is_some()
    }

    /// Stores the token, or removes it when `None`.
    pub fn set_token(&self, token: Option<&str>) -> Result<()> {
        match token {
            Some(token) if !token.is_empty() => self.store.set(self.tenant.token_key(), token),
            _ => self.store.remove(self.tenant.token_key()),
        }
    }

    /// The cached user profile. Corrupt entries read as absent.
    pub fn user<T: DeserializeOwned>(&self) -> Option<T> {
        let key = self.tenant.user_key()?;
        let raw = self.store.get(key)?;
        serde_json::from_str(&raw).ok()
    }

    pub fn set_user<T: Serialize>(&self, user: &T) -> Result<()> {
        if let Some(key) = self.tenant.user_key() {
            let json = serde_json::to_string(user)?;
            self.store.set(key, &json)?;
        }
        Ok(())
    }

    /// Removes every key this tenant owns.
    pub fn clear(&self) -> Result<()> {
        self.store.remove(self.tenant.token_key())?;
        if let Some(key) = self.tenant.user_key() {
            self.store.remove(key)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("tenant", &self.tenant)
            .field("has_token", &self.has_token())
            .finish()
    }
}
