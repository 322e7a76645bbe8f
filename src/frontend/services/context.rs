//! Authentication context and state snapshot.

use serde_json::Value;

use crate::backend::session::{Session, SharedStore, Tenant};

/// Who is signed in, as read from the session store.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthState {
    pub admin_authenticated: bool,
    pub resident_authenticated: bool,
    pub resident_user: Option<Value>,
}

impl AuthState {
    /// Reads both tenants' sessions.
    pub fn load(store: &SharedStore) -> Self {
        let admin = Session::new(store.clone(), Tenant::Admin);
        let resident = Session::new(store.clone(), Tenant::Resident);
        Self {
            admin_authenticated: admin.has_token(),
            resident_authenticated: resident.has_token(),
            resident_user: resident.user(),
        }
    }

    pub const fn is_authenticated(&self, tenant: Tenant) -> bool {
        match tenant {
            Tenant::Admin => self.admin_authenticated,
            Tenant::Resident => self.resident_authenticated,
        }
    }

    /// The resident's display name or "Guest" when unknown.
    pub fn get_username(&self) -> String {
        self.resident_user
            .as_ref()
            .and_then(|user| {
                user.get("name")
                    .or_else(|| user.get("email"))
                    .and_then(Value::as_str)
            })
            .map_or_else(|| "Guest".to_string(), ToString::to_string)
    }
}
