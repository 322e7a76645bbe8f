//! The portal: one place that owns the router, the session and both APIs.

use std::sync::Arc;

use super::guard::{self, GuardDecision};
use super::navigator::HistoryNavigator;
use super::router::{ResolvedRoute, RouteTable, normalize_path};
use super::routes::route_table;
use super::services::context::AuthState;
use super::views::{View, ViewRegistry};
use crate::backend::api::{ApiClient, Transport};
use crate::backend::services::{AdminServices, ResidentServices};
use crate::backend::session::{Session, SharedStore, Tenant};
use crate::backend::utils::config::AppConfig;
use crate::utils::logging::SharedLogger;
use crate::utils::{Error, Result};
use crate::{log_debug, log_error, log_info, log_warn};

/// Redirect hops allowed for a single navigation.
pub const MAX_REDIRECTS: usize = 10;

pub type ErrorHook = Box<dyn Fn(&Error) + Send + Sync>;

/// Where the portal currently is.
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub path: String,
    pub route: ResolvedRoute,
    pub views: Vec<View>,
}

pub struct Portal {
    config: AppConfig,
    store: SharedStore,
    logger: SharedLogger,
    navigator: Arc<HistoryNavigator>,
    routes: RouteTable,
    views: ViewRegistry,
    admin: AdminServices,
    resident: ResidentServices,
    current: Option<Location>,
    error_hooks: Vec<ErrorHook>,
}

impl Portal {
    pub fn new(config: AppConfig, store: SharedStore, logger: SharedLogger) -> Result<Self> {
        Self::with_transports(config, store, logger, None, None)
    }

    /// Builds the portal with explicit transports for either backend.
    pub fn with_transports(
        config: AppConfig,
        store: SharedStore,
        logger: SharedLogger,
        admin_transport: Option<Arc<dyn Transport>>,
        resident_transport: Option<Arc<dyn Transport>>,
    ) -> Result<Self> {
        let navigator = Arc::new(HistoryNavigator::new());
        let admin_client = ApiClient::for_tenant(
            Tenant::Admin,
            &config,
            store.clone(),
            navigator.clone(),
            logger.clone(),
            admin_transport,
        )?;
        let resident_client = ApiClient::for_tenant(
            Tenant::Resident,
            &config,
            store.clone(),
            navigator.clone(),
            logger.clone(),
            resident_transport,
        )?;

        let routes = RouteTable::compile(&route_table());
        let views = ViewRegistry::for_table(&routes);

        Ok(Self {
            admin: AdminServices::new(admin_client, store.clone()),
            resident: ResidentServices::new(resident_client, store.clone()),
            config,
            store,
            logger,
            navigator,
            routes,
            views,
            current: None,
            error_hooks: Vec::new(),
        })
    }

    pub const fn config(&self) -> &AppConfig {
        &self.config
    }

    pub const fn admin(&self) -> &AdminServices {
        &self.admin
    }

    pub const fn resident(&self) -> &ResidentServices {
        &self.resident
    }

    pub const fn routes(&self) -> &RouteTable {
        &self.routes
    }

    pub const fn views_mut(&mut self) -> &mut ViewRegistry {
        &mut self.views
    }

    pub fn navigator(&self) -> &HistoryNavigator {
        &self.navigator
    }

    pub const fn current(&self) -> Option<&Location> {
        self.current.as_ref()
    }

    pub fn auth_state(&self) -> AuthState {
        AuthState::load(&self.store)
    }

    /// Registers a callback run for every failed navigation.
    pub fn on_error(&mut self, hook: impl Fn(&Error) + Send + Sync + 'static) {
        self.error_hooks.push(Box::new(hook));
    }

    /// Navigates to `path`, following route redirects and guard decisions.
    /// On failure the current location is left as it was.
    pub fn navigate(&mut self, path: &str) -> Result<&Location> {
        let requested = normalize_path(path);
        let mut target = requested.clone();

        for _ in 0..=MAX_REDIRECTS {
            let route = self.routes.resolve(&target);
            self.log_route(&route);

            if let Some(next) = self.routes.redirect_target(&route) {
                target = next;
                continue;
            }

            let has_token = |tenant: Tenant| Session::new(self.store.clone(), tenant).has_token();
            match guard::decide(&route, has_token) {
                GuardDecision::Proceed => return self.enter(route),
                GuardDecision::Redirect(name) => {
                    let Some(next) = self.routes.path_for(name, &route.params) else {
                        return Err(self.fail(Error::Navigation {
                            path: route.path,
                            message: format!("no path for route {name}"),
                        }));
                    };
                    log_info!(self.logger, "router", "Guard redirected {} to {next}", route.path);
                    target = next;
                }
            }
        }

        Err(self.fail(Error::Navigation {
            path: requested,
            message: format!("more than {MAX_REDIRECTS} redirects"),
        }))
    }

    /// Follows the latest navigation forced by an API client, if any.
    pub fn follow_forced(&mut self) -> Result<Option<&Location>> {
        match self.navigator.take_forced() {
            Some(path) => self.navigate(&path).map(Some),
            None => Ok(None),
        }
    }

    pub async fn login_admin(&mut self, email: &str, password: &str) -> Result<&Location> {
        let result = self.admin.auth.login(email, password).await;
        if let Err(e) = result {
            self.follow_forced()?;
            return Err(e);
        }
        self.navigate(Tenant::Admin.landing_path())
    }

    pub fn logout_admin(&mut self) -> Result<&Location> {
        self.admin.auth.logout()?;
        self.navigate(Tenant::Admin.login_path())
    }

    pub async fn login_resident(&mut self, email: &str, password: &str) -> Result<&Location> {
        let result = self.resident.auth.login(email, password).await;
        if let Err(e) = result {
            self.follow_forced()?;
            return Err(e);
        }
        self.navigate(Tenant::Resident.landing_path())
    }

    pub async fn logout_resident(&mut self) -> Result<&Location> {
        self.resident.auth.logout().await?;
        self.navigate(Tenant::Resident.login_path())
    }

    fn enter(&mut self, route: ResolvedRoute) -> Result<&Location> {
        let views = match self.views.mount(&route) {
            Ok(views) => views,
            Err(e) => return Err(self.fail(e)),
        };
        let location = Location {
            path: route.path.clone(),
            route,
            views,
        };
        Ok(self.current.insert(location))
    }

    fn log_route(&self, route: &ResolvedRoute) {
        let chain = route
            .chain
            .iter()
            .map(|record| record.full_path.as_str())
            .collect::<Vec<_>>()
            .join(" > ");
        log_debug!(
            self.logger,
            "router",
            "Navigating to {} (name: {:?}, params: {:?}, matched: {chain})",
            route.path,
            route.name().map(|name| name.as_str()),
            route.params
        );
        if route.is_not_found() {
            log_warn!(self.logger, "router", "No route matches {}", route.path);
        }
    }

    fn fail(&self, error: Error) -> Error {
        for hook in &self.error_hooks {
            hook(&error);
        }
        log_error!(self.logger, "router", "Router error: {error}");
        error
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::api::{ApiRequest, ApiResponse};
    use crate::backend::session::{MemoryStore, SessionStore};
    use crate::frontend::navigator::Navigator;
    use crate::frontend::routes::RouteName;
    use crate::simple_error;
    use crate::utils::logging::LogFacade;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct Offline;

    #[async_trait]
    impl Transport for Offline {
        async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
            Err(Error::transport(&request.url, "offline"))
        }
    }

    fn portal(store: &SharedStore) -> Portal {
        Portal::with_transports(
            AppConfig::default(),
            store.clone(),
            Arc::new(LogFacade),
            Some(Arc::new(Offline)),
            Some(Arc::new(Offline)),
        )
        .unwrap()
    }

    #[test]
    fn root_lands_on_choose_role() {
        let store: SharedStore = Arc::new(MemoryStore::new());
        let mut portal = portal(&store);
        let location = portal.navigate("/").unwrap();
        assert_eq!(location.path, "/choose-role");
        assert_eq!(location.route.name(), Some(RouteName::ChooseRole));
    }

    #[test]
    fn protected_pages_redirect_to_tenant_login() {
        let store: SharedStore = Arc::new(MemoryStore::new());
        let mut portal = portal(&store);
        assert_eq!(portal.navigate("/families/3").unwrap().path, "/login");
        assert_eq!(
            portal.navigate("/resident_pages/hotlines").unwrap().path,
            "/resident/login"
        );
    }

    #[test]
    fn signed_in_users_skip_login() {
        let store: SharedStore = Arc::new(MemoryStore::new());
        store.set("token", "abc123").unwrap();
        let mut portal = portal(&store);
        assert_eq!(portal.navigate("/login").unwrap().path, "/dashboard");
        assert_eq!(portal.navigate("/reports").unwrap().path, "/reports/evacuation");
    }

    #[test]
    fn failed_navigation_keeps_location_and_runs_hooks() {
        let store: SharedStore = Arc::new(MemoryStore::new());
        store.set("token", "abc123").unwrap();
        let mut portal = portal(&store);
        portal.navigate("/dashboard").unwrap();

        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        portal.on_error(move |e| sink.lock().unwrap().push(e.to_string()));
        portal.views_mut().register(
            "pages/SettingsPage",
            Arc::new(|_: &ResolvedRoute| -> Result<View> { Err(simple_error!("broken")) }),
        );

        assert!(portal.navigate("/settings").is_err());
        assert_eq!(portal.current().unwrap().path, "/dashboard");
        assert_eq!(seen.lock().unwrap().len(), 1);
    }

    #[test]
    fn forced_navigation_is_followed_once() {
        let store: SharedStore = Arc::new(MemoryStore::new());
        let mut portal = portal(&store);
        portal.navigator.force("/resident/login");

        let location = portal.follow_forced().unwrap().unwrap();
        assert_eq!(location.route.name(), Some(RouteName::ResidentLogin));
        assert!(portal.follow_forced().unwrap().is_none());
    }
}
