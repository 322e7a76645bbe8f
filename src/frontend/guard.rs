//! Navigation guard.

use super::router::ResolvedRoute;
use super::routes::RouteName;
use crate::backend::session::Tenant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Proceed,
    Redirect(RouteName),
}

/// Decides whether a navigation may proceed.
///
/// A protected chain without its tenant's token goes to that tenant's login
/// page. A login or register page visited with a token goes to the tenant's
/// landing page. Everything else proceeds.
pub fn decide(route: &ResolvedRoute, has_token: impl Fn(Tenant) -> bool) -> GuardDecision {
    if let Some(tenant) = route.required_tenant()
        && !has_token(tenant)
    {
        return GuardDecision::Redirect(RouteName::login_for(tenant));
    }

    if let Some(tenant) = route.name().and_then(RouteName::auth_entry_for)
        && has_token(tenant)
    {
        return GuardDecision::Redirect(RouteName::landing_for(tenant));
    }

    GuardDecision::Proceed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::router::{RouteParams, RouteTable};
    use crate::frontend::routes::route_table;

    fn admin_only(tenant: Tenant) -> bool {
        tenant == Tenant::Admin
    }

    fn nobody(_: Tenant) -> bool {
        false
    }

    #[test]
    fn every_protected_route_redirects_without_token() {
        let table = RouteTable::compile(&route_table());
        for record in table.records() {
            let Some(name) = record.name else { continue };
            let params: RouteParams = [("id".to_string(), "1".to_string())].into();
            let Some(path) = table.path_for(name, &params) else {
                continue;
            };
            let route = table.resolve(&path);
            match route.required_tenant() {
                Some(tenant) => assert_eq!(
                    decide(&route, nobody),
                    GuardDecision::Redirect(RouteName::login_for(tenant)),
                    "{path} proceeded without a session"
                ),
                None => assert_eq!(decide(&route, nobody), GuardDecision::Proceed),
            }
        }
    }

    #[test]
    fn auth_entries_bounce_to_landing_with_token() {
        let table = RouteTable::compile(&route_table());
        let login = table.resolve("/login");
        let register = table.resolve("/register");
        assert_eq!(
            decide(&login, admin_only),
            GuardDecision::Redirect(RouteName::Dashboard)
        );
        assert_eq!(
            decide(&register, admin_only),
            GuardDecision::Redirect(RouteName::Dashboard)
        );

        let resident_login = table.resolve("/resident/login");
        assert_eq!(decide(&resident_login, admin_only), GuardDecision::Proceed);
        assert_eq!(
            decide(&resident_login, |_| true),
            GuardDecision::Redirect(RouteName::ResidentDashboard)
        );
    }

    #[test]
    fn tenants_do_not_unlock_each_other() {
        let table = RouteTable::compile(&route_table());
        let resident_page = table.resolve("/resident_pages/hotlines");
        assert_eq!(
            decide(&resident_page, admin_only),
            GuardDecision::Redirect(RouteName::ResidentLogin)
        );
        assert_eq!(
            decide(&table.resolve("/settings"), admin_only),
            GuardDecision::Proceed
        );
    }
}
