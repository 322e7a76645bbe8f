//! Application route table.

use std::fmt;

use crate::backend::session::Tenant;

macro_rules! route_names {
    ($($name:ident),* $(,)?) => {
        /// Every named route in the portal.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum RouteName {
            $($name),*
        }

        impl RouteName {
            pub const ALL: &'static [RouteName] = &[$(RouteName::$name),*];

            pub const fn as_str(self) -> &'static str {
                match self {
                    $(RouteName::$name => stringify!($name)),*
                }
            }
        }
    };
}

route_names! {
    ChooseRole,
    Login,
    Register,
    Dashboard,
    Predictions,
    PredictionCreate,
    PredictionShow,
    PredictionEdit,
    EvacuationAreas,
    EvacuationAreaCreate,
    EvacuationAreaShow,
    EvacuationAreaEdit,
    Facilities,
    FacilityCreate,
    FacilityShow,
    FacilityEdit,
    Families,
    FamilyCreate,
    FamilyShow,
    FamilyEdit,
    Updates,
    UpdateCreate,
    UpdateShow,
    UpdateEdit,
    EmergencyAlerts,
    EmergencyAlertCreate,
    EmergencyAlertShow,
    EmergencyAlertEdit,
    ReportEvacuation,
    ReportFacility,
    ReportPrediction,
    Settings,
    LoginHistory,
    ResidentLogin,
    ResidentRegister,
    ResidentDashboard,
    ResidentEvacuationList,
    ResidentRecommendArea,
    ResidentRegisterFamily,
    ResidentEvacuationDetail,
    ResidentFamilies,
    ResidentDisasterUpdates,
    ResidentDisasterUpdateDetail,
    ResidentDisasterPredictions,
    ResidentDisasterPredictionDetail,
    ResidentHotlines,
    NotFound,
}

impl RouteName {
    /// The tenant whose login or registration page this is.
    pub const fn auth_entry_for(self) -> Option<Tenant> {
        match self {
            Self::Login | Self::Register => Some(Tenant::Admin),
            Self::ResidentLogin | Self::ResidentRegister => Some(Tenant::Resident),
            _ => None,
        }
    }

    pub const fn login_for(tenant: Tenant) -> Self {
        match tenant {
            Tenant::Admin => Self::Login,
            Tenant::Resident => Self::ResidentLogin,
        }
    }

    pub const fn landing_for(tenant: Tenant) -> Self {
        match tenant {
            Tenant::Admin => Self::Dashboard,
            Tenant::Resident => Self::ResidentDashboard,
        }
    }
}

impl fmt::Display for RouteName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a redirecting route sends the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Redirect {
    /// Absolute, or relative to the redirecting route's own path.
    Path(&'static str),
    Name(RouteName),
}

/// One node of the route tree. Children inherit the parent's auth
/// requirement.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteDescriptor {
    pub path: &'static str,
    pub name: Option<RouteName>,
    pub view: Option<&'static str>,
    pub redirect: Option<Redirect>,
    pub requires_auth: Option<Tenant>,
    pub children: Vec<RouteDescriptor>,
}

impl RouteDescriptor {
    fn empty(path: &'static str) -> Self {
        Self {
            path,
            name: None,
            view: None,
            redirect: None,
            requires_auth: None,
            children: Vec::new(),
        }
    }

    pub fn page(path: &'static str, name: RouteName, view: &'static str) -> Self {
        Self {
            name: Some(name),
            view: Some(view),
            ..Self::empty(path)
        }
    }

    pub fn layout(path: &'static str, view: &'static str) -> Self {
        Self {
            view: Some(view),
            ..Self::empty(path)
        }
    }

    pub fn redirect(path: &'static str, to: Redirect) -> Self {
        Self {
            redirect: Some(to),
            ..Self::empty(path)
        }
    }

    pub fn requires_auth(mut self, tenant: Tenant) -> Self {
        self.requires_auth = Some(tenant);
        self
    }

    pub fn children(mut self, children: Vec<RouteDescriptor>) -> Self {
        self.children = children;
        self
    }
}

/// List, create, show and edit pages for one admin collection.
macro_rules! crud {
    (
        $base:literal,
        [$list:ident, $create:ident, $show:ident, $edit:ident $(,)?],
        [$lv:literal, $cv:literal, $sv:literal, $ev:literal $(,)?] $(,)?
    ) => {
        [
            RouteDescriptor::page($base, $list, $lv),
            RouteDescriptor::page(concat!($base, "/create"), $create, $cv),
            RouteDescriptor::page(concat!($base, "/:id"), $show, $sv),
            RouteDescriptor::page(concat!($base, "/:id/edit"), $edit, $ev),
        ]
    };
}

/// The full portal route table, in matching priority order.
pub fn route_table() -> Vec<RouteDescriptor> {
    use RouteName::*;

    let mut admin_pages = vec![RouteDescriptor::page(
        "dashboard",
        Dashboard,
        "pages/DashboardPage",
    )];
    admin_pages.extend(crud!(
        "predictions",
        [Predictions, PredictionCreate, PredictionShow, PredictionEdit],
        [
            "pages/PredictionsList",
            "pages/PredictionCreate",
            "pages/PredictionShow",
            "pages/PredictionEdit",
        ],
    ));
    admin_pages.extend(crud!(
        "evacuation-areas",
        [
            EvacuationAreas,
            EvacuationAreaCreate,
            EvacuationAreaShow,
            EvacuationAreaEdit,
        ],
        [
            "pages/EvacuationAreaList",
            "pages/EvacuationAreaCreate",
            "pages/EvacuationAreaView",
            "pages/EvacuationAreaEdit",
        ],
    ));
    admin_pages.extend(crud!(
        "facilities",
        [Facilities, FacilityCreate, FacilityShow, FacilityEdit],
        [
            "pages/FacilitiesList",
            "pages/FacilityCreate",
            "pages/FacilityShow",
            "pages/FacilityEdit",
        ],
    ));
    admin_pages.extend(crud!(
        "families",
        [Families, FamilyCreate, FamilyShow, FamilyEdit],
        [
            "pages/FamiliesList",
            "pages/FamilyCreate",
            "pages/FamilyShow",
            "pages/FamilyEdit",
        ],
    ));
    admin_pages.extend(crud!(
        "updates",
        [Updates, UpdateCreate, UpdateShow, UpdateEdit],
        [
            "pages/updates/UpdatesList",
            "pages/updates/UpdateCreate",
            "pages/updates/UpdateShow",
            "pages/updates/UpdateEdit",
        ],
    ));
    admin_pages.extend(crud!(
        "emergency-alerts",
        [
            EmergencyAlerts,
            EmergencyAlertCreate,
            EmergencyAlertShow,
            EmergencyAlertEdit,
        ],
        [
            "pages/EmergencyAlertsList",
            "pages/EmergencyAlertCreate",
            "pages/EmergencyAlertShow",
            "pages/EmergencyAlertEdit",
        ],
    ));
    admin_pages.push(
        RouteDescriptor::layout("reports", "pages/ReportPage").children(vec![
            RouteDescriptor::redirect("", Redirect::Name(ReportEvacuation)),
            RouteDescriptor::page("evacuation", ReportEvacuation, "pages/ReportEvacuation"),
            RouteDescriptor::page("facility", ReportFacility, "pages/ReportFacility"),
            RouteDescriptor::page("prediction", ReportPrediction, "pages/ReportPrediction"),
        ]),
    );
    admin_pages.push(RouteDescriptor::page(
        "settings",
        Settings,
        "pages/SettingsPage",
    ));
    admin_pages.push(RouteDescriptor::page(
        "login-history",
        LoginHistory,
        "pages/LoginHistoryPage",
    ));

    let resident_pages = vec![
        RouteDescriptor::redirect("", Redirect::Path("dashboard")),
        RouteDescriptor::page(
            "dashboard",
            ResidentDashboard,
            "pages/resident_pages/ResidentDashboardPage",
        ),
        RouteDescriptor::page(
            "evacuation-areas",
            ResidentEvacuationList,
            "pages/resident_pages/EvacuationAreaList",
        ),
        RouteDescriptor::page(
            "evacuation-areas/recommend",
            ResidentRecommendArea,
            "pages/resident_pages/RecommendArea",
        ),
        RouteDescriptor::page(
            "evacuation-areas/:id/register-family",
            ResidentRegisterFamily,
            "pages/resident_pages/RegisterFamily",
        ),
        RouteDescriptor::page(
            "evacuation-areas/:id",
            ResidentEvacuationDetail,
            "pages/resident_pages/EvacuationAreaDetail",
        ),
        RouteDescriptor::page(
            "families",
            ResidentFamilies,
            "pages/resident_pages/FamiliesList",
        ),
        RouteDescriptor::page(
            "disaster-updates",
            ResidentDisasterUpdates,
            "pages/resident_pages/DisasterUpdatesList",
        ),
        RouteDescriptor::page(
            "disaster-updates/:id",
            ResidentDisasterUpdateDetail,
            "pages/resident_pages/DisasterUpdateDetail",
        ),
        RouteDescriptor::page(
            "disaster-predictions",
            ResidentDisasterPredictions,
            "pages/resident_pages/DisasterPredictionsList",
        ),
        RouteDescriptor::page(
            "disaster-predictions/:id",
            ResidentDisasterPredictionDetail,
            "pages/resident_pages/DisasterPredictionDetail",
        ),
        RouteDescriptor::page(
            "hotlines",
            ResidentHotlines,
            "pages/resident_pages/Hotlines",
        ),
    ];

    vec![
        RouteDescriptor::redirect("/", Redirect::Path("/choose-role")),
        RouteDescriptor::page("/login", Login, "views/LoginView"),
        RouteDescriptor::page("/register", Register, "views/RegistrationView"),
        RouteDescriptor::layout("/", "layouts/LayoutMain")
            .requires_auth(Tenant::Admin)
            .children(admin_pages),
        RouteDescriptor::layout("/resident_pages", "layouts/ResidentLayout")
            .requires_auth(Tenant::Resident)
            .children(resident_pages),
        RouteDescriptor::page(
            "/resident/login",
            ResidentLogin,
            "views/resident/ResidentLoginView",
        ),
        RouteDescriptor::page(
            "/resident/register",
            ResidentRegister,
            "views/resident/ResidentRegisterView",
        ),
        RouteDescriptor::page("/choose-role", ChooseRole, "views/RoleSelect"),
    ]
}

/// Target of unmatched paths.
pub fn not_found_route() -> RouteDescriptor {
    RouteDescriptor::page("/:pathMatch", RouteName::NotFound, "views/NotFound")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn walk<'a>(routes: &'a [RouteDescriptor], out: &mut Vec<&'a RouteDescriptor>) {
        for route in routes {
            out.push(route);
            walk(&route.children, out);
        }
    }

    #[test]
    fn every_name_but_not_found_appears_once() {
        let table = route_table();
        let mut all = Vec::new();
        walk(&table, &mut all);

        for name in RouteName::ALL {
            let count = all.iter().filter(|r| r.name == Some(*name)).count();
            let expected = usize::from(*name != RouteName::NotFound);
            assert_eq!(count, expected, "route {name} appears {count} times");
        }
    }

    #[test]
    fn crud_builds_the_four_standard_paths() {
        let table = route_table();
        let admin = table
            .iter()
            .find(|r| r.view == Some("layouts/LayoutMain"))
            .unwrap();
        let paths: Vec<_> = admin
            .children
            .iter()
            .filter(|r| r.path.starts_with("families"))
            .map(|r| r.path)
            .collect();
        assert_eq!(
            paths,
            ["families", "families/create", "families/:id", "families/:id/edit"]
        );
    }

    #[test]
    fn auth_entries_map_to_tenants() {
        assert_eq!(RouteName::Register.auth_entry_for(), Some(Tenant::Admin));
        assert_eq!(
            RouteName::ResidentLogin.auth_entry_for(),
            Some(Tenant::Resident)
        );
        assert_eq!(RouteName::Dashboard.auth_entry_for(), None);
        assert_eq!(RouteName::landing_for(Tenant::Resident), RouteName::ResidentDashboard);
    }
}
