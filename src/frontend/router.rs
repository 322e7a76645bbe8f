//! Compiled route table and path resolution.

use std::collections::{BTreeMap, HashMap};

use matchit::Router as Matcher;

use super::routes::{Redirect, RouteDescriptor, RouteName, not_found_route};
use crate::backend::session::Tenant;

pub type RouteParams = BTreeMap<String, String>;

/// A route tree node flattened to its absolute path.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteRecord {
    pub full_path: String,
    pub name: Option<RouteName>,
    pub view: Option<&'static str>,
    pub redirect: Option<Redirect>,
    pub requires_auth: Option<Tenant>,
}

/// The outcome of matching one path: the record chain from the outermost
/// layout down to the matched route, plus its parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedRoute {
    pub path: String,
    pub chain: Vec<RouteRecord>,
    pub params: RouteParams,
}

impl ResolvedRoute {
    pub fn leaf(&self) -> &RouteRecord {
        // Chains always hold at least the matched record
        &self.chain[self.chain.len() - 1]
    }

    pub fn name(&self) -> Option<RouteName> {
        self.leaf().name
    }

    /// The first ancestor's auth requirement; children inherit it.
    pub fn required_tenant(&self) -> Option<Tenant> {
        self.chain.iter().find_map(|record| record.requires_auth)
    }

    pub fn is_not_found(&self) -> bool {
        self.name() == Some(RouteName::NotFound)
    }
}

pub struct RouteTable {
    records: Vec<RouteRecord>,
    matcher: Matcher<Vec<usize>>,
    by_name: HashMap<RouteName, usize>,
    not_found: RouteRecord,
    rejected: Vec<String>,
}

impl RouteTable {
    /// Flattens the tree. When two routes share a full path the earlier one
    /// wins, and nested routes are tried before their parent.
    pub fn compile(routes: &[RouteDescriptor]) -> Self {
        let mut table = Self {
            records: Vec::new(),
            matcher: Matcher::new(),
            by_name: HashMap::new(),
            not_found: flatten_record(&not_found_route(), ""),
            rejected: Vec::new(),
        };
        for route in routes {
            table.add(route, "", &[]);
        }
        table
    }

    fn add(&mut self, route: &RouteDescriptor, parent_path: &str, ancestors: &[usize]) {
        let full_path = join_paths(parent_path, route.path);
        let index = self.records.len();
        self.records.push(flatten_record(route, parent_path));
        if let Some(name) = route.name {
            self.by_name.entry(name).or_insert(index);
        }

        let mut chain = ancestors.to_vec();
        chain.push(index);

        for child in &route.children {
            self.add(child, &full_path, &chain);
        }

        if route.view.is_some() || route.redirect.is_some() {
            let pattern = to_matcher_syntax(&full_path);
            match self.matcher.insert(pattern.clone(), chain) {
                Ok(()) => {}
                // Same path again: the first owner keeps it
                Err(matchit::InsertError::Conflict { with }) if with == pattern => {}
                Err(e) => {
                    log::warn!("Route {full_path} is unreachable: {e}");
                    self.rejected.push(full_path);
                }
            }
        }
    }

    /// Paths the matcher refused for reasons other than an exact duplicate.
    pub fn rejected(&self) -> &[String] {
        &self.rejected
    }

    pub fn records(&self) -> &[RouteRecord] {
        &self.records
    }

    pub fn not_found(&self) -> &RouteRecord {
        &self.not_found
    }

    /// Matches `path`. Unknown paths resolve to the `NotFound` route.
    pub fn resolve(&self, path: &str) -> ResolvedRoute {
        let path = normalize_path(path);
        match self.matcher.at(&path) {
            Ok(matched) => ResolvedRoute {
                chain: matched
                    .value
                    .iter()
                    .map(|&index| self.records[index].clone())
                    .collect(),
                params: matched
                    .params
                    .iter()
                    .map(|(key, value)| (key.to_string(), value.to_string()))
                    .collect(),
                path,
            },
            Err(_) => ResolvedRoute {
                chain: vec![self.not_found.clone()],
                params: RouteParams::from([("pathMatch".to_string(), path.clone())]),
                path,
            },
        }
    }

    pub fn record(&self, name: RouteName) -> Option<&RouteRecord> {
        self.by_name.get(&name).map(|&index| &self.records[index])
    }

    /// Builds a concrete path for `name`, filling `:param` segments.
    pub fn path_for(&self, name: RouteName, params: &RouteParams) -> Option<String> {
        let record = self.record(name)?;
        fill_params(&record.full_path, params)
    }

    /// Where a redirecting route sends the user, if it redirects.
    pub fn redirect_target(&self, route: &ResolvedRoute) -> Option<String> {
        let leaf = route.leaf();
        match leaf.redirect? {
            Redirect::Path(target) if target.starts_with('/') => Some(target.to_string()),
            Redirect::Path(target) => Some(join_paths(&leaf.full_path, target)),
            Redirect::Name(name) => self.path_for(name, &route.params),
        }
    }
}

fn flatten_record(route: &RouteDescriptor, parent_path: &str) -> RouteRecord {
    RouteRecord {
        full_path: join_paths(parent_path, route.path),
        name: route.name,
        view: route.view,
        redirect: route.redirect,
        requires_auth: route.requires_auth,
    }
}

fn join_paths(parent: &str, path: &str) -> String {
    if path.starts_with('/') {
        return path.to_string();
    }
    if path.is_empty() {
        return if parent.is_empty() {
            "/".to_string()
        } else {
            parent.to_string()
        };
    }
    format!("{}/{path}", parent.trim_end_matches('/'))
}

/// Strips query and fragment, forces a leading slash, drops trailing ones.
pub fn normalize_path(path: &str) -> String {
    let path = path
        .split(['?', '#'])
        .next()
        .unwrap_or_default()
        .trim();
    let trimmed = path.trim_matches('/');
    format!("/{trimmed}")
}

fn to_matcher_syntax(path: &str) -> String {
    path.split('/')
        .map(|segment| match segment.strip_prefix(':') {
            Some(param) => format!("{{{param}}}"),
            None => segment.to_string(),
        })
        .collect::<Vec<_>>()
        .join("/")
}

fn fill_params(path: &str, params: &RouteParams) -> Option<String> {
    let segments = path
        .split('/')
        .map(|segment| match segment.strip_prefix(':') {
            Some(param) => params.get(param).cloned(),
            None => Some(segment.to_string()),
        })
        .collect::<Option<Vec<_>>>()?;
    Some(segments.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::routes::route_table;

    fn table() -> RouteTable {
        RouteTable::compile(&route_table())
    }

    #[test]
    fn path_helpers() {
        assert_eq!(join_paths("/", "dashboard"), "/dashboard");
        assert_eq!(join_paths("/resident_pages", ""), "/resident_pages");
        assert_eq!(join_paths("/resident_pages", "/login"), "/login");
        assert_eq!(normalize_path("families/3/?tab=members"), "/families/3");
        assert_eq!(normalize_path(""), "/");
        assert_eq!(to_matcher_syntax("/families/:id/edit"), "/families/{id}/edit");
    }

    #[test]
    fn duplicate_paths_are_not_rejected() {
        assert!(table().rejected().is_empty());
    }

    #[test]
    fn clashing_params_are_reported() {
        let table = RouteTable::compile(&[
            RouteDescriptor::page("/families/:id", RouteName::FamilyShow, "pages/FamilyShow"),
            RouteDescriptor::page("/families/:id", RouteName::FamilyEdit, "pages/FamilyEdit"),
            RouteDescriptor::page("/families/:slug", RouteName::Families, "pages/Families"),
        ]);
        assert_eq!(table.rejected(), ["/families/:slug"]);
        assert_eq!(table.resolve("/families/4").name(), Some(RouteName::FamilyShow));
    }

    #[test]
    fn root_redirect_wins_over_admin_layout() {
        let table = table();
        let route = table.resolve("/");
        assert_eq!(route.chain.len(), 1);
        assert_eq!(table.redirect_target(&route).as_deref(), Some("/choose-role"));
    }

    #[test]
    fn nested_pages_carry_their_layout() {
        let route = table().resolve("/families/12/edit");
        assert_eq!(route.name(), Some(RouteName::FamilyEdit));
        assert_eq!(route.params.get("id").map(String::as_str), Some("12"));
        assert_eq!(route.chain[0].view, Some("layouts/LayoutMain"));
        assert_eq!(route.required_tenant(), Some(Tenant::Admin));
    }

    #[test]
    fn static_segments_beat_params() {
        let table = table();
        assert_eq!(
            table.resolve("/evacuation-areas/create").name(),
            Some(RouteName::EvacuationAreaCreate)
        );
        assert_eq!(
            table.resolve("/resident_pages/evacuation-areas/recommend").name(),
            Some(RouteName::ResidentRecommendArea)
        );
        assert_eq!(
            table
                .resolve("/resident_pages/evacuation-areas/4/register-family")
                .name(),
            Some(RouteName::ResidentRegisterFamily)
        );
    }

    #[test]
    fn empty_children_redirect() {
        let table = table();
        let reports = table.resolve("/reports/");
        assert_eq!(reports.chain.len(), 3);
        assert_eq!(
            table.redirect_target(&reports).as_deref(),
            Some("/reports/evacuation")
        );

        let resident = table.resolve("/resident_pages");
        assert_eq!(
            table.redirect_target(&resident).as_deref(),
            Some("/resident_pages/dashboard")
        );
    }

    #[test]
    fn unknown_paths_resolve_to_not_found() {
        let route = table().resolve("/no/such/page");
        assert!(route.is_not_found());
        assert_eq!(route.required_tenant(), None);
        assert_eq!(
            route.params.get("pathMatch").map(String::as_str),
            Some("/no/such/page")
        );
    }

    #[test]
    fn path_for_fills_params() {
        let table = table();
        let params = RouteParams::from([("id".to_string(), "9".to_string())]);
        assert_eq!(
            table.path_for(RouteName::PredictionShow, &params).as_deref(),
            Some("/predictions/9")
        );
        assert_eq!(table.path_for(RouteName::PredictionShow, &RouteParams::new()), None);
        assert_eq!(
            table.path_for(RouteName::Dashboard, &RouteParams::new()).as_deref(),
            Some("/dashboard")
        );
    }
}
