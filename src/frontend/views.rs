//! View registry: route view identifiers to view constructors.
//!
//! Views themselves are opaque to the portal. A registry entry only has to
//! produce a [`View`] handle for the matched route, or fail.

use std::collections::HashMap;
use std::sync::Arc;

use super::router::{ResolvedRoute, RouteParams, RouteTable};
use super::routes::RouteName;
use crate::utils::{Error, Result};

/// A mounted view.
#[derive(Debug, Clone, PartialEq)]
pub struct View {
    pub id: &'static str,
    pub route: Option<RouteName>,
    pub params: RouteParams,
}

pub type ViewFactory = Arc<dyn Fn(&ResolvedRoute) -> Result<View> + Send + Sync>;

#[derive(Clone, Default)]
pub struct ViewRegistry {
    factories: HashMap<&'static str, ViewFactory>,
}

impl ViewRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a plain handle factory for every view the table names.
    pub fn for_table(table: &RouteTable) -> Self {
        let mut registry = Self::new();
        let records = table.records().iter().chain([table.not_found()]);
        for view in records.filter_map(|record| record.view) {
            registry.register(view, Self::placeholder(view));
        }
        registry
    }

    /// A factory that hands back a bare handle for the matched route.
    pub fn placeholder(id: &'static str) -> ViewFactory {
        Arc::new(move |route: &ResolvedRoute| -> Result<View> {
            Ok(View {
                id,
                route: route.name(),
                params: route.params.clone(),
            })
        })
    }

    /// Adds or replaces the factory for `id`.
    pub fn register(&mut self, id: &'static str, factory: ViewFactory) {
        self.factories.insert(id, factory);
    }

    pub fn unregister(&mut self, id: &str) -> bool {
        self.factories.remove(id).is_some()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.factories.contains_key(id)
    }

    /// Builds every view along the matched chain, outermost layout first.
    pub fn mount(&self, route: &ResolvedRoute) -> Result<Vec<View>> {
        route
            .chain
            .iter()
            .filter_map(|record| record.view)
            .map(|id| {
                let factory = self.factories.get(id).ok_or_else(|| Error::Navigation {
                    path: route.path.clone(),
                    message: format!("view {id} is not registered"),
                })?;
                factory(route).map_err(|e| match e {
                    Error::Navigation { .. } => e,
                    other => Error::Navigation {
                        path: route.path.clone(),
                        message: format!("view {id} failed to load: {other}"),
                    },
                })
            })
            .collect()
    }
}
