//! Forced navigation requests coming from outside the router.

use std::collections::VecDeque;
use std::sync::Mutex;

/// Forced navigations kept in [`HistoryNavigator::history`].
pub const HISTORY_LIMIT: usize = 32;

/// Receives navigations that must happen regardless of the current view,
/// such as the jump to a login page after a rejected session.
pub trait Navigator: Send + Sync {
    fn force(&self, path: &str);
}

/// Records forced navigations until the portal follows them. Only the
/// latest [`HISTORY_LIMIT`] are remembered.
#[derive(Debug, Default)]
pub struct HistoryNavigator {
    pending: Mutex<Option<String>>,
    forced: Mutex<VecDeque<String>>,
}

impl HistoryNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes the latest unfollowed forced navigation.
    pub fn take_forced(&self) -> Option<String> {
        self.pending
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .take()
    }

    /// Recent forced navigations, oldest first.
    pub fn history(&self) -> Vec<String> {
        self.forced
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .iter()
            .cloned()
            .collect()
    }
}

impl Navigator for HistoryNavigator {
    fn force(&self, path: &str) {
        // Latest wins; concurrent 401s all point at the same login page anyway
        *self
            .pending
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(path.to_string());
        let mut forced = self
            .forced
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if forced.len() == HISTORY_LIMIT {
            forced.pop_front();
        }
        forced.push_back(path.to_string());
    }
}
