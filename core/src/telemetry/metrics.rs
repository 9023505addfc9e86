use crate::client::ApiEndpoint;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Outcome history of one backend route.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteHealth {
    pub succeeded: usize,
    pub failed: usize,
    /// Most recent failure; cleared by the next success on the same route.
    pub last_error: Option<String>,
}

impl RouteHealth {
    pub fn is_failing(&self) -> bool {
        self.last_error.is_some()
    }
}

/// Request outcomes keyed by route, shared by every task issued through one client.
#[derive(Debug, Default)]
pub struct SyncMetrics {
    routes: Mutex<HashMap<ApiEndpoint, RouteHealth>>,
}

impl SyncMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_success(&self, endpoint: ApiEndpoint) {
        let mut routes = self.routes();
        let health = routes.entry(endpoint).or_default();
        health.succeeded += 1;
        health.last_error = None;
    }

    pub fn record_failure(&self, endpoint: ApiEndpoint, reason: impl Into<String>) {
        let mut routes = self.routes();
        let health = routes.entry(endpoint).or_default();
        health.failed += 1;
        health.last_error = Some(reason.into());
    }

    pub fn route(&self, endpoint: ApiEndpoint) -> RouteHealth {
        self.routes().get(&endpoint).cloned().unwrap_or_default()
    }

    /// `(succeeded, failed)` summed over every route.
    pub fn totals(&self) -> (usize, usize) {
        self.routes()
            .values()
            .fold((0, 0), |(ok, failed), health| {
                (ok + health.succeeded, failed + health.failed)
            })
    }

    /// Routes whose latest call failed, ordered by path.
    pub fn failing(&self) -> Vec<(ApiEndpoint, RouteHealth)> {
        let mut failing: Vec<_> = self
            .routes()
            .iter()
            .filter(|(_, health)| health.is_failing())
            .map(|(endpoint, health)| (*endpoint, health.clone()))
            .collect();
        failing.sort_by_key(|(endpoint, _)| endpoint.path());
        failing
    }

    fn routes(&self) -> MutexGuard<'_, HashMap<ApiEndpoint, RouteHealth>> {
        self.routes.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
