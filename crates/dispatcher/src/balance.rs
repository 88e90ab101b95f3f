//! Load-balancing policies for endpoint selection.
//!
//! The dispatcher resolves a service name to a set of endpoints and asks a
//! `BalancePolicy` which one to dial first. Policies are pluggable; the
//! round-robin policy here is the default.

use std::sync::atomic::{AtomicUsize, Ordering};

use dashmap::DashMap;
use hotel_registry::ServiceEndpoint;

/// Picks one endpoint out of a resolved, non-empty set.
///
/// `Send + Sync` so one policy instance can serve every in-flight request.
pub trait BalancePolicy: Send + Sync {
    /// Returns the name of this policy (for logging/debugging)
    fn name(&self) -> &str;

    /// Index into `endpoints` of the instance to try first.
    ///
    /// `endpoints` is never empty when the dispatcher calls this.
    fn pick(&self, service: &str, endpoints: &[ServiceEndpoint]) -> usize;
}

/// Cycles through a service's endpoints in resolution order.
///
/// Keeps one atomic cursor per service name, so interleaved calls for
/// different services do not disturb each other's rotation.
#[derive(Debug, Default)]
pub struct RoundRobin {
    cursors: DashMap<String, AtomicUsize>,
}

impl RoundRobin {
    pub fn new() -> Self {
        Self {
            cursors: DashMap::new(),
        }
    }
}

impl BalancePolicy for RoundRobin {
    fn name(&self) -> &str {
        "round-robin"
    }

    fn pick(&self, service: &str, endpoints: &[ServiceEndpoint]) -> usize {
        let cursor = self
            .cursors
            .entry(service.to_string())
            .or_insert_with(|| AtomicUsize::new(0));
        cursor.fetch_add(1, Ordering::Relaxed) % endpoints.len()
    }
}
