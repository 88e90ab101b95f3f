//! In-process registry backed by a concurrent map.
//!
//! `LocalRegistry` is the registry implementation used when the whole
//! system runs in one process (tests, single-node demos). A deployment
//! that fronts an external registry service implements the same
//! [`Registry`](crate::Registry) trait and surfaces connectivity problems
//! as `RegistryError::Unreachable`.

use async_trait::async_trait;
use dashmap::DashMap;
use tracing::{debug, info};

use crate::endpoint::ServiceEndpoint;
use crate::error::{RegistryError, Result};
use crate::Registry;

/// Concurrent name -> endpoint-set registry.
///
/// Safe for concurrent resolution and concurrent registration or
/// deregistration of the same or unrelated names. Registration is
/// idempotent: re-registering an identical (name, address, port) does not
/// grow the endpoint set.
#[derive(Debug, Default)]
pub struct LocalRegistry {
    services: DashMap<String, Vec<ServiceEndpoint>>,
}

impl LocalRegistry {
    pub fn new() -> Self {
        Self {
            services: DashMap::new(),
        }
    }

    /// Number of endpoints currently registered under `name`.
    pub fn endpoint_count(&self, name: &str) -> usize {
        self.services.get(name).map(|e| e.len()).unwrap_or(0)
    }
}

#[async_trait]
impl Registry for LocalRegistry {
    async fn register(&self, name: &str, address: &str, port: u16) -> Result<()> {
        let endpoint = ServiceEndpoint::new(name, address, port);
        let mut entry = self.services.entry(name.to_string()).or_default();
        if !entry.contains(&endpoint) {
            info!("registered {}", endpoint);
            entry.push(endpoint);
        } else {
            debug!("{} already registered, ignoring", endpoint);
        }
        Ok(())
    }

    async fn deregister(&self, name: &str) {
        // Best-effort: absence of a prior registration is not an error.
        if self.services.remove(name).is_some() {
            info!("deregistered service '{}'", name);
        }
    }

    async fn resolve(&self, name: &str) -> Result<Vec<ServiceEndpoint>> {
        match self.services.get(name) {
            Some(endpoints) if !endpoints.is_empty() => Ok(endpoints.clone()),
            _ => Err(RegistryError::NotFound {
                name: name.to_string(),
            }),
        }
    }
}
