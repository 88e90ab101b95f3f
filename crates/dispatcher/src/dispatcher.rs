//! The load-balanced dispatcher.
//!
//! Turns a logical service name into a ready-to-call `Channel`:
//! resolve endpoints through the registry, pick one with the balance
//! policy, and hand out a pooled connection for it. Channels are dialed
//! once per (service, endpoint) and cloned out after that; a tonic
//! `Channel` multiplexes concurrent calls over one connection.

use std::sync::Arc;

use dashmap::DashMap;
use hotel_registry::{Registry, ServiceEndpoint};
use tonic::transport::{Channel, Endpoint};
use tracing::{debug, info, warn};

use crate::balance::{BalancePolicy, RoundRobin};
use crate::error::{DispatchError, Result};

/// Resolves service names to pooled, load-balanced connections.
pub struct Dispatcher {
    registry: Arc<dyn Registry>,
    policy: Box<dyn BalancePolicy>,
    channels: DashMap<ServiceEndpoint, Channel>,
}

impl Dispatcher {
    /// Create a dispatcher with the default round-robin policy.
    pub fn new(registry: Arc<dyn Registry>) -> Self {
        Self::with_policy(registry, Box::new(RoundRobin::new()))
    }

    /// Create a dispatcher with an explicit balance policy.
    pub fn with_policy(registry: Arc<dyn Registry>, policy: Box<dyn BalancePolicy>) -> Self {
        Self {
            registry,
            policy,
            channels: DashMap::new(),
        }
    }

    /// Obtain a connection-backed channel for `service`.
    ///
    /// Tries each resolved endpoint starting from the balance policy's
    /// pick, wrapping around; the first endpoint that yields a live
    /// channel wins. If every endpoint is unreachable the call fails with
    /// `DispatchError::Unavailable` — whether to retry, fail the request,
    /// or fall back is the caller's decision.
    pub async fn channel(&self, service: &str) -> Result<Channel> {
        let endpoints = self.registry.resolve(service).await?;
        let start = self.policy.pick(service, &endpoints);

        let mut last_error = String::new();
        for offset in 0..endpoints.len() {
            let endpoint = &endpoints[(start + offset) % endpoints.len()];

            if let Some(channel) = self.channels.get(endpoint) {
                debug!("reusing channel for {}", endpoint);
                return Ok(channel.clone());
            }

            match self.dial(endpoint).await {
                Ok(channel) => {
                    info!("dialed {}", endpoint);
                    self.channels.insert(endpoint.clone(), channel.clone());
                    return Ok(channel);
                }
                Err(reason) => {
                    warn!("failed to dial {}: {}", endpoint, reason);
                    last_error = reason;
                }
            }
        }

        Err(DispatchError::Unavailable {
            service: service.to_string(),
            reason: last_error,
        })
    }

    /// Drop the pooled channel for an endpoint, forcing a re-dial on the
    /// next call. Used when a peer is observed dead mid-conversation.
    pub fn evict(&self, endpoint: &ServiceEndpoint) {
        if self.channels.remove(endpoint).is_some() {
            info!("evicted channel for {}", endpoint);
        }
    }

    async fn dial(&self, endpoint: &ServiceEndpoint) -> std::result::Result<Channel, String> {
        let target = Endpoint::from_shared(endpoint.uri()).map_err(|e| e.to_string())?;
        target.connect().await.map_err(|e| e.to_string())
    }
}
