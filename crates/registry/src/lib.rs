//! # Registry Crate
//!
//! Maps a logical service name to the set of currently live network
//! endpoints. The dispatcher consults this on (almost) every call, so
//! resolution must be cheap and safe under concurrent mutation.
//!
//! ## Main Components
//!
//! - **endpoint**: the `ServiceEndpoint` record
//! - **local**: `LocalRegistry`, an in-process implementation
//! - **error**: `RegistryError`
//!
//! ## Example Usage
//!
//! ```ignore
//! use hotel_registry::{LocalRegistry, Registry};
//!
//! let registry = LocalRegistry::new();
//! registry.register("srv-recommendation", "127.0.0.1", 8083).await?;
//! let endpoints = registry.resolve("srv-recommendation").await?;
//! ```

pub mod endpoint;
pub mod error;
pub mod local;

pub use endpoint::ServiceEndpoint;
pub use error::{RegistryError, Result};
pub use local::LocalRegistry;

use async_trait::async_trait;

/// Service discovery contract.
///
/// Implementations must be safe for concurrent resolution and concurrent
/// registration/deregistration of the same or unrelated names. A registry
/// client never retries internally; retry policy belongs to the caller.
#[async_trait]
pub trait Registry: Send + Sync {
    /// Register one endpoint under a logical service name.
    ///
    /// Idempotent: re-registering the same (name, address, port) must not
    /// create a duplicate entry.
    async fn register(&self, name: &str, address: &str, port: u16) -> Result<()>;

    /// Remove every endpoint registered under `name`. Best-effort.
    async fn deregister(&self, name: &str);

    /// Resolve a name to its non-empty set of live endpoints.
    async fn resolve(&self, name: &str) -> Result<Vec<ServiceEndpoint>>;
}
