//! Endpoint type shared by the registry and the dispatcher.

use serde::{Deserialize, Serialize};

/// One network-reachable instance of a named service.
///
/// Produced by registration, consumed by resolution. The set of endpoints
/// per name is mutable and eventually consistent: new registrations appear
/// and deregistrations disappear without a hard deadline.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ServiceEndpoint {
    pub service_name: String,
    pub address: String,
    pub port: u16,
}

impl ServiceEndpoint {
    pub fn new(service_name: impl Into<String>, address: impl Into<String>, port: u16) -> Self {
        Self {
            service_name: service_name.into(),
            address: address.into(),
            port,
        }
    }

    /// The http URI the dispatcher dials for this endpoint.
    pub fn uri(&self) -> String {
        format!("http://{}:{}", self.address, self.port)
    }
}

impl std::fmt::Display for ServiceEndpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@{}:{}", self.service_name, self.address, self.port)
    }
}
