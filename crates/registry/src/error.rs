//! Error types for the registry crate.

use thiserror::Error;

/// Errors that can occur while talking to the service registry
#[derive(Error, Debug)]
pub enum RegistryError {
    /// No live endpoint is registered under the requested name
    #[error("no endpoints registered for service '{name}'")]
    NotFound { name: String },

    /// The registry itself could not be reached
    ///
    /// Resolution fails fast with this variant; retry policy belongs to
    /// the caller, not the registry client.
    #[error("registry unreachable: {0}")]
    Unreachable(String),

    /// Registration was rejected by the registry
    #[error("failed to register '{name}': {reason}")]
    RegistrationFailed { name: String, reason: String },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, RegistryError>;
