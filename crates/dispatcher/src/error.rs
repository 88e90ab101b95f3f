//! Error types for the dispatcher crate.

use hotel_registry::RegistryError;
use thiserror::Error;

/// Errors that can occur while obtaining a connection to a service
#[derive(Error, Debug)]
pub enum DispatchError {
    /// The registry could not produce any endpoint for the name
    #[error(transparent)]
    Resolution(#[from] RegistryError),

    /// Every resolved endpoint refused or dropped the connection
    #[error("service '{service}' unavailable: {reason}")]
    Unavailable { service: String, reason: String },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, DispatchError>;
