//! Error types shared by every capability client.

use hotel_dispatcher::DispatchError;
use thiserror::Error;

/// Errors that can occur on a downstream capability call.
///
/// Transport and availability problems land here; a downstream service
/// answering "no" (wrong password, nothing reserved) is business data and
/// never an error.
#[derive(Error, Debug)]
pub enum ClientError {
    /// No usable connection to the service could be obtained
    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    /// The call reached the service but failed at the transport level
    #[error("rpc to '{service}' failed: {status}")]
    Rpc {
        service: &'static str,
        status: tonic::Status,
    },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, ClientError>;
