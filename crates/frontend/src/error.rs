//! Error types for the frontend crate.
//!
//! The taxonomy mirrors how errors surface to the caller:
//! - invalid input terminates before any downstream call, HTTP 400
//! - a transport failure downstream surfaces as HTTP 500
//! - a downstream "no" (wrong password, already reserved) is never an
//!   error here; workflows render it as a message in a 200 reply

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use hotel_clients::ClientError;
use thiserror::Error;
use tracing::error;

/// Errors a workflow can terminate with.
#[derive(Error, Debug)]
pub enum WorkflowError {
    /// A required parameter was missing or malformed.
    ///
    /// Caught before any downstream call is made.
    #[error("{0}")]
    InvalidInput(String),

    /// A downstream call failed at the transport level
    #[error(transparent)]
    Downstream(#[from] ClientError),
}

impl WorkflowError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }
}

impl IntoResponse for WorkflowError {
    fn into_response(self) -> Response {
        match self {
            WorkflowError::InvalidInput(message) => {
                (StatusCode::BAD_REQUEST, message).into_response()
            }
            WorkflowError::Downstream(err) => {
                error!("downstream failure: {}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response()
            }
        }
    }
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, WorkflowError>;
