//! Per-request call context: trace token and deadline.
//!
//! Every downstream request issued on behalf of one inbound request
//! carries the same trace token, so the full fan-out is attributable to
//! one logical request. The deadline, when present, is stamped onto each
//! outbound gRPC request; cancellation itself rides on future drop (the
//! orchestrator abandoning a call drops the in-flight request future).

use std::time::Duration;

use rand::Rng;
use tracing::warn;

/// Metadata key carrying the trace token on every downstream call.
pub const TRACE_HEADER: &str = "x-trace-id";

/// Trace token plus optional deadline for one inbound request's fan-out.
#[derive(Debug, Clone)]
pub struct CallContext {
    trace_id: String,
    deadline: Option<Duration>,
}

impl CallContext {
    /// Start a fresh context with a random trace token and no deadline.
    pub fn new() -> Self {
        let token: u128 = rand::thread_rng().gen();
        Self {
            trace_id: format!("{:032x}", token),
            deadline: None,
        }
    }

    /// Adopt an externally supplied trace token (e.g. from an inbound
    /// header) instead of generating one.
    pub fn with_trace_id(trace_id: impl Into<String>) -> Self {
        Self {
            trace_id: trace_id.into(),
            deadline: None,
        }
    }

    /// Bound every downstream call made under this context.
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn trace_id(&self) -> &str {
        &self.trace_id
    }

    /// Wrap a message into a `tonic::Request` carrying this context's
    /// trace token and deadline.
    pub fn request<T>(&self, message: T) -> tonic::Request<T> {
        let mut request = tonic::Request::new(message);
        match self.trace_id.parse() {
            Ok(value) => {
                request.metadata_mut().insert(TRACE_HEADER, value);
            }
            Err(_) => {
                // Non-ASCII tokens cannot travel as gRPC metadata; the
                // call still goes out, just unattributed.
                warn!("trace id {:?} is not valid metadata, dropping it", self.trace_id);
            }
        }
        if let Some(deadline) = self.deadline {
            request.set_timeout(deadline);
        }
        request
    }
}

impl Default for CallContext {
    fn default() -> Self {
        Self::new()
    }
}
