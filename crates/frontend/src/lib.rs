//! # Frontend Crate
//!
//! The request orchestrator and its inbound HTTP surface. Each endpoint
//! runs one workflow: validate input, sequence calls through the
//! dispatcher to the backend services, interpret the partial results,
//! and render a single reply.
//!
//! ## Main Components
//!
//! - **orchestrator**: the per-operation workflows
//! - **http**: axum router and handlers
//! - **geojson**: FeatureCollection rendering for search/recommend
//! - **validate**: structural date and required-parameter checks
//! - **error**: `WorkflowError` and its HTTP mapping

pub mod error;
pub mod geojson;
pub mod http;
pub mod orchestrator;
pub mod validate;

pub use error::{Result, WorkflowError};
pub use orchestrator::{FrontendServer, Message};
