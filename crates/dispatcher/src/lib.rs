//! # Dispatcher Crate
//!
//! The load-balanced dispatcher sits between the orchestrator and every
//! downstream service. It resolves a logical name through the registry,
//! applies a pluggable balance policy to pick one endpoint, and hands out
//! a pooled `tonic` channel bound to it.
//!
//! ## Main Components
//!
//! - **dispatcher**: name -> pooled channel resolution
//! - **balance**: `BalancePolicy` trait and the round-robin default
//! - **context**: `CallContext`, the per-request trace token + deadline
//! - **error**: `DispatchError`
//!
//! ## Example Usage
//!
//! ```ignore
//! use hotel_dispatcher::{CallContext, Dispatcher};
//!
//! let dispatcher = Dispatcher::new(registry);
//! let channel = dispatcher.channel("srv-profile").await?;
//! let ctx = CallContext::new().with_deadline(Duration::from_secs(2));
//! let reply = ProfileClient::new(channel).get_profiles(ctx.request(req)).await?;
//! ```

pub mod balance;
pub mod context;
pub mod dispatcher;
pub mod error;

pub use balance::{BalancePolicy, RoundRobin};
pub use context::{CallContext, TRACE_HEADER};
pub use dispatcher::Dispatcher;
pub use error::{DispatchError, Result};
