//! # Clients Crate
//!
//! Typed wrappers over each downstream capability, one per service. Every
//! wrapper obtains a pooled, load-balanced channel from the dispatcher at
//! call time, stamps the per-request `CallContext` onto the outbound
//! request, and converts transport failures into `ClientError`.
//!
//! Business outcomes ("wrong password", "already reserved") are returned
//! as data, never as errors.

pub mod admin;
pub mod error;
pub mod profile;
pub mod recommendation;
pub mod reservation;
pub mod search;
pub mod user;

pub use admin::AdminClient;
pub use error::{ClientError, Result};
pub use profile::ProfileClient;
pub use recommendation::RecommendationClient;
pub use reservation::{ReservationClient, StayRequest};
pub use search::SearchClient;
pub use user::{Account, UserClient};
