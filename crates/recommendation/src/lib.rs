//! # Recommendation Crate
//!
//! The hotel scoring engine. Holds an immutable in-memory snapshot of
//! hotel records and answers ranking queries against it by distance,
//! rating, price, or a weighted composite.
//!
//! ## Main Components
//!
//! - **snapshot**: `Hotel`, the immutable `Snapshot`, and the injected
//!   `SnapshotSource`
//! - **engine**: scoring modes and the atomic snapshot swap
//! - **geo**: great-circle distance
//! - **server**: the gRPC surface registering as `srv-recommendation`
//!
//! ## Example Usage
//!
//! ```ignore
//! use hotel_recommendation::{FixedSource, RecommendationEngine};
//!
//! let engine = RecommendationEngine::new(Arc::new(source)).await?;
//! let nearest = engine.recommend("dis", 37.77, -122.41);
//! ```

pub mod engine;
pub mod geo;
pub mod server;
pub mod snapshot;

pub use engine::{RecommendationEngine, ScoredHotel};
pub use server::{serve, RecommendationService, SERVICE_NAME};
pub use snapshot::{FixedSource, Hotel, Snapshot, SnapshotSource};
