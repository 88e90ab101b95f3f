//! The immutable hotel snapshot and its source.
//!
//! A snapshot is a point-in-time copy of the hotel dataset. It is never
//! mutated after publication: refresh builds a whole new snapshot and the
//! engine swaps the pointer atomically, so every score computed for one
//! query comes from the same snapshot instance.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// One hotel record as the scoring engine sees it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hotel {
    pub id: String,
    pub lat: f64,
    pub lon: f64,
    /// Aggregate rating, 0 to 5.
    pub rate: f64,
    /// Nightly price, strictly positive.
    pub price: f64,
}

/// Immutable, point-in-time copy of the hotel dataset.
///
/// Hotels are held in ascending-id order so every scan over the snapshot
/// is deterministic.
#[derive(Debug, Default)]
pub struct Snapshot {
    hotels: Vec<Hotel>,
}

impl Snapshot {
    /// Build a snapshot, ordering hotels by ascending id.
    pub fn new(mut hotels: Vec<Hotel>) -> Self {
        hotels.sort_by(|a, b| a.id.cmp(&b.id));
        Self { hotels }
    }

    /// Hotels in ascending-id order.
    pub fn hotels(&self) -> &[Hotel] {
        &self.hotels
    }

    pub fn len(&self) -> usize {
        self.hotels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hotels.is_empty()
    }
}

/// Where snapshots come from.
///
/// Injected into the engine at construction; the persistence collaborator
/// behind it (database, file, fixture) is outside the engine's concern.
#[async_trait]
pub trait SnapshotSource: Send + Sync {
    /// Load the current hotel set.
    async fn load(&self) -> anyhow::Result<Vec<Hotel>>;
}

/// A source that always serves a fixed hotel set. Used in tests and
/// single-process demos.
#[derive(Debug, Clone)]
pub struct FixedSource {
    hotels: Vec<Hotel>,
}

impl FixedSource {
    pub fn new(hotels: Vec<Hotel>) -> Self {
        Self { hotels }
    }
}

#[async_trait]
impl SnapshotSource for FixedSource {
    async fn load(&self) -> anyhow::Result<Vec<Hotel>> {
        Ok(self.hotels.clone())
    }
}
