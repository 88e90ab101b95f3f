//! The recommendation engine: scoring modes over the hotel snapshot.
//!
//! Four modes:
//! - `dis`: every hotel at the minimum great-circle distance from the
//!   query point (exact equality, multi-winner)
//! - `rate`: every hotel at the maximum rating (multi-winner)
//! - `price`: every hotel at the minimum nightly price (multi-winner)
//! - `mix`: the single hotel with the greatest weighted composite of
//!   distance, rating, and price components
//!
//! Any other value is a malformed-input event: logged, empty result.

use std::sync::{Arc, RwLock};

use tracing::{debug, info, warn};

use crate::geo::distance_km;
use crate::snapshot::{Snapshot, SnapshotSource};

/// Composite-score weights for `mix` mode.
const WEIGHT_DISTANCE: f64 = 0.5;
const WEIGHT_RATE: f64 = 0.3;
const WEIGHT_PRICE: f64 = 0.2;

/// Per-hotel component scores for one `mix` query.
///
/// Derived and ephemeral: recomputed per query from a single snapshot
/// instance, never persisted.
#[derive(Debug, Clone)]
pub struct ScoredHotel {
    pub id: String,
    pub distance_score: f64,
    pub rate_score: f64,
    pub price_score: f64,
    pub composite_score: f64,
}

/// Scores hotels against an immutable snapshot.
///
/// The snapshot is read-only after publication: unlimited concurrent
/// readers, and refresh replaces the whole `Arc` under a short write
/// lock. Readers clone the pointer once per query, so every component
/// score within a query comes from the same snapshot instance.
pub struct RecommendationEngine {
    snapshot: RwLock<Arc<Snapshot>>,
    source: Arc<dyn SnapshotSource>,
}

impl RecommendationEngine {
    /// Build an engine, loading the initial snapshot from `source`.
    pub async fn new(source: Arc<dyn SnapshotSource>) -> anyhow::Result<Self> {
        let hotels = source.load().await?;
        let snapshot = Snapshot::new(hotels);
        info!("loaded initial snapshot of {} hotels", snapshot.len());
        Ok(Self {
            snapshot: RwLock::new(Arc::new(snapshot)),
            source,
        })
    }

    /// Rebuild the snapshot from the source and swap it in atomically.
    ///
    /// In-flight queries keep the snapshot they already hold.
    pub async fn refresh(&self) -> anyhow::Result<()> {
        let hotels = self.source.load().await?;
        let fresh = Arc::new(Snapshot::new(hotels));
        info!("refreshed snapshot, now {} hotels", fresh.len());
        match self.snapshot.write() {
            Ok(mut guard) => *guard = fresh,
            Err(poisoned) => *poisoned.into_inner() = fresh,
        }
        Ok(())
    }

    /// The currently published snapshot.
    pub fn snapshot(&self) -> Arc<Snapshot> {
        match self.snapshot.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Answer one scoring query.
    ///
    /// Returns hotel ids; empty for an empty snapshot or an unknown
    /// `require` value.
    pub fn recommend(&self, require: &str, lat: f64, lon: f64) -> Vec<String> {
        let snapshot = self.snapshot();
        debug!("recommend require={} over {} hotels", require, snapshot.len());

        match require {
            "dis" => Self::nearest(&snapshot, lat, lon),
            "rate" => Self::highest_rated(&snapshot),
            "price" => Self::cheapest(&snapshot),
            "mix" => Self::composite(&snapshot, lat, lon),
            other => {
                warn!("malformed require value: {:?}", other);
                Vec::new()
            }
        }
    }

    /// Every hotel whose distance to the query point equals the minimum.
    fn nearest(snapshot: &Snapshot, lat: f64, lon: f64) -> Vec<String> {
        let distances: Vec<f64> = snapshot
            .hotels()
            .iter()
            .map(|h| distance_km(lat, lon, h.lat, h.lon))
            .collect();

        let Some(min) = distances.iter().copied().fold(None, f64_min) else {
            return Vec::new();
        };

        snapshot
            .hotels()
            .iter()
            .zip(&distances)
            .filter(|(_, d)| **d == min)
            .map(|(h, _)| h.id.clone())
            .collect()
    }

    /// Every hotel whose rating equals the maximum.
    fn highest_rated(snapshot: &Snapshot) -> Vec<String> {
        let Some(max) = snapshot.hotels().iter().map(|h| h.rate).fold(None, f64_max) else {
            return Vec::new();
        };

        snapshot
            .hotels()
            .iter()
            .filter(|h| h.rate == max)
            .map(|h| h.id.clone())
            .collect()
    }

    /// Every hotel whose nightly price equals the minimum.
    fn cheapest(snapshot: &Snapshot) -> Vec<String> {
        let Some(min) = snapshot.hotels().iter().map(|h| h.price).fold(None, f64_min) else {
            return Vec::new();
        };

        snapshot
            .hotels()
            .iter()
            .filter(|h| h.price == min)
            .map(|h| h.id.clone())
            .collect()
    }

    /// The single hotel with the greatest composite score.
    ///
    /// Ties break to the lowest id: the snapshot scan runs in ascending-id
    /// order and a later hotel only wins with a strictly greater score.
    fn composite(snapshot: &Snapshot, lat: f64, lon: f64) -> Vec<String> {
        let scored = Self::score_all(snapshot, lat, lon);

        let mut best: Option<&ScoredHotel> = None;
        for hotel in &scored {
            match best {
                Some(current) if hotel.composite_score <= current.composite_score => {}
                _ => best = Some(hotel),
            }
        }

        best.map(|h| vec![h.id.clone()]).unwrap_or_default()
    }

    /// Component and composite scores for every hotel in the snapshot.
    pub fn score_all(snapshot: &Snapshot, lat: f64, lon: f64) -> Vec<ScoredHotel> {
        let mut scored: Vec<ScoredHotel> = snapshot
            .hotels()
            .iter()
            .map(|h| {
                let distance = distance_km(lat, lon, h.lat, h.lon);
                ScoredHotel {
                    id: h.id.clone(),
                    // Hotels within a kilometer are all "here".
                    distance_score: if distance <= 1.0 { 1.0 } else { 1.0 / distance },
                    rate_score: h.rate,
                    price_score: 1.0 / h.price,
                    composite_score: 0.0,
                }
            })
            .collect();

        let distance_sum: f64 = scored.iter().map(|s| s.distance_score).sum();
        let rate_sum: f64 = scored.iter().map(|s| s.rate_score).sum();
        let price_sum: f64 = scored.iter().map(|s| s.price_score).sum();

        for hotel in &mut scored {
            hotel.composite_score = WEIGHT_DISTANCE * hotel.distance_score / distance_sum
                + WEIGHT_RATE * hotel.rate_score / rate_sum
                + WEIGHT_PRICE * hotel.price_score / price_sum;
        }

        scored
    }
}

fn f64_min(acc: Option<f64>, value: f64) -> Option<f64> {
    match acc {
        Some(current) if current <= value => Some(current),
        _ => Some(value),
    }
}

fn f64_max(acc: Option<f64>, value: f64) -> Option<f64> {
    match acc {
        Some(current) if current >= value => Some(current),
        _ => Some(value),
    }
}
