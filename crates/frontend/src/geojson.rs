//! GeoJSON rendering of enriched hotel records.
//!
//! Search and recommend replies are a FeatureCollection with one Feature
//! per hotel, geometry `Point [lon, lat]`, so a map client can plot them
//! directly.

use hotel_proto::profile::Hotel;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct FeatureCollection {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub features: Vec<Feature>,
}

#[derive(Debug, Serialize)]
pub struct Feature {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub id: String,
    pub properties: Properties,
    pub geometry: Geometry,
}

#[derive(Debug, Serialize)]
pub struct Properties {
    pub name: String,
    pub phone_number: String,
    pub price: f64,
    pub score: f64,
    #[serde(rename = "scoreTimes")]
    pub score_times: i32,
}

#[derive(Debug, Serialize)]
pub struct Geometry {
    #[serde(rename = "type")]
    pub kind: &'static str,
    /// `[lon, lat]`, GeoJSON axis order.
    pub coordinates: [f64; 2],
}

/// Render hotel profiles as a FeatureCollection.
pub fn feature_collection(hotels: Vec<Hotel>) -> FeatureCollection {
    let features = hotels
        .into_iter()
        .map(|h| {
            let address = h.address.unwrap_or_default();
            Feature {
                kind: "Feature",
                id: h.id,
                properties: Properties {
                    name: h.name,
                    phone_number: h.phone_number,
                    price: h.price,
                    score: h.score,
                    score_times: h.score_times,
                },
                geometry: Geometry {
                    kind: "Point",
                    coordinates: [address.lon, address.lat],
                },
            }
        })
        .collect();

    FeatureCollection {
        kind: "FeatureCollection",
        features,
    }
}
