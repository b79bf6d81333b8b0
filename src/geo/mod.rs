//! Geocoding module
//!
//! Provides geocoding (place name to coordinates) via Nominatim.

pub mod nominatim;
pub mod normalize;

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A geocoded place, in the shape returned to clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodeResult {
    /// Display name (full address or description)
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    /// Geocoder's place type, e.g. `city` or `attraction`
    #[serde(rename = "type")]
    pub kind: String,
    /// Relevance rank reported by the geocoder
    pub importance: f64,
    #[serde(default)]
    pub address: BTreeMap<String, String>,
}

/// Trait for geocoding backends
pub trait GeoBackend: Send + Sync {
    /// Geocode a free-text query, best matches first
    fn geocode(&self, query: &str) -> impl std::future::Future<Output = Result<Vec<GeocodeResult>>> + Send;
}
