//! Coordinates and map viewports
//!
//! This module handles:
//! - Points and bounding boxes
//! - Great-circle distance and radius search (see [`distance`])

pub mod distance;

use serde::{Deserialize, Serialize};

/// A geographic coordinate (latitude, longitude)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    /// Create new coordinates
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// A rectangular map viewport
///
/// Reversed or degenerate boxes are accepted as-is and passed through to the
/// feature source, which answers them with an empty result.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl BoundingBox {
    /// Create a new bounding box
    pub fn new(south: f64, west: f64, north: f64, east: f64) -> Self {
        Self {
            south,
            west,
            north,
            east,
        }
    }

    /// Check whether a point lies inside the box
    ///
    /// Each axis is tested against its min/max so reversed boxes behave.
    pub fn contains(&self, lat: f64, lng: f64) -> bool {
        let (lat_lo, lat_hi) = (self.south.min(self.north), self.south.max(self.north));
        let (lng_lo, lng_hi) = (self.west.min(self.east), self.west.max(self.east));
        (lat_lo..=lat_hi).contains(&lat) && (lng_lo..=lng_hi).contains(&lng)
    }

    /// Overpass bbox filter text: `south,west,north,east`
    pub fn overpass_filter(&self) -> String {
        format!("{},{},{},{}", self.south, self.west, self.north, self.east)
    }
}
