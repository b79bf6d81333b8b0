//! poi-gateway: categorized points of interest over OpenStreetMap
//!
//! A library and CLI tool that turns a map viewport into a list of parks,
//! landmarks and infrastructure, backed by the Overpass API, with geocoding
//! through Nominatim.
//!
//! ## Features
//!
//! - Overpass query building per location category
//! - Ordered tag rules mapping raw OSM features to categorized locations
//! - Reference dataset fallback when the live source has nothing
//! - Great-circle proximity search
//! - HTTP API + CLI interface
//!
//! ## Quick Start
//!
//! ```rust
//! use poi_gateway::classify::classify;
//! use poi_gateway::coord::BoundingBox;
//! use poi_gateway::overpass::query::OverpassQuery;
//! use poi_gateway::overpass::RawFeature;
//! use poi_gateway::location::Category;
//!
//! let bounds = BoundingBox::new(40.70, -74.02, 40.80, -73.93);
//! let query = OverpassQuery::new(bounds, Some(Category::Park));
//! println!("{}", query);
//!
//! let mut feature = RawFeature::default();
//! feature.lat = Some(40.78);
//! feature.lon = Some(-73.96);
//! feature.tags.insert("leisure".to_string(), "park".to_string());
//!
//! let location = classify(&feature, 0).unwrap();
//! assert_eq!(location.category, Category::Park);
//! ```

pub mod aggregate;
pub mod classify;
pub mod cli;
pub mod config;
pub mod constants;
pub mod coord;
pub mod error;
pub mod format;
pub mod geo;
pub mod location;
pub mod overpass;
pub mod server;

// Re-export commonly used types
pub use config::Config;
pub use coord::{BoundingBox, Coordinates};
pub use error::{Error, Result};
pub use location::{Category, Location};
