//! Centralized constants for the poi-gateway crate
//!
//! This module consolidates constants that are used across multiple modules
//! to avoid duplication and ensure consistency.

/// Geographic constants
pub mod geo {
    /// Mean Earth radius in kilometers
    pub const EARTH_RADIUS_KM: f64 = 6371.0;
}

/// External API endpoints
pub mod api {
    /// Overpass API interpreter endpoint
    pub const OVERPASS_URL: &str = "http://overpass-api.de/api/interpreter";

    /// OpenStreetMap Nominatim geocoding API
    pub const NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org";

    /// Nominatim rejects requests without an identifying agent
    pub const USER_AGENT: &str = "GIS-Pro-App/1.0";

    /// Server-side timeout embedded in every Overpass query, in seconds
    pub const OVERPASS_QUERY_TIMEOUT_SECS: u64 = 25;
}

/// Result size limits
pub mod limits {
    /// Raw elements taken from a single Overpass response
    pub const RAW_FEATURE_CAP: usize = 100;

    /// Locations returned from a bounds query
    pub const RESPONSE_CAP: usize = 500;
}
