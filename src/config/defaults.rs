//! Default configuration values
//!
//! Named constants for all tunable parameters

/// Default server host
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default server port
pub const DEFAULT_PORT: u16 = 5000;

/// Default feature source request timeout in seconds
pub const DEFAULT_FEATURE_TIMEOUT_SECS: u64 = 30;

/// Default geocoder request timeout in seconds
pub const DEFAULT_GEOCODE_TIMEOUT_SECS: u64 = 10;

/// Default number of geocoder hits requested
pub const DEFAULT_GEOCODE_LIMIT: u32 = 5;

/// Default nearby search radius in kilometers
pub const DEFAULT_NEARBY_RADIUS_KM: f64 = 10.0;

/// Default CLI output format
pub const DEFAULT_FORMAT: &str = "json";

/// Default map center (New York City)
pub const DEFAULT_MAP_CENTER: [f64; 2] = [40.7128, -74.0060];

/// Default map zoom level
pub const DEFAULT_ZOOM_LEVEL: u8 = 12;

/// Config file name
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Application directory name (for XDG paths)
pub const APP_DIR_NAME: &str = "poi-gateway";
