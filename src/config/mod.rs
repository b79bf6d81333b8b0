//! Configuration management
//!
//! Loads and saves configuration from XDG-compliant paths.
//! Config location: ~/.config/poi-gateway/config.toml

pub mod defaults;

use crate::constants::api::{NOMINATIM_URL, OVERPASS_URL, USER_AGENT};
use crate::error::{Error, Result};
use defaults::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Outbound service settings
    #[serde(default)]
    pub upstream: UpstreamConfig,

    /// Default values for queries
    #[serde(default)]
    pub defaults: DefaultsConfig,

    /// Reference dataset settings
    #[serde(default)]
    pub dataset: DatasetConfig,

    /// Map display settings handed to clients
    #[serde(default)]
    pub map: MapConfig,
}

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Outbound service settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// Overpass interpreter endpoint
    #[serde(default = "default_overpass_url")]
    pub overpass_url: String,

    /// Nominatim base URL
    #[serde(default = "default_nominatim_url")]
    pub nominatim_url: String,

    /// User-Agent sent with every outbound request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Overpass request timeout in seconds
    #[serde(default = "default_feature_timeout")]
    pub feature_timeout_secs: u64,

    /// Nominatim request timeout in seconds
    #[serde(default = "default_geocode_timeout")]
    pub geocode_timeout_secs: u64,

    /// Maximum geocoder hits per query
    #[serde(default = "default_geocode_limit")]
    pub geocode_limit: u32,
}

/// Default values for queries
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Nearby search radius in kilometers
    #[serde(default = "default_nearby_radius")]
    pub nearby_radius_km: f64,

    /// CLI output format
    #[serde(default = "default_format")]
    pub format: String,
}

/// Reference dataset settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatasetConfig {
    /// JSON file with reference locations; empty for none
    #[serde(default)]
    pub path: String,
}

/// Map display settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapConfig {
    /// Initial map center as [lat, lng]
    #[serde(default = "default_map_center")]
    pub center: [f64; 2],

    /// Initial zoom level
    #[serde(default = "default_zoom")]
    pub zoom: u8,

    /// Marker color per location type
    #[serde(default = "default_marker_colors")]
    pub marker_colors: BTreeMap<String, String>,
}

// Default value functions for serde
fn default_host() -> String {
    DEFAULT_HOST.to_string()
}
fn default_port() -> u16 {
    DEFAULT_PORT
}
fn default_overpass_url() -> String {
    OVERPASS_URL.to_string()
}
fn default_nominatim_url() -> String {
    NOMINATIM_URL.to_string()
}
fn default_user_agent() -> String {
    USER_AGENT.to_string()
}
fn default_feature_timeout() -> u64 {
    DEFAULT_FEATURE_TIMEOUT_SECS
}
fn default_geocode_timeout() -> u64 {
    DEFAULT_GEOCODE_TIMEOUT_SECS
}
fn default_geocode_limit() -> u32 {
    DEFAULT_GEOCODE_LIMIT
}
fn default_nearby_radius() -> f64 {
    DEFAULT_NEARBY_RADIUS_KM
}
fn default_format() -> String {
    DEFAULT_FORMAT.to_string()
}
fn default_map_center() -> [f64; 2] {
    DEFAULT_MAP_CENTER
}
fn default_zoom() -> u8 {
    DEFAULT_ZOOM_LEVEL
}
fn default_marker_colors() -> BTreeMap<String, String> {
    [
        ("park", "#4CAF50"),
        ("landmark", "#2196F3"),
        ("infrastructure", "#9C27B0"),
        ("default", "#607D8B"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            overpass_url: default_overpass_url(),
            nominatim_url: default_nominatim_url(),
            user_agent: default_user_agent(),
            feature_timeout_secs: default_feature_timeout(),
            geocode_timeout_secs: default_geocode_timeout(),
            geocode_limit: default_geocode_limit(),
        }
    }
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            nearby_radius_km: default_nearby_radius(),
            format: default_format(),
        }
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            center: default_map_center(),
            zoom: default_zoom(),
            marker_colors: default_marker_colors(),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|p| p.join(APP_DIR_NAME))
            .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE_NAME))
    }

    /// Load configuration from the default path
    ///
    /// Creates default config if file doesn't exist
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if path.exists() {
            let content = fs::read_to_string(&path).map_err(|e| {
                Error::Config(format!("Failed to read config file: {}", e))
            })?;

            toml::from_str(&content).map_err(|e| {
                Error::Config(format!("Failed to parse config file: {}", e))
            })
        } else {
            let config = Config::default();
            config.save()?;
            Ok(config)
        }
    }

    /// Save configuration to the default path
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                Error::Config(format!("Failed to create config directory: {}", e))
            })?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| {
            Error::Config(format!("Failed to serialize config: {}", e))
        })?;

        fs::write(&path, content).map_err(|e| {
            Error::Config(format!("Failed to write config file: {}", e))
        })?;

        Ok(())
    }

    /// Get a configuration value by key path
    ///
    /// Key format: "section.key"
    /// Returns the value as a string, or None if not found
    pub fn get(&self, key: &str) -> Option<String> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["server", "host"] => Some(self.server.host.clone()),
            ["server", "port"] => Some(self.server.port.to_string()),

            ["upstream", "overpass_url"] => Some(self.upstream.overpass_url.clone()),
            ["upstream", "nominatim_url"] => Some(self.upstream.nominatim_url.clone()),
            ["upstream", "user_agent"] => Some(self.upstream.user_agent.clone()),
            ["upstream", "feature_timeout_secs"] => {
                Some(self.upstream.feature_timeout_secs.to_string())
            }
            ["upstream", "geocode_timeout_secs"] => {
                Some(self.upstream.geocode_timeout_secs.to_string())
            }
            ["upstream", "geocode_limit"] => Some(self.upstream.geocode_limit.to_string()),

            ["defaults", "nearby_radius_km"] => Some(self.defaults.nearby_radius_km.to_string()),
            ["defaults", "format"] => Some(self.defaults.format.clone()),

            ["dataset", "path"] => Some(self.dataset.path.clone()),

            ["map", "zoom"] => Some(self.map.zoom.to_string()),

            _ => None,
        }
    }

    /// Set a configuration value by key path
    ///
    /// Key format: "section.key"
    /// Returns error if key is invalid or value type is wrong
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["server", "host"] => {
                self.server.host = value.to_string();
            }
            ["server", "port"] => {
                self.server.port = value.parse().map_err(|_| {
                    Error::Config(format!("Invalid port value: {}", value))
                })?;
            }

            ["upstream", "overpass_url"] => {
                self.upstream.overpass_url = value.to_string();
            }
            ["upstream", "nominatim_url"] => {
                self.upstream.nominatim_url = value.to_string();
            }
            ["upstream", "user_agent"] => {
                if value.trim().is_empty() {
                    return Err(Error::Config("User agent must not be empty".to_string()));
                }
                self.upstream.user_agent = value.to_string();
            }
            ["upstream", "feature_timeout_secs"] => {
                self.upstream.feature_timeout_secs = value.parse().map_err(|_| {
                    Error::Config(format!("Invalid timeout value: {}", value))
                })?;
            }
            ["upstream", "geocode_timeout_secs"] => {
                self.upstream.geocode_timeout_secs = value.parse().map_err(|_| {
                    Error::Config(format!("Invalid timeout value: {}", value))
                })?;
            }
            ["upstream", "geocode_limit"] => {
                self.upstream.geocode_limit = value.parse().map_err(|_| {
                    Error::Config(format!("Invalid limit value: {}", value))
                })?;
            }

            ["defaults", "nearby_radius_km"] => {
                self.defaults.nearby_radius_km = value.parse().map_err(|_| {
                    Error::Config(format!("Invalid radius value: {}", value))
                })?;
            }
            ["defaults", "format"] => {
                self.defaults.format = value.to_string();
            }

            ["dataset", "path"] => {
                self.dataset.path = value.to_string();
            }

            ["map", "zoom"] => {
                self.map.zoom = value.parse().map_err(|_| {
                    Error::Config(format!("Invalid zoom value: {}", value))
                })?;
            }

            _ => {
                return Err(Error::Config(format!("Unknown config key: {}", key)));
            }
        }

        Ok(())
    }

    /// List all available config keys
    pub fn available_keys() -> Vec<&'static str> {
        vec![
            "server.host",
            "server.port",
            "upstream.overpass_url",
            "upstream.nominatim_url",
            "upstream.user_agent",
            "upstream.feature_timeout_secs",
            "upstream.geocode_timeout_secs",
            "upstream.geocode_limit",
            "defaults.nearby_radius_km",
            "defaults.format",
            "dataset.path",
            "map.zoom",
        ]
    }

    /// Get server address as "host:port"
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
