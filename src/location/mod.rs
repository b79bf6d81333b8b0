//! Normalized point-of-interest model
//!
//! Every feature that survives classification becomes a [`Location`] in one
//! of three fixed categories.

pub mod dataset;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Domain category of a location
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Parks, gardens, playgrounds and sports grounds
    Park,
    /// Attractions, historic sites, museums, places of worship
    Landmark,
    /// Roads, rail, bridges, airports and public buildings
    Infrastructure,
}

impl Category {
    /// Lowercase token used in queries and JSON
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Park => "park",
            Self::Landmark => "landmark",
            Self::Infrastructure => "infrastructure",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "park" => Ok(Self::Park),
            "landmark" => Ok(Self::Landmark),
            "infrastructure" => Ok(Self::Infrastructure),
            _ => Err(format!("Unknown location type: {}", s)),
        }
    }
}

/// List all categories
pub fn available_categories() -> Vec<Category> {
    vec![Category::Park, Category::Landmark, Category::Infrastructure]
}

/// A normalized point of interest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub category: Category,
    pub lat: f64,
    pub lng: f64,
    pub description: String,
    /// Subset of source tags: city, street, website, hours
    #[serde(default)]
    pub properties: BTreeMap<String, String>,
}
