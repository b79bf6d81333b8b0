//! Reference dataset
//!
//! A static, read-only set of locations bundled with the deployment. It backs
//! the listing/search/nearby endpoints and is the fallback for bounds queries
//! when the live feature source is degraded.

use crate::error::{Error, Result};
use crate::location::Location;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::info;

/// Immutable collection of reference locations
#[derive(Debug, Clone, Default)]
pub struct ReferenceDataset {
    locations: Vec<Location>,
}

/// Summary counts over the dataset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetStats {
    pub total_locations: usize,
    pub by_type: BTreeMap<String, usize>,
    pub last_updated: DateTime<Local>,
}

impl ReferenceDataset {
    /// Create a dataset from a list of locations
    pub fn new(locations: Vec<Location>) -> Self {
        Self { locations }
    }

    /// Create an empty dataset
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load a dataset from a JSON array file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            Error::Config(format!(
                "Failed to read dataset {}: {}",
                path.display(),
                e
            ))
        })?;

        let locations: Vec<Location> = serde_json::from_str(&content).map_err(|e| {
            Error::Config(format!(
                "Failed to parse dataset {}: {}",
                path.display(),
                e
            ))
        })?;

        info!("Loaded {} reference locations from {}", locations.len(), path.display());
        Ok(Self { locations })
    }

    /// Load from an optional path; an empty path means no dataset
    pub fn load_optional(path: &str) -> Result<Self> {
        if path.is_empty() {
            Ok(Self::empty())
        } else {
            Self::load_from(Path::new(path))
        }
    }

    /// All locations in dataset order
    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    /// Locations of the given type token, or everything when no token is given
    ///
    /// Tokens are compared verbatim, so an unknown token matches nothing.
    pub fn filter_by_type(&self, token: Option<&str>) -> Vec<Location> {
        match token {
            Some(token) => self
                .locations
                .iter()
                .filter(|loc| loc.category.as_str() == token)
                .cloned()
                .collect(),
            None => self.locations.clone(),
        }
    }

    /// Find a location by id
    pub fn get(&self, id: i64) -> Option<&Location> {
        self.locations.iter().find(|loc| loc.id == id)
    }

    /// Case-insensitive substring search over name and description
    pub fn search(&self, query: &str) -> Vec<Location> {
        let query = query.to_lowercase();
        if query.is_empty() {
            return Vec::new();
        }

        self.locations
            .iter()
            .filter(|loc| {
                loc.name.to_lowercase().contains(&query)
                    || loc.description.to_lowercase().contains(&query)
            })
            .cloned()
            .collect()
    }

    /// Count locations per type
    pub fn stats(&self) -> DatasetStats {
        let mut by_type = BTreeMap::new();
        for loc in &self.locations {
            *by_type.entry(loc.category.to_string()).or_insert(0) += 1;
        }

        DatasetStats {
            total_locations: self.locations.len(),
            by_type,
            last_updated: Local::now(),
        }
    }

    /// Number of locations
    pub fn len(&self) -> usize {
        self.locations.len()
    }

    /// Check if the dataset is empty
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }
}
