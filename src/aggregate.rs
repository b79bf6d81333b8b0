//! Bounds query aggregation
//!
//! Fetch -> classify -> cap -> fallback. The live path reports its failures
//! through `Result`; [`LocationAggregator::locations_in_bounds`] turns them
//! into a fallback to the reference dataset so a bounds query always yields
//! a well-formed list.

use crate::classify::classify;
use crate::constants::limits::{RAW_FEATURE_CAP, RESPONSE_CAP};
use crate::coord::BoundingBox;
use crate::error::Result;
use crate::location::dataset::ReferenceDataset;
use crate::location::Location;
use crate::overpass::query::OverpassQuery;
use crate::overpass::FeatureSource;
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

/// Where the locations of a bounds query came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Origin {
    /// Classified from the live feature source
    Live,
    /// Drawn from the reference dataset
    Fallback,
}

impl Origin {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Live => "live",
            Self::Fallback => "fallback",
        }
    }
}

/// Result of a bounds query
#[derive(Debug, Clone)]
pub struct BoundsResult {
    pub locations: Vec<Location>,
    pub origin: Origin,
}

/// Orchestrates a feature source and the fallback dataset
#[derive(Debug)]
pub struct LocationAggregator<S> {
    source: S,
    fallback: Arc<ReferenceDataset>,
}

impl<S: FeatureSource> LocationAggregator<S> {
    /// Create an aggregator over `source`, falling back to `fallback`
    pub fn new(source: S, fallback: Arc<ReferenceDataset>) -> Self {
        Self { source, fallback }
    }

    #[cfg(test)]
    fn source(&self) -> &S {
        &self.source
    }

    /// Query the live source and classify the first elements
    ///
    /// Only the first 100 raw elements are considered. Elements without
    /// coordinates are dropped but still consume a position.
    pub async fn fetch_live(&self, bounds: BoundingBox, token: Option<&str>) -> Result<Vec<Location>> {
        let query = OverpassQuery::from_token(bounds, token);
        let elements = self.source.fetch(&query).await?;

        let locations: Vec<Location> = elements
            .iter()
            .take(RAW_FEATURE_CAP)
            .enumerate()
            .filter_map(|(position, element)| classify(element, position))
            .collect();

        info!(
            "Classified {} of {} elements for bounds {}",
            locations.len(),
            elements.len(),
            bounds.overpass_filter()
        );
        Ok(locations)
    }

    /// Locations inside `bounds`, falling back to the reference dataset
    ///
    /// Source failures are logged and treated as an empty answer. An empty
    /// answer is replaced by the reference dataset filtered by `token`.
    pub async fn locations_in_bounds(&self, bounds: BoundingBox, token: Option<&str>) -> BoundsResult {
        let live = match self.fetch_live(bounds, token).await {
            Ok(locations) => locations,
            Err(e) => {
                warn!("Error fetching OSM data: {}", e);
                Vec::new()
            }
        };

        let (mut locations, origin) = if live.is_empty() {
            (self.fallback.filter_by_type(token), Origin::Fallback)
        } else {
            (live, Origin::Live)
        };

        locations.truncate(RESPONSE_CAP);
        BoundsResult { locations, origin }
    }
}
