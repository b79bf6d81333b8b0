//! Server shared state
//!
//! Holds configuration and the read-only services shared by every request.

use crate::aggregate::LocationAggregator;
use crate::config::Config;
use crate::error::Result;
use crate::geo::nominatim::NominatimBackend;
use crate::location::dataset::ReferenceDataset;
use crate::overpass::OverpassClient;
use std::sync::Arc;

/// Shared state for the HTTP server
pub struct AppState {
    /// Configuration
    pub config: Config,

    /// Bounds query pipeline over Overpass
    pub aggregator: LocationAggregator<OverpassClient>,

    /// Geocoder
    pub geocoder: NominatimBackend,

    /// Reference locations for listing, search and nearby
    pub dataset: Arc<ReferenceDataset>,
}

impl AppState {
    /// Create application state, loading the dataset named in the config
    pub fn new(config: Config) -> Result<Self> {
        let dataset = ReferenceDataset::load_optional(&config.dataset.path)?;
        Self::with_dataset(config, dataset)
    }

    /// Create application state around an already loaded dataset
    pub fn with_dataset(config: Config, dataset: ReferenceDataset) -> Result<Self> {
        let dataset = Arc::new(dataset);
        let aggregator = LocationAggregator::new(
            OverpassClient::new(&config.upstream)?,
            Arc::clone(&dataset),
        );
        let geocoder = NominatimBackend::new(&config.upstream)?;

        Ok(Self {
            config,
            aggregator,
            geocoder,
            dataset,
        })
    }
}
