//! Nominatim geocoding backend (OpenStreetMap)
//!
//! Uses the free Nominatim API for geocoding.
//! Requests must carry an identifying User-Agent or they are rejected.

use crate::config::UpstreamConfig;
use crate::error::{Error, Result};
use crate::geo::normalize::{normalize, RawGeocodeHit};
use crate::geo::{GeoBackend, GeocodeResult};
use std::time::Duration;
use tracing::debug;

/// Nominatim geocoding backend
#[derive(Debug, Clone)]
pub struct NominatimBackend {
    client: reqwest::Client,
    base_url: String,
    limit: u32,
}

impl NominatimBackend {
    /// Create a backend from upstream settings
    pub fn new(upstream: &UpstreamConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(upstream.user_agent.as_str())
            .timeout(Duration::from_secs(upstream.geocode_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: upstream.nominatim_url.trim_end_matches('/').to_string(),
            limit: upstream.geocode_limit,
        })
    }

    /// Build the search URL for a query
    fn search_url(&self, query: &str) -> String {
        format!(
            "{}/search?q={}&format=json&limit={}&addressdetails=1",
            self.base_url,
            urlencoding::encode(query),
            self.limit
        )
    }
}

impl GeoBackend for NominatimBackend {
    async fn geocode(&self, query: &str) -> Result<Vec<GeocodeResult>> {
        let url = self.search_url(query);
        debug!("Nominatim search: {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::UpstreamUnavailable(format!("Nominatim request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::UpstreamUnavailable(format!(
                "Nominatim returned status: {}",
                response.status()
            )));
        }

        let hits: Vec<serde_json::Value> = response
            .json()
            .await
            .map_err(|e| Error::UpstreamMalformed(format!("Failed to parse Nominatim response: {}", e)))?;

        Ok(hits
            .into_iter()
            .map(|hit| normalize(RawGeocodeHit::from_value(hit)))
            .collect())
    }
}
