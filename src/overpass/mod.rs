//! Overpass feature source
//!
//! Sends the query built in [`query`] to an Overpass interpreter and decodes
//! the `elements` array into [`RawFeature`]s.

pub mod query;

use crate::config::UpstreamConfig;
use crate::error::{Error, Result};
use query::OverpassQuery;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

/// Free-form OSM tags
pub type Tags = HashMap<String, String>;

/// Computed centroid of a way or relation
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Center {
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

/// One element as returned by Overpass with `out center`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawFeature {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lon: Option<f64>,
    #[serde(default)]
    pub center: Option<Center>,
    #[serde(default)]
    pub tags: Tags,
}

impl RawFeature {
    /// Direct coordinates, else the centroid, else nothing
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => Some((lat, lon)),
            _ => {
                let center = self.center?;
                Some((center.lat?, center.lon?))
            }
        }
    }

    /// Look up a tag value
    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags.get(key).map(String::as_str)
    }
}

/// Overpass JSON envelope
#[derive(Debug, Deserialize)]
struct OverpassResponse {
    elements: Vec<RawFeature>,
}

/// Trait for feature sources
pub trait FeatureSource: Send + Sync {
    /// Run a query and return the raw elements in response order
    fn fetch(
        &self,
        query: &OverpassQuery,
    ) -> impl std::future::Future<Output = Result<Vec<RawFeature>>> + Send;
}

/// HTTP client for an Overpass interpreter
#[derive(Debug, Clone)]
pub struct OverpassClient {
    client: reqwest::Client,
    url: String,
}

impl OverpassClient {
    /// Create a client from upstream settings
    pub fn new(upstream: &UpstreamConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(upstream.user_agent.as_str())
            .timeout(Duration::from_secs(upstream.feature_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            url: upstream.overpass_url.clone(),
        })
    }

    #[cfg(test)]
    fn url(&self) -> &str {
        &self.url
    }
}

impl FeatureSource for OverpassClient {
    async fn fetch(&self, query: &OverpassQuery) -> Result<Vec<RawFeature>> {
        let body = query.to_string();
        debug!("Overpass query:\n{}", body);

        let response = self
            .client
            .post(&self.url)
            .form(&[("data", body.as_str())])
            .send()
            .await
            .map_err(|e| Error::UpstreamUnavailable(format!("Overpass request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::UpstreamUnavailable(format!(
                "Overpass returned status: {}",
                response.status()
            )));
        }

        let data: OverpassResponse = response
            .json()
            .await
            .map_err(|e| Error::UpstreamMalformed(format!("Failed to parse Overpass response: {}", e)))?;

        debug!("Overpass returned {} elements", data.elements.len());
        Ok(data.elements)
    }
}
