//! Reshape raw Nominatim hits into [`GeocodeResult`]s
//!
//! Field-level problems never fail a hit: missing or unparseable
//! coordinates and importance become 0.0, a missing name becomes "Unknown".

use crate::geo::GeocodeResult;
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// One hit as returned by Nominatim `/search?format=json`
///
/// Every field is kept as a loose JSON value so one odd field never
/// rejects the hit, let alone the whole response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawGeocodeHit {
    #[serde(default)]
    pub display_name: Option<Value>,
    /// Nominatim sends coordinates as strings; numbers are accepted too
    #[serde(default)]
    pub lat: Option<Value>,
    #[serde(default)]
    pub lon: Option<Value>,
    #[serde(default, rename = "type")]
    pub kind: Option<Value>,
    #[serde(default)]
    pub importance: Option<Value>,
    #[serde(default)]
    pub address: Option<Value>,
}

impl RawGeocodeHit {
    /// Read a hit from any JSON value; non-objects become an empty hit
    pub fn from_value(value: Value) -> Self {
        serde_json::from_value(value).unwrap_or_default()
    }
}

/// Read a number from a JSON number or numeric string, 0.0 otherwise
fn parse_number(value: Option<&Value>) -> f64 {
    match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    }
}

/// Read a string field, falling back to `default`
fn parse_text(value: Option<Value>, default: &str) -> String {
    match value {
        Some(Value::String(s)) => s,
        _ => default.to_string(),
    }
}

/// Flatten address parts to strings
fn address_text(value: Value) -> String {
    match value {
        Value::String(s) => s,
        other => other.to_string(),
    }
}

/// Build a [`GeocodeResult`] from one raw hit
pub fn normalize(hit: RawGeocodeHit) -> GeocodeResult {
    let address: BTreeMap<String, String> = match hit.address {
        Some(Value::Object(parts)) => parts
            .into_iter()
            .map(|(part, value)| (part, address_text(value)))
            .collect(),
        _ => BTreeMap::new(),
    };

    GeocodeResult {
        lat: parse_number(hit.lat.as_ref()),
        lng: parse_number(hit.lon.as_ref()),
        name: parse_text(hit.display_name, "Unknown"),
        kind: parse_text(hit.kind, "place"),
        importance: parse_number(hit.importance.as_ref()),
        address,
    }
}
