//! Great-circle distance and radius search
//!
//! Distances are computed with the haversine formula on a spherical Earth
//! of radius 6371 km.

use crate::constants::geo::EARTH_RADIUS_KM;
use crate::coord::Coordinates;
use crate::location::Location;
use serde::{Deserialize, Serialize};

/// A location annotated with its distance from a search center
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NearbyLocation {
    #[serde(flatten)]
    pub location: Location,
    /// Kilometers from the center, rounded to 2 decimals
    pub distance: f64,
}

/// Calculate the distance between two points in kilometers (Haversine formula)
///
/// # Algorithm
/// - a = sin²(Δlat/2) + cos(lat1)·cos(lat2)·sin²(Δlon/2)
/// - c = 2·asin(√a)
/// - d = R·c
pub fn distance_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let (lat1, lon1, lat2, lon2) = (
        lat1.to_radians(),
        lon1.to_radians(),
        lat2.to_radians(),
        lon2.to_radians(),
    );
    let dlat = lat2 - lat1;
    let dlon = lon2 - lon1;

    let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();

    EARTH_RADIUS_KM * c
}

/// Round a distance to 2 decimal places
fn round_km(km: f64) -> f64 {
    (km * 100.0).round() / 100.0
}

/// Find candidates within `radius_km` of `center`, closest first
///
/// The radius test uses the rounded distance, so no returned entry ever
/// reports a distance above the radius. Equal distances keep input order.
pub fn nearby(center: Coordinates, radius_km: f64, candidates: &[Location]) -> Vec<NearbyLocation> {
    let mut found: Vec<NearbyLocation> = candidates
        .iter()
        .map(|loc| NearbyLocation {
            distance: round_km(distance_km(center.lat, center.lng, loc.lat, loc.lng)),
            location: loc.clone(),
        })
        .filter(|entry| entry.distance <= radius_km)
        .collect();

    found.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::Category;
    use approx::assert_abs_diff_eq;
    use std::collections::BTreeMap;

    fn loc(id: i64, lat: f64, lng: f64) -> Location {
        Location {
            id,
            name: format!("Location {}", id),
            category: Category::Landmark,
            lat,
            lng,
            description: "Point of interest".to_string(),
            properties: BTreeMap::new(),
        }
    }

    #[test]
    fn test_distance_same_point_is_zero() {
        assert_eq!(distance_km(40.7128, -74.0060, 40.7128, -74.0060), 0.0);
    }

    #[test]
    fn test_distance_symmetric() {
        let ab = distance_km(40.7128, -74.0060, 51.5074, -0.1278);
        let ba = distance_km(51.5074, -0.1278, 40.7128, -74.0060);
        assert_abs_diff_eq!(ab, ba, epsilon = 1e-9);
    }

    #[test]
    fn test_distance_one_degree_latitude() {
        // 1 degree of latitude is about 111.19 km on a 6371 km sphere
        let d = distance_km(40.0, -74.0, 41.0, -74.0);
        assert_abs_diff_eq!(d, 111.19, epsilon = 0.01);
    }

    #[test]
    fn test_distance_nyc_london() {
        let d = distance_km(40.7128, -74.0060, 51.5074, -0.1278);
        assert!((d - 5570.0).abs() < 10.0, "got {}", d);
    }

    #[test]
    fn test_nearby_filters_by_radius() {
        let center = Coordinates::new(40.0, -74.0);
        let candidates = vec![loc(1, 40.01, -74.0), loc(2, 40.45, -74.0)];

        let found = nearby(center, 5.0, &candidates);

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].location.id, 1);
        assert_abs_diff_eq!(found[0].distance, 1.11, epsilon = 1e-9);
    }

    #[test]
    fn test_nearby_sorted_ascending() {
        let center = Coordinates::new(40.0, -74.0);
        let candidates = vec![
            loc(1, 40.05, -74.0),
            loc(2, 40.01, -74.0),
            loc(3, 40.03, -74.0),
        ];

        let found = nearby(center, 10.0, &candidates);
        let ids: Vec<i64> = found.iter().map(|n| n.location.id).collect();

        assert_eq!(ids, vec![2, 3, 1]);
        assert!(found.windows(2).all(|w| w[0].distance <= w[1].distance));
    }

    #[test]
    fn test_nearby_ties_keep_input_order() {
        let center = Coordinates::new(0.0, 0.0);
        let candidates = vec![loc(7, 0.01, 0.0), loc(3, -0.01, 0.0), loc(5, 0.0, 0.01)];

        let found = nearby(center, 5.0, &candidates);
        let ids: Vec<i64> = found.iter().map(|n| n.location.id).collect();

        assert_eq!(ids, vec![7, 3, 5]);
    }

    #[test]
    fn test_nearby_never_exceeds_radius() {
        let center = Coordinates::new(40.0, -74.0);
        let candidates: Vec<Location> = (0..50)
            .map(|i| loc(i, 40.0 + i as f64 * 0.002, -74.0))
            .collect();

        for radius in [0.5, 1.0, 2.22, 4.999, 7.5] {
            for entry in nearby(center, radius, &candidates) {
                assert!(entry.distance <= radius);
            }
        }
    }

    #[test]
    fn test_nearby_serializes_flat() {
        let center = Coordinates::new(40.0, -74.0);
        let found = nearby(center, 5.0, &[loc(1, 40.01, -74.0)]);
        let json = serde_json::to_value(&found[0]).unwrap();

        assert_eq!(json["id"], 1);
        assert_eq!(json["type"], "landmark");
        assert_eq!(json["distance"], 1.11);
    }
}
