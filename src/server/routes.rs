//! HTTP API routes
//!
//! Defines all REST API endpoints for the server.

use crate::coord::distance::{nearby, NearbyLocation};
use crate::coord::{BoundingBox, Coordinates};
use crate::error::Error;
use crate::geo::{GeoBackend, GeocodeResult};
use crate::location::dataset::DatasetStats;
use crate::location::Location;
use crate::server::state::AppState;

use axum::{
    extract::{Path, Query, State},
    http::{HeaderName, HeaderValue, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::warn;

/// Response header naming where bounds results came from
pub const ORIGIN_HEADER: &str = "x-location-origin";

/// Create the API router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/locations/bounds", get(bounds_handler))
        .route("/api/locations", get(locations_handler))
        .route("/api/location/:id", get(location_handler))
        .route("/api/geocode", get(geocode_handler))
        .route("/api/search", get(search_handler))
        .route("/api/nearby", get(nearby_handler))
        .route("/api/stats", get(stats_handler))
        .route("/api/map", get(map_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// API error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
    pub code: String,
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        let code = match &err {
            Error::InvalidInput(_) => "INVALID_INPUT",
            Error::NotFound(_) => "NOT_FOUND",
            Error::UpstreamUnavailable(_) | Error::UpstreamMalformed(_) => "UPSTREAM_UNAVAILABLE",
            Error::Config(_) => "CONFIG_ERROR",
            _ => "INTERNAL_ERROR",
        };
        ApiError {
            error: err.to_string(),
            code: code.to_string(),
        }
    }
}

/// Error response with its HTTP status
type Rejection = (StatusCode, Json<ApiError>);

fn reject(err: Error) -> Rejection {
    let status = match &err {
        Error::InvalidInput(_) => StatusCode::BAD_REQUEST,
        Error::NotFound(_) => StatusCode::NOT_FOUND,
        e if e.is_upstream() => StatusCode::SERVICE_UNAVAILABLE,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(ApiError::from(err)))
}

fn parse_f64(name: &str, raw: &str) -> crate::error::Result<f64> {
    raw.trim()
        .parse()
        .map_err(|_| Error::InvalidInput(format!("Parameter {} is not a number: {}", name, raw)))
}

/// Parse a required numeric query parameter
fn required_f64(name: &str, value: Option<&str>) -> crate::error::Result<f64> {
    value
        .ok_or_else(|| Error::InvalidInput(format!("Missing parameter: {}", name)))
        .and_then(|raw| parse_f64(name, raw))
}

/// Parse an optional numeric query parameter; present-but-invalid is an error
fn optional_f64(name: &str, value: Option<&str>) -> crate::error::Result<Option<f64>> {
    value.map(|raw| parse_f64(name, raw)).transpose()
}

/// Treat `?type=` the same as no type
fn type_token(value: Option<&str>) -> Option<&str> {
    value.filter(|t| !t.is_empty())
}

/// Bounds query parameters
#[derive(Debug, Deserialize)]
pub struct BoundsParams {
    pub south: Option<String>,
    pub west: Option<String>,
    pub north: Option<String>,
    pub east: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

impl BoundsParams {
    fn bounds(&self) -> crate::error::Result<BoundingBox> {
        Ok(BoundingBox::new(
            required_f64("south", self.south.as_deref())?,
            required_f64("west", self.west.as_deref())?,
            required_f64("north", self.north.as_deref())?,
            required_f64("east", self.east.as_deref())?,
        ))
    }
}

/// Locations inside a map viewport
///
/// GET /api/locations/bounds?south=&west=&north=&east=&type=
async fn bounds_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<BoundsParams>,
) -> Result<impl IntoResponse, Rejection> {
    let bounds = params.bounds().map_err(|e| {
        warn!("Error parsing bounds: {}", e);
        reject(e)
    })?;

    let result = state
        .aggregator
        .locations_in_bounds(bounds, type_token(params.kind.as_deref()))
        .await;

    Ok((
        [(HeaderName::from_static(ORIGIN_HEADER), HeaderValue::from_static(result.origin.as_str()))],
        Json(result.locations),
    ))
}

/// Type filter parameters
#[derive(Debug, Deserialize)]
pub struct TypeParams {
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

/// Reference locations, optionally filtered by type
///
/// GET /api/locations?type=
async fn locations_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<TypeParams>,
) -> Json<Vec<Location>> {
    Json(state.dataset.filter_by_type(type_token(params.kind.as_deref())))
}

/// A single reference location
///
/// GET /api/location/:id
async fn location_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Location>, Rejection> {
    id.parse::<i64>()
        .ok()
        .and_then(|id| state.dataset.get(id).cloned())
        .map(Json)
        .ok_or_else(|| reject(Error::NotFound(format!("Location not found: {}", id))))
}

/// Free-text query parameter
#[derive(Debug, Deserialize)]
pub struct TextParams {
    #[serde(default)]
    pub q: String,
}

/// Geocode a place name
///
/// GET /api/geocode?q=
async fn geocode_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<TextParams>,
) -> Result<Json<Vec<GeocodeResult>>, Rejection> {
    if params.q.is_empty() {
        return Err(reject(Error::InvalidInput("No query provided".to_string())));
    }

    let results = state.geocoder.geocode(&params.q).await.map_err(|e| {
        warn!("Geocoding error: {}", e);
        reject(e)
    })?;

    Ok(Json(results))
}

/// Search reference locations by name or description
///
/// GET /api/search?q=
async fn search_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<TextParams>,
) -> Json<Vec<Location>> {
    Json(state.dataset.search(&params.q))
}

/// Nearby query parameters
#[derive(Debug, Deserialize)]
pub struct NearbyParams {
    pub lat: Option<String>,
    pub lng: Option<String>,
    pub radius: Option<String>,
}

/// Reference locations within a radius, closest first
///
/// GET /api/nearby?lat=&lng=&radius=
async fn nearby_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<NearbyParams>,
) -> Result<Json<Vec<NearbyLocation>>, Rejection> {
    let parse = || -> crate::error::Result<(Coordinates, f64)> {
        let lat = required_f64("lat", params.lat.as_deref())?;
        let lng = required_f64("lng", params.lng.as_deref())?;
        let radius = optional_f64("radius", params.radius.as_deref())?
            .unwrap_or(state.config.defaults.nearby_radius_km);
        Ok((Coordinates::new(lat, lng), radius))
    };
    let (center, radius) = parse().map_err(reject)?;

    Ok(Json(nearby(center, radius, state.dataset.locations())))
}

/// Reference dataset statistics
///
/// GET /api/stats
async fn stats_handler(State(state): State<Arc<AppState>>) -> Json<DatasetStats> {
    Json(state.dataset.stats())
}

/// Map settings for clients
#[derive(Debug, Serialize, Deserialize)]
pub struct MapResponse {
    pub center: [f64; 2],
    pub zoom: u8,
    pub marker_colors: BTreeMap<String, String>,
    pub nearby_radius_km: f64,
}

/// Map display settings
///
/// GET /api/map
async fn map_handler(State(state): State<Arc<AppState>>) -> Json<MapResponse> {
    let config = &state.config;
    Json(MapResponse {
        center: config.map.center,
        zoom: config.map.zoom,
        marker_colors: config.map.marker_colors.clone(),
        nearby_radius_km: config.defaults.nearby_radius_km,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::location::dataset::tests::sample_dataset;
    use crate::location::dataset::ReferenceDataset;
    use crate::location::Category;
    use axum::body::Body;
    use axum::http::{HeaderMap, Request};
    use axum::routing::post;
    use http_body_util::BodyExt;
    use tokio::net::TcpListener;
    use tower::ServiceExt;

    /// Config whose upstreams refuse connections
    fn offline_config() -> Config {
        let mut config = Config::default();
        config.upstream.overpass_url = "http://127.0.0.1:1/api/interpreter".to_string();
        config.upstream.nominatim_url = "http://127.0.0.1:1".to_string();
        config
    }

    fn create_test_app(config: Config, dataset: ReferenceDataset) -> Router {
        create_router(Arc::new(AppState::with_dataset(config, dataset).unwrap()))
    }

    async fn get_response(app: Router, uri: &str) -> axum::response::Response {
        app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
        let body = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&body).unwrap()
    }

    /// Spawn a local stand-in for Overpass and Nominatim
    async fn spawn_upstream() -> String {
        let overpass = post(|body: String| async move {
            if !body.starts_with("data=") {
                return (StatusCode::BAD_REQUEST, Json(serde_json::json!({})));
            }
            (
                StatusCode::OK,
                Json(serde_json::json!({
                    "elements": [
                        {"type": "node", "id": 11, "lat": 40.75, "lon": -73.98,
                         "tags": {"leisure": "playground", "name": "Tot Lot", "addr:city": "New York"}},
                        {"type": "way", "id": 12, "center": {"lat": 40.76, "lon": -73.97},
                         "tags": {"railway": "station"}},
                        {"type": "relation", "id": 13, "tags": {"historic": "monument"}}
                    ]
                })),
            )
        });

        let search = get(|headers: HeaderMap| async move {
            if !headers.contains_key("user-agent") {
                return (StatusCode::FORBIDDEN, Json(serde_json::json!([])));
            }
            (
                StatusCode::OK,
                Json(serde_json::json!([
                    {"display_name": "Central Park, New York", "lat": "40.7826", "lon": "-73.9656",
                     "type": "park", "importance": 0.74, "address": {"city": "New York"}},
                    {"lat": "bogus"}
                ])),
            )
        });

        // `/{mode}/...` answers both services with a failure of that kind
        let broken = |Path(mode): Path<String>| async move {
            match mode.as_str() {
                "error" => (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded").into_response(),
                "remark" => Json(serde_json::json!({"remark": "runtime error"})).into_response(),
                _ => (StatusCode::OK, "<html>not json</html>").into_response(),
            }
        };

        let app = Router::new()
            .route("/api/interpreter", overpass)
            .route("/search", search)
            .route("/:mode/api/interpreter", post(broken))
            .route("/:mode/search", get(broken));

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    async fn online_config() -> Config {
        let base = spawn_upstream().await;
        let mut config = Config::default();
        config.upstream.overpass_url = format!("{}/api/interpreter", base);
        config.upstream.nominatim_url = base;
        config
    }

    #[tokio::test]
    async fn test_bounds_live() {
        let app = create_test_app(online_config().await, sample_dataset());

        let response = get_response(
            app,
            "/api/locations/bounds?south=40.7&west=-74.0&north=40.8&east=-73.9",
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[ORIGIN_HEADER], "live");

        let locations: Vec<Location> = body_json(response).await;
        assert_eq!(locations.len(), 2);
        assert_eq!(locations[0].name, "Tot Lot");
        assert_eq!(locations[0].category, Category::Park);
        assert_eq!(locations[0].properties["city"], "New York");
        assert_eq!(locations[1].description, "Station Station");
        assert_eq!(locations[1].name, "Location 2");

        let bbox = BoundingBox::new(40.7, -74.0, 40.8, -73.9);
        assert!(locations.iter().all(|l| bbox.contains(l.lat, l.lng)));
    }

    /// Config whose upstreams answer with the given failure mode
    async fn broken_config(mode: &str) -> Config {
        let base = spawn_upstream().await;
        let mut config = Config::default();
        config.upstream.overpass_url = format!("{}/{}/api/interpreter", base, mode);
        config.upstream.nominatim_url = format!("{}/{}", base, mode);
        config
    }

    const FAILURE_MODES: [&str; 3] = ["error", "remark", "garbage"];

    #[tokio::test]
    async fn test_bounds_fallback_on_bad_upstream_response() {
        for mode in FAILURE_MODES {
            let app = create_test_app(broken_config(mode).await, sample_dataset());

            let response = get_response(
                app,
                "/api/locations/bounds?south=40.7&west=-74.0&north=40.8&east=-73.9",
            )
            .await;

            assert_eq!(response.status(), StatusCode::OK, "mode {}", mode);
            assert_eq!(response.headers()[ORIGIN_HEADER], "fallback", "mode {}", mode);

            let locations: Vec<Location> = body_json(response).await;
            assert_eq!(locations.len(), 4, "mode {}", mode);
        }
    }

    #[tokio::test]
    async fn test_geocode_bad_upstream_response() {
        for mode in FAILURE_MODES {
            let app = create_test_app(broken_config(mode).await, ReferenceDataset::empty());

            let response = get_response(app, "/api/geocode?q=paris").await;
            assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE, "mode {}", mode);

            let err: ApiError = body_json(response).await;
            assert_eq!(err.code, "UPSTREAM_UNAVAILABLE", "mode {}", mode);
        }
    }

    #[tokio::test]
    async fn test_bounds_fallback_when_offline() {
        let app = create_test_app(offline_config(), sample_dataset());

        let response = get_response(
            app,
            "/api/locations/bounds?south=40.7&west=-74.0&north=40.8&east=-73.9&type=park",
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[ORIGIN_HEADER], "fallback");

        let locations: Vec<Location> = body_json(response).await;
        assert_eq!(locations.len(), 2);
        assert!(locations.iter().all(|l| l.category == Category::Park));
    }

    #[tokio::test]
    async fn test_bounds_offline_empty_dataset() {
        let app = create_test_app(offline_config(), ReferenceDataset::empty());

        let response = get_response(
            app,
            "/api/locations/bounds?south=40.7&west=-74.0&north=40.8&east=-73.9",
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let locations: Vec<Location> = body_json(response).await;
        assert!(locations.is_empty());
    }

    #[tokio::test]
    async fn test_bounds_invalid_input() {
        let app = create_test_app(offline_config(), sample_dataset());

        let response = get_response(app.clone(), "/api/locations/bounds?south=40.7&west=-74.0&north=40.8").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let err: ApiError = body_json(response).await;
        assert_eq!(err.code, "INVALID_INPUT");
        assert!(err.error.contains("east"));

        let response = get_response(
            app,
            "/api/locations/bounds?south=abc&west=-74.0&north=40.8&east=-73.9",
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_locations_listing() {
        let app = create_test_app(offline_config(), sample_dataset());

        let all: Vec<Location> = body_json(get_response(app.clone(), "/api/locations").await).await;
        assert_eq!(all.len(), 4);

        let parks: Vec<Location> =
            body_json(get_response(app, "/api/locations?type=park").await).await;
        assert_eq!(parks.len(), 2);
    }

    #[tokio::test]
    async fn test_location_by_id() {
        let app = create_test_app(offline_config(), sample_dataset());

        let response = get_response(app.clone(), "/api/location/3").await;
        assert_eq!(response.status(), StatusCode::OK);
        let loc: Location = body_json(response).await;
        assert_eq!(loc.name, "Brooklyn Bridge");

        let response = get_response(app.clone(), "/api/location/99").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let err: ApiError = body_json(response).await;
        assert_eq!(err.code, "NOT_FOUND");

        let response = get_response(app, "/api/location/abc").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_geocode() {
        let app = create_test_app(online_config().await, ReferenceDataset::empty());

        let response = get_response(app, "/api/geocode?q=central%20park").await;
        assert_eq!(response.status(), StatusCode::OK);

        let results: Vec<GeocodeResult> = body_json(response).await;
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].name, "Central Park, New York");
        assert_eq!(results[0].lat, 40.7826);
        assert_eq!(results[0].kind, "park");
        assert_eq!(results[1].name, "Unknown");
        assert_eq!(results[1].lat, 0.0);
    }

    #[tokio::test]
    async fn test_geocode_missing_query() {
        let app = create_test_app(offline_config(), ReferenceDataset::empty());

        let response = get_response(app, "/api/geocode").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let err: ApiError = body_json(response).await;
        assert!(err.error.contains("No query provided"));
    }

    #[tokio::test]
    async fn test_geocode_upstream_down() {
        let app = create_test_app(offline_config(), ReferenceDataset::empty());

        let response = get_response(app, "/api/geocode?q=paris").await;
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        let err: ApiError = body_json(response).await;
        assert_eq!(err.code, "UPSTREAM_UNAVAILABLE");
    }

    #[tokio::test]
    async fn test_search() {
        let app = create_test_app(offline_config(), sample_dataset());

        let hits: Vec<Location> = body_json(get_response(app.clone(), "/api/search?q=Liberty").await).await;
        assert_eq!(hits.len(), 1);

        let hits: Vec<Location> = body_json(get_response(app, "/api/search").await).await;
        assert!(hits.is_empty());
    }

    #[tokio::test]
    async fn test_nearby() {
        let app = create_test_app(offline_config(), sample_dataset());

        // Bryant Park is about 3.6 km from Central Park's reference point
        let response = get_response(app.clone(), "/api/nearby?lat=40.7829&lng=-73.9654&radius=5").await;
        assert_eq!(response.status(), StatusCode::OK);

        let found: Vec<NearbyLocation> = body_json(response).await;
        let ids: Vec<i64> = found.iter().map(|n| n.location.id).collect();
        assert_eq!(ids, vec![1, 4]);
        assert_eq!(found[0].distance, 0.0);
        assert!(found.iter().all(|n| n.distance <= 5.0));

        // Default radius of 10 km adds Brooklyn Bridge (~8.9 km) but not
        // the Statue of Liberty (~12.4 km)
        let found: Vec<NearbyLocation> =
            body_json(get_response(app, "/api/nearby?lat=40.7829&lng=-73.9654").await).await;
        let ids: Vec<i64> = found.iter().map(|n| n.location.id).collect();
        assert_eq!(ids, vec![1, 4, 3]);
    }

    #[tokio::test]
    async fn test_nearby_invalid() {
        let app = create_test_app(offline_config(), sample_dataset());

        let response = get_response(app.clone(), "/api/nearby?lat=40.7").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = get_response(app, "/api/nearby?lat=40.7&lng=-74&radius=far").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_stats() {
        let app = create_test_app(offline_config(), sample_dataset());

        let stats: DatasetStats = body_json(get_response(app, "/api/stats").await).await;
        assert_eq!(stats.total_locations, 4);
        assert_eq!(stats.by_type["park"], 2);
    }

    #[tokio::test]
    async fn test_map_settings() {
        let app = create_test_app(offline_config(), ReferenceDataset::empty());

        let map: MapResponse = body_json(get_response(app, "/api/map").await).await;
        assert_eq!(map.zoom, 12);
        assert_eq!(map.nearby_radius_km, 10.0);
        assert_eq!(map.marker_colors["infrastructure"], "#9C27B0");
    }
}
