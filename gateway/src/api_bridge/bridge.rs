use neocore::catalog::{ObjectDetail, ObjectEnvelope};
use neocore::prelude::{CatalogError, FeedWindow, ObjectSource};
use neocore::telemetry::{LogManager, MetricsRecorder};
use serde::Deserialize;
use serde_json::json;
use std::{
    net::SocketAddr,
    sync::{Arc, RwLock},
    thread,
};
use tokio::runtime::Builder;
use warp::{http::StatusCode, Filter};

/// The cached detail of the most recently looked-up object, the legacy
/// backend's module-global. A follow-up GET serves it without a second
/// upstream call.
type SharedDetail = Arc<RwLock<Option<ObjectDetail>>>;

#[derive(Debug, Deserialize)]
struct FeedRequest {
    #[serde(default)]
    start_date: Option<String>,
    #[serde(default)]
    end_date: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ObjectRequest {
    #[serde(default)]
    id: Option<String>,
}

/// Bridge that hosts the viewer-facing HTTP endpoints over an upstream
/// catalog source.
pub struct ApiBridge {
    metrics: Arc<MetricsRecorder>,
    logger: LogManager,
}

impl ApiBridge {
    pub fn new(source: Arc<dyn ObjectSource>, address: SocketAddr) -> Self {
        let state: SharedDetail = Arc::new(RwLock::new(None));
        let metrics = Arc::new(MetricsRecorder::new());

        let route_metrics = metrics.clone();
        thread::spawn(move || {
            let routes = routes(source, state, route_metrics);
            let runtime = Builder::new_current_thread()
                .enable_all()
                .build()
                .expect("failed to build runtime");
            runtime.block_on(async move {
                warp::serve(routes).run(address).await;
            });
        });

        Self {
            metrics,
            logger: LogManager::new(),
        }
    }

    pub fn publish_status(&self, message: &str) {
        self.logger.record(message);
    }

    /// (feeds served, lookups served, errors) since startup.
    pub fn metrics_snapshot(&self) -> (usize, usize, usize) {
        self.metrics.snapshot()
    }
}

/// Warp route set, separated from the serving thread so tests can drive it
/// with `warp::test`.
pub fn routes(
    source: Arc<dyn ObjectSource>,
    state: SharedDetail,
    metrics: Arc<MetricsRecorder>,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    let source_filter = {
        let source = source.clone();
        warp::any().map(move || source.clone())
    };
    let state_filter = {
        let state = state.clone();
        warp::any().map(move || state.clone())
    };
    let metrics_filter = {
        let metrics = metrics.clone();
        warp::any().map(move || metrics.clone())
    };

    let feed_post = warp::path!("api" / "neo")
        .and(warp::post())
        .and(warp::body::json())
        .and(source_filter.clone())
        .and(metrics_filter.clone())
        .and_then(handle_feed_post);

    let feed_get = warp::path!("api" / "neo")
        .and(warp::get())
        .and(source_filter.clone())
        .and(metrics_filter.clone())
        .and_then(handle_feed_get);

    let object_post = warp::path!("api" / "neoObject")
        .and(warp::post())
        .and(warp::body::json())
        .and(state_filter.clone())
        .and(source_filter)
        .and(metrics_filter)
        .and_then(handle_object_post);

    let object_get = warp::path!("api" / "neoObject")
        .and(warp::get())
        .and(state_filter)
        .and_then(handle_object_get);

    feed_post.or(feed_get).or(object_post).or(object_get)
}

type JsonReply = warp::reply::WithStatus<warp::reply::Json>;

fn reply_error(status: StatusCode, message: &str) -> JsonReply {
    warp::reply::with_status(warp::reply::json(&json!({ "error": message })), status)
}

async fn handle_feed_post(
    request: FeedRequest,
    source: Arc<dyn ObjectSource>,
    metrics: Arc<MetricsRecorder>,
) -> Result<JsonReply, warp::Rejection> {
    let (start, end) = match (request.start_date, request.end_date) {
        (Some(start), Some(end)) if !start.is_empty() && !end.is_empty() => (start, end),
        _ => {
            return Ok(reply_error(
                StatusCode::BAD_REQUEST,
                "Start date and end date are required",
            ))
        }
    };
    let window = match FeedWindow::parse(&start, &end) {
        Ok(window) => window,
        Err(err) => return Ok(reply_error(StatusCode::BAD_REQUEST, &err.to_string())),
    };
    Ok(serve_feed(&window, source, metrics).await)
}

async fn handle_feed_get(
    source: Arc<dyn ObjectSource>,
    metrics: Arc<MetricsRecorder>,
) -> Result<JsonReply, warp::Rejection> {
    Ok(serve_feed(&FeedWindow::today(), source, metrics).await)
}

async fn serve_feed(
    window: &FeedWindow,
    source: Arc<dyn ObjectSource>,
    metrics: Arc<MetricsRecorder>,
) -> JsonReply {
    match source.feed(window).await {
        Ok(rows) => {
            metrics.record_feed();
            warp::reply::with_status(warp::reply::json(&json!({ "data": rows })), StatusCode::OK)
        }
        Err(err) => {
            metrics.record_error();
            log::error!("feed {}..{} failed: {err}", window.start_str(), window.end_str());
            reply_error(StatusCode::BAD_GATEWAY, "Failed to fetch data")
        }
    }
}

async fn handle_object_post(
    request: ObjectRequest,
    state: SharedDetail,
    source: Arc<dyn ObjectSource>,
    metrics: Arc<MetricsRecorder>,
) -> Result<JsonReply, warp::Rejection> {
    let identifier = match request.id.as_deref().filter(|id| !id.is_empty()) {
        Some(id) => id.to_string(),
        None => return Ok(reply_error(StatusCode::BAD_REQUEST, "ID is required")),
    };

    match source.lookup(&identifier).await {
        Ok(detail) => match ObjectEnvelope::encode(&detail, &identifier, "ok") {
            Ok(envelope) => {
                *state.write().unwrap() = Some(detail);
                metrics.record_lookup();
                Ok(warp::reply::with_status(
                    warp::reply::json(&envelope),
                    StatusCode::OK,
                ))
            }
            Err(err) => {
                metrics.record_error();
                log::error!("encoding detail for {identifier} failed: {err}");
                Ok(reply_error(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to encode object data",
                ))
            }
        },
        Err(CatalogError::NotFound(_)) => {
            metrics.record_error();
            Ok(reply_error(StatusCode::NOT_FOUND, "No data found"))
        }
        Err(err) => {
            metrics.record_error();
            log::error!("lookup {identifier} failed: {err}");
            Ok(reply_error(StatusCode::BAD_GATEWAY, "Failed to fetch data"))
        }
    }
}

async fn handle_object_get(state: SharedDetail) -> Result<JsonReply, warp::Rejection> {
    let cached = state.read().unwrap().clone();
    match cached {
        Some(detail) => Ok(warp::reply::with_status(
            warp::reply::json(&json!({ "data": detail.orbital_data })),
            StatusCode::OK,
        )),
        None => Ok(reply_error(StatusCode::NOT_FOUND, "No object cached")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use neocore::catalog::{
        ApproachRecord, MissDistance, NeoSummary, OrbitRecord, RelativeVelocity,
    };
    use neocore::prelude::CatalogResult;

    struct CannedSource {
        detail: ObjectDetail,
    }

    #[async_trait]
    impl ObjectSource for CannedSource {
        async fn feed(&self, window: &FeedWindow) -> CatalogResult<Vec<NeoSummary>> {
            Ok(vec![NeoSummary {
                name: "(2018 VP1)".into(),
                id: "54016476".into(),
                absolute_magnitude_h: 27.6,
                diameter_min_km: 0.009,
                diameter_max_km: 0.02,
                approach_date: window.start_str(),
                miss_distance_km: "419842.6".into(),
                velocity_kmph: "34026.3".into(),
                is_hazardous: false,
                nasa_jpl_url: String::new(),
            }])
        }

        async fn lookup(&self, identifier: &str) -> CatalogResult<ObjectDetail> {
            match identifier {
                "404" => Err(CatalogError::NotFound(identifier.into())),
                "boom" => Err(CatalogError::Upstream("connection reset".into())),
                _ => Ok(self.detail.clone()),
            }
        }
    }

    fn canned_detail() -> ObjectDetail {
        ObjectDetail {
            sorted_approaches: vec![ApproachRecord {
                close_approach_date: "2024-01-01".into(),
                close_approach_date_full: "2024-Jan-01 00:00".into(),
                miss_distance: MissDistance {
                    astronomical: "0.05".into(),
                    kilometers: "7479893.5".into(),
                    lunar: "19.4".into(),
                    miles: "4647787.0".into(),
                },
                orbiting_body: "Earth".into(),
                relative_velocity: RelativeVelocity {
                    kilometers_per_hour: "25000.0".into(),
                    kilometers_per_second: "6.94".into(),
                    miles_per_hour: "15534.3".into(),
                },
            }],
            orbital_data: vec![OrbitRecord {
                orbit_id: "12".into(),
                orbit_determination_date: "2021-04-15 06:20:34".into(),
                first_observation_date: "1893-10-29".into(),
                last_observation_date: "2021-04-13".into(),
                data_arc_in_days: 46553,
                observations_used: 9130,
                orbit_uncertainty: "0".into(),
                minimum_orbit_intersection: ".149638".into(),
                jupiter_tisserand_invariant: "4.582".into(),
                epoch_osculation: "2460800.5".into(),
                eccentricity: ".22".into(),
                semi_major_axis: "1.45".into(),
                inclination: "10.8".into(),
                ascending_node_longitude: "304.2".into(),
                orbital_period: "643.1".into(),
                perihelion_distance: "1.13".into(),
                perihelion_argument: "178.9".into(),
                aphelion_distance: "1.78".into(),
                perihelion_time: "2460804.0".into(),
                mean_anomaly: "358.04".into(),
                mean_motion: "0.559".into(),
                equinox: "J2000".into(),
            }],
        }
    }

    fn test_routes() -> (
        impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone,
        SharedDetail,
        Arc<MetricsRecorder>,
    ) {
        let source = Arc::new(CannedSource {
            detail: canned_detail(),
        });
        let state: SharedDetail = Arc::new(RwLock::new(None));
        let metrics = Arc::new(MetricsRecorder::new());
        (
            routes(source, state.clone(), metrics.clone()),
            state,
            metrics,
        )
    }

    #[tokio::test]
    async fn object_post_replies_with_envelope_and_caches_detail() {
        let (routes, state, metrics) = test_routes();
        let response = warp::test::request()
            .method("POST")
            .path("/api/neoObject")
            .json(&json!({ "id": "3542519" }))
            .reply(&routes)
            .await;
        assert_eq!(response.status(), StatusCode::OK);

        let envelope: ObjectEnvelope = serde_json::from_slice(response.body()).unwrap();
        assert_eq!(envelope.identifier, "3542519");
        assert_eq!(envelope.decode().unwrap(), canned_detail());
        assert_eq!(state.read().unwrap().clone(), Some(canned_detail()));
        assert_eq!(metrics.snapshot(), (0, 1, 0));
    }

    #[tokio::test]
    async fn object_post_without_id_is_rejected() {
        let (routes, state, _metrics) = test_routes();
        let response = warp::test::request()
            .method("POST")
            .path("/api/neoObject")
            .json(&json!({}))
            .reply(&routes)
            .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(state.read().unwrap().is_none());
    }

    #[tokio::test]
    async fn unknown_object_maps_to_not_found() {
        let (routes, _state, metrics) = test_routes();
        let response = warp::test::request()
            .method("POST")
            .path("/api/neoObject")
            .json(&json!({ "id": "404" }))
            .reply(&routes)
            .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(metrics.snapshot(), (0, 0, 1));
    }

    #[tokio::test]
    async fn upstream_failure_maps_to_bad_gateway() {
        let (routes, _state, _metrics) = test_routes();
        let response = warp::test::request()
            .method("POST")
            .path("/api/neoObject")
            .json(&json!({ "id": "boom" }))
            .reply(&routes)
            .await;
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn object_get_serves_the_cached_orbital_data() {
        let (routes, state, _metrics) = test_routes();
        let empty = warp::test::request()
            .method("GET")
            .path("/api/neoObject")
            .reply(&routes)
            .await;
        assert_eq!(empty.status(), StatusCode::NOT_FOUND);

        *state.write().unwrap() = Some(canned_detail());
        let cached = warp::test::request()
            .method("GET")
            .path("/api/neoObject")
            .reply(&routes)
            .await;
        assert_eq!(cached.status(), StatusCode::OK);
        let body: serde_json::Value = serde_json::from_slice(cached.body()).unwrap();
        assert_eq!(body["data"][0]["orbit_id"], "12");
    }

    #[tokio::test]
    async fn feed_post_requires_both_dates() {
        let (routes, _state, _metrics) = test_routes();
        let response = warp::test::request()
            .method("POST")
            .path("/api/neo")
            .json(&json!({ "start_date": "2024-03-01" }))
            .reply(&routes)
            .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = serde_json::from_slice(response.body()).unwrap();
        assert_eq!(body["error"], "Start date and end date are required");
    }

    #[tokio::test]
    async fn feed_post_rejects_malformed_dates() {
        let (routes, _state, _metrics) = test_routes();
        let response = warp::test::request()
            .method("POST")
            .path("/api/neo")
            .json(&json!({ "start_date": "03/01/2024", "end_date": "2024-03-07" }))
            .reply(&routes)
            .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = serde_json::from_slice(response.body()).unwrap();
        assert_eq!(body["error"], "Invalid date format. Use YYYY-MM-DD");
    }

    #[tokio::test]
    async fn feed_post_returns_rows_for_a_valid_window() {
        let (routes, _state, metrics) = test_routes();
        let response = warp::test::request()
            .method("POST")
            .path("/api/neo")
            .json(&json!({ "start_date": "2024-03-01", "end_date": "2024-03-07" }))
            .reply(&routes)
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body: serde_json::Value = serde_json::from_slice(response.body()).unwrap();
        assert_eq!(body["data"][0]["approach_date"], "2024-03-01");
        assert_eq!(metrics.snapshot(), (1, 0, 0));
    }

    #[tokio::test]
    async fn feed_get_serves_todays_window() {
        let (routes, _state, _metrics) = test_routes();
        let response = warp::test::request()
            .method("GET")
            .path("/api/neo")
            .reply(&routes)
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body: serde_json::Value = serde_json::from_slice(response.body()).unwrap();
        assert_eq!(body["data"].as_array().unwrap().len(), 1);
    }
}
