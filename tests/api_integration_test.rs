use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use chrono::NaiveDateTime;
use httpmock::prelude::*;
use iss_tracker::adapters::{FixedClock, HttpFeedSource, NominatimGeocoder};
use iss_tracker::{api, IssTracker};
use reqwest::Client;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

const FEED_PATH: &str = "/ISS.OEM_J2K_EPH.xml";
const SAMPLE_OEM: &str = include_str!("fixtures/iss_oem_sample.xml");

fn fixed_clock(value: &str) -> FixedClock {
    FixedClock(NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S").unwrap())
}

fn build_app(server: &MockServer, clock: FixedClock) -> Router {
    let feed = HttpFeedSource::new(Client::new(), server.url(FEED_PATH));
    let geocoder = NominatimGeocoder::new(Client::new(), server.base_url());
    let tracker = IssTracker::new(feed, geocoder).with_clock(clock);
    api::router(Arc::new(tracker))
}

async fn start_feed_server() -> MockServer {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path(FEED_PATH);
            then.status(200)
                .header("Content-Type", "application/xml")
                .body(SAMPLE_OEM);
        })
        .await;
    server
}

async fn get(app: &Router, uri: &str) -> (StatusCode, String) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

async fn get_json(app: &Router, uri: &str) -> Value {
    let (status, body) = get(app, uri).await;
    assert_eq!(status, StatusCode::OK, "unexpected body: {}", body);
    serde_json::from_str(&body).unwrap()
}

#[tokio::test]
async fn test_list_epochs_with_limit_and_offset() {
    let server = start_feed_server().await;
    let app = build_app(&server, fixed_clock("2024-03-08 12:00:00"));

    let all = get_json(&app, "/epochs").await;
    assert_eq!(all.as_array().unwrap().len(), 6);

    let page = get_json(&app, "/epochs?limit=5&offset=0").await;
    let page = page.as_array().unwrap();
    assert_eq!(page.len(), 5);
    assert_eq!(page[0]["epoch"], "2024-068T12:00:00.000Z");

    let tail = get_json(&app, "/epochs?offset=4").await;
    let tail = tail.as_array().unwrap();
    assert_eq!(tail.len(), 2);
    assert_eq!(tail[0]["epoch"], "2024-068T12:16:00.000Z");

    let past_end = get_json(&app, "/epochs?offset=100&limit=3").await;
    assert!(past_end.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_list_epochs_rejects_non_integer_params() {
    let server = start_feed_server().await;
    let app = build_app(&server, fixed_clock("2024-03-08 12:00:00"));

    let (status, body) = get(&app, "/epochs?limit=abc").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        "Invalid limit parameter; limit must be a non-negative integer.\n"
    );

    let (status, body) = get(&app, "/epochs?offset=-2").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.starts_with("Invalid offset parameter"));
}

#[tokio::test]
async fn test_single_epoch_and_speed() {
    let server = start_feed_server().await;
    let app = build_app(&server, fixed_clock("2024-03-08 12:00:00"));

    let sv = get_json(&app, "/epochs/2024-068T12:04:00.000Z").await;
    assert_eq!(sv["epoch"], "2024-068T12:04:00.000Z");
    assert!(sv["position"]["x"].as_f64().unwrap() > 5000.0);

    let speed = get_json(&app, "/epochs/2024-068T12:04:00.000Z/speed").await;
    assert_eq!(speed["units"], "km/s");
    assert!((speed["speed"].as_f64().unwrap() - 7.66).abs() < 1e-6);
}

#[tokio::test]
async fn test_unknown_epoch_is_not_found() {
    let server = start_feed_server().await;
    let app = build_app(&server, fixed_clock("2024-03-08 12:00:00"));

    for uri in [
        "/epochs/2024-068T12:02:00.000Z",
        "/epochs/not-an-epoch/speed",
        "/epochs/2030-001T00:00:00.000Z/location",
    ] {
        let (status, body) = get(&app, uri).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{}", uri);
        assert!(body.starts_with("Epoch not found"));
    }
}

#[tokio::test]
async fn test_epoch_location_with_place_name() {
    let server = start_feed_server().await;
    let reverse_mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/reverse").query_param("zoom", "15");
            then.status(200)
                .json_body(serde_json::json!({"display_name": "Nunavut, Canada"}));
        })
        .await;
    let app = build_app(&server, fixed_clock("2024-03-08 12:00:00"));

    let location = get_json(&app, "/epochs/2024-068T12:00:00.000Z/location").await;

    reverse_mock.assert_async().await;
    assert_eq!(location["geolocation"], "Nunavut, Canada");
    let latitude = location["latitude"].as_f64().unwrap();
    let longitude = location["longitude"].as_f64().unwrap();
    let altitude = location["altitude"].as_f64().unwrap();
    // 地固座標約為 (5260.66, 1275.05, 4079.57) km
    assert!(latitude > 36.9 && latitude < 37.5, "lat = {}", latitude);
    assert!((longitude - 13.624).abs() < 0.05, "lon = {}", longitude);
    assert!(altitude > 400.0 && altitude < 415.0, "alt = {}", altitude);
}

#[tokio::test]
async fn test_epoch_location_without_place_name() {
    let server = start_feed_server().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/reverse");
            then.status(200)
                .json_body(serde_json::json!({"error": "Unable to geocode"}));
        })
        .await;
    let app = build_app(&server, fixed_clock("2024-03-08 12:00:00"));

    let location = get_json(&app, "/epochs/2024-068T12:00:00.000Z/location").await;

    assert!(location["geolocation"].is_null());
    assert!(location["latitude"].is_number());
}

#[tokio::test]
async fn test_now_returns_nearest_epoch() {
    let server = start_feed_server().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/reverse");
            then.status(200)
                .json_body(serde_json::json!({"display_name": "Atlantic Ocean"}));
        })
        .await;
    let app = build_app(&server, fixed_clock("2024-03-08 12:09:00"));

    let now = get_json(&app, "/now").await;

    assert_eq!(now["epoch"], "2024-068T12:08:00.000Z");
    assert!((now["instantaneous_speed"].as_f64().unwrap() - 7.66).abs() < 1e-6);
    assert_eq!(now["geolocation"], "Atlantic Ocean");
    assert!(now["altitude"].is_number());
}

#[tokio::test]
async fn test_now_outside_feed_window() {
    let server = start_feed_server().await;
    let app = build_app(&server, fixed_clock("2024-03-09 12:09:00"));

    let (status, body) = get(&app, "/now").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("day 69"));
}

#[tokio::test]
async fn test_comment_header_metadata_passthrough() {
    let server = start_feed_server().await;
    let app = build_app(&server, fixed_clock("2024-03-08 12:00:00"));

    let comments = get_json(&app, "/comment").await;
    let comments = comments.as_array().unwrap();
    assert_eq!(comments.len(), 4);
    assert_eq!(comments[1], "MASS=459325.00");

    let header = get_json(&app, "/header").await;
    assert_eq!(header["CREATION_DATE"], "2024-068T18:36:27.254Z");
    assert_eq!(header["ORIGINATOR"], "JSC");

    let metadata = get_json(&app, "/metadata").await;
    assert_eq!(metadata["OBJECT_NAME"], "ISS");
    assert_eq!(metadata["REF_FRAME"], "EME2000");
    assert_eq!(metadata["STOP_TIME"], "2024-068T12:20:00.000Z");
}

#[tokio::test]
async fn test_feed_failure_is_bad_gateway() {
    let server = MockServer::start_async().await;
    let feed_mock = server
        .mock_async(|when, then| {
            when.method(GET).path(FEED_PATH);
            then.status(500);
        })
        .await;
    let app = build_app(&server, fixed_clock("2024-03-08 12:00:00"));

    let (status, body) = get(&app, "/epochs").await;

    feed_mock.assert_async().await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body, "ISS ephemeris feed is currently unavailable\n");
}

#[tokio::test]
async fn test_health_does_not_touch_feed() {
    let server = MockServer::start_async().await;
    let feed_mock = server
        .mock_async(|when, then| {
            when.method(GET).path(FEED_PATH);
            then.status(200).body(SAMPLE_OEM);
        })
        .await;
    let app = build_app(&server, fixed_clock("2024-03-08 12:00:00"));

    let (status, body) = get(&app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "ok");
    feed_mock.assert_hits_async(0).await;
}
