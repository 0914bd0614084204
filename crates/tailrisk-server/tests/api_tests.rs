//! Integration tests for the Tailrisk server endpoints.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use tailrisk_config::DashboardConfig;
use tailrisk_core::{Date, PriceSeries};
use tailrisk_engine::DashboardEngineBuilder;
use tailrisk_ext_file::{EmptyRenderer, InMemoryPriceSource};
use tailrisk_server::routes::create_router;

fn prices(values: &[f64]) -> PriceSeries {
    let start = Date::from_ymd(2024, 1, 1).unwrap();
    PriceSeries::from_pairs(
        values
            .iter()
            .enumerate()
            .map(|(i, &p)| (start.add_days(i as i64), p)),
    )
    .unwrap()
}

fn create_test_app() -> Router {
    // 20 closes with a 10% fall on day 3 and a full recovery later
    let mut closes = vec![100.0, 101.0, 90.9, 92.0];
    closes.extend((0..16).map(|i| 93.0 + f64::from(i)));

    let source = InMemoryPriceSource::new()
        .with_series("AAPL", prices(&closes))
        .with_series("FLAT", prices(&[50.0]));

    let engine = DashboardEngineBuilder::new()
        .with_config(DashboardConfig::default())
        .with_price_source(Arc::new(source))
        .with_renderer(Arc::new(EmptyRenderer))
        .build()
        .expect("Failed to build engine");

    create_router(Arc::new(engine))
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: Value = serde_json::from_slice(&body).unwrap_or(json!({}));
    (status, json)
}

#[tokio::test]
async fn test_health() {
    for uri in ["/health", "/api/v1/health"] {
        let (status, json) = get(create_test_app(), uri).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "ok");
    }
}

#[tokio::test]
async fn test_dashboard_defaults() {
    let (status, json) = get(create_test_app(), "/api/v1/dashboard").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["symbol"], "AAPL");
    assert_eq!(json["alpha"], 0.05);
    assert_eq!(json["price"]["points"].as_array().unwrap().len(), 20);
    assert_eq!(json["drawdown"]["points"].as_array().unwrap().len(), 19);

    let bars = json["tail_risk"]["bars"].as_array().unwrap();
    assert_eq!(bars[0]["label"], "VaR");
    assert_eq!(bars[1]["label"], "CVaR");
    // 19 returns at 5%: k = 0, no tail to average
    assert!(bars[1]["value"].is_null());
}

#[tokio::test]
async fn test_dashboard_with_query() {
    let (status, json) = get(create_test_app(), "/api/v1/dashboard?symbol=aapl&confidence=10").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["alpha"], 0.1);

    // k = 1, the single worst return is the 10% fall
    let cvar = json["tail_risk"]["bars"][1]["value"].as_f64().unwrap();
    assert!((cvar - 0.1).abs() < 1e-9, "{cvar}");
}

#[tokio::test]
async fn test_risk_summary() {
    let (status, json) = get(create_test_app(), "/api/v1/risk?confidence=10").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["symbol"], "AAPL");
    assert_eq!(json["metrics"]["k"], 1);
    assert_eq!(json["metrics"]["n"], 19);

    let worst = json["worst_drawdowns"].as_array().unwrap();
    assert!(!worst.is_empty());
    assert!(worst[0]["recovery"].is_string());
    let depth = json["max_drawdown"]["value"].as_f64().unwrap();
    assert!((depth - (90.9 / 101.0 - 1.0)).abs() < 1e-9, "{depth}");
}

#[tokio::test]
async fn test_error_statuses() {
    let cases = [
        ("/api/v1/dashboard?symbol=NOPE", StatusCode::NOT_FOUND),
        ("/api/v1/dashboard?confidence=0", StatusCode::BAD_REQUEST),
        ("/api/v1/dashboard?confidence=11", StatusCode::BAD_REQUEST),
        ("/api/v1/dashboard?symbol=%20", StatusCode::BAD_REQUEST),
        ("/api/v1/risk?symbol=FLAT", StatusCode::BAD_REQUEST),
    ];
    for (uri, expected) in cases {
        let (status, json) = get(create_test_app(), uri).await;
        assert_eq!(status, expected, "{uri}");
        assert!(json["error"].is_string(), "{uri}");
    }
}
