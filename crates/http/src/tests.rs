#![expect(clippy::unwrap_used, reason = "test code")]

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use healthstat_core::{Observation, StoreConfig};
use healthstat_service::{QueryService, StatsService};
use healthstat_storage::StorageBackend;
use healthstat_storage::traits::ObservationStore;
use serde_json::Value;
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

use crate::{AppState, create_router};

async fn test_app() -> (Router, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let backend = StorageBackend::from_config(&StoreConfig::sqlite(temp_dir.path().join("test.db")))
        .await
        .unwrap();
    backend
        .insert_batch(&[
            Observation::new("cancer", "prevalence", 2018).with_value(Some(1.0)),
            Observation::new("cancer", "prevalence", 2019).with_value(Some(3.0)),
            Observation::new("cancer", "prevalence", 2019).with_region("Bretagne"),
            Observation::new("cancer", "incidence", 2018).with_value(Some(40.0)),
            Observation::new("asthme", "prevalence", 2018),
        ])
        .await
        .unwrap();
    let storage = Arc::new(backend);
    let state = Arc::new(AppState {
        query_service: Arc::new(QueryService::new(Arc::clone(&storage))),
        stats_service: Arc::new(StatsService::new(storage)),
    });
    (create_router(state), temp_dir)
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let response =
        app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

#[tokio::test]
async fn health_is_ok() {
    let (app, _dir) = test_app().await;
    let response =
        app.oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap()).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn version_reports_crate_version() {
    let (app, _dir) = test_app().await;
    let (status, body) = get(app, "/api/version").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn observations_filtered_by_triple() {
    let (app, _dir) = test_app().await;

    let (status, body) =
        get(app, "/observations?disease=cancer&indicator=prevalence&year=2019").await;

    assert_eq!(status, StatusCode::OK);
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|r| r["year"] == 2019 && r["disease"] == "cancer"));
}

#[tokio::test]
async fn observations_accept_french_parameters() {
    let (app, _dir) = test_app().await;

    let (status, body) = get(app, "/observations?maladie=cancer&indicateur=incidence&annee=2018").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["value"], 40.0);
}

#[tokio::test]
async fn observations_without_filter_return_all() {
    let (app, _dir) = test_app().await;
    let (status, body) = get(app, "/observations").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn observations_limit_is_applied() {
    let (app, _dir) = test_app().await;
    let (_, body) = get(app, "/observations?limit=2").await;
    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn observations_bad_limit_is_json_bad_request() {
    let (app, _dir) = test_app().await;

    let (status, body) = get(app, "/observations?limit=abc").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("abc"));
}

#[tokio::test]
async fn observations_bad_year_is_bad_request() {
    let (app, _dir) = test_app().await;

    let (status, body) = get(app, "/observations?disease=cancer&year=abc").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("abc"));
}

#[tokio::test]
async fn stats_for_known_pair() {
    let (app, _dir) = test_app().await;

    let (status, body) = get(app, "/stats?disease=cancer&indicator=prevalence").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 3);
    assert_eq!(body["nonNullCount"], 2);
    assert_eq!(body["min"], 1.0);
    assert_eq!(body["max"], 3.0);
    assert_eq!(body["mean"], 2.0);
}

#[tokio::test]
async fn stats_for_all_null_pair_are_null() {
    let (app, _dir) = test_app().await;

    let (status, body) = get(app, "/stats?maladie=asthme&indicateur=prevalence").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 1);
    assert_eq!(body["nonNullCount"], 0);
    assert!(body["min"].is_null() && body["max"].is_null() && body["mean"].is_null());
}

#[tokio::test]
async fn stats_for_unknown_pair_is_not_found() {
    let (app, _dir) = test_app().await;
    let (status, _) = get(app, "/stats?disease=grippe&indicator=prevalence").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn stats_require_both_parameters() {
    let (app, _dir) = test_app().await;
    let (status, _) = get(app, "/stats?disease=cancer").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn stats_by_year_are_ordered() {
    let (app, _dir) = test_app().await;

    let (status, body) = get(app, "/stats/by-year?disease=cancer&indicator=prevalence").await;

    assert_eq!(status, StatusCode::OK);
    let years: Vec<i64> =
        body.as_array().unwrap().iter().map(|y| y["year"].as_i64().unwrap()).collect();
    assert_eq!(years, vec![2018, 2019]);
    assert_eq!(body[1]["count"], 2);
    assert_eq!(body[1]["nonNullCount"], 1);
}
