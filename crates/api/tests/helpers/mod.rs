#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use dnswatch_api::{create_api_routes, AppState};
use dnswatch_application::use_cases::{GetRecentResolutionsUseCase, RecordResolutionUseCase};
use dnswatch_infrastructure::reporting::InMemoryResolutionLog;
use http_body_util::BodyExt;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

pub fn create_test_app(capacity: usize) -> Router {
    let log = Arc::new(InMemoryResolutionLog::new(capacity));
    let state = AppState {
        record_resolution: Arc::new(RecordResolutionUseCase::new(log.clone())),
        get_resolutions: Arc::new(GetRecentResolutionsUseCase::new(log)),
    };
    create_api_routes(state)
}

pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}

pub async fn post_json(app: &Router, body: impl Into<String>) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/api/dns-resolutions")
        .header("content-type", "application/json")
        .body(Body::from(body.into()))
        .unwrap();
    send(app, request).await
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}
