#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{HeaderValue, Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::SqlitePool;
use tower::ServiceExt;

use laundry_api::config::{LogFormat, ServerConfig};
use laundry_api::router::build_app_router;
use laundry_api::state::AppState;
use laundry_core::clock::{Clock, ManualClock};

/// Fixed start time for tests that do not care about the clock.
pub const T0: i64 = 1_000;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        database_url: "sqlite::memory:".to_string(),
        cors_origins: vec![HeaderValue::from_static("http://localhost:5173")],
        request_timeout_secs: 30,
        log_sql: false,
        log_format: LogFormat::Pretty,
    }
}

/// Build the full application router on `pool` with a clock pinned at [`T0`].
pub fn build_test_app(pool: SqlitePool) -> Router {
    build_test_app_with_clock(pool, Arc::new(ManualClock::new(T0)))
}

/// Build the full application router on `pool` reading time from `clock`.
///
/// Uses the same [`build_app_router`] as `main.rs`, so the whole middleware
/// stack is exercised.
pub fn build_test_app_with_clock(pool: SqlitePool, clock: Arc<dyn Clock>) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        clock,
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri, Body::empty()).await
}

pub async fn delete(app: Router, uri: &str) -> Response {
    send(app, Method::DELETE, uri, Body::empty()).await
}

pub async fn post_json(app: Router, uri: &str, json: serde_json::Value) -> Response {
    send(app, Method::POST, uri, Body::from(json.to_string())).await
}

/// POST an arbitrary (possibly invalid) body.
pub async fn post_raw(app: Router, uri: &str, body: &'static str) -> Response {
    send(app, Method::POST, uri, Body::from(body)).await
}

async fn send(app: Router, method: Method, uri: &str, body: Body) -> Response {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(body)
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Create a location through the API and return its id.
pub async fn create_location(app: Router, name: &str) -> i64 {
    let response = post_json(
        app,
        "/api/locations/create/",
        serde_json::json!({ "name": name }),
    )
    .await;
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

/// Create a machine through the API and return its id.
pub async fn create_machine(app: Router, body: serde_json::Value) -> i64 {
    let response = post_json(app, "/api/machines/create/", body).await;
    body_json(response).await["data"]["id"].as_i64().unwrap()
}
