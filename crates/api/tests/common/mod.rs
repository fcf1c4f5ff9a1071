//! Shared helpers for HTTP-level integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;

use chatflow_api::config::ServerConfig;
use chatflow_api::router::build_app_router;
use chatflow_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        database_url: String::new(),
        db_max_connections: 5,
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(app: Router, method: Method, uri: &str, body: Option<Value>) -> Response<Body> {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn put_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, Method::PUT, uri, Some(body)).await
}

pub async fn patch_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, Method::PATCH, uri, Some(body)).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, None).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Create a project and one group through the API. Returns `(project_id, group_id)`.
pub async fn seed_group(pool: &PgPool) -> (String, String) {
    let resp = post_json(
        build_test_app(pool.clone()),
        "/api/v1/projects",
        serde_json::json!({"name": "Support bot"}),
    )
    .await;
    let project_id = body_json(resp).await["data"]["id"]
        .as_str()
        .unwrap()
        .to_string();
    let group_id = add_group(pool, &project_id, "Greeting").await;
    (project_id, group_id)
}

/// Create another group in a project. Returns its id.
pub async fn add_group(pool: &PgPool, project_id: &str, name: &str) -> String {
    let resp = post_json(
        build_test_app(pool.clone()),
        &format!("/api/v1/projects/{project_id}/groups"),
        serde_json::json!({ "name": name }),
    )
    .await;
    body_json(resp).await["data"]["id"]
        .as_str()
        .unwrap()
        .to_string()
}

/// Base URI of a group.
pub fn group_uri(project_id: &str, group_id: &str) -> String {
    format!("/api/v1/projects/{project_id}/groups/{group_id}")
}

/// POST a body to `uri` and return the created item's id.
pub async fn create_item(pool: &PgPool, uri: &str, body: Value) -> String {
    let resp = post_json(build_test_app(pool.clone()), uri, body).await;
    assert_eq!(resp.status(), axum::http::StatusCode::CREATED);
    body_json(resp).await["data"]["id"]
        .as_str()
        .unwrap()
        .to_string()
}
