//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::Path;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    response::{IntoResponse, Response},
    routing,
    Router,
};
use front_door::config::{FrontDoorConfig, StaticMountConfig};
use front_door::http::HttpServer;
use http_body_util::BodyExt;
use tempfile::TempDir;
use tower::ServiceExt;

/// Asset tree used by the static mount tests:
///
/// ```text
/// logo.png
/// app.js, app.js.gz
/// fonts/            (directory, no index)
/// fonts/roboto.woff
/// ```
pub fn asset_dir() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("logo.png"), b"png-bytes").unwrap();
    fs::write(dir.path().join("app.js"), b"console.log('plain');").unwrap();
    fs::write(dir.path().join("app.js.gz"), b"gzip-bytes").unwrap();
    fs::create_dir(dir.path().join("fonts")).unwrap();
    fs::write(dir.path().join("fonts").join("roboto.woff"), b"font").unwrap();
    dir
}

/// Config with one `/ui` mount over `assets`.
pub fn config(base_path: &str, assets: &Path) -> FrontDoorConfig {
    let mut config = FrontDoorConfig::default();
    config.server.base_path = base_path.to_string();
    config.server.default_route = "/app/home".to_string();
    config.static_mounts = vec![StaticMountConfig {
        url_prefix: "/ui".to_string(),
        directory: assets.display().to_string(),
    }];
    config
}

/// Application routes standing in for real plugins.
pub fn app_routes() -> Router {
    Router::new()
        .route("/app/home", routing::get(|| async { "home" }))
        .route("/api/echo", routing::post(|| async { "ok" }))
        .route("/api/hook", routing::post(|| async { "hooked" }))
        .route(
            "/api/fail",
            routing::get(|| async {
                (StatusCode::INTERNAL_SERVER_ERROR, [("x-error-id", "123")], "boom")
            }),
        )
        .route(
            "/api/tagged",
            routing::get(|| async { ([("x-foo", "from-handler"), ("x-other", "kept")], "tagged") }),
        )
}

pub fn router(config: FrontDoorConfig) -> Router {
    HttpServer::new(config).unwrap().with_routes(app_routes()).into_router()
}

pub async fn send(router: &Router, request: Request<Body>) -> Response {
    router.clone().oneshot(request).await.unwrap().into_response()
}

pub async fn get(router: &Router, uri: &str) -> Response {
    send(router, Request::builder().uri(uri).body(Body::empty()).unwrap()).await
}

pub async fn body_string(response: Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub fn location(response: &Response) -> &str {
    response.headers()["location"].to_str().unwrap()
}
