//! Built-in status endpoint.

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::http::request::RequestContext;
use crate::http::server::ServerContext;

#[derive(Debug, Serialize)]
pub struct SystemStatus {
    pub name: String,
    pub version: String,
    pub base_path: String,
    pub status: &'static str,
}

/// `GET /api/status`, relative to the base path.
pub fn router(ctx: &ServerContext) -> Router {
    Router::new()
        .route("/api/status", get(get_status))
        .with_state(ctx.clone())
}

async fn get_status(
    State(ctx): State<ServerContext>,
    request: RequestContext,
) -> Json<SystemStatus> {
    let server = &ctx.config().server;
    Json(SystemStatus {
        name: server.name.clone(),
        version: server.version.clone(),
        base_path: request.base_path,
        status: "green",
    })
}
