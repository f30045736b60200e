//! Client version check.
//!
//! Browsers send the version they were built against in `kbn-version`. A
//! mismatch means the client bundle is stale, so the request is refused
//! before it reaches a handler.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::error::FrontDoorError;
use crate::http::server::ServerContext;
use crate::observability::metrics;

/// Request header carrying the client's version.
pub const VERSION_HEADER: &str = "kbn-version";

pub async fn check_version(
    State(ctx): State<ServerContext>,
    request: Request,
    next: Next,
) -> Response {
    let expected = &ctx.config().server.version;

    if let Some(requested) = request.headers().get(VERSION_HEADER) {
        let requested = String::from_utf8_lossy(requested.as_bytes());
        if requested != expected.as_str() {
            tracing::warn!(expected = %expected, got = %requested, "Client version mismatch");
            metrics::record_rejection("version");
            return FrontDoorError::bad_request(
                "Browser client is out of date, please refresh the page",
                Some(json!({ "expected": expected, "got": requested })),
            )
            .into_response();
        }
    }

    next.run(request).await
}
