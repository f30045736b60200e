//! XSRF header requirement.
//!
//! Unsafe methods must carry `kbn-xsrf` (any value) or `kbn-version`.
//! Browsers cannot add custom headers to cross-site form posts, so the
//! presence of either is enough.

use axum::{
    extract::{Request, State},
    http::Method,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::error::FrontDoorError;
use crate::http::middleware::version::VERSION_HEADER;
use crate::http::server::ServerContext;
use crate::observability::metrics;

/// Request header that marks a request as deliberately issued by a client.
pub const XSRF_HEADER: &str = "kbn-xsrf";

pub async fn check_xsrf(
    State(ctx): State<ServerContext>,
    request: Request,
    next: Next,
) -> Response {
    let xsrf = &ctx.config().xsrf;
    if xsrf.disable_protection {
        return next.run(request).await;
    }

    let path = request.uri().path();
    if xsrf.whitelist.iter().any(|allowed| allowed == path) {
        return next.run(request).await;
    }

    let is_safe_method = matches!(*request.method(), Method::GET | Method::HEAD);
    let headers = request.headers();
    let has_token = headers.contains_key(XSRF_HEADER) || headers.contains_key(VERSION_HEADER);

    if !is_safe_method && !has_token {
        tracing::warn!(method = %request.method(), path = %path, "Missing XSRF header");
        metrics::record_rejection("xsrf");
        return FrontDoorError::bad_request(
            format!("Request must contain a {XSRF_HEADER} header."),
            None,
        )
        .into_response();
    }

    next.run(request).await
}
