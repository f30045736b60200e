//! Post-response header injection.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::http::response::ResponseEnvelope;
use crate::http::server::ServerContext;
use crate::observability::metrics;

/// Run the rest of the pipeline, then stamp the configured headers on the result.
pub async fn inject_response_headers(
    State(ctx): State<ServerContext>,
    request: Request,
    next: Next,
) -> Response {
    let response = next.run(request).await;
    let envelope = ResponseEnvelope::from(response);

    metrics::record_response(envelope.is_failure(), envelope.response().status().as_u16());

    envelope.inject(ctx.response_headers())
}
