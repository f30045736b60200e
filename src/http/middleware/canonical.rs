//! Default-route and canonical-path redirects.

use axum::{
    extract::{Request, State},
    http::{header, uri::PathAndQuery, HeaderValue, Method, StatusCode, Uri},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::error::FrontDoorError;
use crate::http::request::RequestContext;
use crate::http::server::ServerContext;
use crate::observability::metrics;
use crate::routing::canonical::{canonicalize, default_route_target, CanonicalDecision};

/// Redirect non-canonical GET/HEAD requests, strip the base path from the rest.
///
/// Accepted requests reach the router with a base-relative URI and a
/// [`RequestContext`] in their extensions.
pub async fn canonicalize_request(
    State(ctx): State<ServerContext>,
    mut request: Request,
    next: Next,
) -> Response {
    let context = RequestContext::new(&request, ctx.base_path());
    let redirectable = matches!(*request.method(), Method::GET | Method::HEAD);

    if redirectable {
        if context.path == "/" {
            return default_route_redirect(&ctx, &context);
        }
        let decision = canonicalize(&context.path, &context.base_path, context.query.as_deref());
        if let CanonicalDecision::RedirectPermanent(target) = decision {
            tracing::debug!(path = %context.path, target = %target, "Redirecting to canonical path");
            metrics::record_redirect("canonical");
            return redirect(StatusCode::MOVED_PERMANENTLY, &target);
        }
    }

    if context.is_outside_base_path() {
        tracing::debug!(
            method = %request.method(),
            path = %context.path,
            base_path = %context.base_path,
            "Request outside base path"
        );
        return FrontDoorError::NotFound.into_response();
    }

    let app_path = context.app_path();
    if redirectable && app_path == "/" {
        return default_route_redirect(&ctx, &context);
    }

    if !context.base_path.is_empty() {
        match rebase_uri(request.uri(), &app_path) {
            Ok(uri) => *request.uri_mut() = uri,
            Err(err) => return err.into_response(),
        }
    }

    request.extensions_mut().insert(context);
    next.run(request).await
}

/// Temporary redirect from the application root to the default route.
fn default_route_redirect(ctx: &ServerContext, context: &RequestContext) -> Response {
    let target = default_route_target(&context.base_path, &ctx.config().server.default_route);
    tracing::debug!(target = %target, "Redirecting to default route");
    metrics::record_redirect("default_route");
    redirect(StatusCode::FOUND, &target)
}

fn redirect(status: StatusCode, target: &str) -> Response {
    match HeaderValue::from_str(target) {
        Ok(location) => (status, [(header::LOCATION, location)]).into_response(),
        Err(_) => FrontDoorError::bad_request("Invalid redirect target", None).into_response(),
    }
}

/// Replace the path of `uri`, keeping its query.
fn rebase_uri(uri: &Uri, path: &str) -> Result<Uri, FrontDoorError> {
    let path_and_query = match uri.query() {
        Some(query) => format!("{path}?{query}"),
        None => path.to_string(),
    };

    let mut parts = uri.clone().into_parts();
    parts.path_and_query = Some(
        PathAndQuery::try_from(path_and_query)
            .map_err(|_| FrontDoorError::bad_request("Invalid request path", None))?,
    );
    Uri::from_parts(parts).map_err(|_| FrontDoorError::bad_request("Invalid request path", None))
}
