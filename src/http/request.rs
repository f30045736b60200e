//! Request context.
//!
//! # Responsibilities
//! - Capture the incoming path and raw query before any rewrite
//! - Record the base path the request was resolved against
//! - Expose the context to handlers as an extractor
//!
//! # Design Decisions
//! - Built once per request by the pipeline, then read-only
//! - Query string is kept opaque; it is never decoded or re-encoded

use std::convert::Infallible;

use axum::{
    extract::FromRequestParts,
    http::{request::Parts, Request},
};

use crate::routing::canonical::{is_within, strip_base};
use crate::routing::BasePathResolver;

/// What the pipeline knows about a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    /// Path as received, before the base path is stripped.
    pub path: String,
    /// Raw query string without the leading `?`.
    pub query: Option<String>,
    /// Effective base path; empty or without trailing slash.
    pub base_path: String,
}

impl RequestContext {
    pub fn new<B>(req: &Request<B>, resolver: &BasePathResolver) -> Self {
        Self {
            path: req.uri().path().to_string(),
            query: req.uri().query().map(str::to_string),
            base_path: resolver.resolve(req),
        }
    }

    /// Path relative to the base path.
    pub fn app_path(&self) -> String {
        strip_base(&self.path, &self.base_path)
    }

    /// True when the path lies outside a configured base path.
    pub fn is_outside_base_path(&self) -> bool {
        !self.base_path.is_empty()
            && !is_within(&self.path, &self.base_path)
    }
}

impl<S> FromRequestParts<S> for RequestContext
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        if let Some(context) = parts.extensions.get::<RequestContext>() {
            return Ok(context.clone());
        }
        // Outside the pipeline (e.g. a bare router in tests) there is no base path.
        Ok(Self {
            path: parts.uri.path().to_string(),
            query: parts.uri.query().map(str::to_string),
            base_path: String::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    #[test]
    fn test_context_from_request() {
        let req = Request::builder()
            .uri("/kbn/app/home?x=1")
            .body(Body::empty())
            .unwrap();
        let context = RequestContext::new(&req, &BasePathResolver::new("/kbn"));

        assert_eq!(context.path, "/kbn/app/home");
        assert_eq!(context.query.as_deref(), Some("x=1"));
        assert_eq!(context.base_path, "/kbn");
        assert_eq!(context.app_path(), "/app/home");
        assert!(!context.is_outside_base_path());
    }

    #[test]
    fn test_outside_base_path() {
        let req = Request::builder().uri("/api/x").body(Body::empty()).unwrap();
        let context = RequestContext::new(&req, &BasePathResolver::new("/kbn"));
        assert!(context.is_outside_base_path());

        let context = RequestContext::new(&req, &BasePathResolver::new(""));
        assert!(!context.is_outside_base_path());
    }

    #[tokio::test]
    async fn test_extractor_prefers_pipeline_context() {
        let mut req = Request::builder().uri("/app").body(Body::empty()).unwrap();
        let context = RequestContext {
            path: "/kbn/app".into(),
            query: None,
            base_path: "/kbn".into(),
        };
        req.extensions_mut().insert(context.clone());

        let (mut parts, _) = req.into_parts();
        let extracted = RequestContext::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(extracted, context);
    }
}
