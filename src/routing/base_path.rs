//! Base path resolution.
//!
//! # Responsibilities
//! - Hold the configured mount prefix
//! - Allow a single per-request suffix (e.g. a tenant segment)
//! - Resolve the effective prefix for a request
//!
//! # Design Decisions
//! - Prefix is either empty or has no trailing slash
//! - Per-request value lives in request extensions, never in shared state
//! - Resolution never fails; no configuration means ""

use std::sync::Arc;

use axum::http::Request;
use thiserror::Error;

/// Errors from per-request base path overrides.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BasePathError {
    #[error("request base path was previously set; setting it more than once is not supported")]
    AlreadySet,

    #[error("base path suffix {0:?} must start with '/' and not end with '/'")]
    InvalidSuffix(String),
}

/// Per-request base path, stored in request extensions.
#[derive(Debug, Clone)]
struct RequestBasePath(String);

/// Resolves the virtual prefix the application is served under.
#[derive(Debug, Clone, Default)]
pub struct BasePathResolver {
    configured: Arc<str>,
}

impl BasePathResolver {
    /// Create a resolver for the configured base path.
    /// Trailing slashes are dropped so "/kbn/" and "/kbn" behave the same.
    pub fn new(configured: &str) -> Self {
        Self {
            configured: Arc::from(configured.trim_end_matches('/')),
        }
    }

    /// The process-wide base path.
    pub fn configured(&self) -> &str {
        &self.configured
    }

    /// Effective base path for this request.
    pub fn resolve<B>(&self, req: &Request<B>) -> String {
        req.extensions()
            .get::<RequestBasePath>()
            .map(|p| p.0.clone())
            .unwrap_or_else(|| self.configured.to_string())
    }

    /// Extend the configured base path for a single request.
    pub fn set_for_request<B>(&self, req: &mut Request<B>, suffix: &str) -> Result<(), BasePathError> {
        if req.extensions().get::<RequestBasePath>().is_some() {
            return Err(BasePathError::AlreadySet);
        }
        if !suffix.starts_with('/') || suffix.ends_with('/') {
            return Err(BasePathError::InvalidSuffix(suffix.to_string()));
        }

        let base_path = format!("{}{}", self.configured, suffix);
        tracing::debug!(base_path = %base_path, "Request base path set");
        req.extensions_mut().insert(RequestBasePath(base_path));
        Ok(())
    }
}
