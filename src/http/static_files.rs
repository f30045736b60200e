//! Static asset mounts.
//!
//! # Responsibilities
//! - Bind a URL prefix to a directory on disk
//! - Serve pre-compressed variants (`.br`, `.gz`) when the client accepts them
//! - Answer directory requests with 404 instead of a listing
//!
//! # Design Decisions
//! - Mounts are public; no auth or XSRF gate applies to GET/HEAD on assets
//! - File lookup, range and conditional requests are delegated to `ServeDir`
//! - A mount is a plain function over the router, not a router extension

use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::{
    extract::{Request, State},
    handler::HandlerWithoutStateExt,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    Router,
};
use tower::ServiceBuilder;
use tower_http::services::ServeDir;

use crate::config::StaticMountConfig;
use crate::error::{not_found, FrontDoorError};

/// A URL prefix served from a directory.
///
/// Listing is never offered and compressed lookup is always on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticMount {
    url_prefix: String,
    directory: PathBuf,
}

impl StaticMount {
    pub fn new(url_prefix: impl Into<String>, directory: impl Into<PathBuf>) -> Self {
        Self {
            url_prefix: url_prefix.into(),
            directory: directory.into(),
        }
    }

    pub fn url_prefix(&self) -> &str {
        &self.url_prefix
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }
}

impl From<&StaticMountConfig> for StaticMount {
    fn from(config: &StaticMountConfig) -> Self {
        Self::new(config.url_prefix.clone(), config.directory.clone())
    }
}

/// Register `mount` on `router` and return the extended router.
pub fn mount(router: Router, mount: &StaticMount) -> Router {
    if !mount.directory.is_dir() {
        tracing::warn!(
            url_prefix = %mount.url_prefix,
            directory = %mount.directory.display(),
            "Static directory does not exist; every request under it will be a 404"
        );
    }

    let files = ServeDir::new(&mount.directory)
        .append_index_html_on_directories(false)
        .precompressed_br()
        .precompressed_gzip()
        .not_found_service(not_found.into_service());

    let service = ServiceBuilder::new()
        .layer(middleware::from_fn_with_state(
            Arc::new(mount.directory.clone()),
            reject_directories,
        ))
        .service(files);

    tracing::info!(
        url_prefix = %mount.url_prefix,
        directory = %mount.directory.display(),
        "Static directory mounted"
    );

    router.nest_service(&mount.url_prefix, service)
}

/// Refuse requests that resolve to a directory under the mount root.
async fn reject_directories(
    State(root): State<Arc<PathBuf>>,
    request: Request,
    next: Next,
) -> Response {
    if let Some(path) = resolve_within(&root, request.uri().path()) {
        let is_dir = tokio::fs::metadata(&path)
            .await
            .map(|meta| meta.is_dir())
            .unwrap_or(false);
        if is_dir {
            tracing::debug!(path = %path.display(), "Directory request refused");
            return FrontDoorError::NotFound.into_response();
        }
    }
    next.run(request).await
}

/// Join a request path onto `root`, refusing `..` segments.
fn resolve_within(root: &Path, request_path: &str) -> Option<PathBuf> {
    let mut path = root.to_path_buf();
    for segment in request_path.split('/') {
        match segment {
            "" | "." => continue,
            ".." => return None,
            segment => path.push(segment),
        }
    }
    Some(path)
}
