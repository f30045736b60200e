//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Build the shared `ServerContext` once at startup
//! - Assemble the request pipeline around the application router
//! - Mount static asset directories
//! - Wire up ambient middleware (tracing, request ID, timeout)
//! - Serve with graceful shutdown

use std::sync::Arc;
use std::time::Duration;

use axum::{middleware, Router};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::{validate_config, ConfigError, FrontDoorConfig};
use crate::error::not_found;
use crate::http::middleware::{
    canonicalize_request, check_version, check_xsrf, inject_response_headers,
};
use crate::http::response::HeaderSet;
use crate::http::static_files::{self, StaticMount};
use crate::routing::BasePathResolver;

/// Process-wide, read-only state handed to every pipeline stage.
#[derive(Clone)]
pub struct ServerContext {
    config: Arc<FrontDoorConfig>,
    base_path: BasePathResolver,
    response_headers: Arc<HeaderSet>,
}

impl ServerContext {
    /// Validate `config` and derive the shared state from it.
    pub fn new(config: FrontDoorConfig) -> Result<Self, ConfigError> {
        validate_config(&config).map_err(ConfigError::Validation)?;

        let response_headers =
            HeaderSet::build(&config.server.custom_response_headers, &config.server.name)?;
        let base_path = BasePathResolver::new(&config.server.base_path);

        Ok(Self {
            config: Arc::new(config),
            base_path,
            response_headers: Arc::new(response_headers),
        })
    }

    pub fn config(&self) -> &FrontDoorConfig {
        &self.config
    }

    pub fn base_path(&self) -> &BasePathResolver {
        &self.base_path
    }

    pub fn response_headers(&self) -> &HeaderSet {
        &self.response_headers
    }
}

/// HTTP front door.
pub struct HttpServer {
    context: ServerContext,
    routes: Router,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: FrontDoorConfig) -> Result<Self, ConfigError> {
        let context = ServerContext::new(config)?;
        Ok(Self {
            context,
            routes: Router::new(),
        })
    }

    /// Add application routes. They are declared relative to the base path.
    pub fn with_routes(mut self, routes: Router) -> Self {
        self.routes = self.routes.merge(routes);
        self
    }

    pub fn context(&self) -> &ServerContext {
        &self.context
    }

    /// Build the complete router: pipeline stages around dispatch.
    pub fn into_router(self) -> Router {
        build_router(&self.context, self.routes)
    }

    /// Run the server, accepting connections on the given listener until
    /// `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        let server = &self.context.config().server;
        tracing::info!(
            address = %addr,
            name = %server.name,
            base_path = %server.base_path,
            "HTTP server starting"
        );

        let app = self.into_router();

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Assemble dispatch and the pipeline stages around it.
#[allow(deprecated)]
fn build_router(ctx: &ServerContext, routes: Router) -> Router {
    let mut dispatch = routes;
    for mount in &ctx.config().static_mounts {
        dispatch = static_files::mount(dispatch, &StaticMount::from(mount));
    }

    let dispatch = dispatch
        .fallback(not_found)
        .layer(middleware::from_fn_with_state(ctx.clone(), check_xsrf))
        .layer(middleware::from_fn_with_state(ctx.clone(), check_version));

    // Canonicalization rewrites the URI, so it has to wrap the router rather
    // than run as a route layer.
    let pipeline = ServiceBuilder::new()
        .layer(middleware::from_fn_with_state(ctx.clone(), inject_response_headers))
        .layer(TimeoutLayer::new(Duration::from_secs(
            ctx.config().timeouts.request_secs,
        )))
        .layer(middleware::from_fn_with_state(ctx.clone(), canonicalize_request))
        .service(dispatch);

    Router::new()
        .fallback_service(pipeline)
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}
