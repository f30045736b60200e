//! Front door server binary.
//!
//! # Request Pipeline
//!
//! ```text
//!     Client Request
//!     ─────────────────────────┐
//!                              ▼
//!                  ┌──────────────────────┐
//!                  │ request id + tracing │
//!                  └──────────┬───────────┘
//!                             ▼
//!                  ┌──────────────────────┐      ┌──────────────────────────┐
//!                  │   header injection   │◀─────│ every response, once     │
//!                  └──────────┬───────────┘      └──────────────────────────┘
//!                             ▼
//!                  ┌──────────────────────┐
//!                  │  canonicalization    │──▶ 302 default route / 301 canonical
//!                  └──────────┬───────────┘
//!                             ▼
//!                  ┌──────────────────────┐
//!                  │ version + xsrf check │──▶ 400
//!                  └──────────┬───────────┘
//!                             ▼
//!                  ┌──────────────────────┐
//!                  │ static mounts, app   │──▶ 404 fallback
//!                  │ routes               │
//!                  └──────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use front_door::config::{load_config, FrontDoorConfig};
use front_door::http::{status, HttpServer};
use front_door::lifecycle::{signals, Shutdown};
use front_door::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "front-door")]
#[command(about = "HTTP front door with canonical redirects and static asset mounts", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file. Defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => FrontDoorConfig::default(),
    };

    logging::init(&config.observability);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        config = ?cli.config,
        "front-door starting"
    );

    tracing::info!(
        bind_address = %config.server.bind_address,
        base_path = %config.server.base_path,
        default_route = %config.server.default_route,
        static_mounts = config.static_mounts.len(),
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.server.bind_address).await?;

    let server = HttpServer::new(config)?;
    let routes = status::router(server.context());
    let server = server.with_routes(routes);

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let signal_shutdown = shutdown.clone();
    tokio::spawn(async move {
        signals::shutdown_on_signal(&signal_shutdown).await;
    });

    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
