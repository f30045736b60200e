//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Pipeline stages produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (counters for responses, redirects, rejections)
//!
//! Consumers:
//!     → stdout (fmt subscriber)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Request ID flows through every log line via the TraceLayer span
//! - Metrics are cheap (atomic increments) and recorded even when no
//!   exporter is installed

pub mod logging;
pub mod metrics;
