//! Request pipeline stages.
//!
//! # Order (outermost first)
//! ```text
//! headers.rs        inject custom + identity headers into whatever comes back
//!   canonical.rs    default-route redirect, canonical redirect, base path strip
//!     version.rs    reject stale clients (kbn-version mismatch)
//!       xsrf.rs     reject unsafe methods without kbn-xsrf / kbn-version
//!         dispatch  static mounts, application routes, 404 fallback
//! ```
//!
//! # Design Decisions
//! - Every stage is an axum `from_fn_with_state` middleware over `ServerContext`
//! - Redirects and rejections short-circuit but still pass through headers.rs
//! - No stage mutates shared state

pub mod canonical;
pub mod headers;
pub mod version;
pub mod xsrf;

pub use canonical::canonicalize_request;
pub use headers::inject_response_headers;
pub use version::{check_version, VERSION_HEADER};
pub use xsrf::{check_xsrf, XSRF_HEADER};
