//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, request ID, tracing)
//!     → middleware/headers.rs (wraps everything below)
//!     → middleware/canonical.rs (redirects, base path strip, RequestContext)
//!     → middleware/version.rs, middleware/xsrf.rs (pre-dispatch checks)
//!     → static_files.rs or application routes, else 404
//!     → response.rs (HeaderSet merged into success or failure)
//!     → Send to client
//! ```

pub mod middleware;
pub mod request;
pub mod response;
pub mod server;
pub mod static_files;
pub mod status;

pub use request::RequestContext;
pub use response::{HeaderSet, HeaderSetError, ResponseEnvelope, IDENTITY_HEADER};
pub use server::{HttpServer, ServerContext};
pub use static_files::StaticMount;
