//! HTTP front door: base path handling, canonical redirects, response header
//! injection and static asset mounts in front of application routes.

pub mod config;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;

pub use config::schema::FrontDoorConfig;
pub use error::FrontDoorError;
pub use http::{HttpServer, ServerContext};
pub use lifecycle::Shutdown;
