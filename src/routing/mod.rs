//! URL layout subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (path, query, extensions)
//!     → base_path.rs (configured or per-request mount prefix)
//!     → canonical.rs (Accept or RedirectPermanent(target))
//!     → Accepted: base path stripped, request dispatched
//! ```
//!
//! # Design Decisions
//! - Pure functions over `&str`; no I/O, no allocation unless redirecting
//! - Canonical form is "under the base path, no trailing slash"
//! - The root path never reaches the canonicalizer
//! - Deterministic: same input always yields the same decision

pub mod base_path;
pub mod canonical;

pub use base_path::{BasePathError, BasePathResolver};
pub use canonical::{canonicalize, CanonicalDecision};
