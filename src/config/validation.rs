//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check URL layout (base path, default route, mount prefixes)
//! - Check that configured headers are sendable
//! - Validate value ranges (timeouts > 0, addresses parse)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: FrontDoorConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use std::net::SocketAddr;

use axum::http::{HeaderName, HeaderValue};
use thiserror::Error;

use crate::config::schema::FrontDoorConfig;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("server.base_path {0:?} must be empty or start with '/' and not end with '/'")]
    BasePath(String),

    #[error("server.default_route {0:?} must start with '/'")]
    DefaultRoute(String),

    #[error("server.name {0:?} is not a valid header value")]
    Name(String),

    #[error("custom response header name {0:?} is invalid")]
    HeaderName(String),

    #[error("custom response header {name:?} has an invalid value")]
    HeaderValue { name: String },

    #[error("static mount prefix {0:?} must start with '/', must not be '/' or end with '/', and must not contain '{{' or '}}'")]
    MountPrefix(String),

    #[error("static mount prefix {0:?} is declared more than once")]
    DuplicateMount(String),

    #[error("{field} {value:?} is not a valid socket address")]
    Address { field: &'static str, value: String },

    #[error("timeouts.request_secs must be greater than zero")]
    RequestTimeout,
}

/// Check a loaded configuration for semantic errors.
pub fn validate_config(config: &FrontDoorConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let server = &config.server;

    if !is_valid_base_path(&server.base_path) {
        errors.push(ValidationError::BasePath(server.base_path.clone()));
    }

    if !server.default_route.starts_with('/') {
        errors.push(ValidationError::DefaultRoute(server.default_route.clone()));
    }

    if HeaderValue::from_str(&server.name).is_err() {
        errors.push(ValidationError::Name(server.name.clone()));
    }

    for (name, value) in &server.custom_response_headers {
        if HeaderName::from_bytes(name.as_bytes()).is_err() {
            errors.push(ValidationError::HeaderName(name.clone()));
        } else if HeaderValue::from_str(value).is_err() {
            errors.push(ValidationError::HeaderValue { name: name.clone() });
        }
    }

    let mut prefixes = HashSet::new();
    for mount in &config.static_mounts {
        if !is_valid_mount_prefix(&mount.url_prefix) {
            errors.push(ValidationError::MountPrefix(mount.url_prefix.clone()));
        } else if !prefixes.insert(mount.url_prefix.as_str()) {
            errors.push(ValidationError::DuplicateMount(mount.url_prefix.clone()));
        }
    }

    if server.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::Address {
            field: "server.bind_address",
            value: server.bind_address.clone(),
        });
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::Address {
            field: "observability.metrics_address",
            value: config.observability.metrics_address.clone(),
        });
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::RequestTimeout);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn is_valid_base_path(base_path: &str) -> bool {
    base_path.is_empty() || (base_path.starts_with('/') && !base_path.ends_with('/'))
}

fn is_valid_mount_prefix(prefix: &str) -> bool {
    prefix.starts_with('/')
        && prefix.len() > 1
        && !prefix.ends_with('/')
        && !prefix.contains(['{', '}'])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::StaticMountConfig;

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(validate_config(&FrontDoorConfig::default()), Ok(()));
    }

    #[test]
    fn test_base_path_shape() {
        assert!(is_valid_base_path(""));
        assert!(is_valid_base_path("/kbn"));
        assert!(is_valid_base_path("/a/b"));
        assert!(!is_valid_base_path("/"));
        assert!(!is_valid_base_path("/kbn/"));
        assert!(!is_valid_base_path("kbn"));
    }

    #[test]
    fn test_collects_every_error() {
        let mut config = FrontDoorConfig::default();
        config.server.base_path = "kbn/".into();
        config.server.default_route = "app".into();
        config
            .server
            .custom_response_headers
            .insert("bad header".into(), "x".into());
        config.timeouts.request_secs = 0;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 4);
        assert!(errors.contains(&ValidationError::RequestTimeout));
    }

    #[test]
    fn test_header_value_with_newline_rejected() {
        let mut config = FrontDoorConfig::default();
        config
            .server
            .custom_response_headers
            .insert("x-foo".into(), "a\nb".into());

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::HeaderValue {
                name: "x-foo".into()
            }]
        );
    }

    #[test]
    fn test_mount_prefixes() {
        let mut config = FrontDoorConfig::default();
        config.static_mounts = vec![
            StaticMountConfig { url_prefix: "/ui".into(), directory: "a".into() },
            StaticMountConfig { url_prefix: "/ui".into(), directory: "b".into() },
            StaticMountConfig { url_prefix: "/".into(), directory: "c".into() },
            StaticMountConfig { url_prefix: "/x/{p}".into(), directory: "d".into() },
        ];

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::DuplicateMount("/ui".into()),
                ValidationError::MountPrefix("/".into()),
                ValidationError::MountPrefix("/x/{p}".into()),
            ]
        );
    }

    #[test]
    fn test_metrics_address_checked_only_when_enabled() {
        let mut config = FrontDoorConfig::default();
        config.observability.metrics_address = "nowhere".into();
        assert!(validate_config(&config).is_ok());

        config.observability.metrics_enabled = true;
        assert!(validate_config(&config).is_err());
    }
}
