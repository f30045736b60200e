//! Response header injection.
//!
//! # Responsibilities
//! - Build the header set every response carries (custom headers + identity)
//! - Classify outgoing responses as success or failure
//! - Merge the header set into either shape exactly once
//!
//! # Design Decisions
//! - Header set is built at startup; injection itself cannot fail
//! - The identity header always wins over a configured header of the same name
//! - Headers outside the injected set, status and body are never touched

use std::collections::BTreeMap;

use axum::{
    http::{HeaderMap, HeaderName, HeaderValue},
    response::Response,
};
use thiserror::Error;

/// Header naming the application that produced the response.
pub const IDENTITY_HEADER: &str = "kbn-name";

/// A configured header that cannot be sent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HeaderSetError {
    #[error("invalid header name {0:?}")]
    Name(String),

    #[error("invalid value for header {0:?}")]
    Value(String),
}

/// Ordered set of headers added to every response.
#[derive(Debug, Clone)]
pub struct HeaderSet {
    entries: Vec<(HeaderName, HeaderValue)>,
}

impl HeaderSet {
    /// Merge the configured headers with the identity header.
    ///
    /// Header names are case-insensitive, so `KBN-NAME` in the configured map
    /// is replaced by the identity value as well.
    pub fn build(custom: &BTreeMap<String, String>, identity: &str) -> Result<Self, HeaderSetError> {
        let mut set = Self { entries: Vec::with_capacity(custom.len() + 1) };

        for (name, value) in custom {
            let header = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| HeaderSetError::Name(name.clone()))?;
            let value =
                HeaderValue::from_str(value).map_err(|_| HeaderSetError::Value(name.clone()))?;
            set.set(header, value);
        }

        let identity = HeaderValue::from_str(identity)
            .map_err(|_| HeaderSetError::Value(IDENTITY_HEADER.to_string()))?;
        set.set(HeaderName::from_static(IDENTITY_HEADER), identity);

        Ok(set)
    }

    // Last write wins, keeping the first position of the name.
    fn set(&mut self, name: HeaderName, value: HeaderValue) {
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&HeaderValue> {
        self.entries
            .iter()
            .find(|(existing, _)| existing.as_str().eq_ignore_ascii_case(name))
            .map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&HeaderName, &HeaderValue)> {
        self.entries.iter().map(|(name, value)| (name, value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn to_header_map(&self) -> HeaderMap {
        let mut map = HeaderMap::with_capacity(self.entries.len());
        for (name, value) in &self.entries {
            map.insert(name.clone(), value.clone());
        }
        map
    }
}

/// Marks a response whose headers have already been injected.
#[derive(Debug, Clone, Copy)]
struct HeadersInjected;

/// An outgoing response, tagged by outcome.
#[derive(Debug)]
pub enum ResponseEnvelope {
    /// 1xx, 2xx and 3xx responses.
    Success(Response),
    /// 4xx and 5xx responses.
    Failure(Response),
}

impl From<Response> for ResponseEnvelope {
    fn from(response: Response) -> Self {
        let status = response.status();
        if status.is_client_error() || status.is_server_error() {
            Self::Failure(response)
        } else {
            Self::Success(response)
        }
    }
}

impl ResponseEnvelope {
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failure(_))
    }

    pub fn response(&self) -> &Response {
        match self {
            Self::Success(response) | Self::Failure(response) => response,
        }
    }

    /// Add `headers` to the response and hand it back for transmission.
    ///
    /// A response that already went through injection is returned unchanged.
    pub fn inject(self, headers: &HeaderSet) -> Response {
        match self {
            Self::Failure(mut response) => {
                if response.extensions().get::<HeadersInjected>().is_none() {
                    // Replaces values for names in the set, keeps everything else.
                    response.headers_mut().extend(headers.to_header_map());
                    response.extensions_mut().insert(HeadersInjected);
                }
                response
            }
            Self::Success(mut response) => {
                if response.extensions().get::<HeadersInjected>().is_none() {
                    for (name, value) in headers.iter() {
                        response.headers_mut().insert(name.clone(), value.clone());
                    }
                    response.extensions_mut().insert(HeadersInjected);
                }
                response
            }
        }
    }
}
