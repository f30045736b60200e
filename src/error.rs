//! Failure responses produced by the front door itself.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;

/// Terminal failures raised before or during dispatch.
///
/// Both variants are rendered as a JSON error body and still go through
/// response header injection on their way out.
#[derive(Debug, Error)]
pub enum FrontDoorError {
    /// No route or file backs the canonical path.
    #[error("Not Found")]
    NotFound,

    /// A pre-dispatch check declined the request.
    #[error("{message}")]
    UpstreamRejection {
        status: StatusCode,
        message: String,
        attributes: Option<Value>,
    },
}

impl FrontDoorError {
    /// `400 Bad Request` rejection with a message and optional attributes.
    pub fn bad_request(message: impl Into<String>, attributes: Option<Value>) -> Self {
        Self::UpstreamRejection {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
            attributes,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::UpstreamRejection { status, .. } => *status,
        }
    }
}

impl IntoResponse for FrontDoorError {
    fn into_response(self) -> Response {
        let status = self.status();
        let mut body = json!({
            "statusCode": status.as_u16(),
            "error": status.canonical_reason().unwrap_or("Unknown"),
            "message": self.to_string(),
        });
        if let Self::UpstreamRejection {
            attributes: Some(attributes),
            ..
        } = self
        {
            body["attributes"] = attributes;
        }

        (status, Json(body)).into_response()
    }
}

/// Fallback handler for paths with no route or file behind them.
pub async fn not_found() -> FrontDoorError {
    FrontDoorError::NotFound
}
