use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use thiserror::Error;

use cascade_engine::EngineError;

/// Request-level failure, mapped to a status + `{"error": <message>}` body
/// at the boundary.
///
/// `NotFound` deliberately carries no id: an evicted session and a never
/// created one are indistinguishable to the client, and both read as
/// expiry.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing/invalid required field, or a token outside a closed
    /// vocabulary. The message names the offending field or value.
    #[error("{0}")]
    Validation(String),

    /// Unknown result identifier in a lookup path.
    #[error("Result ID not found or has expired.")]
    NotFound,

    /// Any failure surfaced by the engine call.
    #[error(transparent)]
    Engine(#[from] EngineError),
}

impl ApiError {
    /// Validation failure for a missing required field.
    pub fn missing(field: &str) -> Self {
        Self::Validation(format!("missing required field '{field}'"))
    }

    fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Engine(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Full detail stays in the local log; the body carries the message
        // text only.
        if let Self::Engine(ref e) = self {
            tracing::error!(error = %e, "engine call failed");
        }
        let body = serde_json::json!({ "error": self.to_string() });
        (self.status(), Json(body)).into_response()
    }
}
