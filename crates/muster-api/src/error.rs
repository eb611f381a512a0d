//! Error types for the roster API server.
//!
//! [`ApiError`] unifies all failure modes into a single enum that can be
//! converted into an Axum HTTP response via its
//! [`IntoResponse`](axum::response::IntoResponse) implementation.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use muster_engine::EngineError;
use muster_types::ParseStatusError;

/// Errors that can occur in the API layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// A required request field was missing or empty.
    ///
    /// Carries the exact client-facing message, e.g.
    /// `"Missing required fields."`.
    #[error("{0}")]
    MissingField(&'static str),

    /// The status token in the request is not a known status.
    #[error(transparent)]
    InvalidStatus(#[from] ParseStatusError),

    /// The student id in the request is not a valid UUID.
    #[error("Invalid student id: {0}")]
    InvalidId(String),

    /// The engine rejected or failed the operation.
    #[error(transparent)]
    Engine(#[from] EngineError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::MissingField(msg) => (StatusCode::BAD_REQUEST, (*msg).to_owned()),
            Self::InvalidStatus(e) => (StatusCode::BAD_REQUEST, e.to_string()),
            Self::InvalidId(msg) => (StatusCode::BAD_REQUEST, format!("Invalid student id: {msg}")),
            Self::Engine(EngineError::InvalidInput(msg)) => (StatusCode::BAD_REQUEST, msg.clone()),
            Self::Engine(EngineError::NotFound(_)) => {
                (StatusCode::NOT_FOUND, String::from("Student not found."))
            }
            Self::Engine(EngineError::DuplicateKey(_)) => {
                (StatusCode::CONFLICT, String::from("Student already registered."))
            }
            Self::Engine(e @ (EngineError::Storage(_) | EngineError::Bulk { .. })) => {
                (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
            }
        };

        let mut body = serde_json::json!({
            "error": message,
            "status": status.as_u16(),
        });

        // Bulk failures additionally report how far the sweep got, so
        // the caller knows which prefix of the roster was transitioned.
        if let Self::Engine(EngineError::Bulk {
            completed, total, ..
        }) = &self
            && let Some(map) = body.as_object_mut()
        {
            map.insert(
                String::from("completed"),
                serde_json::Value::from(*completed),
            );
            map.insert(String::from("total"), serde_json::Value::from(*total));
        }

        (status, axum::Json(body)).into_response()
    }
}
