use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde_json::json;
use thiserror::Error;

/// Authentication failures. All map to 401 without distinguishing detail
/// beyond the message.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Missing Authorization header")]
    MissingHeader,

    #[error("Invalid Authorization header format")]
    MalformedHeader,

    #[error("Invalid authentication token")]
    InvalidToken,

    #[error("Authentication token expired")]
    ExpiredToken,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(
        "Rate limit exceeded. Please wait {days} days and {hours} hours \
         before generating another GIF."
    )]
    RateLimit {
        days: i64,
        hours: i64,
        retry_after: DateTime<Utc>,
    },

    #[error("{0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<crossfade::SynthesisError> for ApiError {
    fn from(e: crossfade::SynthesisError) -> Self {
        ApiError::Internal(e.to_string())
    }
}

impl From<crossfade::EncodeError> for ApiError {
    fn from(e: crossfade::EncodeError) -> Self {
        ApiError::Internal(e.to_string())
    }
}

impl From<crate::rendering::decode::DecodeError> for ApiError {
    fn from(e: crate::rendering::decode::DecodeError) -> Self {
        ApiError::Internal(e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Auth(_) => {
                let body = Json(json!({ "error": self.to_string() }));
                (StatusCode::UNAUTHORIZED, body).into_response()
            }
            ApiError::RateLimit { retry_after, .. } => {
                let body = Json(json!({
                    "error": self.to_string(),
                    "retry_after": retry_after.to_rfc3339(),
                }));
                (StatusCode::TOO_MANY_REQUESTS, body).into_response()
            }
            ApiError::Validation(_) => {
                let body = Json(json!({ "error": self.to_string() }));
                (StatusCode::BAD_REQUEST, body).into_response()
            }
            // Specifics stay in the server log; callers get a generic
            // message.
            ApiError::Internal(detail) => {
                tracing::error!(detail = %detail, "Internal error while handling request");
                let body = Json(json!({ "error": "Internal server error" }));
                (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
            }
        }
    }
}
