// HTTP API Error Types
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::{json, Value};

use crate::mediator::{MediatorError, ValidationFailure};
use crate::store::StoreError;

/// Wire shape of one validation failure in a 422 body
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailureBody {
    pub property: String,
    pub error: String,
}

impl From<ValidationFailure> for FailureBody {
    fn from(failure: ValidationFailure) -> Self {
        Self {
            property: failure.property_name,
            error: failure.error_message,
        }
    }
}

/// HTTP API error with the status it maps to
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request
    BadRequest(String),

    // 422 Unprocessable Entity
    UnprocessableEntity(Vec<FailureBody>),

    // 500 Internal Server Error
    InternalServerError(String),
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::UnprocessableEntity(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get error code for client handling
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "BAD_REQUEST",
            ApiError::UnprocessableEntity(_) => "UNPROCESSABLE_ENTITY",
            ApiError::InternalServerError(_) => "INTERNAL_SERVER_ERROR",
        }
    }

    /// Response body; `None` means an empty body
    pub fn to_json(&self) -> Option<Value> {
        match self {
            ApiError::BadRequest(message) => Some(json!({
                "error": true,
                "message": message,
                "code": self.error_code()
            })),
            ApiError::UnprocessableEntity(failures) => Some(json!(failures)),
            ApiError::InternalServerError(_) => None,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        ApiError::InternalServerError(message.into())
    }
}

// Classification of dispatch failures: validation is the only structured
// failure, everything else is unhandled and logged here.
impl From<MediatorError> for ApiError {
    fn from(err: MediatorError) -> Self {
        match err {
            MediatorError::Validation(validation) => {
                tracing::warn!("Request rejected by validation: {}", validation);
                ApiError::UnprocessableEntity(
                    validation.into_failures().into_iter().map(FailureBody::from).collect(),
                )
            }
            other => {
                tracing::error!("Exception handling: {}", other);
                ApiError::internal_server_error(other.to_string())
            }
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        tracing::error!("Store error: {}", err);
        ApiError::internal_server_error(err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!("Rejected request body: {}", rejection.body_text());
        ApiError::bad_request(rejection.body_text())
    }
}

// Standard error trait implementations
impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::BadRequest(msg) | ApiError::InternalServerError(msg) => write!(f, "{}", msg),
            ApiError::UnprocessableEntity(failures) => {
                write!(f, "{} validation failure(s)", failures.len())
            }
        }
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match self.to_json() {
            Some(body) => (status, Json(body)).into_response(),
            None => status.into_response(),
        }
    }
}
