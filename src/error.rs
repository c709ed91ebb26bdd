// HTTP API Error Types
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};

use crate::database::StoreError;
use crate::validation::ValidationError;

pub const NOT_FOUND_MESSAGE: &str = "Employee not found";
pub const SERVER_ERROR_MESSAGE: &str = "Something went wrong on the server";

/// Every failure a handler can report, with its status code and JSON body.
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request
    Validation(ValidationError),
    // Unreadable body; keeps the rejection's status (400 or 413)
    InvalidJson { status: StatusCode, message: String },

    // 404 Not Found
    NotFound,

    // 500 Internal Server Error from the record gateway
    Store {
        message: &'static str,
        details: Option<String>,
    },

    // 500 Internal Server Error, detail suppressed
    Internal,
}

impl ApiError {
    /// Wraps a gateway failure. The driver message is logged always and
    /// returned to the client only when `expose_details` is set.
    pub fn store(message: &'static str, err: StoreError, expose_details: bool) -> Self {
        tracing::error!("{}: {}", message, err);
        ApiError::Store {
            message,
            details: expose_details.then_some(err.message),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::InvalidJson { status, .. } => *status,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Store { .. } | ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> String {
        match self {
            ApiError::Validation(err) => err.to_string(),
            ApiError::InvalidJson { message, .. } => message.clone(),
            ApiError::NotFound => NOT_FOUND_MESSAGE.to_string(),
            ApiError::Store { message, .. } => message.to_string(),
            ApiError::Internal => SERVER_ERROR_MESSAGE.to_string(),
        }
    }

    /// Every body carries an `error` key. Not-found also carries `message`,
    /// and store failures carry `details` when exposed.
    pub fn to_json(&self) -> Value {
        match self {
            ApiError::NotFound => json!({
                "error": NOT_FOUND_MESSAGE,
                "message": NOT_FOUND_MESSAGE
            }),
            ApiError::Store {
                message,
                details: Some(details),
            } => json!({
                "error": message,
                "details": details
            }),
            _ => json!({ "error": self.message() }),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::Validation(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidJson {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Validation(err) = &self {
            tracing::debug!("Rejected request: {}", err.kind());
        }
        (self.status_code(), Json(self.to_json())).into_response()
    }
}
