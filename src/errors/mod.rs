/// Error handling module
///
/// Provides unified error responses
use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use std::fmt;

#[derive(Debug)]
pub enum ApiError {
    Internal,
    Validation { reason: String },
    NotFound { resource: String },
    UnsupportedMediaType,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Internal => write!(f, "Internal error"),
            ApiError::Validation { reason } => write!(f, "Bad request: {}", reason),
            ApiError::NotFound { resource } => write!(f, "Not found: {}", resource),
            ApiError::UnsupportedMediaType => write!(f, "Unsupported media type"),
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Validation { .. } => StatusCode::BAD_REQUEST,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::UnsupportedMediaType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
        }
    }

    // Response bodies stay fixed: validation detail and internal causes
    // are logged server-side, never echoed to the client.
    fn error_response(&self) -> HttpResponse {
        let response = match self {
            ApiError::Internal => ErrorResponse {
                error: "Internal Server Error".to_string(),
            },
            ApiError::Validation { .. } => ErrorResponse {
                error: "Invalid request".to_string(),
            },
            ApiError::NotFound { resource } => ErrorResponse {
                error: format!("{} not found", resource),
            },
            ApiError::UnsupportedMediaType => ErrorResponse {
                error: "Unsupported media type".to_string(),
            },
        };
        HttpResponse::build(self.status_code()).json(response)
    }
}
