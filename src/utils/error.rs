use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::error;

use crate::repositories::StoreError;
use crate::utils::response::error as error_response;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Missing event on the registration path. The boundary reports this as
    /// a rejected request (400), not a missing resource.
    #[error("{0}")]
    UnknownEvent(String),

    #[error("{0}")]
    EventFull(String),

    #[error("{0}")]
    DuplicateRegistration(String),

    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    #[error("Database error")]
    DatabaseError(#[from] StoreError),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::UnknownEvent(_) => StatusCode::BAD_REQUEST,
            AppError::EventFull(_) => StatusCode::BAD_REQUEST,
            AppError::DuplicateRegistration(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidPayload(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::ValidationError(_) => "VALIDATION_ERROR",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::UnknownEvent(_) => "EVENT_NOT_FOUND",
            AppError::EventFull(_) => "EVENT_FULL",
            AppError::DuplicateRegistration(_) => "DUPLICATE_REGISTRATION",
            AppError::InvalidPayload(_) => "INVALID_PAYLOAD",
            AppError::DatabaseError(_) => "DATABASE_ERROR",
        }
    }

    fn log(&self) {
        match self {
            AppError::ValidationError(msg)
            | AppError::NotFound(msg)
            | AppError::UnknownEvent(msg)
            | AppError::EventFull(msg)
            | AppError::DuplicateRegistration(msg)
            | AppError::InvalidPayload(msg) => {
                error!(error = ?self, message = %msg, "Request rejected");
            }
            AppError::DatabaseError(e) => {
                error!(error = ?e, "Database error");
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.code();

        // Log internal details
        self.log();

        // Only expose high-level message to the client
        let public_message = match &self {
            AppError::ValidationError(msg)
            | AppError::NotFound(msg)
            | AppError::UnknownEvent(msg)
            | AppError::EventFull(msg)
            | AppError::DuplicateRegistration(msg)
            | AppError::InvalidPayload(msg) => msg.clone(),
            AppError::DatabaseError(_) => "A database error occurred".to_string(),
        };

        // Do not expose internal details in the API response
        let details = None;

        error_response(code, public_message, details, status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes_match_the_http_contract() {
        assert_eq!(
            AppError::ValidationError(String::new()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::NotFound(String::new()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::UnknownEvent(String::new()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::EventFull(String::new()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::DuplicateRegistration(String::new()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::InvalidPayload(String::new()).status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }
}
