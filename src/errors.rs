// src/errors.rs
// DOCUMENTATION: Custom error types and HTTP responses
// PURPOSE: Centralized error handling for entire application

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde_json::json;
use thiserror::Error;

/// Application-specific error types
/// DOCUMENTATION: Every controller failure funnels into this enum and is
/// translated to a status code plus a `{ "message": ... }` body in one place.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    ValidationError(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("External API error: {0}")]
    ExternalApi(String),

    #[error("Internal server error")]
    Internal(String),
}

/// Convert ApiError to HTTP response
/// DOCUMENTATION: Maps error categories to status codes. Client-facing
/// variants expose their own message; database/internal/upstream details are
/// logged and replaced with a generic body so nothing sensitive leaks out.
impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::ValidationError(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::ExternalApi(_) => StatusCode::BAD_GATEWAY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            ApiError::Database(detail) => {
                log::error!("Database failure: {}", detail);
                "Internal Server Error".to_string()
            }
            ApiError::Internal(detail) => {
                log::error!("Internal error: {}", detail);
                "Internal Server Error".to_string()
            }
            ApiError::ExternalApi(detail) => {
                log::error!("Upstream failure: {}", detail);
                "External service error".to_string()
            }
            other => other.to_string(),
        };

        HttpResponse::build(self.status_code()).json(json!({ "message": message }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_match_error_categories() {
        assert_eq!(
            ApiError::NotFound("Trip not found".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::BadRequest("Incomplete data".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::ValidationError("Title cannot be empty".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Unauthorized("Please login first".into()).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::Database("connection reset".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::ExternalApi("quota exceeded".into()).status_code(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            ApiError::Internal("bad clock".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn client_errors_expose_their_message() {
        assert_eq!(
            ApiError::NotFound("Itinerary not found".into()).to_string(),
            "Itinerary not found"
        );
        assert_eq!(
            ApiError::Unauthorized("Invalid token".into()).to_string(),
            "Invalid token"
        );
    }

    #[test]
    fn server_errors_are_translated_to_generic_bodies() {
        let response = ApiError::Database("password=hunter2".into()).error_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let response = ApiError::ExternalApi("key=secret".into()).error_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }
}
