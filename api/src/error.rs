//! Unified error types for the shipment API
//!
//! This module defines error types for each layer:
//! - `DomainError`: Core business logic and persistence errors
//! - `IdentityError`: Identity service client errors
//! - `AppError`: Application layer errors (rendered as response envelopes)

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::handlers::Envelope;

/// Domain layer errors - pure business logic errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Identity service client errors
#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },
}

impl From<IdentityError> for DomainError {
    fn from(e: IdentityError) -> Self {
        DomainError::Internal(format!("Identity service error: {}", e))
    }
}

/// Application layer errors - used by the service and HTTP handlers
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    /// Token missing or rejected; `diagnostic` is the validator's message
    #[error("Unauthorized: {diagnostic}")]
    Unauthorized { diagnostic: String },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid status code: {0}")]
    InvalidStatusCode(String),

    #[error("Creation failed: {0}")]
    Creation(String),

    #[error("Update failed: {0}")]
    Update(String),

    #[error("Deletion failed: {0}")]
    Deletion(String),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Method not allowed: {0}")]
    MethodNotAllowed(String),
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl AppError {
    /// Status, public message and auxiliary data for the envelope
    fn parts(&self) -> (StatusCode, String, Option<String>) {
        match self {
            AppError::Domain(DomainError::NotFound(msg)) | AppError::NotFound(msg) => {
                (StatusCode::NOT_FOUND, msg.clone(), None)
            }
            AppError::Domain(DomainError::Validation(msg)) | AppError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, msg.clone(), None)
            }
            AppError::Unauthorized { diagnostic } => (
                StatusCode::UNAUTHORIZED,
                "Unauthorized: Invalid token.".to_string(),
                Some(diagnostic.clone()),
            ),
            AppError::Domain(DomainError::Database(msg)) => {
                tracing::error!("Database error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                    None,
                )
            }
            AppError::Domain(DomainError::Internal(msg)) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                    None,
                )
            }
            AppError::InvalidStatusCode(code) => (
                StatusCode::BAD_REQUEST,
                format!("Unable to find any shipments with status code: {}", code),
                None,
            ),
            AppError::Creation(msg) => {
                tracing::error!("Shipment creation failed: {}", msg);
                (
                    StatusCode::BAD_REQUEST,
                    "Shipment could not be created".to_string(),
                    None,
                )
            }
            AppError::Update(msg) => {
                tracing::error!("Shipment update failed: {}", msg);
                (
                    StatusCode::BAD_REQUEST,
                    "Shipment could not be updated".to_string(),
                    None,
                )
            }
            AppError::Deletion(msg) => {
                tracing::error!("Shipment deletion failed: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Shipment could not be deleted".to_string(),
                    None,
                )
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone(), None),
            AppError::MethodNotAllowed(msg) => {
                (StatusCode::METHOD_NOT_ALLOWED, msg.clone(), None)
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, data) = self.parts();
        Envelope::new(status, message, data).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_404() {
        let (status, message, data) = AppError::NotFound("Shipment 4 missing".into()).parts();
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(message, "Shipment 4 missing");
        assert!(data.is_none());

        let (status, _, _) = AppError::Domain(DomainError::NotFound("x".into())).parts();
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[test]
    fn unauthorized_carries_diagnostic_as_data() {
        let err = AppError::Unauthorized {
            diagnostic: "token expired".into(),
        };
        let (status, message, data) = err.parts();
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(message, "Unauthorized: Invalid token.");
        assert_eq!(data.as_deref(), Some("token expired"));
    }

    #[test]
    fn invalid_status_code_names_the_code() {
        let (status, message, _) = AppError::InvalidStatusCode("6".into()).parts();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(message.contains('6'));
    }

    #[test]
    fn store_failures_hide_details() {
        let (status, message, _) = AppError::Creation("disk full".into()).parts();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(!message.contains("disk"));

        let (status, message, _) = AppError::Deletion("timeout".into()).parts();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!message.contains("timeout"));

        let (status, _, _) = AppError::Domain(DomainError::Database("boom".into())).parts();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn method_not_allowed_maps_to_405() {
        let (status, message, _) =
            AppError::MethodNotAllowed("PUT is not allowed".into()).parts();
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(message, "PUT is not allowed");
    }

    #[test]
    fn identity_error_becomes_internal() {
        let err: DomainError = IdentityError::Api {
            status: 502,
            message: "bad gateway".into(),
        }
        .into();
        assert!(matches!(err, DomainError::Internal(_)));
    }
}
