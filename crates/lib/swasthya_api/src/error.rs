//! Application error types with HTTP status mapping.
//!
//! Every error body has the same envelope the portal's clients expect:
//! `{ "success": false, "message": ... }`, plus a field-level `issues` list
//! for validation failures. Internal faults are logged server-side and
//! surfaced as a generic 500.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use swasthya_core::auth::AuthError;
use thiserror::Error;

use crate::models::ValidationIssue;

/// Convenience alias for handler return types.
pub type ApiResult<T> = Result<T, ApiError>;

/// Application-level errors with HTTP status mapping.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{message}")]
    Validation {
        message: String,
        issues: Vec<ValidationIssue>,
    },

    #[error("Email already registered.")]
    Conflict,

    #[error("{0}")]
    Unauthorized(String),

    #[error("Internal server error")]
    Internal(String),
}

impl ApiError {
    /// A validation failure with a single field issue.
    pub fn invalid_input(field: &str, message: impl Into<String>) -> Self {
        ApiError::Validation {
            message: "Invalid input".into(),
            issues: vec![ValidationIssue {
                field: field.to_owned(),
                message: message.into(),
            }],
        }
    }
}

/// Error response envelope.
#[derive(Serialize)]
struct ErrorBody {
    success: bool,
    message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    issues: Vec<ValidationIssue>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message, issues) = match self {
            ApiError::Validation { message, issues } => (StatusCode::BAD_REQUEST, message, issues),
            ApiError::Conflict => (
                StatusCode::CONFLICT,
                "Email already registered.".to_owned(),
                Vec::new(),
            ),
            ApiError::Unauthorized(message) => (StatusCode::UNAUTHORIZED, message, Vec::new()),
            ApiError::Internal(detail) => {
                tracing::error!("internal error: {detail}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_owned(),
                    Vec::new(),
                )
            }
        };
        let body = Json(ErrorBody {
            success: false,
            message,
            issues,
        });
        (status, body).into_response()
    }
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        match e {
            // Both halves of a failed login collapse to one message so the
            // response cannot be used to enumerate accounts.
            AuthError::IdentityNotFound | AuthError::CredentialMismatch => {
                ApiError::Unauthorized("Invalid credentials".into())
            }
            AuthError::SessionExpiredOrInvalid => {
                ApiError::Unauthorized("Invalid or expired session.".into())
            }
            AuthError::DuplicateIdentity => ApiError::Conflict,
            AuthError::Validation(message) => ApiError::Validation {
                message,
                issues: Vec::new(),
            },
            AuthError::Internal(detail) => ApiError::Internal(detail),
        }
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut issues = Vec::new();
        for (field, field_errors) in errors.field_errors() {
            for error in field_errors {
                issues.push(ValidationIssue {
                    field: field.to_string(),
                    message: error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| error.code.to_string()),
                });
            }
        }
        ApiError::Validation {
            message: "Invalid input".into(),
            issues,
        }
    }
}
