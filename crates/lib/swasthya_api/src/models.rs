//! Request and response wire models (camelCase, the portal's JSON
//! convention).

use serde::{Deserialize, Serialize};
use swasthya_core::models::auth::{Authenticated, Language, PublicUser, Role};
use validator::Validate;

/// `POST /login` body.
///
/// No password-length rule here: a short password at login must fall through
/// to the credential check so the failure message matches the unknown-email
/// one.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[validate(email(message = "Please enter a valid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// `POST /register` body. Role defaults to `patient` when omitted;
/// `preferredLanguage` is accepted for forward compatibility and otherwise
/// ignored.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(email(message = "Please enter a valid email address"))]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
    #[validate(length(min = 1, message = "Full name is required"))]
    pub full_name: String,
    #[serde(default = "default_role")]
    pub role: Role,
    #[serde(default)]
    pub preferred_language: Option<Language>,
}

fn default_role() -> Role {
    Role::Patient
}

/// Response envelope for auth operations.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<PublicUser>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl AuthResponse {
    /// A login response: user plus bearer token.
    pub fn session(auth: Authenticated) -> Self {
        Self {
            success: true,
            user: Some(auth.user),
            token: Some(auth.token),
            message: None,
        }
    }

    /// A registration response: the user only — the portal asks freshly
    /// registered users to sign in.
    pub fn registered(user: PublicUser) -> Self {
        Self {
            success: true,
            user: Some(user),
            token: None,
            message: None,
        }
    }
}

/// `GET /health` response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub db: &'static str,
    pub users: usize,
}

/// One field-level validation problem.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationIssue {
    pub field: String,
    pub message: String,
}
