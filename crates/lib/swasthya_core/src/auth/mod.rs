//! Authentication logic.
//!
//! Password hashing, the session token codec, the in-memory credential
//! store, and the auth service that ties them together.

pub mod password;
pub mod service;
pub mod store;
pub mod token;

use thiserror::Error;

/// Authentication errors.
///
/// `IdentityNotFound` and `CredentialMismatch` deliberately share one
/// display string: a login caller must not be able to tell whether the
/// email or the password was wrong.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid credentials")]
    IdentityNotFound,

    #[error("Invalid credentials")]
    CredentialMismatch,

    #[error("Email already registered.")]
    DuplicateIdentity,

    #[error("{0}")]
    Validation(String),

    #[error("Invalid or expired session.")]
    SessionExpiredOrInvalid,

    #[error("Internal error: {0}")]
    Internal(String),
}
