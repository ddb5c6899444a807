//! Authentication domain models.
//!
//! These are internal domain models; the HTTP-facing request/response types
//! (camelCase renames etc.) live in `swasthya_api`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Account role. A closed set — invalid role strings cannot be represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Patient,
    HealthWorker,
}

impl Role {
    /// Wire form of the role (`patient` / `health_worker`).
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Patient => "patient",
            Role::HealthWorker => "health_worker",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Portal display language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    Hi,
    Mr,
}

/// A registered identity as held by the credential store.
///
/// `password_hash` is `None` only for identities created via federated
/// sign-in; such accounts cannot log in with a password.
#[derive(Debug, Clone, PartialEq)]
pub struct UserRecord {
    pub id: String,
    /// Normalized (lowercased) email; unique across the store.
    pub email: String,
    pub full_name: String,
    pub role: Role,
    pub password_hash: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl UserRecord {
    /// The client-safe projection of this record.
    pub fn to_public(&self) -> PublicUser {
        PublicUser {
            id: self.id.clone(),
            email: self.email.clone(),
            full_name: self.full_name.clone(),
            role: self.role,
            created_at: self.created_at,
            profile_picture: None,
        }
    }
}

/// The subset of a [`UserRecord`] safe to return to clients.
///
/// `profile_picture` exists only on client-side cached copies; the
/// credential store never holds one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: String,
    pub email: String,
    pub full_name: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_picture: Option<String>,
}

/// Claims carried by a session token.
///
/// `iat`/`exp` are unix timestamps in *milliseconds* (the portal's
/// convention), not the standard JWT seconds — built-in expiry validation is
/// therefore disabled in the codec and the auth service checks expiry itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject — user id.
    pub sub: String,
    /// Snapshot of the user at issue time.
    pub user: PublicUser,
    /// Issued at (unix ms).
    pub iat: i64,
    /// Expiry (unix ms).
    pub exp: i64,
}

impl TokenClaims {
    /// A token is valid strictly before its expiry instant.
    pub fn is_expired_at(&self, now_ms: i64) -> bool {
        now_ms >= self.exp
    }
}

/// Successful outcome of an auth operation: the public user plus a bearer
/// token for the session.
#[derive(Debug, Clone, PartialEq)]
pub struct Authenticated {
    pub user: PublicUser,
    pub token: String,
}
