//! Session token codec — HS256-signed JWTs carrying a user snapshot.
//!
//! Timestamps in the claims are unix *milliseconds* and the session lifetime
//! is fixed at 24 hours. Decoding verifies the signature and structure only;
//! expiry is checked by the auth service (the jsonwebtoken built-in check is
//! second-granular and applies leeway).

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use thiserror::Error;

use crate::models::auth::{PublicUser, TokenClaims};

/// Fixed session lifetime: 24 hours, in milliseconds.
pub const TOKEN_LIFETIME_MS: i64 = 24 * 60 * 60 * 1000;

/// Token codec errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    /// Not decodable as a token issued by this codec (garbage, truncated,
    /// or signed with a different secret).
    #[error("Malformed token")]
    Malformed,

    #[error("Token encoding failed: {0}")]
    Encode(String),
}

/// Encodes/decodes session tokens with a server-held secret.
#[derive(Clone)]
pub struct TokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl TokenCodec {
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // exp/iat are milliseconds here; the service owns the expiry check.
        validation.validate_exp = false;
        validation.required_spec_claims.clear();
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Issue a fresh token for `user`, valid for 24 hours from `now`.
    pub fn issue(&self, user: &PublicUser, now: DateTime<Utc>) -> Result<String, TokenError> {
        let iat = now.timestamp_millis();
        self.encode(&TokenClaims {
            sub: user.id.clone(),
            user: user.clone(),
            iat,
            exp: iat + TOKEN_LIFETIME_MS,
        })
    }

    /// Serialize and sign a claims payload.
    pub fn encode(&self, claims: &TokenClaims) -> Result<String, TokenError> {
        jsonwebtoken::encode(&Header::default(), claims, &self.encoding)
            .map_err(|e| TokenError::Encode(e.to_string()))
    }

    /// Parse and verify a token, returning the claims. Any input that does
    /// not carry a valid signature fails as [`TokenError::Malformed`].
    pub fn decode(&self, token: &str) -> Result<TokenClaims, TokenError> {
        jsonwebtoken::decode::<TokenClaims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|_| TokenError::Malformed)
    }
}
