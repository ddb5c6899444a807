//! Session client — bridges auth service results into the ambient
//! "current user" state and keeps the bearer token in durable storage.

use std::sync::Arc;

use swasthya_core::auth::AuthError;
use swasthya_core::auth::service::AuthService;
use swasthya_core::auth::token::TokenError;
use swasthya_core::models::auth::{Authenticated, PublicUser, Role};
use thiserror::Error;
use tracing::{debug, warn};

use crate::token_store::TokenStore;

/// Session client errors, surfaced to the UI as notifications.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("No active session")]
    NoSession,

    #[error("Invalid or expired session.")]
    InvalidSession,

    #[error("Token storage failed: {0}")]
    Storage(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<TokenError> for ClientError {
    fn from(e: TokenError) -> Self {
        match e {
            TokenError::Malformed => ClientError::InvalidSession,
            TokenError::Encode(detail) => ClientError::Internal(detail),
        }
    }
}

/// Holds the authenticated user for the life of a UI session.
///
/// All failure paths on startup degrade to "anonymous"; they never panic or
/// propagate.
pub struct SessionClient<S: TokenStore> {
    service: Arc<AuthService>,
    store: S,
    user: Option<PublicUser>,
}

impl<S: TokenStore> SessionClient<S> {
    pub fn new(service: Arc<AuthService>, store: S) -> Self {
        Self {
            service,
            store,
            user: None,
        }
    }

    /// The currently signed-in user, if any.
    pub fn current_user(&self) -> Option<&PublicUser> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Restore a persisted session at startup. Returns whether a session was
    /// restored; a rejected or unreadable token is discarded silently.
    pub async fn restore(&mut self) -> bool {
        let Some(token) = self.store.load() else {
            return false;
        };
        match self.service.validate_session(&token).await {
            Ok(auth) => {
                self.user = Some(auth.user);
                true
            }
            Err(e) => {
                debug!("stored session rejected: {e}");
                if let Err(e) = self.store.clear() {
                    warn!("failed to discard stored token: {e}");
                }
                false
            }
        }
    }

    /// Sign in with email + password. On failure the current-user state is
    /// left unchanged.
    pub async fn sign_in(&mut self, email: &str, password: &str) -> Result<PublicUser, ClientError> {
        let auth = self.service.login(email, password).await?;
        self.begin_session(auth)
    }

    /// Register a new account and start a session for it.
    pub async fn sign_up(
        &mut self,
        email: &str,
        password: &str,
        full_name: &str,
        role: Role,
    ) -> Result<PublicUser, ClientError> {
        let auth = self.service.register(email, password, full_name, role).await?;
        self.begin_session(auth)
    }

    /// Sign in through the simulated federated provider.
    pub async fn sign_in_federated(&mut self, role: Role) -> Result<PublicUser, ClientError> {
        let auth = self.service.federated_sign_in(role).await?;
        self.begin_session(auth)
    }

    /// Discard the session locally. The service keeps no revocation list, so
    /// there is nothing to call; logging out twice is a no-op.
    pub fn logout(&mut self) {
        if let Err(e) = self.store.clear() {
            warn!("failed to discard stored token: {e}");
        }
        self.user = None;
    }

    /// Client-only profile picture update: rewrites the cached user and the
    /// persisted token's snapshot, keeping the original issue/expiry times.
    /// The credential store is deliberately not consulted or updated, so a
    /// later `validate_session` reflects the authoritative, picture-less
    /// record.
    pub fn update_profile_picture(&mut self, image_url: &str) -> Result<(), ClientError> {
        let Some(user) = self.user.as_mut() else {
            return Err(ClientError::NoSession);
        };
        let token = self.store.load().ok_or(ClientError::NoSession)?;

        let mut claims = self.service.codec().decode(&token)?;
        user.profile_picture = Some(image_url.to_owned());
        claims.user = user.clone();

        let replacement = self.service.codec().encode(&claims)?;
        self.store.save(&replacement)?;
        Ok(())
    }

    fn begin_session(&mut self, auth: Authenticated) -> Result<PublicUser, ClientError> {
        self.store.save(&auth.token)?;
        self.user = Some(auth.user.clone());
        Ok(auth.user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token_store::{MemoryTokenStore, TokenStore};
    use chrono::Utc;
    use swasthya_core::auth::store::CredentialStore;
    use swasthya_core::auth::token::TokenCodec;

    fn service() -> Arc<AuthService> {
        Arc::new(AuthService::new(
            CredentialStore::new(),
            TokenCodec::new(b"test-secret"),
        ))
    }

    fn client(service: &Arc<AuthService>) -> SessionClient<MemoryTokenStore> {
        SessionClient::new(service.clone(), MemoryTokenStore::new())
    }

    #[tokio::test]
    async fn sign_up_then_restore_in_a_new_client() {
        let service = service();

        let mut first = client(&service);
        let user = first
            .sign_up("patient@demo.com", "password123", "Demo Patient", Role::Patient)
            .await
            .unwrap();
        assert!(first.is_authenticated());

        // A fresh client over the same persisted token restores the session.
        let token = first.store.load().unwrap();
        let mut second = client(&service);
        second.store.save(&token).unwrap();
        assert!(second.restore().await);
        assert_eq!(second.current_user().unwrap().id, user.id);
    }

    #[tokio::test]
    async fn restore_without_token_stays_anonymous() {
        let service = service();
        let mut client = client(&service);
        assert!(!client.restore().await);
        assert!(!client.is_authenticated());
    }

    #[tokio::test]
    async fn restore_discards_rejected_tokens() {
        let service = service();
        let mut client = client(&service);
        client.store.save("garbage-token").unwrap();

        assert!(!client.restore().await);
        assert!(!client.is_authenticated());
        // The bad token is gone, not retried forever.
        assert!(client.store.load().is_none());
    }

    #[tokio::test]
    async fn failed_sign_in_leaves_state_unchanged() {
        let service = service();
        service
            .register("patient@demo.com", "password123", "Demo Patient", Role::Patient)
            .await
            .unwrap();

        let mut client = client(&service);
        let err = client.sign_in("patient@demo.com", "wrongpass").await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid credentials");
        assert!(!client.is_authenticated());
        assert!(client.store.load().is_none());
    }

    #[tokio::test]
    async fn logout_is_idempotent() {
        let service = service();
        let mut client = client(&service);

        // Logging out with no session is the same observable no-op.
        client.logout();
        assert!(!client.is_authenticated());

        client
            .sign_up("patient@demo.com", "password123", "Demo Patient", Role::Patient)
            .await
            .unwrap();
        client.logout();
        assert!(!client.is_authenticated());
        assert!(client.store.load().is_none());

        client.logout();
        assert!(!client.is_authenticated());
    }

    #[tokio::test]
    async fn federated_sign_in_starts_a_session() {
        let service = service();
        let mut client = client(&service);

        let user = client.sign_in_federated(Role::HealthWorker).await.unwrap();
        assert_eq!(user.email, "demo.health_worker@gmail.com");
        assert!(client.is_authenticated());
    }

    #[tokio::test]
    async fn profile_picture_updates_cache_and_token_but_not_the_store() {
        let service = service();
        let mut client = client(&service);
        client
            .sign_up("patient@demo.com", "password123", "Demo Patient", Role::Patient)
            .await
            .unwrap();
        let original_token = client.store.load().unwrap();

        client.update_profile_picture("https://cdn.example/pic.png").unwrap();

        // Cached user and persisted token both carry the new picture...
        assert_eq!(
            client.current_user().unwrap().profile_picture.as_deref(),
            Some("https://cdn.example/pic.png")
        );
        let replacement = client.store.load().unwrap();
        assert_ne!(replacement, original_token);
        let claims = service.codec().decode(&replacement).unwrap();
        assert_eq!(
            claims.user.profile_picture.as_deref(),
            Some("https://cdn.example/pic.png")
        );

        // ...with the original validity window.
        let original_claims = service.codec().decode(&original_token).unwrap();
        assert_eq!(claims.iat, original_claims.iat);
        assert_eq!(claims.exp, original_claims.exp);

        // The authoritative store never learns about the picture.
        let session = service.validate_session(&replacement).await.unwrap();
        assert!(session.user.profile_picture.is_none());
    }

    #[tokio::test]
    async fn profile_picture_without_session_is_rejected() {
        let service = service();
        let mut client = client(&service);
        let err = client.update_profile_picture("x").unwrap_err();
        assert!(matches!(err, ClientError::NoSession));
    }

    #[tokio::test]
    async fn expired_session_restores_to_anonymous() {
        let service = service();
        let registered = service
            .register("patient@demo.com", "password123", "Demo Patient", Role::Patient)
            .await
            .unwrap();

        // Craft a token that expired a millisecond ago.
        let now_ms = Utc::now().timestamp_millis();
        let mut claims = service.codec().decode(&registered.token).unwrap();
        claims.iat = now_ms - 1_000;
        claims.exp = now_ms - 1;
        let expired = service.codec().encode(&claims).unwrap();

        let mut client = client(&service);
        client.store.save(&expired).unwrap();
        assert!(!client.restore().await);
        assert!(client.store.load().is_none());
    }
}
