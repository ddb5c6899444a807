//! Auth service — register/login/session-validation/federated sign-in
//! against the credential store and token codec.

use std::time::Duration;

use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use super::AuthError;
use super::password;
use super::store::{CredentialStore, StoreError};
use super::token::TokenCodec;
use crate::models::auth::{Authenticated, PublicUser, Role, UserRecord};

/// Minimum password length accepted at registration. Client forms enforce a
/// stricter policy; this is the service's baseline contract.
const MIN_PASSWORD_LEN: usize = 6;

/// Demo accounts pre-registered at startup so the portal is usable without
/// prior registration.
const DEMO_ACCOUNTS: [(&str, &str, &str, Role); 4] = [
    ("patient@demo.com", "password123", "Demo Patient", Role::Patient),
    (
        "healthworker@demo.com",
        "password123",
        "Demo Health Worker",
        Role::HealthWorker,
    ),
    ("john.doe@example.com", "securepass", "John Doe", Role::Patient),
    (
        "dr.smith@hospital.com",
        "doctorpass",
        "Dr. Sarah Smith",
        Role::HealthWorker,
    ),
];

/// Artificial per-operation delays mimicking remote-API latency for demos.
/// All zero by default; [`SimulatedLatency::demo`] gives each operation a
/// human-scale delay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimulatedLatency {
    pub register: Duration,
    pub login: Duration,
    pub validate: Duration,
    pub federated: Duration,
}

impl SimulatedLatency {
    pub fn demo() -> Self {
        Self {
            register: Duration::from_millis(1000),
            login: Duration::from_millis(800),
            validate: Duration::from_millis(200),
            federated: Duration::from_millis(1200),
        }
    }

    async fn apply(duration: Duration) {
        if !duration.is_zero() {
            tokio::time::sleep(duration).await;
        }
    }
}

/// Orchestrates auth operations; sole owner of the credential store.
pub struct AuthService {
    store: CredentialStore,
    codec: TokenCodec,
    latency: SimulatedLatency,
}

impl AuthService {
    pub fn new(store: CredentialStore, codec: TokenCodec) -> Self {
        Self {
            store,
            codec,
            latency: SimulatedLatency::default(),
        }
    }

    /// Replace the simulated latency (zero by default).
    pub fn with_latency(mut self, latency: SimulatedLatency) -> Self {
        self.latency = latency;
        self
    }

    /// The codec this service issues tokens with. The session client uses it
    /// to rewrite its cached token locally.
    pub fn codec(&self) -> &TokenCodec {
        &self.codec
    }

    /// Number of registered identities.
    pub fn user_count(&self) -> usize {
        self.store.count()
    }

    /// Demo listing of all registered identities (public projections).
    pub fn all_users(&self) -> Vec<PublicUser> {
        self.store.all()
    }

    /// Register a new identity and issue a session token.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        full_name: &str,
        role: Role,
    ) -> Result<Authenticated, AuthError> {
        SimulatedLatency::apply(self.latency.register).await;

        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AuthError::Validation(
                "Password must be at least 6 characters".into(),
            ));
        }
        let full_name = full_name.trim();
        if full_name.is_empty() {
            return Err(AuthError::Validation("Full name is required".into()));
        }

        let record = UserRecord {
            id: Uuid::new_v4().to_string(),
            email: normalize_email(email),
            full_name: full_name.to_owned(),
            role,
            password_hash: Some(password::hash_password(password)?),
            created_at: Utc::now(),
        };
        self.store.insert(record.clone()).map_err(|e| match e {
            StoreError::DuplicateIdentity => AuthError::DuplicateIdentity,
        })?;

        info!(email = %record.email, role = %role, "registered new user");
        self.authenticate(record.to_public())
    }

    /// Authenticate with email + password and issue a fresh token.
    ///
    /// Unknown email and wrong password are distinct errors internally but
    /// present the same message, so callers cannot enumerate accounts.
    pub async fn login(&self, email: &str, password: &str) -> Result<Authenticated, AuthError> {
        SimulatedLatency::apply(self.latency.login).await;

        let record = self
            .store
            .find_by_email(&normalize_email(email))
            .ok_or(AuthError::IdentityNotFound)?;

        // Federated-only identities have no digest to compare against.
        let Some(hash) = record.password_hash.as_deref() else {
            return Err(AuthError::CredentialMismatch);
        };
        if !password::verify_password(password, hash)? {
            return Err(AuthError::CredentialMismatch);
        }

        self.authenticate(record.to_public())
    }

    /// Validate a bearer token and resolve its identity.
    ///
    /// The original token is echoed back on success; a new one is not issued.
    pub async fn validate_session(&self, token: &str) -> Result<Authenticated, AuthError> {
        SimulatedLatency::apply(self.latency.validate).await;

        let claims = self
            .codec
            .decode(token)
            .map_err(|_| AuthError::SessionExpiredOrInvalid)?;
        if claims.is_expired_at(Utc::now().timestamp_millis()) {
            return Err(AuthError::SessionExpiredOrInvalid);
        }

        // The store is authoritative: the snapshot inside the token is not
        // trusted beyond locating the record.
        let record = self
            .store
            .find_by_id(&claims.sub)
            .ok_or(AuthError::IdentityNotFound)?;

        Ok(Authenticated {
            user: record.to_public(),
            token: token.to_owned(),
        })
    }

    /// Simulated federated sign-in: no provider round-trip, just a
    /// deterministic external identity per role, created on first use.
    pub async fn federated_sign_in(&self, role: Role) -> Result<Authenticated, AuthError> {
        SimulatedLatency::apply(self.latency.federated).await;

        let email = format!("demo.{role}@gmail.com");
        let full_name = match role {
            Role::Patient => "Demo Patient",
            Role::HealthWorker => "Demo Health Worker",
        };

        let record = match self.store.find_by_email(&email) {
            Some(existing) => existing,
            None => {
                let record = UserRecord {
                    id: Uuid::new_v4().to_string(),
                    email: email.clone(),
                    full_name: full_name.to_owned(),
                    role,
                    password_hash: None,
                    created_at: Utc::now(),
                };
                match self.store.insert(record.clone()) {
                    Ok(()) => record,
                    // Lost the race to a concurrent sign-in; use theirs.
                    Err(StoreError::DuplicateIdentity) => self
                        .store
                        .find_by_email(&email)
                        .ok_or_else(|| AuthError::Internal("federated record vanished".into()))?,
                }
            }
        };

        info!(email = %record.email, "federated sign-in");
        self.authenticate(record.to_public())
    }

    /// Pre-register the demo accounts. Returns how many were newly created;
    /// already-present accounts are skipped silently.
    pub async fn seed_demo_users(&self) -> usize {
        let mut seeded = 0;
        for (email, password, full_name, role) in DEMO_ACCOUNTS {
            match self.register(email, password, full_name, role).await {
                Ok(_) => seeded += 1,
                Err(AuthError::DuplicateIdentity) => {}
                Err(e) => warn!(email, "failed to seed demo account: {e}"),
            }
        }
        info!(seeded, "seeded demo accounts");
        seeded
    }

    fn authenticate(&self, user: PublicUser) -> Result<Authenticated, AuthError> {
        let token = self
            .codec
            .issue(&user, Utc::now())
            .map_err(|e| AuthError::Internal(e.to_string()))?;
        Ok(Authenticated { user, token })
    }
}

/// Emails are compared case-insensitively; the lowercased form is stored.
fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::token::TOKEN_LIFETIME_MS;
    use crate::models::auth::TokenClaims;

    fn service() -> AuthService {
        AuthService::new(CredentialStore::new(), TokenCodec::new(b"test-secret"))
    }

    #[tokio::test]
    async fn register_then_login() {
        let svc = service();

        let registered = svc
            .register("patient@demo.com", "password123", "Demo Patient", Role::Patient)
            .await
            .unwrap();
        assert_eq!(registered.user.role, Role::Patient);
        assert_eq!(registered.user.full_name, "Demo Patient");
        assert!(!registered.token.is_empty());

        let logged_in = svc.login("patient@demo.com", "password123").await.unwrap();
        assert_eq!(logged_in.user.id, registered.user.id);
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected_case_insensitively() {
        let svc = service();
        svc.register("patient@demo.com", "password123", "Demo Patient", Role::Patient)
            .await
            .unwrap();

        let err = svc
            .register("Patient@Demo.COM", "password456", "Someone Else", Role::Patient)
            .await
            .unwrap_err();
        assert_eq!(err, AuthError::DuplicateIdentity);
    }

    #[tokio::test]
    async fn short_password_is_rejected() {
        let svc = service();
        let err = svc
            .register("patient@demo.com", "12345", "Demo Patient", Role::Patient)
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::Validation(_)));
    }

    #[tokio::test]
    async fn login_failures_do_not_reveal_which_part_was_wrong() {
        let svc = service();
        svc.register("patient@demo.com", "password123", "Demo Patient", Role::Patient)
            .await
            .unwrap();

        let wrong_password = svc.login("patient@demo.com", "wrongpass").await.unwrap_err();
        let unknown_email = svc.login("nobody@demo.com", "x").await.unwrap_err();

        // Distinct kinds internally, identical user-facing message.
        assert_eq!(wrong_password, AuthError::CredentialMismatch);
        assert_eq!(unknown_email, AuthError::IdentityNotFound);
        assert_eq!(wrong_password.to_string(), unknown_email.to_string());
    }

    #[tokio::test]
    async fn login_normalizes_email() {
        let svc = service();
        svc.register("Patient@Demo.com", "password123", "Demo Patient", Role::Patient)
            .await
            .unwrap();
        assert!(svc.login("PATIENT@demo.com", "password123").await.is_ok());
    }

    #[tokio::test]
    async fn validate_session_round_trips_issued_tokens() {
        let svc = service();
        let registered = svc
            .register("patient@demo.com", "password123", "Demo Patient", Role::Patient)
            .await
            .unwrap();

        let session = svc.validate_session(&registered.token).await.unwrap();
        assert_eq!(session.user.id, registered.user.id);
        // The original token is echoed back, not reissued.
        assert_eq!(session.token, registered.token);
    }

    #[tokio::test]
    async fn validate_session_rejects_expired_and_garbage_tokens() {
        let svc = service();
        let registered = svc
            .register("patient@demo.com", "password123", "Demo Patient", Role::Patient)
            .await
            .unwrap();

        // A token already past its expiry instant.
        let now_ms = Utc::now().timestamp_millis();
        let expired = svc
            .codec()
            .encode(&TokenClaims {
                sub: registered.user.id.clone(),
                user: registered.user.clone(),
                iat: now_ms - TOKEN_LIFETIME_MS,
                exp: now_ms - 1,
            })
            .unwrap();
        assert_eq!(
            svc.validate_session(&expired).await.unwrap_err(),
            AuthError::SessionExpiredOrInvalid
        );

        assert_eq!(
            svc.validate_session("garbage").await.unwrap_err(),
            AuthError::SessionExpiredOrInvalid
        );
    }

    #[tokio::test]
    async fn validate_session_accepts_tokens_expiring_in_the_future() {
        let svc = service();
        let registered = svc
            .register("patient@demo.com", "password123", "Demo Patient", Role::Patient)
            .await
            .unwrap();

        // Comfortably inside the window; the ±1 ms boundary itself is pinned
        // by TokenClaims::is_expired_at, which this path delegates to.
        let now_ms = Utc::now().timestamp_millis();
        let fresh = svc
            .codec()
            .encode(&TokenClaims {
                sub: registered.user.id.clone(),
                user: registered.user.clone(),
                iat: now_ms,
                exp: now_ms + 60_000,
            })
            .unwrap();
        assert!(svc.validate_session(&fresh).await.is_ok());
    }

    #[tokio::test]
    async fn validate_session_fails_when_identity_is_gone() {
        let svc = service();
        let registered = svc
            .register("patient@demo.com", "password123", "Demo Patient", Role::Patient)
            .await
            .unwrap();

        // A token referencing an id the store never held.
        let mut ghost = registered.user.clone();
        ghost.id = "no-such-id".into();
        let token = svc.codec().issue(&ghost, Utc::now()).unwrap();

        assert_eq!(
            svc.validate_session(&token).await.unwrap_err(),
            AuthError::IdentityNotFound
        );
    }

    #[tokio::test]
    async fn federated_sign_in_creates_then_reuses_identity() {
        let svc = service();

        let first = svc.federated_sign_in(Role::Patient).await.unwrap();
        assert_eq!(first.user.email, "demo.patient@gmail.com");
        assert_eq!(first.user.full_name, "Demo Patient");

        let second = svc.federated_sign_in(Role::Patient).await.unwrap();
        assert_eq!(second.user.id, first.user.id);
        assert_eq!(svc.user_count(), 1);
    }

    #[tokio::test]
    async fn federated_identity_cannot_password_login() {
        let svc = service();
        svc.federated_sign_in(Role::HealthWorker).await.unwrap();

        let err = svc
            .login("demo.health_worker@gmail.com", "password123")
            .await
            .unwrap_err();
        assert_eq!(err, AuthError::CredentialMismatch);
    }

    #[tokio::test]
    async fn seeding_registers_demo_accounts_once() {
        let svc = service();
        assert_eq!(svc.seed_demo_users().await, 4);
        assert_eq!(svc.user_count(), 4);

        // Seeding again finds every account already present.
        assert_eq!(svc.seed_demo_users().await, 0);
        assert_eq!(svc.user_count(), 4);

        assert!(svc.login("dr.smith@hospital.com", "doctorpass").await.is_ok());
    }

    #[tokio::test]
    async fn all_users_lists_public_projections() {
        let svc = service();
        svc.seed_demo_users().await;
        let listed = svc.all_users();
        assert_eq!(listed.len(), 4);
        assert!(listed.iter().any(|u| u.email == "john.doe@example.com"));
    }
}
