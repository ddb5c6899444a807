//! In-memory credential store.
//!
//! Process-local and write-once: records are never updated or deleted, and a
//! restart loses everything except what startup seeding re-registers. The
//! store is constructed explicitly and handed to the auth service — never a
//! process-wide global — so tests get isolated stores.

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use thiserror::Error;

use crate::models::auth::{PublicUser, UserRecord};

/// Credential store errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    /// The normalized email is already registered.
    #[error("Email already registered.")]
    DuplicateIdentity,
}

/// Maps normalized email → registered identity.
#[derive(Debug, Default)]
pub struct CredentialStore {
    users: DashMap<String, UserRecord>,
}

impl CredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a record. The uniqueness check and the insert are one atomic
    /// step, so concurrent registrations of the same email cannot race.
    ///
    /// `record.email` must already be normalized (lowercased) by the caller.
    pub fn insert(&self, record: UserRecord) -> Result<(), StoreError> {
        match self.users.entry(record.email.clone()) {
            Entry::Occupied(_) => Err(StoreError::DuplicateIdentity),
            Entry::Vacant(slot) => {
                slot.insert(record);
                Ok(())
            }
        }
    }

    /// Look up a record by normalized email.
    pub fn find_by_email(&self, normalized_email: &str) -> Option<UserRecord> {
        self.users
            .get(normalized_email)
            .map(|entry| entry.value().clone())
    }

    /// Look up a record by user id (linear scan — the store is demo-sized).
    pub fn find_by_id(&self, id: &str) -> Option<UserRecord> {
        self.users
            .iter()
            .find(|entry| entry.value().id == id)
            .map(|entry| entry.value().clone())
    }

    /// Snapshot of all identities as client-safe projections.
    pub fn all(&self) -> Vec<PublicUser> {
        self.users.iter().map(|entry| entry.value().to_public()).collect()
    }

    /// Number of registered identities.
    pub fn count(&self) -> usize {
        self.users.len()
    }
}
