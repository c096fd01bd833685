//! User records and the credential store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::debug;
use utoipa::ToSchema;

use super::{
    error::{SeedError, StoreError},
    utils::{constant_time_eq, hash_password, valid_email, valid_password_hash},
};

#[derive(ToSchema, Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
}

#[derive(ToSchema, Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    Active,
    Inactive,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub id: u64,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub permissions: Vec<String>,
    pub status: UserStatus,
    pub created_at: DateTime<Utc>,
}

impl UserRecord {
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == UserStatus::Active
    }
}

/// The subset of a user record that may leave the store.
#[derive(ToSchema, Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct PublicUser {
    pub id: u64,
    pub username: String,
    pub email: String,
    pub role: Role,
    pub permissions: Vec<String>,
}

impl From<&UserRecord> for PublicUser {
    fn from(record: &UserRecord) -> Self {
        Self {
            id: record.id,
            username: record.username.clone(),
            email: record.email.clone(),
            role: record.role,
            permissions: record.permissions.clone(),
        }
    }
}

pub trait CredentialStore: Send + Sync {
    /// Case-sensitive exact lookup.
    ///
    /// # Errors
    /// Returns `StoreError` when the backing store cannot be read.
    fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>, StoreError>;

    fn verify_password(&self, record: &UserRecord, password: &str) -> bool {
        let candidate = hash_password(password);
        constant_time_eq(candidate.as_bytes(), record.password_hash.as_bytes())
    }

    /// Digest and compare `password` against a decoy, for logins that have no
    /// record to check. Costs the same as `verify_password` and never matches.
    fn verify_decoy(&self, password: &str) {
        let candidate = hash_password(password);
        std::hint::black_box(constant_time_eq(
            candidate.as_bytes(),
            DECOY_DIGEST.as_bytes(),
        ));
    }
}

/// Not a valid digest of any input: it is not hex.
const DECOY_DIGEST: &str = "----------------------------------------------------------------";

/// Read-only store over a validated seed.
#[derive(Debug)]
pub struct MemoryCredentialStore {
    users: HashMap<String, UserRecord>,
}

impl MemoryCredentialStore {
    /// Build the store, rejecting seeds that break the record invariants.
    ///
    /// # Errors
    /// Returns `SeedError` on duplicate usernames or ids, malformed emails,
    /// or password hashes that are not hex SHA-256 digests.
    pub fn new(records: Vec<UserRecord>) -> Result<Self, SeedError> {
        let mut users = HashMap::with_capacity(records.len());
        let mut ids = HashSet::with_capacity(records.len());

        for mut record in records {
            if record.username.trim().is_empty() {
                return Err(SeedError::EmptyUsername(record.id));
            }
            if !valid_email(&record.email) {
                return Err(SeedError::InvalidEmail {
                    username: record.username,
                    email: record.email,
                });
            }
            if !valid_password_hash(&record.password_hash) {
                return Err(SeedError::InvalidPasswordHash(record.username));
            }
            if !ids.insert(record.id) {
                return Err(SeedError::DuplicateId(record.id));
            }
            if users.contains_key(&record.username) {
                return Err(SeedError::DuplicateUsername(record.username));
            }

            record.password_hash = record.password_hash.to_ascii_lowercase();
            users.insert(record.username.clone(), record);
        }

        debug!("Loaded {} user records", users.len());

        Ok(Self { users })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.users.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>, StoreError> {
        Ok(self.users.get(username).cloned())
    }
}
