//! Small helpers for hashing, token generation and input checks.

use rand::{rngs::OsRng, RngCore};
use regex::Regex;
use sha2::{Digest, Sha256};

use super::error::StoreError;

const SESSION_TOKEN_BYTES: usize = 32;

/// SHA-256 digest of a password, lowercase hex.
#[must_use]
pub fn hash_password(password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

/// Compare two byte strings without short-circuiting on the first mismatch.
pub(crate) fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}

/// Create a new session token: 32 bytes from the OS RNG, hex encoded.
pub(crate) fn generate_session_token() -> Result<String, StoreError> {
    let mut bytes = [0u8; SESSION_TOKEN_BYTES];
    OsRng.try_fill_bytes(&mut bytes)?;
    Ok(hex::encode(bytes))
}

pub(crate) fn valid_email(email: &str) -> bool {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").is_ok_and(|re| re.is_match(email))
}

pub(crate) fn valid_password_hash(hash: &str) -> bool {
    Regex::new(r"^[0-9a-fA-F]{64}$").is_ok_and(|re| re.is_match(hash))
}

/// Trimmed view of a credential field, `None` when blank.
pub(crate) fn non_blank(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}
