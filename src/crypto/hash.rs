//! Salted one-way password hashing for equality checks.
//!
//! This path never feeds the encryption engine; a hash cannot be turned back into
//! a password or a key.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Hex SHA-256 of `password || salt`.
pub fn hash(password: &str, salt: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    hasher.update(salt.as_bytes());
    hex::encode(hasher.finalize())
}

/// Returns `true` when `expected` is the hash of `password` with `salt`.
///
/// The comparison touches every byte and ignores hex letter case.
pub fn matches(password: &str, salt: &str, expected: &str) -> bool {
    let actual = hash(password, salt);
    if actual.len() != expected.len() {
        return false;
    }

    let diff = actual
        .bytes()
        .zip(expected.bytes())
        .fold(0u8, |acc, (a, e)| acc | (a ^ e.to_ascii_lowercase()));
    diff == 0
}

/// A password hash together with the salt it was computed with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashRecord {
    salt: String,
    hash: String,
}

impl HashRecord {
    pub fn new(password: &str, salt: &str) -> Self {
        Self {
            salt: salt.to_string(),
            hash: hash(password, salt),
        }
    }

    pub fn salt(&self) -> &str {
        &self.salt
    }

    pub fn hash(&self) -> &str {
        &self.hash
    }

    pub fn verify(&self, password: &str) -> bool {
        matches(password, &self.salt, &self.hash)
    }
}
