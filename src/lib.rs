//! Password-based text encryption and salted password hashing.
//!
//! ```no_run
//! let container = textlock::encrypt("Hello world!", "pw123")?;
//! assert_eq!(textlock::decrypt(&container, "pw123")?, "Hello world!");
//!
//! let digest = textlock::hash("pw123", "pepper");
//! assert!(textlock::matches("pw123", "pepper", &digest));
//! # Ok::<(), textlock::CryptoError>(())
//! ```

pub mod crypto;
mod engine;
mod error;
pub mod format;
pub mod storage;

pub use crate::crypto::{HashRecord, KdfParams, OsRandom, RandomSource, hash, matches};
pub use crate::engine::EncryptionEngine;
pub use crate::error::{CryptoError, Result};
pub use crate::format::Container;
pub use crate::storage::Document;

/// Encrypts `text` with the default engine configuration.
pub fn encrypt(text: &str, password: &str) -> Result<String> {
    EncryptionEngine::new().encrypt(text, password)
}

/// Decrypts container text with the default engine configuration.
pub fn decrypt(container: &str, password: &str) -> Result<String> {
    EncryptionEngine::new().decrypt(container, password)
}
