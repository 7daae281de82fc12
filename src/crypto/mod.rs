//! Cryptographic primitives for the engine.
//!
//! Provides secure randomness, key derivation, the Rijndael-256 block cipher in
//! CBC mode, and salted password hashing.

pub mod cbc;
pub mod hash;
pub mod kdf;
pub mod random;
pub mod rijndael;

pub use cbc::{decrypt_blocks, encrypt_blocks};
pub use hash::{HashRecord, hash, matches};
pub use kdf::{KdfParams, derive_key};
pub use random::{OsRandom, RandomSource};

/// Length of the salt (32 bytes).
pub const SALT_LEN: usize = 32;
/// Length of the initialization vector (32 bytes, one cipher block).
pub const IV_LEN: usize = 32;
/// Default length of the derived key (32 bytes / 256 bits).
pub const KEY_LEN: usize = 32;
/// Cipher block length (32 bytes / 256 bits).
pub const BLOCK_LEN: usize = 32;
/// Default PBKDF2 iteration count. Not stored in containers.
pub const DEFAULT_ITERATIONS: u32 = 10_000;
