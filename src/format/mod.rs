//! Container layout for encrypted text.
//!
//! ```text
//! SALT (32) | IV (32) | CIPHERTEXT (N)
//! ```
//!
//! There is no magic, version or algorithm identifier and no integrity tag. The
//! layout is only meaningful together with the cipher (Rijndael-256, CBC, PKCS7)
//! and KDF parameters (PBKDF2-HMAC-SHA256, iteration count) used to produce it.

use crate::crypto::{IV_LEN, SALT_LEN};
use crate::error::{CryptoError, Result};

pub mod armor;

pub use armor::{pack, unpack};

/// Shortest possible container: salt and IV with no ciphertext.
pub const MIN_CONTAINER_LEN: usize = SALT_LEN + IV_LEN;

/// A parsed container with all components.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
    salt: [u8; SALT_LEN],
    iv: [u8; IV_LEN],
    ciphertext: Vec<u8>,
}

impl Container {
    pub fn new(salt: [u8; SALT_LEN], iv: [u8; IV_LEN], ciphertext: Vec<u8>) -> Self {
        Self {
            salt,
            iv,
            ciphertext,
        }
    }

    /// Builds a container from slices, checking salt and IV lengths.
    pub fn from_parts(salt: &[u8], iv: &[u8], ciphertext: &[u8]) -> Result<Self> {
        let salt: [u8; SALT_LEN] = salt.try_into().map_err(|_| {
            CryptoError::InvalidParameters(format!("salt must be {SALT_LEN} bytes"))
        })?;
        let iv: [u8; IV_LEN] = iv
            .try_into()
            .map_err(|_| CryptoError::InvalidParameters(format!("iv must be {IV_LEN} bytes")))?;

        Ok(Self::new(salt, iv, ciphertext.to_vec()))
    }

    pub fn salt(&self) -> &[u8; SALT_LEN] {
        &self.salt
    }

    pub fn iv(&self) -> &[u8; IV_LEN] {
        &self.iv
    }

    pub fn ciphertext(&self) -> &[u8] {
        &self.ciphertext
    }

    pub fn into_parts(self) -> ([u8; SALT_LEN], [u8; IV_LEN], Vec<u8>) {
        (self.salt, self.iv, self.ciphertext)
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(MIN_CONTAINER_LEN + self.ciphertext.len());

        buf.extend_from_slice(&self.salt);
        buf.extend_from_slice(&self.iv);
        buf.extend_from_slice(&self.ciphertext);

        buf
    }

    /// Splits raw container bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::MalformedContainer`] if fewer than 64 bytes are given.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        if data.len() < MIN_CONTAINER_LEN {
            return Err(CryptoError::MalformedContainer(format!(
                "{} bytes is shorter than salt and iv ({MIN_CONTAINER_LEN})",
                data.len()
            )));
        }

        let (salt, rest) = data.split_at(SALT_LEN);
        let (iv, ciphertext) = rest.split_at(IV_LEN);

        let mut container = Self::new([0u8; SALT_LEN], [0u8; IV_LEN], ciphertext.to_vec());
        container.salt.copy_from_slice(salt);
        container.iv.copy_from_slice(iv);

        Ok(container)
    }
}
