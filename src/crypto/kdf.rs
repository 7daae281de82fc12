use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;
use zeroize::Zeroizing;

use super::{DEFAULT_ITERATIONS, KEY_LEN};
use crate::error::{CryptoError, Result};

/// Key lengths the Rijndael key schedule accepts.
pub const SUPPORTED_KEY_LENS: [usize; 3] = [16, 24, 32];

/// PBKDF2 parameters.
///
/// Neither value is recorded in a container, so the same parameters must be used to
/// encrypt and to decrypt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KdfParams {
    iterations: u32,
    key_len: usize,
}

impl Default for KdfParams {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            key_len: KEY_LEN,
        }
    }
}

impl KdfParams {
    pub fn new(iterations: u32, key_len: usize) -> Result<Self> {
        let params = Self {
            iterations,
            key_len,
        };
        params.validate()?;
        Ok(params)
    }

    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    pub fn key_len(&self) -> usize {
        self.key_len
    }

    pub fn validate(&self) -> Result<()> {
        if self.iterations < 1 {
            return Err(CryptoError::InvalidParameters(
                "pbkdf2 iterations must be >= 1".into(),
            ));
        }
        if !SUPPORTED_KEY_LENS.contains(&self.key_len) {
            return Err(CryptoError::InvalidParameters(format!(
                "key length must be 16, 24 or 32 bytes, got {}",
                self.key_len
            )));
        }
        Ok(())
    }
}

/// Derive key material from a password with PBKDF2-HMAC-SHA256.
///
/// The returned buffer is wiped when dropped.
pub fn derive_key(password: &[u8], salt: &[u8], kdf: KdfParams) -> Result<Zeroizing<Vec<u8>>> {
    kdf.validate()?;

    let mut key = Zeroizing::new(vec![0u8; kdf.key_len]);
    pbkdf2_hmac::<Sha256>(password, salt, kdf.iterations, &mut key);

    Ok(key)
}
