//! The password-based encryption engine.

use zeroize::{Zeroize, Zeroizing};

use crate::crypto::{
    IV_LEN, KdfParams, OsRandom, RandomSource, SALT_LEN, decrypt_blocks, derive_key,
    encrypt_blocks,
};
use crate::error::{CryptoError, Result};
use crate::format::{Container, armor};

/// Password-based text encryption.
///
/// Each call draws a fresh salt and IV, derives a key with PBKDF2 and encrypts with
/// Rijndael-256 in CBC mode. The engine holds no state besides its configuration,
/// so one instance can serve any number of threads.
#[derive(Debug, Clone, Default)]
pub struct EncryptionEngine<R: RandomSource = OsRandom> {
    random: R,
    kdf: KdfParams,
}

impl EncryptionEngine<OsRandom> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_kdf(kdf: KdfParams) -> Self {
        Self::with_random(OsRandom, kdf)
    }
}

impl<R: RandomSource> EncryptionEngine<R> {
    /// Uses `random` for salts and IVs instead of the OS generator.
    pub fn with_random(random: R, kdf: KdfParams) -> Self {
        Self { random, kdf }
    }

    pub fn kdf(&self) -> KdfParams {
        self.kdf
    }

    /// Encrypts `text` under `password` and returns base64 container text.
    pub fn encrypt(&self, text: &str, password: &str) -> Result<String> {
        let container = self.seal(text.as_bytes(), password)?;
        Ok(armor::encode(&container))
    }

    /// Decrypts container text produced by [`encrypt`](Self::encrypt).
    ///
    /// # Errors
    ///
    /// [`CryptoError::MalformedContainer`] for text that is not a container, and
    /// [`CryptoError::DecryptionFailed`] for a wrong password or corrupted data. The
    /// two causes of the latter cannot be told apart.
    pub fn decrypt(&self, container: &str, password: &str) -> Result<String> {
        let container = armor::decode(container)?;
        let mut plaintext = self.open(&container, password)?;

        String::from_utf8(std::mem::take(&mut *plaintext)).map_err(|e| {
            e.into_bytes().zeroize();
            CryptoError::DecryptionFailed
        })
    }

    /// Encrypts raw bytes into a [`Container`].
    pub fn seal(&self, plaintext: &[u8], password: &str) -> Result<Container> {
        let mut salt = [0u8; SALT_LEN];
        let mut iv = [0u8; IV_LEN];
        self.random.fill(&mut salt)?;
        self.random.fill(&mut iv)?;

        let key = derive_key(password.as_bytes(), &salt, self.kdf)?;
        let ciphertext = encrypt_blocks(&key, &iv, plaintext)?;

        Ok(Container::new(salt, iv, ciphertext))
    }

    /// Decrypts a [`Container`] into raw bytes, wiped on drop.
    pub fn open(&self, container: &Container, password: &str) -> Result<Zeroizing<Vec<u8>>> {
        let key = derive_key(password.as_bytes(), container.salt(), self.kdf)?;
        decrypt_blocks(&key, container.iv(), container.ciphertext())
    }
}
