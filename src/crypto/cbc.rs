//! Cipher block chaining over the 256-bit Rijndael block, with PKCS7 padding.

use cipher::block_padding::Pkcs7;
use cipher::{BlockDecryptMut, BlockEncryptMut, InnerIvInit, KeyInit};
use zeroize::Zeroizing;

use super::IV_LEN;
use super::rijndael::Rijndael256;
use crate::error::{CryptoError, Result};

type Encryptor = ::cbc::Encryptor<Rijndael256>;
type Decryptor = ::cbc::Decryptor<Rijndael256>;

fn cipher_for(key: &[u8]) -> Result<Rijndael256> {
    Rijndael256::new_from_slice(key).map_err(|_| {
        CryptoError::InvalidParameters(format!(
            "rijndael key must be 16, 24 or 32 bytes, got {}",
            key.len()
        ))
    })
}

fn iv_error(iv: &[u8]) -> CryptoError {
    CryptoError::InvalidParameters(format!("iv must be {IV_LEN} bytes, got {}", iv.len()))
}

/// Encrypt plaintext. The result is always 1..=32 bytes longer than the input.
pub fn encrypt_blocks(key: &[u8], iv: &[u8], plaintext: &[u8]) -> Result<Vec<u8>> {
    let mode = Encryptor::inner_iv_slice_init(cipher_for(key)?, iv).map_err(|_| iv_error(iv))?;

    Ok(mode.encrypt_padded_vec_mut::<Pkcs7>(plaintext))
}

/// Decrypt ciphertext and strip its padding.
///
/// Every failure, including a key or IV of the wrong length, an empty or unaligned
/// ciphertext, or padding that does not validate, is [`CryptoError::DecryptionFailed`].
pub fn decrypt_blocks(key: &[u8], iv: &[u8], ciphertext: &[u8]) -> Result<Zeroizing<Vec<u8>>> {
    let cipher = cipher_for(key).map_err(|_| CryptoError::DecryptionFailed)?;
    let mode =
        Decryptor::inner_iv_slice_init(cipher, iv).map_err(|_| CryptoError::DecryptionFailed)?;

    if ciphertext.is_empty() {
        return Err(CryptoError::DecryptionFailed);
    }

    let mut buf = Zeroizing::new(ciphertext.to_vec());
    let len = mode
        .decrypt_padded_mut::<Pkcs7>(&mut buf)
        .map_err(|_| CryptoError::DecryptionFailed)?
        .len();
    buf.truncate(len);

    Ok(buf)
}
