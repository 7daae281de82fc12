//! Base64 text form of a container.

use base64::{Engine as _, engine::general_purpose::STANDARD};

use super::Container;
use crate::error::{CryptoError, Result};

/// Concatenates `salt || iv || ciphertext` and base64-encodes it.
///
/// # Errors
///
/// Returns [`CryptoError::InvalidParameters`] if salt or IV is not 32 bytes.
pub fn pack(salt: &[u8], iv: &[u8], ciphertext: &[u8]) -> Result<String> {
    let container = Container::from_parts(salt, iv, ciphertext)?;
    Ok(encode(&container))
}

/// Decodes container text into `(salt, iv, ciphertext)`.
///
/// # Errors
///
/// Returns [`CryptoError::MalformedContainer`] if the text is not base64 or
/// decodes to fewer than 64 bytes.
pub fn unpack(text: &str) -> Result<(Vec<u8>, Vec<u8>, Vec<u8>)> {
    let (salt, iv, ciphertext) = decode(text)?.into_parts();
    Ok((salt.to_vec(), iv.to_vec(), ciphertext))
}

/// Encodes a container as base64 text.
pub fn encode(container: &Container) -> String {
    STANDARD.encode(container.to_bytes())
}

/// Parses base64 container text.
pub fn decode(text: &str) -> Result<Container> {
    let bytes = STANDARD
        .decode(text)
        .map_err(|e| CryptoError::MalformedContainer(format!("invalid base64: {e}")))?;
    Container::from_bytes(&bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::MIN_CONTAINER_LEN;

    #[test]
    fn pack_then_unpack_returns_parts() {
        let text = pack(&[1u8; 32], &[2u8; 32], &[3u8; 32]).unwrap();
        let (salt, iv, ciphertext) = unpack(&text).unwrap();

        assert_eq!(salt, vec![1u8; 32]);
        assert_eq!(iv, vec![2u8; 32]);
        assert_eq!(ciphertext, vec![3u8; 32]);
    }

    #[test]
    fn pack_output_is_standard_base64() {
        let text = pack(&[0u8; 32], &[0u8; 32], &[]).unwrap();
        assert_eq!(text, "A".repeat(86) + "==");
        assert_eq!(STANDARD.decode(&text).unwrap().len(), MIN_CONTAINER_LEN);
    }

    #[test]
    fn pack_rejects_wrong_salt_length() {
        assert!(matches!(
            pack(&[0u8; 31], &[0u8; 32], &[]),
            Err(CryptoError::InvalidParameters(_))
        ));
    }

    #[test]
    fn invalid_base64_is_malformed() {
        let err = unpack("not-valid-base64!!").unwrap_err();
        assert!(matches!(err, CryptoError::MalformedContainer(_)));
    }

    #[test]
    fn short_payload_is_malformed() {
        let text = STANDARD.encode([0u8; 10]);
        let err = unpack(&text).unwrap_err();
        assert!(matches!(err, CryptoError::MalformedContainer(_)));
    }

    #[test]
    fn empty_text_is_malformed() {
        assert!(matches!(
            unpack("").unwrap_err(),
            CryptoError::MalformedContainer(_)
        ));
    }
}
