use thiserror::Error;

/// Errors produced by the encryption engine and its primitives.
///
/// Messages never carry passwords, derived keys or plaintext.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CryptoError {
    /// The OS secure random generator could not be used. There is no fallback.
    #[error("OS random generator unavailable")]
    RandomnessUnavailable,

    /// The container text is not valid base64 or is too short to hold salt and IV.
    #[error("malformed container: {0}")]
    MalformedContainer(String),

    /// Padding validation failed after decryption.
    ///
    /// Without an integrity tag a wrong password and a corrupted ciphertext look the same.
    #[error("Invalid password or corrupted data")]
    DecryptionFailed,

    /// Key, IV or KDF parameters are out of range.
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
}

pub type Result<T> = std::result::Result<T, CryptoError>;
