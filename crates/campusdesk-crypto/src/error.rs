use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CryptoError {
    #[error("encryption failed")]
    Encrypt,

    #[error("ciphertext is too short")]
    Truncated,

    #[error("unsupported ciphertext version {0}")]
    UnsupportedVersion(u8),

    #[error("decryption failed: wrong key or tampered ciphertext")]
    Decrypt,

    #[error("decrypted value is not valid UTF-8")]
    InvalidUtf8,
}
