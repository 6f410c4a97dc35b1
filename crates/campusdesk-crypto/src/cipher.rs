//! AES-256-GCM sealing of individual column values.
//!
//! Layout of a sealed value:
//!
//! ```text
//! +---------+-------------+---------------------------+
//! | version | nonce (12B) | ciphertext || tag (16B)  |
//! +---------+-------------+---------------------------+
//! ```
//!
//! A fresh random nonce is drawn for every call, so sealing the same
//! plaintext twice yields different bytes.

use std::fmt;

use aes_gcm::aead::{Aead, AeadCore, KeyInit, OsRng};
use aes_gcm::{Aes256Gcm, Key, Nonce};
use campusdesk_config::EncryptionConfig;

use crate::error::CryptoError;

const VERSION: u8 = 1;
const NONCE_LEN: usize = 12;
const TAG_LEN: usize = 16;
const HEADER_LEN: usize = 1 + NONCE_LEN;

#[derive(Clone)]
pub struct FieldCipher {
    cipher: Aes256Gcm,
}

impl FieldCipher {
    pub fn new(key: &[u8; 32]) -> Self {
        Self {
            cipher: Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key)),
        }
    }

    pub fn from_config(config: &EncryptionConfig) -> Self {
        Self::new(config.key())
    }

    /// Encrypts a plaintext value into the versioned sealed layout.
    pub fn seal(&self, plaintext: &str) -> Result<Vec<u8>, CryptoError> {
        let nonce = Aes256Gcm::generate_nonce(&mut OsRng);
        let ciphertext = self
            .cipher
            .encrypt(&nonce, plaintext.as_bytes())
            .map_err(|_| CryptoError::Encrypt)?;

        let mut sealed = Vec::with_capacity(HEADER_LEN + ciphertext.len());
        sealed.push(VERSION);
        sealed.extend_from_slice(&nonce);
        sealed.extend_from_slice(&ciphertext);
        Ok(sealed)
    }

    pub fn seal_opt(&self, plaintext: Option<&str>) -> Result<Option<Vec<u8>>, CryptoError> {
        plaintext.map(|p| self.seal(p)).transpose()
    }

    /// Decrypts a value produced by [`FieldCipher::seal`].
    pub fn open(&self, sealed: &[u8]) -> Result<String, CryptoError> {
        if sealed.len() < HEADER_LEN + TAG_LEN {
            return Err(CryptoError::Truncated);
        }

        let (version, rest) = sealed.split_at(1);
        if version[0] != VERSION {
            return Err(CryptoError::UnsupportedVersion(version[0]));
        }

        let (nonce, ciphertext) = rest.split_at(NONCE_LEN);
        let plaintext = self
            .cipher
            .decrypt(Nonce::from_slice(nonce), ciphertext)
            .map_err(|_| CryptoError::Decrypt)?;

        String::from_utf8(plaintext).map_err(|_| CryptoError::InvalidUtf8)
    }

    pub fn open_opt(&self, sealed: Option<&[u8]>) -> Result<Option<String>, CryptoError> {
        sealed.map(|s| self.open(s)).transpose()
    }
}

impl fmt::Debug for FieldCipher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldCipher")
            .field("algorithm", &"AES-256-GCM")
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cipher() -> FieldCipher {
        FieldCipher::new(&[7u8; 32])
    }

    #[test]
    fn test_seal_then_open() {
        let c = cipher();
        let sealed = c.seal("Chipo Moyo").unwrap();
        assert_eq!(c.open(&sealed).unwrap(), "Chipo Moyo");
    }

    #[test]
    fn test_empty_string_is_sealable() {
        let c = cipher();
        let sealed = c.seal("").unwrap();
        assert_eq!(sealed.len(), HEADER_LEN + TAG_LEN);
        assert_eq!(c.open(&sealed).unwrap(), "");
    }

    #[test]
    fn test_sealing_is_randomised() {
        let c = cipher();
        let a = c.seal("63-123456A-78").unwrap();
        let b = c.seal("63-123456A-78").unwrap();
        assert_ne!(a, b);
        assert_eq!(a[0], VERSION);
    }

    #[test]
    fn test_plaintext_not_visible_in_sealed_bytes() {
        let c = cipher();
        let sealed = c.seal("Harare").unwrap();
        assert!(!sealed.windows(6).any(|w| w == b"Harare"));
    }

    #[test]
    fn test_wrong_key_fails() {
        let sealed = cipher().seal("secret").unwrap();
        let other = FieldCipher::new(&[8u8; 32]);
        assert_eq!(other.open(&sealed), Err(CryptoError::Decrypt));
    }

    #[test]
    fn test_tampering_is_detected() {
        let c = cipher();
        let mut sealed = c.seal("secret").unwrap();
        let last = sealed.len() - 1;
        sealed[last] ^= 0x01;
        assert_eq!(c.open(&sealed), Err(CryptoError::Decrypt));
    }

    #[test]
    fn test_truncated_input() {
        assert_eq!(cipher().open(&[VERSION, 1, 2, 3]), Err(CryptoError::Truncated));
        assert_eq!(cipher().open(&[]), Err(CryptoError::Truncated));
    }

    #[test]
    fn test_unknown_version() {
        let c = cipher();
        let mut sealed = c.seal("x").unwrap();
        sealed[0] = 9;
        assert_eq!(c.open(&sealed), Err(CryptoError::UnsupportedVersion(9)));
    }

    #[test]
    fn test_optional_helpers() {
        let c = cipher();
        assert_eq!(c.seal_opt(None).unwrap(), None);
        let sealed = c.seal_opt(Some("x")).unwrap();
        assert_eq!(c.open_opt(sealed.as_deref()).unwrap(), Some("x".to_string()));
        assert_eq!(c.open_opt(None).unwrap(), None);
    }

    #[test]
    fn test_debug_hides_key() {
        let debug = format!("{:?}", cipher());
        assert!(debug.contains("AES-256-GCM"));
    }
}
