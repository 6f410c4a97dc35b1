//! Key material for field-level encryption.
//!
//! `FIELD_ENCRYPTION_KEY` holds 32 random bytes encoded as standard base64,
//! e.g. the output of `openssl rand -base64 32`. There is no default: a
//! missing or malformed key aborts startup instead of silently writing
//! personal data under a guessable key.

use anyhow::{Context, bail};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use std::env;
use std::fmt;

pub const KEY_LEN: usize = 32;

#[derive(Clone)]
pub struct EncryptionConfig {
    key: [u8; KEY_LEN],
}

impl EncryptionConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let encoded =
            env::var("FIELD_ENCRYPTION_KEY").context("FIELD_ENCRYPTION_KEY must be set")?;
        Self::from_base64(&encoded)
    }

    pub fn from_base64(encoded: &str) -> anyhow::Result<Self> {
        let bytes = STANDARD
            .decode(encoded.trim())
            .context("FIELD_ENCRYPTION_KEY is not valid base64")?;

        if bytes.len() != KEY_LEN {
            bail!(
                "FIELD_ENCRYPTION_KEY must decode to {} bytes, got {}",
                KEY_LEN,
                bytes.len()
            );
        }

        let mut key = [0u8; KEY_LEN];
        key.copy_from_slice(&bytes);
        Ok(Self { key })
    }

    pub fn from_bytes(key: [u8; KEY_LEN]) -> Self {
        Self { key }
    }

    pub fn key(&self) -> &[u8; KEY_LEN] {
        &self.key
    }
}

impl fmt::Debug for EncryptionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EncryptionConfig")
            .field("key", &"<redacted>")
            .finish()
    }
}
