//! # Campusdesk Crypto
//!
//! Field-level encryption for personal data columns.
//!
//! Names, national ids, contact details and similar values are sealed with
//! AES-256-GCM before they are written and opened after they are read. The
//! database only ever sees opaque `BYTEA` values, so these columns cannot be
//! filtered or sorted in SQL.
//!
//! # Example
//!
//! ```ignore
//! use campusdesk_crypto::FieldCipher;
//!
//! let cipher = FieldCipher::from_config(&EncryptionConfig::from_env()?);
//! let sealed = cipher.seal("Tendai")?;
//! assert_eq!(cipher.open(&sealed)?, "Tendai");
//! ```

pub mod cipher;
pub mod error;

pub use cipher::FieldCipher;
pub use error::CryptoError;
