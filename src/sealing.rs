//! Error mapping for sealed personal-data columns.

use std::fmt::Display;

use anyhow::anyhow;
use campusdesk_core::AppError;
use campusdesk_crypto::CryptoError;
use campusdesk_observability::track_decryption_failure;
use tracing::error;

/// A stored row whose personal columns could not be opened.
///
/// Usually a rotated or wrong `FIELD_ENCRYPTION_KEY`. The client only sees a
/// generic 500.
pub fn open_failed(entity: &'static str, id: impl Display, err: CryptoError) -> AppError {
    error!(entity, id = %id, error = %err, "Failed to decrypt sealed columns");
    track_decryption_failure(entity);
    AppError::internal(anyhow!("Failed to decrypt {} {}", entity, id))
}

pub fn seal_failed(entity: &'static str, err: CryptoError) -> AppError {
    error!(entity, error = %err, "Failed to encrypt personal columns");
    AppError::internal(anyhow!("Failed to encrypt {}", entity))
}
