use campusdesk_config::CorsConfig;
use campusdesk_crypto::FieldCipher;
use sqlx::PgPool;

#[derive(Clone, Debug)]
pub struct AppState {
    pub db: PgPool,
    /// Seals and opens personal-data columns.
    pub cipher: FieldCipher,
    pub cors_config: CorsConfig,
}

impl AppState {
    pub fn new(db: PgPool, cipher: FieldCipher, cors_config: CorsConfig) -> Self {
        Self {
            db,
            cipher,
            cors_config,
        }
    }
}
