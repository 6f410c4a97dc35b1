//! # Campusdesk Config
//!
//! Configuration types for the Campusdesk API.
//!
//! This crate provides configuration structures loaded from environment variables:
//!
//! - [`cors`]: CORS (Cross-Origin Resource Sharing) configuration
//! - [`database`]: PostgreSQL connection settings
//! - [`encryption`]: Key for field-level encryption of personal data
//! - [`server`]: Listener addresses and startup behaviour
//!
//! # Example
//!
//! ```ignore
//! use campusdesk_config::{CorsConfig, DatabaseConfig, EncryptionConfig, ServerConfig};
//!
//! let cors_config = CorsConfig::from_env();
//! let database_config = DatabaseConfig::from_env()?;
//! let encryption_config = EncryptionConfig::from_env()?;
//! let server_config = ServerConfig::from_env();
//! ```

pub mod cors;
pub mod database;
pub mod encryption;
pub mod server;

// Re-export commonly used types at crate root
pub use cors::CorsConfig;
pub use database::DatabaseConfig;
pub use encryption::EncryptionConfig;
pub use server::ServerConfig;
