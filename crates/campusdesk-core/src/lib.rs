//! # Campusdesk Core
//!
//! Core types, errors, and utilities for the Campusdesk API.
//!
//! This crate provides foundational types used throughout the Campusdesk application:
//!
//! - [`errors`]: Application error type with HTTP response conversion
//! - [`filters`]: Dynamic `WHERE` clauses for list queries
//! - [`pagination`]: Pagination utilities for API responses
//! - [`permissions`]: Permission codenames declared by the schema
//! - [`serde`]: Custom serde deserialization helpers for query strings
//!
//! # Example
//!
//! ```ignore
//! use campusdesk_core::errors::AppError;
//! use campusdesk_core::pagination::{PaginationParams, PaginationMeta};
//!
//! // Create an error
//! let error = AppError::not_found(anyhow::anyhow!("Institution not found"));
//!
//! // Use pagination
//! let params = PaginationParams::default();
//! let meta = params.meta(42);
//! ```

pub mod errors;
pub mod filters;
pub mod pagination;
pub mod permissions;
pub mod serde;

// Re-export commonly used types at crate root
pub use errors::AppError;
pub use filters::FilterClause;
pub use pagination::{PaginationMeta, PaginationParams};
