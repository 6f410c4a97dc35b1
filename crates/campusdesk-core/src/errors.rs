//! Application error type.
//!
//! [`AppError`] pairs an HTTP status with an [`anyhow::Error`] and renders as
//! `{"error": "<message>"}`. Server errors are logged and their details are
//! replaced with a generic message so that database or decryption internals
//! never reach the client.

use anyhow::Error;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub error: Error,
}

impl AppError {
    pub fn new<E>(status: StatusCode, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self {
            status,
            error: err.into(),
        }
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, err)
    }

    pub fn not_found<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::NOT_FOUND, err)
    }

    pub fn unprocessable<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, err)
    }

    pub fn bad_request<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::BAD_REQUEST, err)
    }

    pub fn conflict<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::CONFLICT, err)
    }

    pub fn database<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, err)
    }

    /// Maps a failed INSERT/UPDATE onto a client-facing error.
    ///
    /// Unique violations become 409, foreign-key violations (a parent row
    /// that does not exist) become 400 and check violations become 422.
    pub fn from_db(err: sqlx::Error, entity: &str) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            let constraint = db_err.constraint().unwrap_or("unknown").to_string();

            if db_err.is_unique_violation() {
                tracing::warn!(%entity, %constraint, "Unique constraint violated");
                return Self::conflict(anyhow::anyhow!(
                    "{} already exists ({})",
                    entity,
                    constraint
                ));
            }

            if db_err.is_foreign_key_violation() {
                tracing::warn!(%entity, %constraint, "Foreign key constraint violated");
                return Self::bad_request(anyhow::anyhow!(
                    "{} references a record that does not exist ({})",
                    entity,
                    constraint
                ));
            }

            if db_err.is_check_violation() {
                tracing::warn!(%entity, %constraint, "Check constraint violated");
                return Self::unprocessable(anyhow::anyhow!(
                    "{} has an invalid value ({})",
                    entity,
                    constraint
                ));
            }
        }

        tracing::error!(%entity, error = %err, "Database error");
        Self::database(err)
    }

    /// Maps a failed DELETE onto a client-facing error.
    ///
    /// A foreign-key violation here means a `RESTRICT` reference still
    /// points at the row, which is reported as 409.
    pub fn from_db_delete(err: sqlx::Error, entity: &str) -> Self {
        if let sqlx::Error::Database(db_err) = &err
            && db_err.is_foreign_key_violation()
        {
            let constraint = db_err.constraint().unwrap_or("unknown").to_string();
            tracing::warn!(%entity, %constraint, "Delete blocked by protected reference");
            return Self::conflict(anyhow::anyhow!(
                "{} is still referenced by other records ({})",
                entity,
                constraint
            ));
        }

        tracing::error!(%entity, error = %err, "Database error");
        Self::database(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = if self.status.is_server_error() {
            tracing::error!(status = %self.status.as_u16(), error = ?self.error, "Request failed");
            "Internal server error".to_string()
        } else {
            self.error.to_string()
        };

        let body = Json(json!({
            "error": message
        }));

        (self.status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<Error>,
{
    fn from(err: E) -> Self {
        AppError::internal(err)
    }
}
