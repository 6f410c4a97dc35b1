//! JSON body extraction with `validator` rules applied.

use anyhow::anyhow;
use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
    http::StatusCode,
};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use campusdesk_core::AppError;

/// Text between the first pair of backticks after `marker`.
fn quoted_after<'a>(text: &'a str, marker: &str) -> Option<&'a str> {
    let (_, rest) = text.split_once(marker)?;
    let (_, rest) = rest.split_once('`')?;
    rest.split_once('`').map(|(quoted, _)| quoted)
}

/// Turns a body rejection into a 400 with a message a client can act on.
fn body_error(rejection: JsonRejection) -> AppError {
    let text = rejection.body_text();

    let message = if let Some(field) = quoted_after(&text, "missing field") {
        format!("{} is required", field)
    } else if text.contains("unknown variant") {
        let detail = text.rsplit(": ").next().unwrap_or("unknown variant");
        format!("Invalid choice: {}", detail)
    } else if text.contains("invalid type") {
        "Invalid field type in request".to_string()
    } else {
        match rejection {
            JsonRejection::MissingJsonContentType(_) => {
                "Missing 'Content-Type: application/json' header".to_string()
            }
            JsonRejection::JsonDataError(_) => text,
            _ => "Invalid request body".to_string(),
        }
    };

    AppError::new(StatusCode::BAD_REQUEST, anyhow!(message))
}

/// `field: message` pairs, sorted so responses are stable.
fn rule_violations(errors: &ValidationErrors) -> String {
    let mut lines: Vec<String> = Vec::new();
    for (field, failures) in errors.field_errors() {
        for failure in failures {
            lines.push(match &failure.message {
                Some(message) => format!("{}: {}", field, message),
                None => format!("{} is invalid", field),
            });
        }
    }
    lines.sort();
    lines.join(", ")
}

/// Like `Json<T>`, but rejects with [`AppError`]. Malformed bodies, missing
/// fields and unknown choice values are a 400. Bodies that parse but break a
/// `#[validate]` rule are a 422.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(body_error)?;

        if let Err(errors) = value.validate() {
            return Err(AppError::new(
                StatusCode::UNPROCESSABLE_ENTITY,
                anyhow!(rule_violations(&errors)),
            ));
        }
        Ok(Self(value))
    }
}
