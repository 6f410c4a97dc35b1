//! Validated primitives.
//!
//! Staff email addresses are sealed at rest, so [`Email`] never reaches SQL
//! directly. It is checked when a request body is parsed and rebuilt with
//! [`Email::new_unchecked`] once the column has been opened.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use utoipa::ToSchema;
use validator::ValidateEmail;

const MAX_EMAIL_LEN: usize = 255;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueTypeError {
    #[error("Invalid email: {0}")]
    InvalidEmail(String),
}

/// An email address that passed `validator`'s syntax check.
///
/// ```
/// use campusdesk_models::Email;
///
/// let email: Email = "registrar@hre-poly.ac.zw".parse().unwrap();
/// assert_eq!(email.domain(), "hre-poly.ac.zw");
/// assert!("registrar".parse::<Email>().is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "String", into = "String")]
#[schema(value_type = String, format = "email", example = "t.moyo@hre-poly.ac.zw")]
pub struct Email(String);

impl Email {
    /// Trims surrounding whitespace, then checks the syntax and length.
    pub fn new(raw: impl Into<String>) -> Result<Self, ValueTypeError> {
        let raw = raw.into();
        let email = raw.trim();
        let problem = if email.is_empty() {
            Some("email cannot be empty".to_string())
        } else if email.len() > MAX_EMAIL_LEN {
            Some(format!("email is longer than {} characters", MAX_EMAIL_LEN))
        } else if !email.validate_email() {
            Some(format!("'{}' is not a valid email address", email))
        } else {
            None
        };

        match problem {
            Some(message) => Err(ValueTypeError::InvalidEmail(message)),
            None => Ok(Self(email.to_string())),
        }
    }

    /// For values that were validated before they were sealed.
    pub fn new_unchecked(email: impl Into<String>) -> Self {
        Self(email.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Everything after the `@`.
    pub fn domain(&self) -> &str {
        self.0.rsplit_once('@').map_or("", |(_, domain)| domain)
    }
}

impl fmt::Debug for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Email").field(&self.0).finish()
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Email {
    type Err = ValueTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Email {
    type Error = ValueTypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Email> for String {
    fn from(email: Email) -> Self {
        email.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_institutional_addresses() {
        let email = Email::new("  t.moyo@hre-poly.ac.zw ").unwrap();
        assert_eq!(email.as_str(), "t.moyo@hre-poly.ac.zw");
        assert_eq!(email.domain(), "hre-poly.ac.zw");
    }

    #[test]
    fn rejects_malformed_addresses() {
        for bad in ["", "   ", "no-at-sign", "@missing-local"] {
            assert!(Email::new(bad).is_err(), "{bad:?} should be rejected");
        }
        let long = format!("{}@example.com", "a".repeat(250));
        assert!(Email::new(long).is_err());
    }

    #[test]
    fn json_parsing_applies_the_same_check() {
        let ok: Email = serde_json::from_str(r#""a@b.co""#).unwrap();
        assert_eq!(serde_json::to_string(&ok).unwrap(), r#""a@b.co""#);
        assert!(serde_json::from_str::<Email>(r#""bad""#).is_err());
    }

    #[test]
    fn error_names_the_offending_value() {
        let err = Email::new("bad").unwrap_err();
        assert_eq!(err.to_string(), "Invalid email: 'bad' is not a valid email address");
    }
}
