//! Deserialization helpers for query-string filters.
//!
//! Filter structs flatten [`PaginationParams`](crate::PaginationParams), and
//! under `#[serde(flatten)]` every query value reaches the visitor as a
//! string. These helpers parse the string form and treat an empty value
//! (`?status=`) as absent.

use serde::{Deserialize, Deserializer};
use std::str::FromStr;

fn deserialize_optional_parsed<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    match opt {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s.trim().parse::<T>().map(Some).map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

pub fn deserialize_optional_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    deserialize_optional_parsed(deserializer)
}

pub fn deserialize_optional_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    deserialize_optional_parsed(deserializer)
}

/// Parses any `FromStr` value, e.g. a choice enum, a typed id or a date.
pub fn deserialize_optional_from_str<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    deserialize_optional_parsed(deserializer)
}

/// Distinguishes an absent field from an explicit `null` in update bodies.
///
/// Used as `#[serde(default, deserialize_with = "deserialize_some")]` on an
/// `Option<Option<T>>`: a missing key stays `None` (leave unchanged), while
/// `null` becomes `Some(None)` (clear the column).
pub fn deserialize_some<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use uuid::Uuid;

    #[derive(Deserialize)]
    struct Filters {
        #[serde(default, deserialize_with = "deserialize_optional_from_str")]
        id: Option<Uuid>,
        #[serde(default, deserialize_with = "deserialize_optional_from_str")]
        year: Option<i32>,
        #[serde(default, deserialize_with = "deserialize_optional_bool")]
        active: Option<bool>,
    }

    #[test]
    fn test_parses_string_values() {
        let f: Filters = serde_json::from_str(
            r#"{"id":"12345678-1234-1234-1234-123456789abc","year":"2021","active":"true"}"#,
        )
        .unwrap();
        assert!(f.id.is_some());
        assert_eq!(f.year, Some(2021));
        assert_eq!(f.active, Some(true));
    }

    #[test]
    fn test_empty_values_are_none() {
        let f: Filters = serde_json::from_str(r#"{"id":"","year":" ","active":""}"#).unwrap();
        assert!(f.id.is_none());
        assert!(f.year.is_none());
        assert!(f.active.is_none());
    }

    #[test]
    fn test_missing_values_are_none() {
        let f: Filters = serde_json::from_str("{}").unwrap();
        assert!(f.id.is_none() && f.year.is_none() && f.active.is_none());
    }

    #[derive(Deserialize)]
    struct Patch {
        #[serde(default, deserialize_with = "deserialize_some")]
        graduation_year: Option<Option<i32>>,
    }

    #[test]
    fn test_deserialize_some_distinguishes_null_from_missing() {
        let missing: Patch = serde_json::from_str("{}").unwrap();
        assert_eq!(missing.graduation_year, None);

        let null: Patch = serde_json::from_str(r#"{"graduation_year":null}"#).unwrap();
        assert_eq!(null.graduation_year, Some(None));

        let set: Patch = serde_json::from_str(r#"{"graduation_year":2024}"#).unwrap();
        assert_eq!(set.graduation_year, Some(Some(2024)));
    }

    #[test]
    fn test_invalid_value_is_error() {
        assert!(serde_json::from_str::<Filters>(r#"{"year":"abc"}"#).is_err());
    }
}
