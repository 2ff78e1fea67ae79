//! Column codecs shared by the row accessors
//!
//! Ids are stored as hyphenated UUID text, timestamps as RFC 3339 text with
//! microsecond precision (lexicographic order == chronological order), and
//! list/map columns as JSON text.

use crate::{Error, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{de::DeserializeOwned, Serialize};
use uuid::Uuid;

pub(crate) fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub(crate) fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| Error::Internal(format!("Invalid stored timestamp '{}': {}", raw, e)))
}

pub(crate) fn parse_uuid(raw: &str) -> Result<Uuid> {
    Uuid::parse_str(raw).map_err(|e| Error::Internal(format!("Invalid stored id '{}': {}", raw, e)))
}

pub(crate) fn to_json_text<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string(value)?)
}

/// NULL loads as the type's default
pub(crate) fn from_json_text<T: DeserializeOwned + Default>(raw: Option<String>) -> Result<T> {
    match raw {
        Some(text) if !text.trim().is_empty() && text.trim() != "null" => {
            Ok(serde_json::from_str(&text)?)
        }
        _ => Ok(T::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_timestamp_round_trip_keeps_micros() {
        let now = Utc::now();
        let parsed = parse_timestamp(&format_timestamp(now)).unwrap();
        assert_eq!(parsed.timestamp_micros(), now.timestamp_micros());
    }

    #[test]
    fn test_null_json_columns_load_empty() {
        let notes: Vec<String> = from_json_text(None).unwrap();
        assert!(notes.is_empty());

        let results: BTreeMap<String, f64> = from_json_text(Some("null".to_string())).unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn test_invalid_uuid_is_error() {
        assert!(parse_uuid("not-a-uuid").is_err());
    }
}
