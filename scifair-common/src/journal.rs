//! Lab journal mutations: observation notes and experiment results
//!
//! These operate on in-memory copies and report whether anything changed.
//! The caller writes the full resulting field back to the store, and only
//! when something did change.

use crate::models::ExperimentResults;
use crate::{Error, Result};

/// Parse a measurement entered as text.
///
/// Rejects blank input, trailing garbage ("12abc"), NaN and infinities.
pub fn parse_measurement(raw: &str) -> Result<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(Error::InvalidInput(
            "Please enter a valid number for the measurement.".to_string(),
        ));
    }

    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(Error::InvalidInput(format!(
            "Please enter a valid number for the measurement (got '{}').",
            trimmed
        ))),
    }
}

/// Validate and normalize a metric name
pub fn normalize_metric_name(raw: &str) -> Result<String> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(Error::InvalidInput("Measurement name cannot be empty".to_string()));
    }
    Ok(name.to_string())
}

/// Append a trimmed note. Returns false (and leaves `notes` alone) for blank text.
pub fn append_note(notes: &mut Vec<String>, text: &str) -> bool {
    let note = text.trim();
    if note.is_empty() {
        return false;
    }
    notes.push(note.to_string());
    true
}

/// Remove the note at `index`; out-of-range is a no-op
pub fn remove_note(notes: &mut Vec<String>, index: usize) -> bool {
    if index < notes.len() {
        notes.remove(index);
        true
    } else {
        false
    }
}

/// Insert or overwrite `name`. Returns the previous value if one was replaced.
pub fn merge_result(results: &mut ExperimentResults, name: String, value: f64) -> Option<f64> {
    results.insert(name, value)
}

/// Remove `name`; an absent key is a no-op
pub fn remove_result(results: &mut ExperimentResults, name: &str) -> bool {
    results.remove(name).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_measurement_accepts_numbers() {
        assert_eq!(parse_measurement("25.5").unwrap(), 25.5);
        assert_eq!(parse_measurement(" -3 ").unwrap(), -3.0);
        assert_eq!(parse_measurement("1e3").unwrap(), 1000.0);
    }

    #[test]
    fn test_parse_measurement_rejects_garbage() {
        for raw in ["", "   ", "abc", "12abc", "NaN", "inf", "-infinity"] {
            let err = parse_measurement(raw).unwrap_err();
            assert!(matches!(err, Error::InvalidInput(_)), "accepted {:?}", raw);
        }
    }

    #[test]
    fn test_merge_overwrites_without_growing() {
        let mut results = ExperimentResults::new();
        merge_result(&mut results, "weight".to_string(), 10.0);

        let previous = merge_result(&mut results, "weight".to_string(), 12.5);

        assert_eq!(previous, Some(10.0));
        assert_eq!(results.len(), 1);
        assert_eq!(results["weight"], 12.5);
    }

    #[test]
    fn test_remove_missing_result_is_noop() {
        let mut results = ExperimentResults::new();
        results.insert("weight".to_string(), 10.0);

        assert!(!remove_result(&mut results, "height"));
        assert_eq!(results.len(), 1);

        assert!(remove_result(&mut results, "weight"));
        assert!(results.is_empty());
    }

    #[test]
    fn test_notes_append_and_remove() {
        let mut notes = vec!["Day 1: seeds planted".to_string()];

        assert!(!append_note(&mut notes, "   "));
        assert!(append_note(&mut notes, "  Day 2: first sprout "));
        assert_eq!(notes[1], "Day 2: first sprout");

        assert!(!remove_note(&mut notes, 5));
        assert_eq!(notes.len(), 2);

        assert!(remove_note(&mut notes, 0));
        assert_eq!(notes, vec!["Day 2: first sprout".to_string()]);
    }

    #[test]
    fn test_metric_name_is_trimmed() {
        assert_eq!(normalize_metric_name(" temperature ").unwrap(), "temperature");
        assert!(normalize_metric_name("  ").is_err());
    }
}
