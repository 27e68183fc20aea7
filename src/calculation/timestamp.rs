//! Parsing of textual timestamps into local wall-clock time.

use chrono::{DateTime, Local, NaiveDateTime};

use crate::error::{EngineError, EngineResult};

const NAIVE_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Parses an ISO-8601 timestamp.
///
/// Timestamps without an offset are taken as local wall clock. RFC 3339
/// timestamps carrying an offset are converted to the local timezone.
///
/// # Errors
///
/// Returns [`EngineError::InvalidInterval`] if no format matches.
///
/// # Example
///
/// ```
/// use shift_engine::calculation::parse_timestamp;
///
/// let parsed = parse_timestamp("2026-01-15T22:00:00").unwrap();
/// assert_eq!(parsed.to_string(), "2026-01-15 22:00:00");
/// assert!(parse_timestamp("yesterday").is_err());
/// ```
pub fn parse_timestamp(input: &str) -> EngineResult<NaiveDateTime> {
    let input = input.trim();

    for format in NAIVE_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(input, format) {
            return Ok(parsed);
        }
    }

    DateTime::parse_from_rfc3339(input)
        .map(|dt| dt.with_timezone(&Local).naive_local())
        .map_err(|e| EngineError::invalid_interval(format!("unparseable timestamp '{}': {}", input, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_fractional_seconds() {
        let parsed = parse_timestamp("2026-01-15T22:00:00.250").unwrap();
        assert_eq!(parsed.to_string(), "2026-01-15 22:00:00.250");
    }

    #[test]
    fn test_parses_space_separated() {
        assert!(parse_timestamp("2026-01-15 06:30:00").is_ok());
    }

    #[test]
    fn test_parses_minutes_only() {
        let parsed = parse_timestamp("2026-01-15T06:30").unwrap();
        assert_eq!(parsed.to_string(), "2026-01-15 06:30:00");
    }

    #[test]
    fn test_rfc3339_with_offset_is_accepted() {
        assert!(parse_timestamp("2026-01-15T22:00:00Z").is_ok());
        assert!(parse_timestamp("2026-01-15T22:00:00+01:00").is_ok());
    }

    #[test]
    fn test_rejects_garbage() {
        match parse_timestamp("") {
            Err(EngineError::InvalidInterval { message }) => {
                assert!(message.contains("unparseable"));
            }
            other => panic!("Expected InvalidInterval, got {:?}", other),
        }
    }
}
