use crate::shared::error::SyncError;
use crate::shared::Result;
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};

/// Default pattern for every date property (chrono strftime syntax)
pub const DEFAULT_DATE_TIME_PATTERN: &str = "%Y-%m-%dT%H:%M:%S%.3f%z";

/// DateCodec reads and writes date properties with one shared pattern
///
/// A value that does not parse with the current pattern (for instance after
/// the pattern changed) reads as absent instead of failing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateCodec {
    pattern: String,
}

impl DateCodec {
    /// Creates a codec after checking the pattern formats and parses back
    ///
    /// # Errors
    /// Returns a validation error for unknown specifiers or for patterns that
    /// cannot be parsed back into a timestamp
    pub fn new(pattern: &str) -> Result<Self> {
        if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
            return Err(SyncError::Validation {
                message: format!("Invalid date_time_pattern '{}'", pattern),
            }
            .into());
        }

        let codec = Self {
            pattern: pattern.to_string(),
        };
        let sample = Utc
            .with_ymd_and_hms(2024, 1, 2, 3, 4, 5)
            .single()
            .ok_or_else(|| anyhow::anyhow!("Failed to build sample timestamp"))?;
        if codec.parse(&codec.format(sample)) != Some(sample) {
            return Err(SyncError::Validation {
                message: format!(
                    "date_time_pattern '{}' does not round-trip; it must carry date and time to the second",
                    pattern
                ),
            }
            .into());
        }

        Ok(codec)
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn format(&self, value: DateTime<Utc>) -> String {
        value
            .format_with_items(StrftimeItems::new(&self.pattern))
            .to_string()
    }

    /// Parses a stored value; patterns without an offset are read as UTC
    pub fn parse(&self, value: &str) -> Option<DateTime<Utc>> {
        let value = value.trim();
        if let Ok(parsed) = DateTime::parse_from_str(value, &self.pattern) {
            return Some(parsed.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(value, &self.pattern)
            .ok()
            .map(|naive| naive.and_utc())
    }
}

impl Default for DateCodec {
    fn default() -> Self {
        Self {
            pattern: DEFAULT_DATE_TIME_PATTERN.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_round_trip_keeps_milliseconds() {
        let codec = DateCodec::default();
        let value = Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 15).unwrap()
            + chrono::Duration::milliseconds(250);
        let text = codec.format(value);
        assert_eq!(text, "2024-05-01T12:30:15.250+0000");
        assert_eq!(codec.parse(&text), Some(value));
    }

    #[test]
    fn test_pattern_without_offset_is_utc() {
        let codec = DateCodec::new("%Y-%m-%d %H:%M:%S").unwrap();
        let parsed = codec.parse("2024-05-01 12:30:15").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 15).unwrap());
    }

    #[test]
    fn test_value_in_other_format_reads_as_absent() {
        let codec = DateCodec::default();
        assert!(codec.parse("2024-05-01 12:30:15").is_none());
        assert!(codec.parse("").is_none());
    }

    #[test]
    fn test_invalid_pattern_rejected() {
        assert!(DateCodec::new("%Y-%Q").is_err());
    }

    #[test]
    fn test_lossy_pattern_rejected() {
        let err = DateCodec::new("%Y-%m-%d").unwrap_err();
        assert!(err.to_string().contains("does not round-trip"));
    }
}
