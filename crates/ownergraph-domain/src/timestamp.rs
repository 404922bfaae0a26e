//! Transported timestamps
//!
//! Observations arrive with whatever timestamp text their adapter produced.
//! The raw text is kept verbatim on every edge; parsing happens only where
//! a point in time is actually needed (freshness decay, tie-breaks).

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

/// Naive layouts accepted in addition to RFC 3339 (interpreted as UTC)
const NAIVE_FORMATS: [&str; 3] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
];

/// A point in time as reported by a source
///
/// Serializes as a plain string. Deserializes from a string or a number
/// (Unix seconds); any other JSON value becomes an empty timestamp rather
/// than failing the surrounding record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Timestamp(String);

impl Timestamp {
    /// Wrap raw timestamp text
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Raw text as transported
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the raw text is empty or whitespace
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// Parse into a UTC instant
    ///
    /// Accepts RFC 3339, naive `YYYY-MM-DD HH:MM:SS` (and `T`-separated),
    /// bare `YYYY-MM-DD`, and integer Unix seconds. Returns `None` for
    /// anything else.
    ///
    /// # Examples
    ///
    /// ```
    /// use ownergraph_domain::Timestamp;
    ///
    /// assert!(Timestamp::new("2024-05-01T12:00:00Z").parse().is_some());
    /// assert!(Timestamp::new("1714564800").parse().is_some());
    /// assert!(Timestamp::new("last tuesday").parse().is_none());
    /// ```
    pub fn parse(&self) -> Option<DateTime<Utc>> {
        let raw = self.0.trim();
        if raw.is_empty() {
            return None;
        }

        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.with_timezone(&Utc));
        }

        for format in NAIVE_FORMATS {
            if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
                return Some(naive.and_utc());
            }
        }

        if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
        }

        raw.parse::<i64>()
            .ok()
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Timestamp {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for Timestamp {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(instant: DateTime<Utc>) -> Self {
        Self(instant.to_rfc3339_opts(SecondsFormat::Secs, true))
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(match value {
            Value::String(raw) => Self(raw),
            Value::Number(n) => Self(n.to_string()),
            _ => Self::default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_rfc3339() {
        let ts = Timestamp::new("2024-05-01T12:00:00Z");
        let expected = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        assert_eq!(ts.parse(), Some(expected));
    }

    #[test]
    fn test_parse_rfc3339_with_offset() {
        let ts = Timestamp::new("2024-05-01T14:00:00+02:00");
        let expected = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        assert_eq!(ts.parse(), Some(expected));
    }

    #[test]
    fn test_parse_naive_formats() {
        let expected = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        assert_eq!(Timestamp::new("2024-05-01 12:00:00").parse(), Some(expected));
        assert_eq!(Timestamp::new("2024-05-01T12:00:00").parse(), Some(expected));
    }

    #[test]
    fn test_parse_bare_date() {
        let expected = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();
        assert_eq!(Timestamp::new("2024-05-01").parse(), Some(expected));
    }

    #[test]
    fn test_parse_unix_seconds() {
        let expected = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        assert_eq!(Timestamp::new("1714564800").parse(), Some(expected));
    }

    #[test]
    fn test_unparsable() {
        assert!(Timestamp::new("not-a-date").parse().is_none());
        assert!(Timestamp::new("").parse().is_none());
        assert!(Timestamp::new("   ").parse().is_none());
        assert!(Timestamp::new("2024-13-45").parse().is_none());
    }

    #[test]
    fn test_from_datetime_round_trips() {
        let instant = Utc.with_ymd_and_hms(2023, 1, 2, 3, 4, 5).unwrap();
        let ts = Timestamp::from(instant);
        assert_eq!(ts.as_str(), "2023-01-02T03:04:05Z");
        assert_eq!(ts.parse(), Some(instant));
    }

    #[test]
    fn test_deserialize_lenient() {
        let from_str: Timestamp = serde_json::from_str(r#""2024-05-01""#).unwrap();
        assert_eq!(from_str.as_str(), "2024-05-01");

        let from_number: Timestamp = serde_json::from_str("1714564800").unwrap();
        assert_eq!(from_number.as_str(), "1714564800");

        let from_null: Timestamp = serde_json::from_str("null").unwrap();
        assert!(from_null.is_empty());

        let from_object: Timestamp = serde_json::from_str(r#"{"at": 1}"#).unwrap();
        assert!(from_object.is_empty());
    }
}
