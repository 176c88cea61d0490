//! Custom deserializers for the API's non-standard field encodings.

use std::fmt;

use chrono::{DateTime, FixedOffset};
use serde::de::{self, Unexpected, Visitor};
use serde::{Deserialize, Deserializer};

/// Parses an ISO 8601 (RFC 3339) timestamp.
///
/// Fractional seconds are optional: `2023-06-01T10:00:00Z` and
/// `2023-06-01T10:00:00.000Z` parse to the same instant.
#[must_use]
pub fn parse_timestamp(s: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(s.trim()).ok()
}

/// Deserializes an ISO 8601 timestamp string.
///
/// An unparseable timestamp fails the decode instead of being replaced.
pub fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<FixedOffset>, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_timestamp(&s)
        .ok_or_else(|| de::Error::invalid_value(Unexpected::Str(&s), &"an ISO 8601 timestamp"))
}

/// Visitor for stage numbers sent as strings (`"4"`) or numbers.
struct LenientStage;

impl LenientStage {
    fn fallback(raw: &dyn fmt::Display) -> i32 {
        tracing::warn!(value = %raw, "Unparseable stage, defaulting to 0");
        0
    }
}

impl Visitor<'_> for LenientStage {
    type Value = i32;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a stage number or numeric string")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<i32, E> {
        Ok(v.trim().parse().unwrap_or_else(|_| Self::fallback(&v)))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<i32, E> {
        Ok(i32::try_from(v).unwrap_or_else(|_| Self::fallback(&v)))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<i32, E> {
        Ok(i32::try_from(v).unwrap_or_else(|_| Self::fallback(&v)))
    }
}

/// Deserializes a stage number, defaulting to 0 when it is not an integer
/// (or does not fit in `i32`).
///
/// A missing or `null` stage is still an error.
pub fn deserialize_lenient_stage<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(LenientStage)
}
