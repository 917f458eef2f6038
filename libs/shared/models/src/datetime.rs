//! ISO-8601 handling for appointment timestamps.
//!
//! Inbound values may carry any UTC offset (including a trailing `Z`) or no
//! offset at all, in which case they are read as UTC. Outbound values are
//! always RFC 3339 with an explicit `+00:00` offset.

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::error::ValidationError;

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parse an appointment timestamp and normalize it to UTC.
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, ValidationError> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(ValidationError::empty("appointment_date"));
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Ok(parsed.with_timezone(&Utc));
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .map(|naive| naive.and_utc())
        .ok_or_else(|| {
            ValidationError(format!(
                "'appointment_date' is not a valid ISO-8601 timestamp: {}",
                value
            ))
        })
}

/// Render a timestamp the way every API response carries it.
pub fn format_timestamp(value: &DateTime<Utc>) -> String {
    value.to_rfc3339()
}

/// `#[serde(with = "...")]` adapter for timestamp fields.
pub mod iso8601 {
    use chrono::{DateTime, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::format_timestamp(value))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        super::parse_timestamp(&raw).map_err(de::Error::custom)
    }
}
