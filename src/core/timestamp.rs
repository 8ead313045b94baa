//! Timestamp formatting for layouts
//!
//! Layout patterns name a timestamp format either by keyword
//! (`ISO8601`, `RFC3339`, `UNIX`, `UNIX_MILLIS`) or with a chrono
//! strftime string.

use crate::core::error::{LoggerError, Result};
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimestampFormat {
    /// ISO 8601 with milliseconds: `2025-01-08T10:30:45.123Z`
    #[default]
    Iso8601,

    /// RFC 3339 format: `2025-01-08T10:30:45+00:00`
    Rfc3339,

    /// Unix timestamp in seconds: `1736332245`
    Unix,

    /// Unix timestamp in milliseconds: `1736332245123`
    UnixMillis,

    /// Custom strftime format, e.g. `%d/%b/%Y:%H:%M:%S %z`
    Custom(String),
}

impl TimestampFormat {
    /// Resolve the argument of a `%d{...}` pattern token
    ///
    /// Custom strings are checked up front so a bad specifier fails at
    /// configuration time instead of on the first event.
    pub fn from_spec(spec: &str) -> Result<Self> {
        let format = match spec.trim() {
            "" | "ISO8601" => TimestampFormat::Iso8601,
            "RFC3339" => TimestampFormat::Rfc3339,
            "UNIX" => TimestampFormat::Unix,
            "UNIX_MILLIS" => TimestampFormat::UnixMillis,
            custom => {
                if StrftimeItems::new(custom).any(|item| matches!(item, Item::Error)) {
                    return Err(LoggerError::pattern(custom, "invalid date format"));
                }
                TimestampFormat::Custom(custom.to_string())
            }
        };
        Ok(format)
    }

    #[must_use]
    pub fn format(&self, datetime: &DateTime<Utc>) -> String {
        match self {
            TimestampFormat::Iso8601 => datetime.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
            TimestampFormat::Rfc3339 => datetime.to_rfc3339(),
            TimestampFormat::Unix => datetime.timestamp().to_string(),
            TimestampFormat::UnixMillis => datetime.timestamp_millis().to_string(),
            TimestampFormat::Custom(format_str) => {
                let mut out = String::new();
                if write!(out, "{}", datetime.format(format_str)).is_err() {
                    // Unvalidated custom string; fall back rather than panic
                    return TimestampFormat::Iso8601.format(datetime);
                }
                out
            }
        }
    }
}
