//! Front matter date normalization.
//!
//! Notes carry `date:` in whatever shape the author typed. Everything is
//! coerced into one of two canonical renderings:
//!
//! | Input                         | Output              |
//! |-------------------------------|---------------------|
//! | `2024-06-15 14:30:45`         | `2024-06-15 14:30`  |
//! | `2024-06-15T14:30:45+02:00`   | `2024-06-15 14:30`  |
//! | `2024-06-15`                  | `2024-06-15`        |
//! | `sometime in june`            | `sometime in june`  |
//! | absent / empty / non-text     | now, `%Y-%m-%d %H:%M` |

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_yaml::Value;

/// Rendering of a full timestamp.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Rendering of a date without time.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Accepted timestamp layouts without offset, tried in order.
const NAIVE_TIMESTAMP_LAYOUTS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// A date value recovered from note metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateValue {
    /// Date and time of day.
    Timestamp(NaiveDateTime),
    /// Calendar date only.
    Date(NaiveDate),
    /// Anything else the author wrote, already trimmed and non-empty.
    Text(String),
}

impl DateValue {
    /// Classify a YAML value.
    ///
    /// Returns `None` for null, empty strings and non-scalar values, which
    /// the caller replaces with the processing time.
    pub fn from_yaml(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Self::parse(s),
            Value::Tagged(tagged) => Self::from_yaml(&tagged.value),
            _ => None,
        }
    }

    /// Classify a string.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.is_empty() {
            return None;
        }

        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Some(Self::Timestamp(dt.naive_local()));
        }
        if let Some(dt) = NAIVE_TIMESTAMP_LAYOUTS
            .iter()
            .find_map(|layout| NaiveDateTime::parse_from_str(s, layout).ok())
        {
            return Some(Self::Timestamp(dt));
        }
        if let Ok(date) = NaiveDate::parse_from_str(s, DATE_FORMAT) {
            return Some(Self::Date(date));
        }

        Some(Self::Text(s.to_owned()))
    }

    /// Canonical string form.
    pub fn render(&self) -> String {
        match self {
            Self::Timestamp(dt) => dt.format(TIMESTAMP_FORMAT).to_string(),
            Self::Date(date) => date.format(DATE_FORMAT).to_string(),
            Self::Text(text) => text.clone(),
        }
    }
}

/// Normalize an optional raw date, defaulting to `now`.
pub fn normalize_date(raw: Option<&Value>, now: NaiveDateTime) -> String {
    raw.and_then(DateValue::from_yaml)
        .unwrap_or(DateValue::Timestamp(now))
        .render()
}

/// Date segment used as the output filename prefix.
///
/// The first whitespace-separated token of the normalized date, with path
/// separators replaced so the result stays a single path component.
pub fn filename_prefix(normalized: &str) -> String {
    normalized
        .split_whitespace()
        .next()
        .unwrap_or_default()
        .replace(['/', '\\'], "-")
}
