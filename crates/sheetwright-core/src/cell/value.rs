//! Cell value types

use chrono::{DateTime, NaiveDateTime, Utc};
use std::fmt;

/// Serial day number of 1970-01-01 relative to the 1899-12-30 day zero
pub const UNIX_EPOCH_SERIAL: f64 = 25569.0;

/// Seconds in one serial day
pub const SECONDS_PER_DAY: f64 = 86400.0;

/// Represents the content written into a cell
///
/// Exactly one variant is active; each maps to one write primitive of the
/// document engine.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellValue {
    /// Formatted but empty cell
    #[default]
    Blank,

    /// Numeric value
    Number(f64),

    /// UTF-8 text
    Text(String),

    /// Boolean value (TRUE/FALSE)
    Boolean(bool),

    /// Formula text (e.g., "=SUM(A1:A10)"); the leading `=` is up to the caller
    Formula(String),

    /// Hyperlink with optional display text
    Hyperlink {
        /// Link target
        url: String,
        /// Text shown in the cell instead of the URL
        text: Option<String>,
    },

    /// Free-text cell comment
    Comment(String),

    /// Date/time instant, stored as a serial day number
    DateTime(DateTime<Utc>),
}

/// Discriminant of a [`CellValue`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ValueKind {
    Blank,
    Number,
    Text,
    Boolean,
    Formula,
    Hyperlink,
    Comment,
    DateTime,
}

impl ValueKind {
    /// Get the type name for diagnostics
    pub fn name(&self) -> &'static str {
        match self {
            ValueKind::Blank => "blank",
            ValueKind::Number => "number",
            ValueKind::Text => "text",
            ValueKind::Boolean => "boolean",
            ValueKind::Formula => "formula",
            ValueKind::Hyperlink => "hyperlink",
            ValueKind::Comment => "comment",
            ValueKind::DateTime => "datetime",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which variant a value holds
pub fn classify(value: &CellValue) -> ValueKind {
    match value {
        CellValue::Blank => ValueKind::Blank,
        CellValue::Number(_) => ValueKind::Number,
        CellValue::Text(_) => ValueKind::Text,
        CellValue::Boolean(_) => ValueKind::Boolean,
        CellValue::Formula(_) => ValueKind::Formula,
        CellValue::Hyperlink { .. } => ValueKind::Hyperlink,
        CellValue::Comment(_) => ValueKind::Comment,
        CellValue::DateTime(_) => ValueKind::DateTime,
    }
}

/// Convert seconds since 1970-01-01 to a serial day number
///
/// `seconds / 86400 + 25569`, the date representation used by the document
/// format.
pub fn unix_seconds_to_serial(seconds: f64) -> f64 {
    (seconds / SECONDS_PER_DAY) + UNIX_EPOCH_SERIAL
}

/// Serial day number of an instant
pub fn serial_date(datetime: &DateTime<Utc>) -> f64 {
    let seconds =
        datetime.timestamp() as f64 + f64::from(datetime.timestamp_subsec_nanos()) / 1e9;
    unix_seconds_to_serial(seconds)
}

impl CellValue {
    /// Create a text value
    pub fn text<S: Into<String>>(s: S) -> Self {
        CellValue::Text(s.into())
    }

    /// Create a formula value
    pub fn formula<S: Into<String>>(text: S) -> Self {
        CellValue::Formula(text.into())
    }

    /// Create a hyperlink showing its own URL
    pub fn url<S: Into<String>>(url: S) -> Self {
        CellValue::Hyperlink {
            url: url.into(),
            text: None,
        }
    }

    /// Create a hyperlink with display text
    pub fn url_with_text<U: Into<String>, T: Into<String>>(url: U, text: T) -> Self {
        CellValue::Hyperlink {
            url: url.into(),
            text: Some(text.into()),
        }
    }

    /// Create a comment value
    pub fn comment<S: Into<String>>(text: S) -> Self {
        CellValue::Comment(text.into())
    }

    /// Which variant this value holds
    pub fn kind(&self) -> ValueKind {
        classify(self)
    }

    /// Check if the value is the blank marker
    pub fn is_blank(&self) -> bool {
        matches!(self, CellValue::Blank)
    }

    /// Numeric payload as written to the engine, with dates converted to serials
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            CellValue::DateTime(dt) => Some(serial_date(dt)),
            _ => None,
        }
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<i32> for CellValue {
    fn from(n: i32) -> Self {
        CellValue::Number(f64::from(n))
    }
}

impl From<u32> for CellValue {
    fn from(n: u32) -> Self {
        CellValue::Number(f64::from(n))
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        CellValue::Number(n as f64)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Boolean(b)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::text(s)
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<DateTime<Utc>> for CellValue {
    fn from(dt: DateTime<Utc>) -> Self {
        CellValue::DateTime(dt)
    }
}

impl From<NaiveDateTime> for CellValue {
    fn from(dt: NaiveDateTime) -> Self {
        CellValue::DateTime(dt.and_utc())
    }
}
