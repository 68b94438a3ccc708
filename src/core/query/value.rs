//! Portable cell values and the null/zero-value policy
//!
//! Database adapters convert driver cells into [`SqlValue`]. Each column kind
//! then decides how a value, including a database null, becomes a field
//! value. Keeping this policy here rather than in the driver makes it behave
//! the same on every backend.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

/// A single result cell, independent of the database driver
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SqlValue {
    /// Database null
    #[default]
    Null,
    /// Any integer column
    Integer(i64),
    /// Character data, and time-of-day columns rendered as `HH:MM:SS`
    Text(String),
    /// Boolean column
    Boolean(bool),
    /// Timestamp or date as a wall clock without zone
    Timestamp(NaiveDateTime),
    /// A non-null value of a database type with no mapping, by type name
    Unsupported(String),
}

const TIMESTAMP_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

impl SqlValue {
    /// Converts to an integer field; null becomes 0
    pub fn into_integer(self) -> Result<i64, String> {
        match self {
            SqlValue::Null => Ok(0),
            SqlValue::Integer(v) => Ok(v),
            SqlValue::Boolean(v) => Ok(i64::from(v)),
            SqlValue::Text(s) => s
                .trim()
                .parse()
                .map_err(|_| format!("cannot convert {s:?} to an integer")),
            SqlValue::Timestamp(ts) => Err(format!("cannot convert timestamp {ts} to an integer")),
            SqlValue::Unsupported(type_name) => Err(unsupported(&type_name)),
        }
    }

    /// Converts to a text field; null becomes the empty string
    pub fn into_text(self) -> Result<String, String> {
        match self {
            SqlValue::Null => Ok(String::new()),
            SqlValue::Integer(v) => Ok(v.to_string()),
            SqlValue::Boolean(v) => Ok(v.to_string()),
            SqlValue::Text(s) => Ok(s),
            SqlValue::Timestamp(ts) => Ok(ts.format("%Y-%m-%dT%H:%M:%S").to_string()),
            SqlValue::Unsupported(type_name) => Err(unsupported(&type_name)),
        }
    }

    /// Converts to a boolean field; null becomes `false`
    pub fn into_boolean(self) -> Result<bool, String> {
        match self {
            SqlValue::Null => Ok(false),
            SqlValue::Boolean(v) => Ok(v),
            SqlValue::Integer(v) => Ok(v != 0),
            SqlValue::Text(s) => match s.trim().to_lowercase().as_str() {
                "1" | "t" | "true" | "y" | "yes" => Ok(true),
                "" | "0" | "f" | "false" | "n" | "no" => Ok(false),
                _ => Err(format!("cannot convert {s:?} to a boolean")),
            },
            SqlValue::Timestamp(ts) => Err(format!("cannot convert timestamp {ts} to a boolean")),
            SqlValue::Unsupported(type_name) => Err(unsupported(&type_name)),
        }
    }

    /// Converts to a timestamp field; null and empty text become `None`
    pub fn into_timestamp(self) -> Result<Option<NaiveDateTime>, String> {
        match self {
            SqlValue::Null => Ok(None),
            SqlValue::Timestamp(ts) => Ok(Some(ts)),
            SqlValue::Text(s) => parse_timestamp(&s),
            SqlValue::Integer(v) => Err(format!("cannot convert integer {v} to a timestamp")),
            SqlValue::Boolean(v) => Err(format!("cannot convert boolean {v} to a timestamp")),
            SqlValue::Unsupported(type_name) => Err(unsupported(&type_name)),
        }
    }
}

fn unsupported(type_name: &str) -> String {
    format!("unsupported database type {type_name}; cast it in the query, for example col::text")
}

fn parse_timestamp(s: &str) -> Result<Option<NaiveDateTime>, String> {
    let s = s.trim();
    if s.is_empty() {
        return Ok(None);
    }

    if let Ok(ts) = DateTime::parse_from_rfc3339(s) {
        return Ok(Some(ts.naive_utc()));
    }
    for format in TIMESTAMP_FORMATS {
        if let Ok(ts) = NaiveDateTime::parse_from_str(s, format) {
            return Ok(Some(ts));
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(Some(date.and_time(NaiveTime::MIN)));
    }

    Err(format!("cannot convert {s:?} to a timestamp"))
}
