//! Domain error types
//!
//! This module defines the error hierarchy for edflow. Query misconfiguration,
//! malformed time fragments and database failures are kept apart so that the
//! caller can tell operator mistakes from transient infrastructure problems.
//! No error type exposes third-party driver types.

use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Main edflow error type
///
/// This is the primary error type used throughout the application.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EdflowError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The query does not project every required column
    #[error(transparent)]
    Selection(#[from] SelectionError),

    /// The query projects at least one column name more than once
    #[error("Query returns duplicate column names: {}", .0.join(", "))]
    DuplicateColumns(Vec<String>),

    /// Malformed date or time-of-day fragment
    #[error("Format error: {0}")]
    Format(#[from] FormatError),

    /// Database errors, passed through from the driver
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    /// A bound value could not be converted into its target field
    #[error("Failed to scan column '{column}': {message}")]
    Scan { column: String, message: String },

    /// The upload sink rejected a batch
    #[error("Upload sink error: {0}")]
    Sink(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

impl EdflowError {
    /// Whether a later run may succeed without changing the query or the data
    pub fn is_retryable(&self) -> bool {
        matches!(self, EdflowError::Database(_))
    }

    /// Coarse category used for run reports and exit codes
    pub fn category(&self) -> ErrorCategory {
        match self {
            EdflowError::Configuration(_)
            | EdflowError::Selection(_)
            | EdflowError::DuplicateColumns(_) => ErrorCategory::Configuration,
            EdflowError::Format(_) | EdflowError::Scan { .. } => ErrorCategory::Format,
            EdflowError::Database(_) => ErrorCategory::Database,
            EdflowError::Sink(_) | EdflowError::Serialization(_) | EdflowError::Io(_) => {
                ErrorCategory::Sink
            }
        }
    }
}

/// Error categories reported in run summaries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The query or the configuration must be edited
    Configuration,
    /// A source value is malformed
    Format,
    /// Connectivity, syntax, permission or timeout
    Database,
    /// Delivering the batch failed
    Sink,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorCategory::Configuration => "configuration",
            ErrorCategory::Format => "format",
            ErrorCategory::Database => "database",
            ErrorCategory::Sink => "sink",
        };
        f.write_str(name)
    }
}

/// The query result lacks one or more required columns
///
/// `missing` lists the absent registry columns in registry declaration order,
/// `got` lists the result set's column names exactly as returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "query is missing required columns [{}]; the query returned [{}]",
    .missing.join(", "),
    .got.join(", ")
)]
pub struct SelectionError {
    /// Required column names that were not found
    pub missing: Vec<String>,

    /// Column names returned by the query
    pub got: Vec<String>,
}

/// Malformed date or time-of-day fragments
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// Time of day is not `H:MM`, `HH:MM` or either followed by `:SS`
    #[error("unrecognized time format: {0:?}")]
    TimeOfDay(String),

    /// Date is not `YYYY-MM-DD`
    #[error("unrecognized date format: {0:?}")]
    Date(String),

    /// The wall-clock time falls in a daylight saving gap
    #[error("local time does not exist in time zone: {0:?}")]
    NonexistentLocalTime(String),
}

/// Database errors
///
/// These errors don't expose driver types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DatabaseError {
    /// Failed to obtain a connection
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(String),

    /// The statement was rejected or failed while running
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// The statement did not finish within the configured timeout
    #[error("Query timed out after {}ms", .0.as_millis())]
    Timeout(Duration),
}

// Conversion from std::io::Error
impl From<std::io::Error> for EdflowError {
    fn from(err: std::io::Error) -> Self {
        EdflowError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for EdflowError {
    fn from(err: serde_json::Error) -> Self {
        EdflowError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for EdflowError {
    fn from(err: toml::de::Error) -> Self {
        EdflowError::Configuration(format!("TOML parse error: {err}"))
    }
}
