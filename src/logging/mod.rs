//! Logging and observability
//!
//! Structured logging through `tracing`, with a console layer and an
//! optional rolling JSON log file.
//!
//! # Example
//!
//! ```no_run
//! use edflow::config::LoggingConfig;
//! use edflow::logging::init_logging;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!(kind = "visitor", "Run started");
//! ```

pub mod structured;

pub use structured::{init_logging, parse_log_level, LoggingGuard};

/// Log the start of a query for one record kind
///
/// # Example
///
/// ```no_run
/// use edflow::log_query_start;
/// use edflow::domain::RecordKind;
/// use std::time::Duration;
///
/// log_query_start!(RecordKind::Visitor, Duration::from_secs(300));
/// ```
#[macro_export]
macro_rules! log_query_start {
    ($kind:expr, $timeout:expr) => {
        tracing::info!(
            kind = %$kind,
            timeout_ms = $timeout.as_millis() as u64,
            "Starting query"
        );
    };
}

/// Log the completion of a query
///
/// # Example
///
/// ```no_run
/// use edflow::log_query_complete;
/// use edflow::domain::RecordKind;
/// use std::time::Duration;
///
/// log_query_complete!(RecordKind::Lab, 42, Duration::from_millis(850));
/// ```
#[macro_export]
macro_rules! log_query_complete {
    ($kind:expr, $count:expr, $duration:expr) => {
        tracing::info!(
            kind = %$kind,
            count = $count,
            duration_ms = $duration.as_millis() as u64,
            "Query completed"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use edflow::log_error_with_context;
/// use edflow::domain::EdflowError;
///
/// let error = EdflowError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}
