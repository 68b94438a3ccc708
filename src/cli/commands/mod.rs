//! CLI command implementations
//!
//! Each command returns the process exit code; see [`crate::cli`] for the
//! code values.

pub mod check_query;
pub mod init;
pub mod run;
pub mod validate;

use crate::cli::{EXIT_COMPLETED_WITH_ERRORS, EXIT_CONFIG_ERROR, EXIT_CONNECTION_ERROR};
use crate::domain::{DatabaseError, EdflowError, ErrorCategory};

/// Maps a failure that ended a command to its exit code
pub(crate) fn exit_code_for(error: &EdflowError) -> i32 {
    match error {
        EdflowError::Database(DatabaseError::ConnectionFailed(_)) => EXIT_CONNECTION_ERROR,
        e if e.category() == ErrorCategory::Configuration => EXIT_CONFIG_ERROR,
        _ => EXIT_COMPLETED_WITH_ERRORS,
    }
}
