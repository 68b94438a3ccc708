//! Result type alias for edflow

use super::errors::EdflowError;

/// Result type alias for edflow operations
///
/// # Examples
///
/// ```
/// use edflow::domain::result::Result;
/// use edflow::domain::errors::EdflowError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(EdflowError::Configuration("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, EdflowError>;
