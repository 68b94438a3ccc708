//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::EdflowConfig;
use super::secret::secret_string;
use crate::domain::{EdflowError, Result};
use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into EdflowConfig
/// 4. Applies environment variable overrides (EDFLOW_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns [`EdflowError::Configuration`] if:
/// - File cannot be read
/// - A referenced environment variable is not set
/// - TOML parsing fails
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use edflow::config::load_config;
///
/// let config = load_config("edflow.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<EdflowConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(EdflowError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        EdflowError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: EdflowConfig = toml::from_str(&contents)?;

    apply_env_overrides(&mut config);

    config.validate().map_err(|e| {
        EdflowError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

fn placeholder_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").unwrap())
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are copied untouched. Every missing variable is reported,
/// not just the first.
fn substitute_env_vars(input: &str) -> Result<String> {
    let mut result = String::with_capacity(input.len());
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let processed = placeholder_pattern().replace_all(line, |caps: &regex::Captures| {
            let var_name = &caps[1];
            match std::env::var(var_name) {
                Ok(value) => value,
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                    caps[0].to_string()
                }
            }
        });
        result.push_str(&processed);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(EdflowError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using the EDFLOW_* prefix
///
/// Variables follow the pattern EDFLOW_<SECTION>_<KEY>, for example
/// EDFLOW_DATABASE_CONNECTION_STRING or EDFLOW_QUERIES_TIMEOUT_SECONDS.
/// Unparseable numeric and boolean values are ignored.
fn apply_env_overrides(config: &mut EdflowConfig) {
    let var = |name: &str| std::env::var(name).ok();

    // Application overrides
    if let Some(val) = var("EDFLOW_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }
    if let Some(val) = var("EDFLOW_APPLICATION_DRY_RUN") {
        config.application.dry_run = val.parse().unwrap_or(config.application.dry_run);
    }

    // Database overrides
    if let Some(val) = var("EDFLOW_DATABASE_CONNECTION_STRING") {
        config.database.connection_string = secret_string(val);
    }
    if let Some(Ok(max)) = var("EDFLOW_DATABASE_MAX_CONNECTIONS").map(|v| v.parse()) {
        config.database.max_connections = max;
    }
    if let Some(Ok(secs)) = var("EDFLOW_DATABASE_CONNECTION_TIMEOUT_SECONDS").map(|v| v.parse()) {
        config.database.connection_timeout_seconds = secs;
    }

    // Query overrides
    if let Some(val) = var("EDFLOW_QUERIES_VISITOR") {
        config.queries.visitor = val;
    }
    if let Some(val) = var("EDFLOW_QUERIES_RADIOLOGY") {
        config.queries.radiology = Some(val);
    }
    if let Some(val) = var("EDFLOW_QUERIES_LAB") {
        config.queries.lab = Some(val);
    }
    if let Some(val) = var("EDFLOW_QUERIES_CONSULT") {
        config.queries.consult = Some(val);
    }
    if let Some(Ok(secs)) = var("EDFLOW_QUERIES_TIMEOUT_SECONDS").map(|v| v.parse()) {
        config.queries.timeout_seconds = secs;
    }

    // Transform and output overrides
    if let Some(val) = var("EDFLOW_TRANSFORM_TIMEZONE") {
        config.transform.timezone = val;
    }
    if let Some(val) = var("EDFLOW_OUTPUT_DIRECTORY") {
        config.output.directory = val;
    }

    // Logging overrides
    if let Some(val) = var("EDFLOW_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(config.logging.local_enabled);
    }
    if let Some(val) = var("EDFLOW_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Some(val) = var("EDFLOW_LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }
}
