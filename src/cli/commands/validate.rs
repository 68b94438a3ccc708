//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the edflow configuration file.

use crate::cli::{EXIT_CONFIG_ERROR, EXIT_OK};
use crate::config::{load_config, redact_connection_string, EdflowConfig};
use crate::domain::RecordKind;
use clap::Args;
use secrecy::ExposeSecret;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // load_config validates before returning
        match load_config(config_path) {
            Ok(config) => {
                println!("✅ Configuration is valid");
                println!();
                print!("{}", summarize(&config));
                println!();
                Ok(EXIT_OK)
            }
            Err(e) => {
                println!("❌ Configuration validation failed");
                println!("   Error: {e}");
                println!();
                Ok(EXIT_CONFIG_ERROR)
            }
        }
    }
}

fn summarize(config: &EdflowConfig) -> String {
    let connection_string: &str = config.database.connection_string.expose_secret().as_ref();
    let mut lines = vec![
        "Configuration Summary:".to_string(),
        format!("  Log Level: {}", config.application.log_level),
        format!("  Dry Run: {}", config.application.dry_run),
        format!("  Database: {}", redact_connection_string(connection_string)),
        format!("  Max Connections: {}", config.database.max_connections),
        format!("  Query Timeout: {}s", config.queries.timeout_seconds),
    ];

    for kind in RecordKind::ALL {
        let state = if config.queries.get(kind).is_some() {
            "configured"
        } else {
            "skipped"
        };
        lines.push(format!("  Query {kind}: {state}"));
    }

    lines.push(format!("  Time Zone: {}", config.transform.timezone));
    lines.push(format!("  Output Directory: {}", config.output.directory));
    if config.logging.local_enabled {
        lines.push(format!(
            "  Log Files: {} ({})",
            config.logging.local_path, config.logging.local_rotation
        ));
    }

    lines.iter().map(|line| format!("{line}\n")).collect()
}
