//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for edflow using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// Exit code: success
pub const EXIT_OK: i32 = 0;
/// Exit code: the run finished but at least one record kind failed
pub const EXIT_COMPLETED_WITH_ERRORS: i32 = 1;
/// Exit code: configuration or query misconfiguration
pub const EXIT_CONFIG_ERROR: i32 = 2;
/// Exit code: the database could not be reached
pub const EXIT_CONNECTION_ERROR: i32 = 4;
/// Exit code: anything else
pub const EXIT_FATAL: i32 = 5;

/// edflow - emergency department flow extractor
#[derive(Parser, Debug)]
#[command(name = "edflow")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "edflow.toml", env = "EDFLOW_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "EDFLOW_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Extract all configured record kinds and deliver them
    Run(commands::run::RunArgs),

    /// Run one configured query and show what it returns
    CheckQuery(commands::check_query::CheckQueryArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}
