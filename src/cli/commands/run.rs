//! Run command implementation
//!
//! This module implements the `run` command: one extraction run over every
//! configured record kind.

use crate::adapters::postgresql::PostgreSQLClient;
use crate::cli::commands::exit_code_for;
use crate::cli::{
    EXIT_COMPLETED_WITH_ERRORS, EXIT_CONFIG_ERROR, EXIT_CONNECTION_ERROR, EXIT_FATAL, EXIT_OK,
};
use crate::config::load_config;
use crate::core::run::{DirectorySink, RunCoordinator, RunSettings, StdoutSink, UploadSink};
use clap::Args;
use std::sync::Arc;
use tokio::sync::watch;

/// Arguments for the run command
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Print batches to stdout instead of writing them to the output directory
    #[arg(long)]
    pub dry_run: bool,
}

impl RunArgs {
    /// Execute the run command
    pub async fn execute(
        &self,
        config_path: &str,
        mut shutdown_signal: watch::Receiver<bool>,
    ) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Starting run");

        let mut config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load configuration");
                eprintln!("❌ Configuration error: {e}");
                return Ok(EXIT_CONFIG_ERROR);
            }
        };

        if self.dry_run {
            config.application.dry_run = true;
        }

        let settings = match RunSettings::from_config(&config) {
            Ok(settings) => settings,
            Err(e) => {
                eprintln!("❌ Configuration error: {e}");
                return Ok(EXIT_CONFIG_ERROR);
            }
        };

        if settings.dry_run {
            eprintln!("🚀 Dry run: batches are printed, nothing is written");
        }

        let client = match PostgreSQLClient::new(&config.database, settings.location) {
            Ok(client) => client,
            Err(e) => {
                eprintln!("❌ Failed to set up database client: {e}");
                return Ok(exit_code_for(&e));
            }
        };

        if let Err(e) = client.test_connection().await {
            tracing::error!(error = %e, "Database connection test failed");
            eprintln!("❌ Cannot reach {}: {e}", client.connection_string_safe());
            return Ok(EXIT_CONNECTION_ERROR);
        }

        let sink: Arc<dyn UploadSink> = if settings.dry_run {
            Arc::new(StdoutSink)
        } else {
            Arc::new(DirectorySink::new(&config.output.directory))
        };

        let coordinator = RunCoordinator::new(settings, Arc::new(client), sink);

        let summary = tokio::select! {
            summary = coordinator.execute_run() => summary,
            _ = shutdown_signal.wait_for(|stop| *stop) => {
                tracing::warn!("Run interrupted before all kinds completed");
                eprintln!("⚠️  Run interrupted; batches already delivered are kept");
                return Ok(EXIT_FATAL);
            }
        };

        summary.log_summary();

        if summary.is_successful() {
            eprintln!(
                "✅ Run completed: {} records in {:.2}s",
                summary.total_records(),
                summary.duration.as_secs_f64()
            );
            Ok(EXIT_OK)
        } else {
            eprintln!("❌ Run completed with {} failed kinds", summary.errors.len());
            for error in &summary.errors {
                eprintln!("   {} [{}]: {}", error.kind, error.category, error.message);
            }
            Ok(EXIT_COMPLETED_WITH_ERRORS)
        }
    }
}
