// edflow - Emergency department flow extractor
// Copyright (c) 2025 edflow Contributors
// Licensed under the MIT License

use edflow::cli::{Cli, Commands, EXIT_FATAL};
use edflow::config::{load_config, LoggingConfig};
use edflow::logging::{init_logging, LoggingGuard};
use clap::Parser;
use std::process;
use tokio::sync::watch;

#[tokio::main]
async fn main() {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let _guard = match setup_logging(&cli) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(EXIT_FATAL);
        }
    };

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "edflow - Emergency department flow extractor"
    );

    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let shutdown_tx_clone = shutdown_tx.clone();
    tokio::spawn(async move {
        #[cfg(unix)]
        {
            use tokio::signal::unix::{signal, SignalKind};
            let mut sigterm = match signal(SignalKind::terminate()) {
                Ok(sigterm) => sigterm,
                Err(e) => {
                    tracing::error!(error = %e, "Failed to create SIGTERM handler");
                    return;
                }
            };

            tokio::select! {
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("Received SIGINT (Ctrl+C), stopping run");
                }
                _ = sigterm.recv() => {
                    tracing::info!("Received SIGTERM, stopping run");
                }
            }
            let _ = shutdown_tx_clone.send(true);
        }

        #[cfg(not(unix))]
        {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            } else {
                tracing::info!("Received SIGINT (Ctrl+C), stopping run");
                let _ = shutdown_tx_clone.send(true);
            }
        }
    });

    let exit_code = match execute_command(&cli, shutdown_rx).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command execution failed");
            eprintln!("Error: {e}");
            EXIT_FATAL
        }
    };

    drop(shutdown_tx);
    drop(_guard);
    process::exit(exit_code);
}

/// Installs the global subscriber
///
/// `run` logs to the configured files as well; the other commands and a run
/// whose configuration cannot be loaded log to the console only. The run
/// command reports the configuration error itself.
fn setup_logging(cli: &Cli) -> edflow::domain::Result<LoggingGuard> {
    let console_only = LoggingConfig {
        local_enabled: false,
        local_path: String::new(),
        local_rotation: "daily".to_string(),
    };

    let configured = match cli.command {
        Commands::Run(_) => load_config(&cli.config).ok(),
        _ => None,
    };

    let Some(config) = configured else {
        let level = cli.log_level.as_deref().unwrap_or("info");
        return init_logging(level, &console_only);
    };

    let level = cli
        .log_level
        .as_deref()
        .unwrap_or(&config.application.log_level);

    match init_logging(level, &config.logging) {
        Ok(guard) => Ok(guard),
        Err(e) => {
            eprintln!("⚠️  File logging unavailable, logging to console only: {e}");
            init_logging(level, &console_only)
        }
    }
}

/// Execute the CLI command
async fn execute_command(cli: &Cli, shutdown_signal: watch::Receiver<bool>) -> anyhow::Result<i32> {
    match &cli.command {
        Commands::Run(args) => args.execute(&cli.config, shutdown_signal).await,
        Commands::CheckQuery(args) => args.execute(&cli.config).await,
        Commands::ValidateConfig(args) => args.execute(&cli.config).await,
        Commands::Init(args) => args.execute().await,
    }
}
