//! Core logic for edflow.
//!
//! # Modules
//!
//! - [`query`] - Query execution and name-based column binding
//! - [`time`] - Absolute timestamps from date and time-of-day fragments
//! - [`transform`] - Raw-to-public record transformation
//! - [`run`] - Run coordination, upload sinks and run summaries
//!
//! # Run Workflow
//!
//! 1. **Query**: run each configured kind's query under the query timeout
//! 2. **Bind**: match the returned column names against the kind's registry
//! 3. **Scan**: build raw records, collapsing nulls to zero values
//! 4. **Transform**: derive zone-aware timestamps and the age bucket
//! 5. **Deliver**: serialize each kind's batch and hand it to the sink
//! 6. **Report**: summarize per-kind counts and failures
//!
//! # Example
//!
//! ```rust,no_run
//! use edflow::adapters::postgresql::PostgreSQLClient;
//! use edflow::config::load_config;
//! use edflow::core::run::{DirectorySink, RunCoordinator, RunSettings};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("edflow.toml")?;
//! let settings = RunSettings::from_config(&config)?;
//! let client = PostgreSQLClient::new(&config.database, settings.location)?;
//! let sink = DirectorySink::new(&config.output.directory);
//!
//! let coordinator = RunCoordinator::new(
//!     settings,
//!     Arc::new(client),
//!     Arc::new(sink),
//! );
//! let summary = coordinator.execute_run().await;
//! println!("Delivered {} records", summary.total_records());
//! # Ok(())
//! # }
//! ```

pub mod query;
pub mod run;
pub mod time;
pub mod transform;
