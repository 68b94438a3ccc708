// edflow - Emergency department flow extractor
// Copyright (c) 2025 edflow Contributors
// Licensed under the MIT License

//! # edflow - Emergency department flow extractor
//!
//! edflow reads emergency-department visit mutations and the radiology, lab
//! and consult orders placed during those visits from a hospital database,
//! turns them into zone-aware records and delivers one batch per record
//! kind.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Querying** with operator-authored SQL whose columns are bound by name
//! - **Deriving** absolute timestamps from separate date and time-of-day
//!   fragments, across midnight and daylight saving transitions
//! - **Transforming** raw rows into public records, including an age bucket
//! - **Delivering** each kind's batch to an upload sink
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Business logic (query, time, transform, run)
//! - [`adapters`] - External integrations (PostgreSQL)
//! - [`domain`] - Record kinds, raw and public records, errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use edflow::adapters::postgresql::PostgreSQLClient;
//! use edflow::config::load_config;
//! use edflow::core::run::{DirectorySink, RunCoordinator, RunSettings};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("edflow.toml")?;
//!     let settings = RunSettings::from_config(&config)?;
//!     let client = PostgreSQLClient::new(&config.database, settings.location)?;
//!
//!     let coordinator = RunCoordinator::new(
//!         settings,
//!         Arc::new(client),
//!         Arc::new(DirectorySink::new(&config.output.directory)),
//!     );
//!     let summary = coordinator.execute_run().await;
//!
//!     println!("Delivered {} records", summary.total_records());
//!     Ok(())
//! }
//! ```
//!
//! ## Name-Based Column Binding
//!
//! Queries may return their columns in any order and letter case, with
//! extra columns. Every required column must be present exactly once:
//!
//! ```rust,no_run
//! use edflow::core::query::{execute_lab_query, QueryConnection};
//! use std::time::Duration;
//!
//! # async fn example(connection: &dyn QueryConnection) -> edflow::domain::Result<()> {
//! let orders = execute_lab_query(
//!     connection,
//!     "SELECT status, SEHID, ordernr, startdatumtijd, einddatumtijd, extra FROM lab",
//!     Duration::from_secs(30),
//! )
//! .await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Time Derivation
//!
//! ```rust
//! use edflow::core::time::{derive_absolute, derive_relative};
//!
//! let location = chrono_tz::Europe::Amsterdam;
//! let arrival = derive_absolute("2024-06-01", "23:40", location).unwrap();
//! // Earlier than arrival on the wall clock, so it happened the next day
//! let triage = derive_relative(arrival.as_ref(), "00:10", location).unwrap();
//! assert_eq!(triage.unwrap().to_rfc3339(), "2024-06-02T00:10:00+02:00");
//! ```
//!
//! ## Error Handling
//!
//! edflow uses the [`domain::EdflowError`] type for all errors:
//!
//! ```rust,no_run
//! use edflow::domain::EdflowError;
//!
//! fn example() -> Result<(), EdflowError> {
//!     let config = edflow::config::load_config("edflow.toml")?;
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
