//! Check query command implementation
//!
//! Runs one configured query and prints what it scanned, so that operators
//! can debug their SQL without uploading anything.

use crate::adapters::postgresql::PostgreSQLClient;
use crate::cli::commands::exit_code_for;
use crate::cli::{EXIT_CONFIG_ERROR, EXIT_CONNECTION_ERROR, EXIT_OK};
use crate::config::load_config;
use crate::core::query::{
    execute_consult_query, execute_lab_query, execute_radiology_query, execute_visitor_query,
    required_columns, QueryConnection,
};
use crate::core::run::ConnectionSource;
use crate::domain::{EdflowError, RecordKind, Result};
use clap::Args;
use serde::Serialize;
use serde_json::Value;
use std::fmt::Write;
use std::time::Duration;

/// Arguments for the check-query command
#[derive(Args, Debug)]
pub struct CheckQueryArgs {
    /// Record kind whose query to run (visitor, radiology, lab, consult)
    pub kind: RecordKind,

    /// Maximum number of records to print
    #[arg(long, default_value_t = 10)]
    pub limit: usize,
}

impl CheckQueryArgs {
    /// Execute the check-query command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, kind = %self.kind, "Checking query");

        println!("🔍 Checking {} query", self.kind);
        println!();

        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {e}");
                return Ok(EXIT_CONFIG_ERROR);
            }
        };

        let Some(sql) = config.queries.get(self.kind) else {
            println!("❌ No query configured for {}", self.kind);
            println!("   Add queries.{} to {config_path}", self.kind);
            return Ok(EXIT_CONFIG_ERROR);
        };

        let location = match config.transform.location() {
            Ok(location) => location,
            Err(e) => {
                println!("❌ {e}");
                return Ok(EXIT_CONFIG_ERROR);
            }
        };

        let client = match PostgreSQLClient::new(&config.database, location) {
            Ok(client) => client,
            Err(e) => {
                println!("❌ Failed to set up database client");
                println!("   Error: {e}");
                return Ok(exit_code_for(&e));
            }
        };

        let connection = match client.connection().await {
            Ok(connection) => connection,
            Err(e) => {
                println!("❌ Failed to connect to {}", client.connection_string_safe());
                println!("   Error: {e}");
                return Ok(EXIT_CONNECTION_ERROR);
            }
        };

        match scan(connection.as_ref(), self.kind, sql, config.queries.timeout()).await {
            Ok(records) => {
                println!("✅ Query returned {} records", records.len());
                if records.len() > self.limit {
                    println!("   Showing the first {}", self.limit);
                }
                println!();
                let shown = &records[..records.len().min(self.limit)];
                print!("{}", render_records(shown));
                Ok(EXIT_OK)
            }
            Err(e) => {
                println!("❌ Query check failed");
                print!("{}", render_diagnostics(self.kind, &e));
                Ok(exit_code_for(&e))
            }
        }
    }
}

/// Runs the kind's query and returns its raw records as JSON objects
async fn scan(
    connection: &dyn QueryConnection,
    kind: RecordKind,
    sql: &str,
    timeout: Duration,
) -> Result<Vec<Value>> {
    match kind {
        RecordKind::Visitor => to_values(execute_visitor_query(connection, sql, timeout).await?),
        RecordKind::Radiology => {
            to_values(execute_radiology_query(connection, sql, timeout).await?)
        }
        RecordKind::Lab => to_values(execute_lab_query(connection, sql, timeout).await?),
        RecordKind::Consult => to_values(execute_consult_query(connection, sql, timeout).await?),
    }
}

fn to_values<T: Serialize>(records: Vec<T>) -> Result<Vec<Value>> {
    records
        .iter()
        .map(|record| serde_json::to_value(record).map_err(EdflowError::from))
        .collect()
}

/// Renders records in expanded form, one `field | value` block per record
fn render_records(records: &[Value]) -> String {
    let mut out = String::new();

    for (index, record) in records.iter().enumerate() {
        let Value::Object(fields) = record else {
            continue;
        };
        let width = fields.keys().map(String::len).max().unwrap_or(0);

        let _ = writeln!(out, "-[ RECORD {} ]-", index + 1);
        for (name, value) in fields {
            let _ = writeln!(out, "{name:<width$} | {}", cell(value));
        }
    }

    out
}

fn cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Explains a failed check in terms of the query's columns
fn render_diagnostics(kind: RecordKind, error: &EdflowError) -> String {
    let mut out = String::new();

    match error {
        EdflowError::Selection(selection) => {
            let _ = writeln!(out, "   Missing columns: {}", selection.missing.join(", "));
            let _ = writeln!(out, "   Query returned:  {}", selection.got.join(", "));
            let _ = writeln!(
                out,
                "   Required for {kind}: {}",
                required_columns(kind).join(", ")
            );
        }
        EdflowError::DuplicateColumns(names) => {
            let _ = writeln!(out, "   Duplicate columns: {}", names.join(", "));
            let _ = writeln!(out, "   Alias each column to a distinct name");
        }
        other => {
            let _ = writeln!(out, "   Error: {other}");
        }
    }

    out
}
