//! Query execution
//!
//! Runs an operator-authored query under a timeout, binds its columns by
//! name against a registry and scans every row into a typed record. The
//! steps are strictly sequential: run, bind, validate, scan. The first
//! failing step ends the execution.

use crate::core::query::binding::ColumnBinding;
use crate::core::query::registry::ColumnRegistry;
use crate::core::query::value::SqlValue;
use crate::domain::{DatabaseError, Result};
use async_trait::async_trait;
use std::time::{Duration, Instant};

/// A fully materialized query result
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultSet {
    /// Column names exactly as returned by the database
    pub columns: Vec<String>,

    /// Rows in result order; every row has one value per column
    pub rows: Vec<Vec<SqlValue>>,
}

/// An open, authenticated database connection or transaction
///
/// Implementations run the SQL text as-is and report driver failures as
/// [`DatabaseError`]. Queries are read-only; transaction boundaries are the
/// caller's responsibility.
#[async_trait]
pub trait QueryConnection: Send + Sync {
    /// Runs `sql` and returns its column names and rows
    async fn fetch(&self, sql: &str) -> std::result::Result<ResultSet, DatabaseError>;

    /// Asks the server to stop the statement currently running
    ///
    /// Must return immediately; the request itself may complete later.
    fn cancel(&self) {}
}

/// Executes `sql` and scans the result into records of the registry's kind
///
/// # Arguments
///
/// * `connection` - Open connection to run the query on
/// * `sql` - Operator-authored query text
/// * `timeout` - Upper bound for running the query and fetching its rows
/// * `registry` - Required columns and their target fields
///
/// # Errors
///
/// - [`DatabaseError`] from the driver, unchanged
/// - [`DatabaseError::Timeout`] when `timeout` elapses; the connection is
///   asked to cancel the statement and the call returns without waiting
/// - [`crate::domain::EdflowError::DuplicateColumns`] or
///   [`crate::domain::SelectionError`] when the query's columns do not
///   match the registry; no row is read in that case
/// - [`crate::domain::EdflowError::Scan`] when a value cannot be converted
pub async fn execute<R, C>(
    connection: &C,
    sql: &str,
    timeout: Duration,
    registry: &ColumnRegistry<R>,
) -> Result<Vec<R>>
where
    R: Default + 'static,
    C: QueryConnection + ?Sized,
{
    let kind = registry.kind();
    let started = Instant::now();
    crate::log_query_start!(kind, timeout);

    let result_set = match tokio::time::timeout(timeout, connection.fetch(sql)).await {
        Ok(fetched) => fetched?,
        Err(_) => {
            connection.cancel();
            tracing::warn!(
                kind = %kind,
                timeout_ms = timeout.as_millis() as u64,
                "Query timed out, cancellation requested"
            );
            return Err(DatabaseError::Timeout(timeout).into());
        }
    };

    let binding = ColumnBinding::resolve(registry, &result_set.columns).inspect_err(|e| {
        tracing::warn!(kind = %kind, error = %e, "Query columns do not match the registry");
    })?;

    let records = result_set
        .rows
        .into_iter()
        .map(|row| binding.scan(registry, row))
        .collect::<Result<Vec<R>>>()?;

    crate::log_query_complete!(kind, records.len(), started.elapsed());
    Ok(records)
}
