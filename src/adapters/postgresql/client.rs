//! PostgreSQL client implementation
//!
//! Wraps a deadpool connection pool and hands out [`PgConnection`]s, one per
//! query.

use crate::adapters::postgresql::connection::PgConnection;
use crate::config::{redact_connection_string, DatabaseConfig};
use crate::core::query::QueryConnection;
use crate::core::run::ConnectionSource;
use crate::domain::{DatabaseError, EdflowError, Result};
use async_trait::async_trait;
use chrono_tz::Tz;
use deadpool_postgres::{Manager, ManagerConfig, Pool, RecyclingMethod};
use secrecy::ExposeSecret;
use tokio_postgres::NoTls;

/// PostgreSQL client for edflow
pub struct PostgreSQLClient {
    pool: Pool,
    location: Tz,
    safe_connection_string: String,
}

impl PostgreSQLClient {
    /// Create a new PostgreSQL client
    ///
    /// No connection is opened until the first query. `location` is the
    /// time zone `timestamptz` values are converted to.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection string cannot be parsed or the
    /// pool cannot be built.
    pub fn new(config: &DatabaseConfig, location: Tz) -> Result<Self> {
        let connection_string: &str = config.connection_string.expose_secret().as_ref();
        let pg_config: tokio_postgres::Config = connection_string.parse().map_err(|e| {
            EdflowError::Configuration(format!("Invalid PostgreSQL connection string: {}", e))
        })?;

        let manager = Manager::from_config(
            pg_config,
            NoTls,
            ManagerConfig {
                recycling_method: RecyclingMethod::Fast,
            },
        );

        let timeout = config.connection_timeout();
        let pool = Pool::builder(manager)
            .max_size(config.max_connections)
            .runtime(deadpool_postgres::Runtime::Tokio1)
            .wait_timeout(Some(timeout))
            .create_timeout(Some(timeout))
            .recycle_timeout(Some(timeout))
            .build()
            .map_err(|e| {
                DatabaseError::ConnectionFailed(format!("Failed to create connection pool: {}", e))
            })?;

        Ok(Self {
            pool,
            location,
            safe_connection_string: redact_connection_string(connection_string),
        })
    }

    /// Test the connection to PostgreSQL
    ///
    /// # Errors
    ///
    /// Returns [`DatabaseError::ConnectionFailed`] if no connection can be
    /// opened or `SELECT 1` fails.
    pub async fn test_connection(&self) -> Result<()> {
        let client = self.get_connection().await?;

        client
            .query_one("SELECT 1", &[])
            .await
            .map_err(|e| DatabaseError::ConnectionFailed(format!("Connection test failed: {}", e)))?;

        tracing::info!(
            database = %self.safe_connection_string,
            "PostgreSQL connection test successful"
        );
        Ok(())
    }

    /// Get a connection from the pool
    ///
    /// # Errors
    ///
    /// Returns an error if a connection cannot be obtained.
    pub async fn get_connection(&self) -> Result<deadpool_postgres::Object> {
        self.pool.get().await.map_err(|e| {
            DatabaseError::ConnectionFailed(format!(
                "Failed to get connection from pool for {}: {}",
                self.safe_connection_string, e
            ))
            .into()
        })
    }

    /// Get the connection string with the password masked
    pub fn connection_string_safe(&self) -> &str {
        &self.safe_connection_string
    }
}

#[async_trait]
impl ConnectionSource for PostgreSQLClient {
    async fn connection(&self) -> Result<Box<dyn QueryConnection>> {
        let client = self.get_connection().await?;
        Ok(Box::new(PgConnection::new(client, self.location)))
    }
}
