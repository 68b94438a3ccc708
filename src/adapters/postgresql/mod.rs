//! PostgreSQL database integration
//!
//! Reads from the hospital database through a connection pool. Queries are
//! read-only; edflow never writes to the source database.

pub mod client;
pub mod connection;

pub use client::PostgreSQLClient;
pub use connection::PgConnection;
