//! External system integrations for edflow.
//!
//! - [`postgresql`] - Hospital database access through a connection pool
//!
//! Adapters implement the core's seams ([`crate::core::query::QueryConnection`]
//! and [`crate::core::run::ConnectionSource`]) so that the query executor and
//! the run coordinator can be tested against in-memory result sets.

pub mod postgresql;
