//! Query execution and name-based column binding
//!
//! - [`registry`] - Static per-kind column catalogs
//! - [`binding`] - Resolving a registry against a live result set
//! - [`value`] - Portable cell values and the null/zero-value policy
//! - [`executor`] - Running a query under a timeout and scanning its rows
//! - [`scanners`] - The four record kinds' registries and entry points

pub mod binding;
pub mod executor;
pub mod registry;
pub mod scanners;
pub mod value;

pub use binding::ColumnBinding;
pub use executor::{execute, QueryConnection, ResultSet};
pub use registry::{ColumnDefinition, ColumnKind, ColumnRegistry, Setter};
pub use scanners::{
    execute_consult_query, execute_lab_query, execute_radiology_query, execute_visitor_query,
    required_columns, CONSULT_REGISTRY, LAB_REGISTRY, RADIOLOGY_REGISTRY, VISITOR_REGISTRY,
};
pub use value::SqlValue;
