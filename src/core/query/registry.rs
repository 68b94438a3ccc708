//! Column registries
//!
//! A registry is the static catalog of columns a query for one record kind
//! must return. Each entry pairs a canonical lowercase column name with a
//! typed setter for the target field, so binding never depends on the
//! physical column order of the operator's query.

use crate::core::query::value::SqlValue;
use crate::domain::{EdflowError, RecordKind, Result};
use chrono::NaiveDateTime;
use std::fmt;

/// Writes a converted value into a record field
pub enum Setter<R> {
    Integer(fn(&mut R, i64)),
    Text(fn(&mut R, String)),
    Boolean(fn(&mut R, bool)),
    Timestamp(fn(&mut R, Option<NaiveDateTime>)),
}

/// The value kind a column is converted to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Integer,
    Text,
    Boolean,
    Timestamp,
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColumnKind::Integer => "integer",
            ColumnKind::Text => "text",
            ColumnKind::Boolean => "boolean",
            ColumnKind::Timestamp => "timestamp",
        };
        f.write_str(name)
    }
}

/// A required column and the field it populates
pub struct ColumnDefinition<R> {
    /// Canonical lowercase column name
    pub name: &'static str,

    /// Target field setter
    pub setter: Setter<R>,
}

impl<R> ColumnDefinition<R> {
    /// The kind of value this column converts to
    pub fn kind(&self) -> ColumnKind {
        match self.setter {
            Setter::Integer(_) => ColumnKind::Integer,
            Setter::Text(_) => ColumnKind::Text,
            Setter::Boolean(_) => ColumnKind::Boolean,
            Setter::Timestamp(_) => ColumnKind::Timestamp,
        }
    }

    /// Converts `value` per this column's null policy and stores it in `record`
    ///
    /// # Errors
    ///
    /// Returns [`EdflowError::Scan`] naming the column if the value cannot be
    /// converted to the column's kind.
    pub fn assign(&self, record: &mut R, value: SqlValue) -> Result<()> {
        let scan_error = |message: String| EdflowError::Scan {
            column: self.name.to_string(),
            message,
        };

        match self.setter {
            Setter::Integer(set) => set(record, value.into_integer().map_err(scan_error)?),
            Setter::Text(set) => set(record, value.into_text().map_err(scan_error)?),
            Setter::Boolean(set) => set(record, value.into_boolean().map_err(scan_error)?),
            Setter::Timestamp(set) => set(record, value.into_timestamp().map_err(scan_error)?),
        }
        Ok(())
    }
}

/// The ordered set of columns required for one record kind
pub struct ColumnRegistry<R: 'static> {
    kind: RecordKind,
    columns: &'static [ColumnDefinition<R>],
}

impl<R: 'static> ColumnRegistry<R> {
    /// Creates a registry; column names must be lowercase and unique
    pub const fn new(kind: RecordKind, columns: &'static [ColumnDefinition<R>]) -> Self {
        Self { kind, columns }
    }

    /// Record kind this registry scans
    pub fn kind(&self) -> RecordKind {
        self.kind
    }

    /// Columns in declaration order
    pub fn columns(&self) -> &'static [ColumnDefinition<R>] {
        self.columns
    }

    /// Column names in declaration order
    pub fn names(&self) -> impl Iterator<Item = &'static str> {
        let columns = self.columns;
        columns.iter().map(|c| c.name)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}
