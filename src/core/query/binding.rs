//! Name-based column binding
//!
//! A [`ColumnBinding`] maps every registry column to one position in a live
//! result set. It is resolved from the column names the database actually
//! returned, so operators may order columns freely and add extra ones.

use crate::core::query::registry::ColumnRegistry;
use crate::core::query::value::SqlValue;
use crate::domain::{EdflowError, Result, SelectionError};
use std::collections::HashMap;

/// Registry column index → result column index, for one query execution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnBinding {
    positions: Vec<usize>,
    width: usize,
}

impl ColumnBinding {
    /// Resolves `registry` against the result set's column names
    ///
    /// Names are compared case-insensitively. Result columns not named by
    /// the registry are ignored.
    ///
    /// # Errors
    ///
    /// - [`EdflowError::DuplicateColumns`] if any result column name occurs
    ///   more than once, whether or not the registry needs it. This check
    ///   runs first.
    /// - [`EdflowError::Selection`] listing every missing registry column in
    ///   declaration order together with the returned names.
    pub fn resolve<R: 'static>(registry: &ColumnRegistry<R>, columns: &[String]) -> Result<Self> {
        let mut lookup: HashMap<String, usize> = HashMap::with_capacity(columns.len());
        let mut duplicates: Vec<String> = Vec::new();

        for (index, name) in columns.iter().enumerate() {
            let key = name.to_lowercase();
            if lookup.contains_key(&key) {
                if !duplicates.contains(&key) {
                    duplicates.push(key);
                }
            } else {
                lookup.insert(key, index);
            }
        }

        if !duplicates.is_empty() {
            return Err(EdflowError::DuplicateColumns(duplicates));
        }

        let mut positions = Vec::with_capacity(registry.len());
        let mut missing = Vec::new();
        for name in registry.names() {
            match lookup.get(name) {
                Some(&index) => positions.push(index),
                None => missing.push(name.to_string()),
            }
        }

        if !missing.is_empty() {
            return Err(SelectionError {
                missing,
                got: columns.to_vec(),
            }
            .into());
        }

        Ok(Self {
            positions,
            width: columns.len(),
        })
    }

    /// Result column index bound to each registry column, in registry order
    pub fn positions(&self) -> &[usize] {
        &self.positions
    }

    /// Builds one record from a result row
    ///
    /// Values at unbound positions are dropped without inspection.
    pub fn scan<R: Default + 'static>(
        &self,
        registry: &ColumnRegistry<R>,
        mut row: Vec<SqlValue>,
    ) -> Result<R> {
        if row.len() != self.width {
            return Err(EdflowError::Scan {
                column: "*".to_string(),
                message: format!(
                    "row has {} values but the result set has {} columns",
                    row.len(),
                    self.width
                ),
            });
        }

        let mut record = R::default();
        for (column, &position) in registry.columns().iter().zip(&self.positions) {
            let value = std::mem::take(&mut row[position]);
            column.assign(&mut record, value)?;
        }
        Ok(record)
    }
}
