//! Structural result rows.
//!
//! # Responsibility
//! - Carry one query result row as an ordered column-name to value map.
//!
//! # Invariants
//! - Column order matches the statement's result order.
//! - A null-filled row has the statement's exact column shape.

use rusqlite::types::Value;

/// One result row: an ordered mapping from column name to value.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    columns: Vec<String>,
    values: Vec<Value>,
}

impl Row {
    /// Copies every column of a driver row into an owned `Row`.
    pub(crate) fn read(
        columns: &[String],
        row: &rusqlite::Row<'_>,
    ) -> Result<Self, rusqlite::Error> {
        let mut values = Vec::with_capacity(columns.len());
        for index in 0..columns.len() {
            values.push(row.get::<_, Value>(index)?);
        }
        Ok(Self {
            columns: columns.to_vec(),
            values,
        })
    }

    /// Builds a row with every column explicitly `Null`, used by the
    /// fill-nulls variant of the single/unique row reads.
    pub(crate) fn null_filled(columns: &[String]) -> Self {
        Self {
            columns: columns.to_vec(),
            values: vec![Value::Null; columns.len()],
        }
    }

    /// Looks a value up by column name.
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.columns
            .iter()
            .position(|name| name == column)
            .map(|index| &self.values[index])
    }

    /// Looks a value up by 0-based result position.
    pub fn get_index(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
