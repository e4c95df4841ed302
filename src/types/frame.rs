use std::collections::HashSet;

use super::error::TableError;
use super::source::CellSource;
use super::{Key, Value};

/// Row-major, in-memory grid of values with named columns and a row index.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    columns: Vec<Key>,
    index: Vec<Key>,
    data: Vec<Value>,
}

impl Frame {
    /// Build a frame from column names and rows. The row index defaults to
    /// `0..rows`.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::DuplicateColumn`] if a column name repeats, or
    /// [`TableError::RaggedRow`] if a row's length differs from the column count.
    #[allow(clippy::cast_possible_wrap)]
    pub fn new<K: Into<Key>>(
        columns: impl IntoIterator<Item = K>,
        rows: Vec<Vec<Value>>,
    ) -> Result<Self, TableError> {
        let columns: Vec<Key> = columns.into_iter().map(Into::into).collect();
        if let Some(key) = first_duplicate(&columns) {
            return Err(TableError::DuplicateColumn { key });
        }

        let width = columns.len();
        let mut data = Vec::with_capacity(rows.len() * width);
        for (i, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(TableError::RaggedRow {
                    row: i,
                    expected: width,
                    actual: row.len(),
                });
            }
        }
        let height = rows.len();
        for row in rows {
            data.extend(row);
        }

        Ok(Self {
            columns,
            index: (0..height).map(|i| Key::Int(i as i64)).collect(),
            data,
        })
    }

    /// Replace the row index.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::IndexLength`] if the key count differs from the
    /// row count, or [`TableError::DuplicateRowKey`] on a repeated key.
    pub fn with_index<K: Into<Key>>(
        mut self,
        index: impl IntoIterator<Item = K>,
    ) -> Result<Self, TableError> {
        let index: Vec<Key> = index.into_iter().map(Into::into).collect();
        if index.len() != self.index.len() {
            return Err(TableError::IndexLength {
                expected: self.index.len(),
                actual: index.len(),
            });
        }
        if let Some(key) = first_duplicate(&index) {
            return Err(TableError::DuplicateRowKey { key });
        }
        self.index = index;
        Ok(self)
    }

    #[must_use]
    pub fn columns(&self) -> &[Key] {
        &self.columns
    }

    #[must_use]
    pub fn index(&self) -> &[Key] {
        &self.index
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.index.len()
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    #[must_use]
    pub fn column_position(&self, key: &Key) -> Option<usize> {
        self.columns.iter().position(|k| k == key)
    }

    #[must_use]
    pub fn row_position(&self, key: &Key) -> Option<usize> {
        self.index.iter().position(|k| k == key)
    }

    #[must_use]
    pub fn get(&self, row: usize, column: usize) -> Option<&Value> {
        if row >= self.height() || column >= self.width() {
            return None;
        }
        self.data.get(row * self.width() + column)
    }

    /// The value at `(column key, row key)`.
    #[must_use]
    pub fn value(&self, column: &Key, row: &Key) -> Option<&Value> {
        self.get(self.row_position(row)?, self.column_position(column)?)
    }

    /// Overwrite the value at `(column key, row key)`.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::UnknownColumn`] or [`TableError::UnknownRow`] if
    /// either key is absent.
    pub fn set(&mut self, column: &Key, row: &Key, value: Value) -> Result<(), TableError> {
        let c = self
            .column_position(column)
            .ok_or_else(|| TableError::UnknownColumn { key: column.clone() })?;
        let r = self
            .row_position(row)
            .ok_or_else(|| TableError::UnknownRow { key: row.clone() })?;
        let width = self.width();
        self.data[r * width + c] = value;
        Ok(())
    }

    /// All values of one column, top to bottom.
    #[must_use]
    pub fn column(&self, key: &Key) -> Option<Vec<&Value>> {
        let c = self.column_position(key)?;
        Some(
            (0..self.height())
                .filter_map(|r| self.get(r, c))
                .collect(),
        )
    }
}

impl CellSource for Frame {
    fn column_keys(&self) -> &[Key] {
        &self.columns
    }

    fn row_keys(&self) -> &[Key] {
        &self.index
    }

    fn value_at(&self, row: usize, column: usize) -> Option<&Value> {
        self.get(row, column)
    }
}

fn first_duplicate(keys: &[Key]) -> Option<Key> {
    let mut seen = HashSet::new();
    keys.iter().find(|k| !seen.insert(*k)).cloned()
}
