use std::sync::Arc;

use parking_lot::RwLock;

use super::error::{FilterError, Role, TableError};
use super::filter::Filter;
use super::frame::Frame;
use super::matrix::BoolMatrix;
use super::options::EvalOptions;
use super::source::CellSource;
use super::{Cell, Key, Value};
use crate::logging::pandatex_log;

/// A table behind a lock, shareable with [`TableGroup`](super::TableGroup)s.
pub type SharedTable = Arc<RwLock<Table>>;

/// One or more keys naming a role in a [`Table`].
///
/// Converts from a single name or from any list of keys, so both
/// `"c"` and `["a", "b"]` are accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeySet(Vec<Key>);

impl KeySet {
    #[must_use]
    pub fn keys(&self) -> &[Key] {
        &self.0
    }
}

impl From<&str> for KeySet {
    fn from(v: &str) -> Self {
        KeySet(vec![Key::from(v)])
    }
}

impl From<String> for KeySet {
    fn from(v: String) -> Self {
        KeySet(vec![Key::from(v)])
    }
}

impl From<Key> for KeySet {
    fn from(v: Key) -> Self {
        KeySet(vec![v])
    }
}

impl<K: Into<Key>> From<Vec<K>> for KeySet {
    fn from(v: Vec<K>) -> Self {
        KeySet(v.into_iter().map(Into::into).collect())
    }
}

impl<K: Into<Key>, const N: usize> From<[K; N]> for KeySet {
    fn from(v: [K; N]) -> Self {
        KeySet(v.into_iter().map(Into::into).collect())
    }
}

/// A [`Frame`] together with disjoint column, index and value key sets.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    frame: Frame,
    columns: Vec<Key>,
    index: Vec<Key>,
    values: Vec<Key>,
}

impl Table {
    /// Validate the role key sets against `frame`.
    ///
    /// Checks, in order: no role is empty; every key of every role names a
    /// frame column; no role repeats a key; no key belongs to two roles.
    ///
    /// # Errors
    ///
    /// Returns the first [`TableError`] found.
    pub fn new(
        frame: Frame,
        columns: impl Into<KeySet>,
        index: impl Into<KeySet>,
        values: impl Into<KeySet>,
    ) -> Result<Self, TableError> {
        let roles = [
            (Role::Columns, columns.into().0),
            (Role::Index, index.into().0),
            (Role::Values, values.into().0),
        ];

        for (role, keys) in &roles {
            if keys.is_empty() {
                return Err(TableError::EmptyRole { role: *role });
            }
        }
        for (role, keys) in &roles {
            if let Some(key) = keys.iter().find(|k| frame.column_position(k).is_none()) {
                return Err(TableError::MissingKey {
                    role: *role,
                    key: key.clone(),
                });
            }
        }
        for (role, keys) in &roles {
            for (i, key) in keys.iter().enumerate() {
                if keys[..i].contains(key) {
                    return Err(TableError::DuplicateKey {
                        role: *role,
                        key: key.clone(),
                    });
                }
            }
        }
        for (i, (first, first_keys)) in roles.iter().enumerate() {
            for (second, second_keys) in &roles[i + 1..] {
                if let Some(key) = first_keys.iter().find(|k| second_keys.contains(k)) {
                    return Err(TableError::OverlappingRoles {
                        first: *first,
                        second: *second,
                        key: key.clone(),
                    });
                }
            }
        }

        let [(_, columns), (_, index), (_, values)] = roles;
        pandatex_log!(
            log::Level::Debug,
            "table_created",
            "rows={} columns={} column_keys={} index_keys={} value_keys={}",
            frame.height(),
            frame.width(),
            columns.len(),
            index.len(),
            values.len(),
        );
        Ok(Self {
            frame,
            columns,
            index,
            values,
        })
    }

    /// Wrap in a lock for sharing with groups.
    #[must_use]
    pub fn into_shared(self) -> SharedTable {
        Arc::new(RwLock::new(self))
    }

    #[must_use]
    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    /// Keys playing the column role.
    #[must_use]
    pub fn columns(&self) -> &[Key] {
        &self.columns
    }

    /// Keys playing the index role.
    #[must_use]
    pub fn index(&self) -> &[Key] {
        &self.index
    }

    /// Keys playing the value role.
    #[must_use]
    pub fn values(&self) -> &[Key] {
        &self.values
    }

    /// The raw value at `(column, row)`.
    #[must_use]
    pub fn value_at(&self, column: &Key, row: &Key) -> Option<&Value> {
        self.frame.value(column, row)
    }

    /// Overwrite the value at `(column, row)`.
    ///
    /// # Errors
    ///
    /// Returns [`TableError`] if either key is absent.
    pub fn set_value(&mut self, column: &Key, row: &Key, value: Value) -> Result<(), TableError> {
        self.frame.set(column, row, value)
    }

    /// A fresh filter over this table's cells, matching all of them.
    #[must_use]
    pub fn each(&self) -> Filter {
        Filter::new()
    }

    /// Evaluate `filter` over every cell.
    ///
    /// # Errors
    ///
    /// Returns the first [`FilterError`] raised by any cell.
    pub fn indexer(&self, filter: &Filter) -> Result<BoolMatrix, FilterError> {
        filter.evaluate(self)
    }

    /// Evaluate `filter` over every cell with explicit options.
    ///
    /// # Errors
    ///
    /// Returns the first [`FilterError`] raised by any cell.
    pub fn indexer_with(
        &self,
        filter: &Filter,
        options: &EvalOptions,
    ) -> Result<BoolMatrix, FilterError> {
        filter.evaluate_with(self, options)
    }

    /// Values of the cells matching `filter`, in row-major declared order.
    ///
    /// # Errors
    ///
    /// Returns the first [`FilterError`] raised by any cell.
    pub fn mask_values(&self, filter: &Filter) -> Result<Vec<Value>, FilterError> {
        let mut out = Vec::new();
        for (r, row) in self.frame.index().iter().enumerate() {
            for (c, column) in self.frame.columns().iter().enumerate() {
                let value = self
                    .frame
                    .get(r, c)
                    .ok_or(FilterError::CellOutOfBounds { row: r, column: c })?;
                if filter.matches(&Cell::new(value, column, row))? {
                    out.push(value.clone());
                }
            }
        }
        Ok(out)
    }
}

impl CellSource for Table {
    fn column_keys(&self) -> &[Key] {
        self.frame.columns()
    }

    fn row_keys(&self) -> &[Key] {
        self.frame.index()
    }

    fn value_at(&self, row: usize, column: usize) -> Option<&Value> {
        self.frame.get(row, column)
    }
}
