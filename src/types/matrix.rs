use std::fmt;

use super::Key;

/// Result of evaluating a filter over a cell source: one boolean per cell,
/// aligned with the source's row and column order.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub struct BoolMatrix {
    row_keys: Vec<Key>,
    column_keys: Vec<Key>,
    /// Row-major.
    data: Vec<bool>,
}

impl BoolMatrix {
    pub(crate) fn new(row_keys: Vec<Key>, column_keys: Vec<Key>, data: Vec<bool>) -> Self {
        debug_assert_eq!(data.len(), row_keys.len() * column_keys.len());
        Self {
            row_keys,
            column_keys,
            data,
        }
    }

    /// `(rows, columns)`.
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        (self.row_keys.len(), self.column_keys.len())
    }

    #[must_use]
    pub fn row_keys(&self) -> &[Key] {
        &self.row_keys
    }

    #[must_use]
    pub fn column_keys(&self) -> &[Key] {
        &self.column_keys
    }

    /// The entry at a position, or `None` if out of range.
    #[must_use]
    pub fn get(&self, row: usize, column: usize) -> Option<bool> {
        if row >= self.row_keys.len() || column >= self.column_keys.len() {
            return None;
        }
        self.data.get(row * self.column_keys.len() + column).copied()
    }

    /// The entry for a `(row key, column key)` pair.
    #[must_use]
    pub fn get_by_key(&self, row: &Key, column: &Key) -> Option<bool> {
        let r = self.row_keys.iter().position(|k| k == row)?;
        let c = self.column_keys.iter().position(|k| k == column)?;
        self.get(r, c)
    }

    /// Number of `true` entries.
    #[must_use]
    pub fn count(&self) -> usize {
        self.data.iter().filter(|&&b| b).count()
    }

    #[must_use]
    pub fn any(&self) -> bool {
        self.data.iter().any(|&b| b)
    }

    #[must_use]
    pub fn all(&self) -> bool {
        self.data.iter().all(|&b| b)
    }

    /// Positions of `true` entries in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let width = self.column_keys.len();
        self.data
            .iter()
            .enumerate()
            .filter(|(_, b)| **b)
            .map(move |(i, _)| (i / width, i % width))
    }

    /// Nested rows, handy for comparing against literals.
    #[must_use]
    pub fn to_rows(&self) -> Vec<Vec<bool>> {
        let width = self.column_keys.len();
        if width == 0 {
            return vec![Vec::new(); self.row_keys.len()];
        }
        self.data.chunks(width).map(<[bool]>::to_vec).collect()
    }
}

impl fmt::Display for BoolMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (r, row) in self.to_rows().iter().enumerate() {
            if r > 0 {
                writeln!(f)?;
            }
            for (c, &b) in row.iter().enumerate() {
                if c > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{}", if b { '1' } else { '.' })?;
            }
        }
        Ok(())
    }
}
