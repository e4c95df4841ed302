use super::{Key, Value};

/// A rectangular grid of cells a [`Filter`](super::Filter) can be evaluated
/// against.
///
/// Rows and columns are addressed by position; `row_keys` and `column_keys`
/// give the declared order and the key of each position.
pub trait CellSource: Sync {
    fn column_keys(&self) -> &[Key];

    fn row_keys(&self) -> &[Key];

    /// The value at a position, or `None` if out of range.
    fn value_at(&self, row: usize, column: usize) -> Option<&Value>;

    /// `(rows, columns)`.
    fn shape(&self) -> (usize, usize) {
        (self.row_keys().len(), self.column_keys().len())
    }
}
