use super::{Key, Value};

/// One table cell as seen by a rule: its value plus the keys locating it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell<'a> {
    pub value: &'a Value,
    pub column: &'a Key,
    pub row: &'a Key,
}

impl<'a> Cell<'a> {
    #[must_use]
    pub fn new(value: &'a Value, column: &'a Key, row: &'a Key) -> Self {
        Self { value, column, row }
    }
}
