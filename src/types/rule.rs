use std::fmt;
use std::sync::Arc;

use super::cell::Cell;
use super::error::FilterError;
use super::expr::CompareOp;
use super::key::Key;
use super::operand::Operand;

type PredicateFn = dyn Fn(&Cell<'_>) -> bool + Send + Sync;

/// A caller-supplied cell predicate.
///
/// Rules must be pure: the same cell always yields the same answer. Cloning
/// shares the underlying closure.
#[derive(Clone)]
pub struct Rule {
    f: Arc<PredicateFn>,
}

impl Rule {
    pub fn new(f: impl Fn(&Cell<'_>) -> bool + Send + Sync + 'static) -> Self {
        Self { f: Arc::new(f) }
    }

    #[must_use]
    pub fn check(&self, cell: &Cell<'_>) -> bool {
        (self.f)(cell)
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Rule(..)")
    }
}

/// A terminal node of the predicate tree.
#[derive(Debug, Clone)]
pub enum Leaf {
    Predicate(Rule),
    /// Matches cells in the given column.
    Column(Key),
    /// Matches cells in the given row.
    Row(Key),
    /// Compares the cell value against an operand.
    Compare { op: CompareOp, operand: Operand },
}

impl Leaf {
    /// Evaluate this leaf against a cell.
    ///
    /// Incomparable values (mismatched types, NaN) never match, whatever the
    /// operator.
    ///
    /// # Errors
    ///
    /// Propagates errors from resolving a lazy operand.
    pub fn evaluate(&self, cell: &Cell<'_>) -> Result<bool, FilterError> {
        match self {
            Leaf::Predicate(rule) => Ok(rule.check(cell)),
            Leaf::Column(key) => Ok(cell.column == key),
            Leaf::Row(key) => Ok(cell.row == key),
            Leaf::Compare { op, operand } => {
                let rhs = operand.resolve()?;
                Ok(cell.value.compare(*op, &rhs).unwrap_or(false))
            }
        }
    }
}

impl fmt::Display for Leaf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Leaf::Predicate(_) => write!(f, "<rule>"),
            Leaf::Column(key) => write!(f, "col == {key}"),
            Leaf::Row(key) => write!(f, "row == {key}"),
            Leaf::Compare { op, operand } => write!(f, "value {op} {operand}"),
        }
    }
}
