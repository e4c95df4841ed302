use std::fmt;
use std::ops::{BitAnd, BitOr};

use super::cell::Cell;
use super::error::FilterError;
use super::expr::CompareOp;
use super::key::Key;
use super::matrix::BoolMatrix;
use super::operand::Operand;
use super::options::EvalOptions;
use super::rule::{Leaf, Rule};
use super::rule_stack::{RuleStack, StackKind};
use super::source::CellSource;
use crate::logging::pandatex_log;

/// A composable predicate over table cells.
///
/// A new filter matches every cell. Leaf builders ([`rule`](Self::rule),
/// [`col`](Self::col), [`row`](Self::row) and the comparisons) append to this
/// filter's root and hand it back. Combinators ([`and`](Self::and),
/// [`or`](Self::or), `&`, `|`) leave their inputs untouched and return a new
/// filter built from copies of both trees, so a filter can be reused in many
/// combinations and edited afterwards without affecting them.
///
/// # Example
///
/// ```
/// use pandatex::{Filter, Frame, Value};
///
/// let frame = Frame::new(
///     ["a", "b"],
///     vec![
///         vec![Value::Int(1), Value::Int(2)],
///         vec![Value::Int(3), Value::Int(4)],
///     ],
/// )
/// .unwrap();
///
/// let small = Filter::new().lt(3_i64);
/// let in_b = Filter::new().col("b");
/// let matrix = (small & in_b).evaluate(&frame).unwrap();
/// assert_eq!(matrix.to_rows(), vec![vec![false, true], vec![false, false]]);
/// ```
#[derive(Debug, Clone)]
pub struct Filter {
    root: RuleStack,
}

impl Default for Filter {
    fn default() -> Self {
        Self {
            root: RuleStack::and(),
        }
    }
}

impl Filter {
    /// A filter that matches every cell.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A filter with the given tree as its root.
    #[must_use]
    pub fn from_root(root: RuleStack) -> Self {
        Self { root }
    }

    /// Parse the text form of a filter.
    ///
    /// ```
    /// use pandatex::Filter;
    ///
    /// let f = Filter::from_dsl(r#"value >= 10 and (col == "a" or row == 3)"#).unwrap();
    /// assert_eq!(f.root().leaf_count(), 3);
    ///
    /// // composite keys are parenthesised tuples
    /// let g = Filter::from_dsl(r#"col == ("x", 1) and value < 2.5e3"#).unwrap();
    /// assert_eq!(g.root().leaf_count(), 2);
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`PandatexError`](crate::PandatexError) on a syntax error, an
    /// unknown cell attribute or an operand the attribute cannot be compared
    /// against.
    pub fn from_dsl(input: &str) -> Result<Self, crate::PandatexError> {
        let expr = crate::parse::parse(input)?;
        Ok(crate::compile::compile(&expr)?)
    }

    #[must_use]
    pub fn root(&self) -> &RuleStack {
        &self.root
    }

    /// Whether `cell` satisfies this filter.
    ///
    /// # Errors
    ///
    /// Propagates errors from resolving lazy operands.
    pub fn matches(&self, cell: &Cell<'_>) -> Result<bool, FilterError> {
        self.root.evaluate(cell)
    }

    /// Append any leaf in place.
    pub fn insert(&mut self, leaf: Leaf) -> &mut Self {
        self.root.push(leaf);
        self
    }

    /// Append a custom predicate.
    #[must_use]
    pub fn rule(self, f: impl Fn(&Cell<'_>) -> bool + Send + Sync + 'static) -> Self {
        self.rule_opt(Some(Rule::new(f)))
    }

    /// Append a predicate if there is one; `None` leaves the filter unchanged.
    #[must_use]
    pub fn rule_opt(mut self, rule: Option<Rule>) -> Self {
        if let Some(rule) = rule {
            self.insert(Leaf::Predicate(rule));
        }
        self
    }

    /// Only cells in column `key`.
    #[must_use]
    pub fn col(mut self, key: impl Into<Key>) -> Self {
        self.insert(Leaf::Column(key.into()));
        self
    }

    /// Only cells in row `key`.
    #[must_use]
    pub fn row(mut self, key: impl Into<Key>) -> Self {
        self.insert(Leaf::Row(key.into()));
        self
    }

    /// Append a comparison of the cell value against `operand`.
    #[must_use]
    pub fn compare(mut self, op: CompareOp, operand: impl Into<Operand>) -> Self {
        self.insert(Leaf::Compare {
            op,
            operand: operand.into(),
        });
        self
    }

    /// Cell value `<` operand.
    #[must_use]
    pub fn lt(self, operand: impl Into<Operand>) -> Self {
        self.compare(CompareOp::Lt, operand)
    }

    /// Cell value `<=` operand.
    #[must_use]
    pub fn le(self, operand: impl Into<Operand>) -> Self {
        self.compare(CompareOp::Lte, operand)
    }

    /// Cell value `>` operand.
    #[must_use]
    pub fn gt(self, operand: impl Into<Operand>) -> Self {
        self.compare(CompareOp::Gt, operand)
    }

    /// Cell value `>=` operand.
    #[must_use]
    pub fn ge(self, operand: impl Into<Operand>) -> Self {
        self.compare(CompareOp::Gte, operand)
    }

    /// Cell value `==` operand.
    #[must_use]
    pub fn eq(self, operand: impl Into<Operand>) -> Self {
        self.compare(CompareOp::Eq, operand)
    }

    /// Cell value `!=` operand.
    #[must_use]
    pub fn ne(self, operand: impl Into<Operand>) -> Self {
        self.compare(CompareOp::Neq, operand)
    }

    /// A new filter matching cells that satisfy both `self` and `other`.
    #[must_use]
    pub fn and(&self, other: &Filter) -> Filter {
        Filter {
            root: RuleStack::and()
                .add(self.root.clone())
                .add(other.root.clone()),
        }
    }

    /// A new filter matching cells that satisfy `self` or `other`.
    ///
    /// The root stays an AND node (wrapping the OR) so the result composes
    /// with further leaf builders the same way as any other filter.
    #[must_use]
    pub fn or(&self, other: &Filter) -> Filter {
        Filter {
            root: RuleStack::and().add(
                RuleStack::or()
                    .add(self.root.clone())
                    .add(other.root.clone()),
            ),
        }
    }

    /// A copy of this filter with every lazy operand resolved to a scalar.
    ///
    /// Evaluating the copy reads each group once, here, instead of once per
    /// cell.
    ///
    /// # Errors
    ///
    /// Propagates the first resolution error.
    pub fn resolved(&self) -> Result<Filter, FilterError> {
        let mut out = self.clone();
        let mut hoisted = 0_usize;
        out.root.for_each_leaf_mut(&mut |leaf| {
            if let Leaf::Compare { operand, .. } = leaf {
                if operand.is_lazy() {
                    *operand = Operand::Scalar(operand.resolve()?.into_owned());
                    hoisted += 1;
                }
            }
            Ok::<(), FilterError>(())
        })?;
        pandatex_log!(
            log::Level::Debug,
            "filter_resolved",
            "hoisted_operands={}",
            hoisted,
        );
        Ok(out)
    }

    /// Evaluate against every cell of `source`.
    ///
    /// # Errors
    ///
    /// Returns the first [`FilterError`] raised by any cell.
    pub fn evaluate<S: CellSource + ?Sized>(&self, source: &S) -> Result<BoolMatrix, FilterError> {
        crate::evaluate::evaluate(source, self, &EvalOptions::default())
    }

    /// Evaluate against every cell of `source` with explicit options.
    ///
    /// # Errors
    ///
    /// Returns the first [`FilterError`] raised by any cell, or
    /// [`FilterError::ThreadPool`] if a dedicated pool cannot be built.
    pub fn evaluate_with<S: CellSource + ?Sized>(
        &self,
        source: &S,
        options: &EvalOptions,
    ) -> Result<BoolMatrix, FilterError> {
        crate::evaluate::evaluate(source, self, options)
    }

    /// Whether the root is an AND node with no children.
    #[must_use]
    pub fn is_match_all(&self) -> bool {
        self.root.kind() == StackKind::And && self.root.is_empty()
    }
}

impl From<RuleStack> for Filter {
    fn from(root: RuleStack) -> Self {
        Self::from_root(root)
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.root)
    }
}

impl BitAnd for Filter {
    type Output = Filter;

    fn bitand(self, rhs: Filter) -> Filter {
        Filter {
            root: RuleStack::and().add(self.root).add(rhs.root),
        }
    }
}

impl BitAnd<&Filter> for &Filter {
    type Output = Filter;

    fn bitand(self, rhs: &Filter) -> Filter {
        self.and(rhs)
    }
}

impl BitOr for Filter {
    type Output = Filter;

    fn bitor(self, rhs: Filter) -> Filter {
        Filter {
            root: RuleStack::and().add(RuleStack::or().add(self.root).add(rhs.root)),
        }
    }
}

impl BitOr<&Filter> for &Filter {
    type Output = Filter;

    fn bitor(self, rhs: &Filter) -> Filter {
        self.or(rhs)
    }
}
