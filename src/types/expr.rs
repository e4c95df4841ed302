use std::fmt;

use super::{Key, Value};

/// Comparison operators supported by filter leaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    Neq,
    Gt,
    Gte,
    Lt,
    Lte,
}

impl CompareOp {
    /// `true` for `<`, `<=`, `>` and `>=`.
    #[must_use]
    pub fn is_ordering(self) -> bool {
        matches!(
            self,
            CompareOp::Gt | CompareOp::Gte | CompareOp::Lt | CompareOp::Lte
        )
    }
}

/// Filter expression as written in the text form.
///
/// Attribute names are kept as strings and validated when the expression is
/// compiled into a [`Filter`](super::Filter).
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Compare {
        attr: String,
        op: CompareOp,
        value: Value,
    },
    /// Comparison against a composite key, written `("a", 1)`.
    CompareKey {
        attr: String,
        op: CompareOp,
        key: Key,
    },
    And(Vec<Expr>),
    Or(Vec<Expr>),
    /// Matches every cell.
    All,
    /// Matches no cell.
    None,
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompareOp::Eq => write!(f, "=="),
            CompareOp::Neq => write!(f, "!="),
            CompareOp::Gt => write!(f, ">"),
            CompareOp::Gte => write!(f, ">="),
            CompareOp::Lt => write!(f, "<"),
            CompareOp::Lte => write!(f, "<="),
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Compare { attr, op, value } => write!(f, "({attr} {op} {value})"),
            Expr::CompareKey { attr, op, key } => write!(f, "({attr} {op} {key})"),
            Expr::And(items) => write_joined(f, items, " and "),
            Expr::Or(items) => write_joined(f, items, " or "),
            Expr::All => write!(f, "all"),
            Expr::None => write!(f, "none"),
        }
    }
}

fn write_joined(f: &mut fmt::Formatter<'_>, items: &[Expr], sep: &str) -> fmt::Result {
    write!(f, "(")?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, "{sep}")?;
        }
        write!(f, "{item}")?;
    }
    write!(f, ")")
}

impl Expr {
    #[must_use]
    pub fn compare(attr: &str, op: CompareOp, value: impl Into<Value>) -> Expr {
        Expr::Compare {
            attr: attr.to_owned(),
            op,
            value: value.into(),
        }
    }

    /// Conjunction, flattening nested `And`s on the left.
    #[must_use]
    pub fn and(self, other: Expr) -> Expr {
        match self {
            Expr::And(mut items) => {
                items.push(other);
                Expr::And(items)
            }
            first => Expr::And(vec![first, other]),
        }
    }

    /// Disjunction, flattening nested `Or`s on the left.
    #[must_use]
    pub fn or(self, other: Expr) -> Expr {
        match self {
            Expr::Or(mut items) => {
                items.push(other);
                Expr::Or(items)
            }
            first => Expr::Or(vec![first, other]),
        }
    }
}
