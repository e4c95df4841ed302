use std::borrow::Cow;
use std::fmt;

use super::condval::CondValue;
use super::error::FilterError;
use super::value::Value;

/// Right-hand side of a comparison leaf.
#[derive(Debug, Clone)]
pub enum Operand {
    /// A fixed scalar.
    Scalar(Value),
    /// A scalar recomputed from a group on every check.
    Lazy(CondValue),
}

impl Operand {
    /// The scalar to compare against right now.
    ///
    /// # Errors
    ///
    /// Propagates any error from resolving a lazy operand.
    pub fn resolve(&self) -> Result<Cow<'_, Value>, FilterError> {
        match self {
            Operand::Scalar(v) => Ok(Cow::Borrowed(v)),
            Operand::Lazy(cv) => cv.resolve().map(Cow::Owned),
        }
    }

    #[must_use]
    pub fn is_lazy(&self) -> bool {
        matches!(self, Operand::Lazy(_))
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Scalar(v) => write!(f, "{v}"),
            Operand::Lazy(cv) => write!(f, "{cv}"),
        }
    }
}

impl From<Value> for Operand {
    fn from(v: Value) -> Self {
        Operand::Scalar(v)
    }
}

impl From<i64> for Operand {
    fn from(v: i64) -> Self {
        Operand::Scalar(Value::Int(v))
    }
}

impl From<i32> for Operand {
    fn from(v: i32) -> Self {
        Operand::Scalar(Value::from(v))
    }
}

impl From<f64> for Operand {
    fn from(v: f64) -> Self {
        Operand::Scalar(Value::Float(v))
    }
}

impl From<bool> for Operand {
    fn from(v: bool) -> Self {
        Operand::Scalar(Value::Bool(v))
    }
}

impl From<&str> for Operand {
    fn from(v: &str) -> Self {
        Operand::Scalar(Value::from(v))
    }
}

impl From<String> for Operand {
    fn from(v: String) -> Self {
        Operand::Scalar(Value::String(v))
    }
}

impl From<CondValue> for Operand {
    fn from(cv: CondValue) -> Self {
        Operand::Lazy(cv)
    }
}

impl From<&CondValue> for Operand {
    fn from(cv: &CondValue) -> Self {
        Operand::Lazy(cv.clone())
    }
}
