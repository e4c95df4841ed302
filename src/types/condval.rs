use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use super::error::{FilterError, ReduceError};
use super::group::Group;
use super::value::Value;

type ReduceFn = dyn Fn(&[Value]) -> Result<Value, ReduceError> + Send + Sync;

/// Reduction applied to a group's values to produce a single scalar.
///
/// `Min`, `Max`, `Mean`, `First` and `Last` fail with
/// [`ReduceError::EmptyGroup`] on empty input; `Count` and `Sum` return zero.
#[derive(Clone)]
pub enum Reducer {
    Min,
    Max,
    Sum,
    Mean,
    Count,
    First,
    Last,
    Custom(Arc<ReduceFn>),
}

impl Reducer {
    /// Wrap an arbitrary reduction function.
    pub fn custom(
        f: impl Fn(&[Value]) -> Result<Value, ReduceError> + Send + Sync + 'static,
    ) -> Self {
        Reducer::Custom(Arc::new(f))
    }

    /// Apply the reducer.
    ///
    /// # Errors
    ///
    /// Returns [`ReduceError`] when the input is empty (for reducers that need
    /// at least one value), contains non-numeric values for a numeric
    /// reduction, overflows, or when a custom reducer fails.
    pub fn apply(&self, values: &[Value]) -> Result<Value, ReduceError> {
        match self {
            Reducer::Min => extremum(values, Ordering::Less),
            Reducer::Max => extremum(values, Ordering::Greater),
            Reducer::Sum => sum(values),
            Reducer::Mean => mean(values),
            Reducer::Count => Ok(Value::Int(
                i64::try_from(values.len()).map_err(|_| ReduceError::Overflow)?,
            )),
            Reducer::First => values.first().cloned().ok_or(ReduceError::EmptyGroup),
            Reducer::Last => values.last().cloned().ok_or(ReduceError::EmptyGroup),
            Reducer::Custom(f) => f(values),
        }
    }
}

impl fmt::Debug for Reducer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Reducer::Min => "Min",
            Reducer::Max => "Max",
            Reducer::Sum => "Sum",
            Reducer::Mean => "Mean",
            Reducer::Count => "Count",
            Reducer::First => "First",
            Reducer::Last => "Last",
            Reducer::Custom(_) => "Custom",
        })
    }
}

fn numeric(value: &Value) -> Result<f64, ReduceError> {
    value.as_f64().ok_or(ReduceError::NonNumeric {
        found: value.type_name(),
    })
}

/// Keeps the original `Value` (and so its int/float type) of the winner.
///
/// Ints are compared exactly against ints. NaN entries never win unless every
/// entry is NaN, in which case the first one is returned. Ties keep the
/// earlier value.
fn extremum(values: &[Value], wanted: Ordering) -> Result<Value, ReduceError> {
    let (first, rest) = values.split_first().ok_or(ReduceError::EmptyGroup)?;
    numeric(first)?;
    let mut best = first;
    for value in rest {
        numeric(value)?;
        let replaces = match value.partial_cmp_value(best) {
            Some(ord) => ord == wanted,
            None => is_nan(best) && !is_nan(value),
        };
        if replaces {
            best = value;
        }
    }
    Ok(best.clone())
}

fn is_nan(value: &Value) -> bool {
    matches!(value, Value::Float(v) if v.is_nan())
}

#[allow(clippy::cast_precision_loss)]
fn sum(values: &[Value]) -> Result<Value, ReduceError> {
    let mut int_acc: i64 = 0;
    let mut float_acc: Option<f64> = None;
    for value in values {
        if let (Value::Int(v), None) = (value, float_acc) {
            int_acc = int_acc.checked_add(*v).ok_or(ReduceError::Overflow)?;
            continue;
        }
        let n = numeric(value)?;
        float_acc = Some(float_acc.unwrap_or(int_acc as f64) + n);
    }
    Ok(float_acc.map_or(Value::Int(int_acc), Value::Float))
}

#[allow(clippy::cast_precision_loss)]
fn mean(values: &[Value]) -> Result<Value, ReduceError> {
    if values.is_empty() {
        return Err(ReduceError::EmptyGroup);
    }
    let mut total = 0.0;
    for value in values {
        total += numeric(value)?;
    }
    Ok(Value::Float(total / values.len() as f64))
}

/// A scalar computed on demand from a group's current values.
///
/// Every call to [`resolve`](Self::resolve) re-reads the group, so filters
/// comparing against a `CondValue` always see the group's latest data.
/// Cloning is cheap and shares the group.
#[derive(Clone)]
pub struct CondValue {
    group: Arc<dyn Group>,
    reducer: Reducer,
}

impl CondValue {
    pub fn new(group: impl Group + 'static, reducer: Reducer) -> Self {
        Self {
            group: Arc::new(group),
            reducer,
        }
    }

    /// Build from a group that is already shared elsewhere.
    pub fn shared(group: Arc<dyn Group>, reducer: Reducer) -> Self {
        Self { group, reducer }
    }

    /// Reduce the group's current values.
    ///
    /// # Errors
    ///
    /// Propagates [`FilterError::Reduce`] from the reducer and any error the
    /// group raises while producing its values.
    pub fn resolve(&self) -> Result<Value, FilterError> {
        let values = self.group.values()?;
        Ok(self.reducer.apply(&values)?)
    }

    #[must_use]
    pub fn reducer(&self) -> &Reducer {
        &self.reducer
    }
}

impl fmt::Debug for CondValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CondValue")
            .field("reducer", &self.reducer)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for CondValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}(group)", self.reducer)
    }
}
