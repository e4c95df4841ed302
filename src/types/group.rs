use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;

use super::error::FilterError;
use super::filter::Filter;
use super::table::SharedTable;
use super::value::Value;

/// A view over some subset of data that can report its current values.
///
/// Implementations must reflect the data as it is at call time; a
/// [`CondValue`](super::CondValue) calls this on every resolution.
pub trait Group: Send + Sync {
    /// # Errors
    ///
    /// Returns [`FilterError`] if the values cannot be produced.
    fn values(&self) -> Result<Vec<Value>, FilterError>;
}

/// A group over a fixed list of values.
#[derive(Debug, Clone, Default)]
pub struct StaticGroup {
    values: Vec<Value>,
}

impl StaticGroup {
    #[must_use]
    pub fn new(values: Vec<Value>) -> Self {
        Self { values }
    }
}

impl Group for StaticGroup {
    fn values(&self) -> Result<Vec<Value>, FilterError> {
        Ok(self.values.clone())
    }
}

/// A mutable list of values shared between clones.
///
/// Every clone observes writes made through any other clone, which makes
/// this the simplest way to feed live data into a [`CondValue`](super::CondValue).
#[derive(Debug, Clone, Default)]
pub struct SharedGroup {
    values: Arc<RwLock<Vec<Value>>>,
}

impl SharedGroup {
    #[must_use]
    pub fn new(values: Vec<Value>) -> Self {
        Self {
            values: Arc::new(RwLock::new(values)),
        }
    }

    /// Replace all values.
    pub fn set(&self, values: Vec<Value>) {
        *self.values.write() = values;
    }

    pub fn push(&self, value: Value) {
        self.values.write().push(value);
    }

    pub fn clear(&self) {
        self.values.write().clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.read().is_empty()
    }
}

impl Group for SharedGroup {
    fn values(&self) -> Result<Vec<Value>, FilterError> {
        Ok(self.values.read_recursive().clone())
    }
}

/// The values of every cell of a shared table matching a filter, in the
/// table's declared order.
///
/// Reads wait for the table lock indefinitely unless a
/// [`lock_timeout`](Self::lock_timeout) is set, in which case a writer holding
/// the lock for longer makes the read fail with
/// [`FilterError::GroupUnavailable`].
#[derive(Clone)]
pub struct TableGroup {
    table: SharedTable,
    filter: Filter,
    lock_timeout: Option<Duration>,
}

impl TableGroup {
    #[must_use]
    pub fn new(table: SharedTable, filter: Filter) -> Self {
        Self {
            table,
            filter,
            lock_timeout: None,
        }
    }

    /// Give up on a read after waiting `timeout` for the table lock.
    #[must_use]
    pub fn lock_timeout(mut self, timeout: Duration) -> Self {
        self.lock_timeout = Some(timeout);
        self
    }

    #[must_use]
    pub fn filter(&self) -> &Filter {
        &self.filter
    }
}

impl Group for TableGroup {
    fn values(&self) -> Result<Vec<Value>, FilterError> {
        // Recursive read: the table may already be read-locked by an
        // evaluation pass whose filter resolves this group.
        let table = match self.lock_timeout {
            None => self.table.read_recursive(),
            Some(timeout) => self.table.try_read_recursive_for(timeout).ok_or_else(|| {
                FilterError::GroupUnavailable {
                    reason: format!("table write-locked for more than {timeout:?}"),
                }
            })?,
        };
        table.mask_values(&self.filter)
    }
}

impl fmt::Debug for TableGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableGroup")
            .field("filter", &self.filter)
            .field("lock_timeout", &self.lock_timeout)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_group_returns_values() {
        let group = StaticGroup::new(vec![Value::Int(1), Value::Int(2)]);
        assert_eq!(group.values().unwrap(), vec![Value::Int(1), Value::Int(2)]);
    }

    #[test]
    fn shared_group_clones_observe_writes() {
        let group = SharedGroup::new(vec![Value::Int(1)]);
        let handle = group.clone();
        handle.push(Value::Int(5));
        assert_eq!(group.len(), 2);
        assert_eq!(group.values().unwrap(), vec![Value::Int(1), Value::Int(5)]);

        handle.set(vec![Value::Float(0.5)]);
        assert_eq!(group.values().unwrap(), vec![Value::Float(0.5)]);

        handle.clear();
        assert!(group.is_empty());
    }

    fn table() -> SharedTable {
        let frame = crate::Frame::new(["a", "b", "c"], vec![vec![Value::Int(1); 3]]).unwrap();
        crate::Table::new(frame, "a", "b", "c").unwrap().into_shared()
    }

    #[test]
    fn table_group_reads_matching_cells() {
        let group = TableGroup::new(table(), Filter::new().col("b"));
        assert_eq!(group.values().unwrap(), vec![Value::Int(1)]);
    }

    #[test]
    fn table_group_times_out_behind_writer() {
        let shared = table();
        let group = TableGroup::new(Arc::clone(&shared), Filter::new())
            .lock_timeout(Duration::from_millis(10));
        let guard = shared.write();
        let err = group.values().unwrap_err();
        assert!(matches!(err, FilterError::GroupUnavailable { .. }));
        assert!(err.to_string().starts_with("group values unavailable: table write-locked"));
        drop(guard);
        assert_eq!(group.values().unwrap().len(), 3);
    }
}
