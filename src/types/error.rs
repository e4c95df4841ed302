use thiserror::Error;

use super::expr::CompareOp;
use super::key::Key;

/// Errors raised while building or evaluating a [`Filter`](super::Filter).
#[derive(Debug, Error)]
pub enum FilterError {
    #[error("invalid rule: {reason}")]
    InvalidRule { reason: String },

    #[error("operator '{op}' cannot compare {target} against {operand}")]
    InvalidOperand {
        target: String,
        op: CompareOp,
        operand: String,
    },

    #[error(transparent)]
    Reduce(#[from] ReduceError),

    #[error("group values unavailable: {reason}")]
    GroupUnavailable { reason: String },

    #[error("cell ({row}, {column}) is outside the source")]
    CellOutOfBounds { row: usize, column: usize },

    #[error("failed to build evaluation thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Failures of a [`Reducer`](super::Reducer) applied to a group's values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ReduceError {
    #[error("cannot reduce an empty group")]
    EmptyGroup,

    #[error("cannot reduce non-numeric {found} value")]
    NonNumeric { found: &'static str },

    #[error("integer overflow while reducing")]
    Overflow,

    #[error("reducer failed: {message}")]
    Failed { message: String },
}

impl ReduceError {
    /// Failure raised by a custom reducer.
    pub fn failed(message: impl Into<String>) -> Self {
        ReduceError::Failed {
            message: message.into(),
        }
    }
}

/// The role a key set plays in a [`Table`](super::Table).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Columns,
    Index,
    Values,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Columns => write!(f, "columns"),
            Role::Index => write!(f, "indexes"),
            Role::Values => write!(f, "values"),
        }
    }
}

/// Errors raised while constructing or editing a [`Frame`](super::Frame) or
/// [`Table`](super::Table).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TableError {
    #[error("{role} cannot be empty")]
    EmptyRole { role: Role },

    #[error("all specified {role} must be present in the frame; {key} is missing")]
    MissingKey { role: Role, key: Key },

    #[error("{role} must be unique; {key} appears more than once")]
    DuplicateKey { role: Role, key: Key },

    #[error("{first} and {second} must not overlap; {key} appears in both")]
    OverlappingRoles { first: Role, second: Role, key: Key },

    #[error("row {row} has {actual} values, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("duplicate column {key}")]
    DuplicateColumn { key: Key },

    #[error("duplicate row key {key}")]
    DuplicateRowKey { key: Key },

    #[error("index has {actual} keys, frame has {expected} rows")]
    IndexLength { expected: usize, actual: usize },

    #[error("no column {key}")]
    UnknownColumn { key: Key },

    #[error("no row {key}")]
    UnknownRow { key: Key },
}
