use thiserror::Error;

use crate::parse::ParseError;
use crate::{FilterError, TableError};

/// Unified error type covering parsing, filter compilation and evaluation,
/// and table construction.
///
/// Returned by convenience methods like
/// [`Filter::from_dsl()`](crate::Filter::from_dsl).
#[derive(Debug, Error)]
pub enum PandatexError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Filter(#[from] FilterError),

    #[error(transparent)]
    Table(#[from] TableError),
}
