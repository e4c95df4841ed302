mod compile;
mod error;
mod evaluate;
mod logging;
pub mod parse;
mod types;

pub use error::PandatexError;
pub use parse::ParseError;
pub use types::{
    BoolMatrix, Cell, CellSource, CompareOp, CondValue, EvalOptions, Expr, Filter, FilterError,
    Frame, Group, Key, KeySet, Leaf, Operand, ReduceError, Reducer, Role, Rule, RuleNode,
    RuleStack, SharedGroup, SharedTable, StackKind, StaticGroup, Table, TableError, TableGroup,
    Value,
};
