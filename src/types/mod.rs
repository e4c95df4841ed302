mod cell;
mod condval;
mod error;
mod expr;
mod filter;
mod frame;
mod group;
mod key;
mod matrix;
mod operand;
mod options;
mod rule;
mod rule_stack;
mod source;
mod table;
mod value;

pub use cell::Cell;
pub use condval::{CondValue, Reducer};
pub use error::{FilterError, ReduceError, Role, TableError};
pub use expr::{CompareOp, Expr};
pub use filter::Filter;
pub use frame::Frame;
pub use group::{Group, SharedGroup, StaticGroup, TableGroup};
pub use key::Key;
pub use matrix::BoolMatrix;
pub use operand::Operand;
pub use options::EvalOptions;
pub use rule::{Leaf, Rule};
pub use rule_stack::{RuleNode, RuleStack, StackKind};
pub use source::CellSource;
pub use table::{KeySet, SharedTable, Table};
pub use value::Value;
