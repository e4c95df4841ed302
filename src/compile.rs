use crate::logging::pandatex_log;
use crate::{
    CompareOp, Expr, Filter, FilterError, Key, Leaf, Operand, Rule, RuleNode, RuleStack,
    StackKind, Value,
};

/// Lower a parsed expression into a filter.
///
/// `all` becomes an empty AND and `none` an empty OR. A root that is not
/// already an AND node is wrapped in one.
pub(crate) fn compile(expr: &Expr) -> Result<Filter, FilterError> {
    let root = match compile_node(expr)? {
        RuleNode::Stack(stack) if stack.kind() == StackKind::And => stack,
        other => RuleStack::and().add(other),
    };
    pandatex_log!(
        log::Level::Debug,
        "filter_compiled",
        "depth={} leaves={}",
        root.depth(),
        root.leaf_count(),
    );
    Ok(Filter::from_root(root))
}

fn compile_node(expr: &Expr) -> Result<RuleNode, FilterError> {
    match expr {
        Expr::Compare { attr, op, value } => compile_compare(attr, *op, value).map(RuleNode::Leaf),
        Expr::CompareKey { attr, op, key } => {
            compile_key_compare(attr, *op, key.clone()).map(RuleNode::Leaf)
        }
        Expr::And(items) => compile_stack(RuleStack::and(), items),
        Expr::Or(items) => compile_stack(RuleStack::or(), items),
        Expr::All => Ok(RuleStack::and().into()),
        Expr::None => Ok(RuleStack::or().into()),
    }
}

fn compile_stack(mut stack: RuleStack, items: &[Expr]) -> Result<RuleNode, FilterError> {
    for item in items {
        stack.push(compile_node(item)?);
    }
    Ok(stack.into())
}

fn compile_compare(attr: &str, op: CompareOp, value: &Value) -> Result<Leaf, FilterError> {
    match attr {
        "value" => Ok(Leaf::Compare {
            op,
            operand: Operand::Scalar(value.clone()),
        }),
        "col" | "row" => key_operand(attr, op, value).and_then(|key| key_leaf(attr, op, key)),
        other => Err(unknown_attribute(other)),
    }
}

fn compile_key_compare(attr: &str, op: CompareOp, key: Key) -> Result<Leaf, FilterError> {
    match attr {
        "col" | "row" => key_leaf(attr, op, key),
        "value" => Err(FilterError::InvalidOperand {
            target: attr.to_owned(),
            op,
            operand: key.to_string(),
        }),
        other => Err(unknown_attribute(other)),
    }
}

fn unknown_attribute(attr: &str) -> FilterError {
    FilterError::InvalidRule {
        reason: format!("unknown cell attribute '{attr}'"),
    }
}

fn key_leaf(attr: &str, op: CompareOp, key: Key) -> Result<Leaf, FilterError> {
    if op.is_ordering() {
        return Err(FilterError::InvalidOperand {
            target: attr.to_owned(),
            op,
            operand: key.to_string(),
        });
    }
    let is_col = attr == "col";
    Ok(match (op, is_col) {
        (CompareOp::Eq, true) => Leaf::Column(key),
        (CompareOp::Eq, false) => Leaf::Row(key),
        (_, true) => Leaf::Predicate(Rule::new(move |cell| cell.column != &key)),
        (_, false) => Leaf::Predicate(Rule::new(move |cell| cell.row != &key)),
    })
}

/// Keys are matched by equality only, and only ints and strings name them.
fn key_operand(attr: &str, op: CompareOp, value: &Value) -> Result<Key, FilterError> {
    let invalid = || FilterError::InvalidOperand {
        target: attr.to_owned(),
        op,
        operand: value.to_string(),
    };
    if op.is_ordering() {
        return Err(invalid());
    }
    match value {
        Value::Int(i) => Ok(Key::Int(*i)),
        Value::String(s) => Ok(Key::Str(s.clone())),
        Value::Float(_) | Value::Bool(_) => Err(invalid()),
    }
}
