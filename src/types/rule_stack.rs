use std::fmt;

use super::cell::Cell;
use super::error::FilterError;
use super::rule::Leaf;

/// How a [`RuleStack`] combines its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StackKind {
    And,
    Or,
}

impl StackKind {
    /// Result of a node of this kind with no children.
    #[must_use]
    pub fn identity(self) -> bool {
        match self {
            StackKind::And => true,
            StackKind::Or => false,
        }
    }
}

/// A child of a [`RuleStack`].
#[derive(Debug, Clone)]
pub enum RuleNode {
    Stack(RuleStack),
    Leaf(Leaf),
}

impl RuleNode {
    /// # Errors
    ///
    /// Propagates leaf evaluation errors.
    pub fn evaluate(&self, cell: &Cell<'_>) -> Result<bool, FilterError> {
        match self {
            RuleNode::Stack(stack) => stack.evaluate(cell),
            RuleNode::Leaf(leaf) => leaf.evaluate(cell),
        }
    }
}

impl From<RuleStack> for RuleNode {
    fn from(stack: RuleStack) -> Self {
        RuleNode::Stack(stack)
    }
}

impl From<Leaf> for RuleNode {
    fn from(leaf: Leaf) -> Self {
        RuleNode::Leaf(leaf)
    }
}

/// An AND or OR node over an ordered, append-only list of children.
///
/// The kind is fixed at construction. Evaluation visits every child, with no
/// short circuit, and reduces with `all` (AND) or `any` (OR). An empty AND
/// matches everything; an empty OR matches nothing.
#[derive(Debug, Clone)]
pub struct RuleStack {
    kind: StackKind,
    children: Vec<RuleNode>,
}

impl RuleStack {
    #[must_use]
    pub fn new(kind: StackKind) -> Self {
        Self {
            kind,
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn and() -> Self {
        Self::new(StackKind::And)
    }

    #[must_use]
    pub fn or() -> Self {
        Self::new(StackKind::Or)
    }

    /// Append a child and return the node, for chaining.
    #[must_use]
    pub fn add(mut self, child: impl Into<RuleNode>) -> Self {
        self.push(child);
        self
    }

    /// Append a child in place.
    pub fn push(&mut self, child: impl Into<RuleNode>) {
        self.children.push(child.into());
    }

    /// Evaluate every child against `cell` and combine the results.
    ///
    /// # Errors
    ///
    /// The first child error aborts the evaluation and is returned.
    pub fn evaluate(&self, cell: &Cell<'_>) -> Result<bool, FilterError> {
        if self.children.is_empty() {
            return Ok(self.kind.identity());
        }
        let results = self
            .children
            .iter()
            .map(|child| child.evaluate(cell))
            .collect::<Result<Vec<bool>, _>>()?;
        Ok(match self.kind {
            StackKind::And => results.iter().all(|&b| b),
            StackKind::Or => results.iter().any(|&b| b),
        })
    }

    #[must_use]
    pub fn kind(&self) -> StackKind {
        self.kind
    }

    #[must_use]
    pub fn children(&self) -> &[RuleNode] {
        &self.children
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.children.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Nesting depth: 1 for a node whose children are all leaves.
    #[must_use]
    pub fn depth(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(|child| match child {
                RuleNode::Stack(stack) => stack.depth(),
                RuleNode::Leaf(_) => 0,
            })
            .max()
            .unwrap_or(0)
    }

    /// Number of leaves in the whole subtree.
    #[must_use]
    pub fn leaf_count(&self) -> usize {
        self.children
            .iter()
            .map(|child| match child {
                RuleNode::Stack(stack) => stack.leaf_count(),
                RuleNode::Leaf(_) => 1,
            })
            .sum()
    }

    /// Visit every leaf mutably, depth first.
    pub(crate) fn for_each_leaf_mut<E>(
        &mut self,
        f: &mut impl FnMut(&mut Leaf) -> Result<(), E>,
    ) -> Result<(), E> {
        for child in &mut self.children {
            match child {
                RuleNode::Stack(stack) => stack.for_each_leaf_mut(f)?,
                RuleNode::Leaf(leaf) => f(leaf)?,
            }
        }
        Ok(())
    }
}

impl fmt::Display for RuleNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleNode::Stack(stack) => write!(f, "{stack}"),
            RuleNode::Leaf(leaf) => write!(f, "({leaf})"),
        }
    }
}

impl fmt::Display for RuleStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sep = match self.kind {
            StackKind::And => " and ",
            StackKind::Or => " or ",
        };
        match self.children.as_slice() {
            [] => write!(f, "{}", if self.kind.identity() { "all" } else { "none" }),
            [only] => write!(f, "{only}"),
            children => {
                write!(f, "(")?;
                for (i, child) in children.iter().enumerate() {
                    if i > 0 {
                        write!(f, "{sep}")?;
                    }
                    write!(f, "{child}")?;
                }
                write!(f, ")")
            }
        }
    }
}
