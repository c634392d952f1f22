use std::fmt::Display;

use crate::ast::{Expression, Node, Scalar};

/// Canonical rendering: binary nodes are always parenthesised as `(left op right)`, unary
/// nodes print as `name(operand)`. Simplification compares these strings, so the format
/// is part of the behaviour and not only presentation.
impl<T: Scalar> Display for Expression<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.node() {
            Node::Value(value) => f.write_str(&value.render()),
            Node::Var { name } => f.write_str(name),
            Node::Binary { op, left, right } => {
                write!(f, "({left} {} {right})", op.symbol())
            }
            Node::Unary { op, operand } => write!(f, "{}({operand})", op.name()),
        }
    }
}
