//! Single bottom-up rewrite pass over local algebraic identities.
//!
//! Children are simplified before their parent is inspected, and the pass runs exactly
//! once; it does not iterate to a normal form. An operand counts as zero or one only when
//! its canonical rendering is literally `"0"` or `"1"`. Trees such as `(5 - 5)` are
//! therefore not recognised as zero, and complex constants never match because they
//! render as `"(re + imi)"`.

use crate::ast::{BinaryOp, Expression, Node, Scalar};

fn renders_as<T: Scalar>(exp: &Expression<T>, text: &str) -> bool {
    exp.to_string() == text
}

fn is_zero<T: Scalar>(exp: &Expression<T>) -> bool {
    renders_as(exp, "0")
}

fn is_one<T: Scalar>(exp: &Expression<T>) -> bool {
    renders_as(exp, "1")
}

impl<T: Scalar> Expression<T> {
    /// Returns a new tree with the identities `0+e`, `e+0`, `e-0`, `0*e`, `e*0`, `1*e`,
    /// `e*1`, `0/e`, `e/1`, `e^0` and `0^e` rewritten. The root of the result is always a
    /// freshly built node, even when no identity applies.
    #[must_use]
    pub fn simplify(&self) -> Self {
        match self.node() {
            Node::Value(_) | Node::Var { .. } => self.map_children(Self::simplify),
            Node::Binary { op, left, right } => {
                simplify_binary(*op, left.simplify(), right.simplify())
            }
            Node::Unary { op, operand } => Self::unary(*op, operand.simplify()),
        }
    }
}

fn simplify_binary<T: Scalar>(
    op: BinaryOp,
    left: Expression<T>,
    right: Expression<T>,
) -> Expression<T> {
    use BinaryOp::*;
    let rewritten = match op {
        Add if is_zero(&left) => Some(right.clone()),
        Add if is_zero(&right) => Some(left.clone()),
        Sub if is_zero(&right) => Some(left.clone()),
        Mul if is_zero(&left) || is_zero(&right) => Some(Expression::zero()),
        Mul if is_one(&left) => Some(right.clone()),
        Mul if is_one(&right) => Some(left.clone()),
        Div if is_zero(&left) => Some(Expression::zero()),
        Div if is_one(&right) => Some(left.clone()),
        Pow if is_zero(&right) => Some(Expression::one()),
        Pow if is_zero(&left) => Some(Expression::zero()),
        _ => None,
    };

    match rewritten {
        Some(exp) => {
            log::trace!("simplified ({left} {} {right}) to {exp}", op.symbol());
            exp
        }
        None => Expression::binary(op, left, right),
    }
}
