use crate::ast::{BinaryOp, Expression, Node, Scalar, UnaryOp};

/// Derivative of `exp` with respect to the variable `var`.
///
/// The result is built purely from the differentiation identities and is not simplified,
/// so `d(x + 2)/dx` comes back as `(1 + 0)`.
pub fn derivative<T: Scalar>(exp: &Expression<T>, var: &str) -> Expression<T> {
    match exp.node() {
        Node::Value(_) => Expression::zero(),
        Node::Var { name } => {
            if name == var {
                Expression::one()
            } else {
                Expression::zero()
            }
        }
        Node::Binary { op, left, right } => binary_rule(*op, left, right, var),
        Node::Unary { op, operand } => chain_rule(*op, operand, var),
    }
}

/// Differentiates `n` times in a row. `n == 0` returns the expression itself.
pub fn nth_derivative<T: Scalar>(exp: &Expression<T>, var: &str, n: usize) -> Expression<T> {
    (0..n).fold(exp.clone(), |acc, _| derivative(&acc, var))
}

fn binary_rule<T: Scalar>(
    op: BinaryOp,
    left: &Expression<T>,
    right: &Expression<T>,
    var: &str,
) -> Expression<T> {
    let dleft = derivative(left, var);
    let dright = derivative(right, var);
    match op {
        BinaryOp::Add => dleft + dright,
        BinaryOp::Sub => dleft - dright,
        BinaryOp::Mul => dleft * right.clone() + left.clone() * dright,
        BinaryOp::Div => {
            (dleft * right.clone() - left.clone() * dright) / (right.clone() * right.clone())
        }
        // d(l^r) = l^r * (r' ln(l) + r l'/l), covering variable base and exponent alike
        BinaryOp::Pow => {
            let power = left.clone().pow(right.clone());
            let exponent_part = dright * left.clone().ln();
            let base_part = right.clone() * (dleft / left.clone());
            power * (exponent_part + base_part)
        }
    }
}

fn chain_rule<T: Scalar>(op: UnaryOp, operand: &Expression<T>, var: &str) -> Expression<T> {
    let doperand = derivative(operand, var);
    let outer = match op {
        UnaryOp::Sin => operand.clone().cos(),
        UnaryOp::Cos => Expression::value(T::from_real(-1.0)) * operand.clone().sin(),
        UnaryOp::Ln => Expression::one() / operand.clone(),
        UnaryOp::Exp => operand.clone().exp(),
    };
    outer * doperand
}

impl<T: Scalar> Expression<T> {
    /// Symbolic derivative with respect to `var`, see [`derivative`].
    pub fn diff(&self, var: &str) -> Self {
        log::trace!("differentiating {self} by {var}");
        derivative(self, var)
    }
}
