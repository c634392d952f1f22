use crate::ast::{BinaryOp, Expression, Node, Scalar, UnaryOp};
use crate::context::Context;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EvalError {
    #[error("Variable \"{name}\" not present in evaluation context")]
    UndefinedVariable { name: String },

    #[error("Division by zero")]
    DivisionByZero,
}

pub type EvalResult<T> = Result<T, EvalError>;

impl<T: Scalar> Expression<T> {
    /// Computes the value of the tree with variables bound by `ctx`.
    ///
    /// Fails on the first variable missing from `ctx` and on any division whose
    /// denominator evaluates to exactly zero. Non-finite results such as `ln(0)` are
    /// returned as the field produces them.
    pub fn eval(&self, ctx: &Context<T>) -> EvalResult<T> {
        match self.node() {
            Node::Value(value) => Ok(value.clone()),
            Node::Var { name } => {
                ctx.get_var(name)
                    .cloned()
                    .ok_or_else(|| EvalError::UndefinedVariable {
                        name: name.clone(),
                    })
            }
            Node::Binary { op, left, right } => eval_binary(*op, left, right, ctx),
            Node::Unary { op, operand } => Ok(eval_unary(*op, &operand.eval(ctx)?)),
        }
    }
}

fn eval_binary<T: Scalar>(
    op: BinaryOp,
    left: &Expression<T>,
    right: &Expression<T>,
    ctx: &Context<T>,
) -> EvalResult<T> {
    let left = left.eval(ctx)?;
    let right = right.eval(ctx)?;
    Ok(match op {
        BinaryOp::Add => left + right,
        BinaryOp::Sub => left - right,
        BinaryOp::Mul => left * right,
        BinaryOp::Div => {
            if right.is_zero() {
                return Err(EvalError::DivisionByZero);
            }
            left / right
        }
        BinaryOp::Pow => left.pow(&right),
    })
}

fn eval_unary<T: Scalar>(op: UnaryOp, operand: &T) -> T {
    match op {
        UnaryOp::Sin => operand.sin(),
        UnaryOp::Cos => operand.cos(),
        UnaryOp::Ln => operand.ln(),
        UnaryOp::Exp => operand.exp(),
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::E;

    use num_complex::Complex64;
    use proptest::prelude::*;

    use super::*;

    fn val(v: f64) -> Expression<f64> {
        Expression::value(v)
    }

    fn empty() -> Context<f64> {
        Context::new()
    }

    #[test]
    fn arithmetic() {
        assert_eq!((val(5.0) + val(3.0)).eval(&empty()), Ok(8.0));
        assert_eq!((val(5.0) - val(3.0)).eval(&empty()), Ok(2.0));
        assert_eq!((val(5.0) * val(3.0)).eval(&empty()), Ok(15.0));
        assert_eq!((val(6.0) / val(3.0)).eval(&empty()), Ok(2.0));
        assert_eq!(val(2.0).pow(val(3.0)).eval(&empty()), Ok(8.0));
    }

    #[test]
    fn transcendentals() {
        assert_eq!(val(0.0).sin().eval(&empty()), Ok(0.0));
        assert_eq!(val(0.0).cos().eval(&empty()), Ok(1.0));

        let ln = val(1.0).exp().ln().eval(&empty()).unwrap();
        assert!((ln - 1.0).abs() < 1e-9);

        let exp = val(1.0).exp().eval(&empty()).unwrap();
        assert!((exp - E).abs() < 1e-9);
    }

    #[test]
    fn variables_come_from_context() {
        let exp = val(100.0) + Expression::variable("x") * val(2.0)
            + Expression::variable("y") * Expression::variable("x");

        let ctx = Context::new().with_var("x", 1.0).with_var("y", 2.0);
        assert_eq!(exp.eval(&ctx), Ok(104.0));

        let ctx = Context::new().with_var("x", 2.0).with_var("y", 3.0);
        assert_eq!(exp.eval(&ctx), Ok(110.0));
    }

    #[test]
    fn undefined_variable() {
        let exp = Expression::variable("x") + Expression::variable("z");
        let ctx = Context::new().with_var("x", 1.0);
        let err = exp.eval(&ctx).unwrap_err();
        assert_eq!(
            err,
            EvalError::UndefinedVariable {
                name: "z".to_owned()
            }
        );
        assert_eq!(
            err.to_string(),
            "Variable \"z\" not present in evaluation context"
        );
    }

    #[test]
    fn division_by_zero() {
        let err = (val(1.0) / val(0.0)).eval(&empty()).unwrap_err();
        assert_eq!(err, EvalError::DivisionByZero);
        assert_eq!(err.to_string(), "Division by zero");

        // negative zero compares equal to zero
        assert_eq!(
            (val(1.0) / val(-0.0)).eval(&empty()),
            Err(EvalError::DivisionByZero)
        );

        // denominators are compared exactly
        assert!((val(1.0) / val(1e-300)).eval(&empty()).is_ok());

        // a computed zero is still zero
        let exp = val(1.0) / (Expression::variable("x") - val(2.0));
        let ctx = Context::new().with_var("x", 2.0);
        assert_eq!(exp.eval(&ctx), Err(EvalError::DivisionByZero));
    }

    #[test]
    fn errors_propagate_from_nested_operands() {
        let exp = (val(1.0) / val(0.0)).sin() + val(1.0);
        assert_eq!(exp.eval(&empty()), Err(EvalError::DivisionByZero));
    }

    #[test]
    fn ln_of_zero_is_not_an_error() {
        let value = val(0.0).ln().eval(&empty()).unwrap();
        assert!(value.is_infinite() && value.is_sign_negative());
    }

    #[test]
    fn complex_evaluation() {
        let z = Expression::<Complex64>::variable("z");
        let ctx = Context::new().with_var("z", Complex64::new(1.0, 1.0));

        let product = (z.clone() * z.clone()).eval(&ctx).unwrap();
        assert_eq!(product, Complex64::new(0.0, 2.0));

        let quotient = (Expression::one() / z.clone()).eval(&ctx).unwrap();
        assert_eq!(quotient, Complex64::new(0.5, -0.5));

        let zero = Expression::value(Complex64::new(0.0, 0.0));
        assert_eq!(
            (z.clone() / zero).eval(&ctx),
            Err(EvalError::DivisionByZero)
        );

        let ln = Expression::value(Complex64::new(-1.0, 0.0))
            .ln()
            .eval(&ctx)
            .unwrap();
        assert!((ln.im - std::f64::consts::PI).abs() < 1e-12);
    }

    proptest! {
        #[test]
        fn field_operators_agree(a in -1e6f64..1e6, b in -1e6f64..1e6) {
            let ctx = Context::new();
            prop_assert_eq!((val(a) + val(b)).eval(&ctx), Ok(a + b));
            prop_assert_eq!((val(a) - val(b)).eval(&ctx), Ok(a - b));
            prop_assert_eq!((val(a) * val(b)).eval(&ctx), Ok(a * b));
        }

        #[test]
        fn division_agrees(a in -1e6f64..1e6, b in -1e6f64..1e6) {
            prop_assume!(b != 0.0);
            prop_assert_eq!((val(a) / val(b)).eval(&Context::new()), Ok(a / b));
        }
    }
}
