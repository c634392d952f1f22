//! Arithmetic expression trees with numeric evaluation, symbolic differentiation,
//! single-pass algebraic simplification and canonical rendering.
//!
//! Trees are built either with the constructors on [`Expression`] or by parsing an infix
//! formula with [`parse`]:
//!
//! ```
//! use symdiff::{parse, Context};
//!
//! let exp = parse("3 + 5 * x").unwrap();
//! assert_eq!(exp.to_string(), "(3 + (5 * x))");
//!
//! let ctx = Context::new().with_var("x", 2.0);
//! assert_eq!(exp.eval(&ctx).unwrap(), 13.0);
//!
//! let derivative = exp.diff("x").simplify();
//! assert_eq!(derivative.to_string(), "5");
//! ```

pub mod ast;
pub mod calculus;
pub mod context;
pub mod display;
pub mod eval;
pub mod parse;
pub mod simplify;

pub use ast::{BinaryOp, Expression, Node, Scalar, UnaryOp};
pub use context::Context;
pub use eval::{EvalError, EvalResult};
pub use parse::{ParseError, ParseResult, parse};
