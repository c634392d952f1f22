use std::collections::BTreeSet;
use std::sync::Arc;

pub mod operators;
pub use operators::*;

pub mod numeric;
pub use numeric::*;

pub mod substitute;

#[derive(Debug, Clone, PartialEq)]
pub enum Node<T> {
    Value(T),
    Var {
        name: String,
    },
    Binary {
        op: BinaryOp,
        left: Expression<T>,
        right: Expression<T>,
    },
    Unary {
        op: UnaryOp,
        operand: Expression<T>,
    },
}

/// Handle to an immutable node of a formula tree.
///
/// Cloning a handle shares the node it points to. Nodes are never written to after
/// construction, so any number of handles, on any number of threads, can read the same
/// subtree. Every operation that "changes" an expression builds new parent nodes over the
/// existing children and returns a new handle.
#[derive(Debug, Clone, PartialEq)]
pub struct Expression<T> {
    node: Arc<Node<T>>,
}

// Left-deep chains built by the parser can be far deeper than the call stack, so children
// of uniquely owned nodes are released from an explicit worklist instead of recursively.
impl<T> Drop for Expression<T> {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        detach_children(&mut self.node, &mut pending);
        while let Some(mut exp) = pending.pop() {
            detach_children(&mut exp.node, &mut pending);
        }
    }
}

/// Moves the children of a node this handle owns alone onto `pending`, leaving an empty
/// leaf behind. Shared nodes are left alone; their last owner detaches them.
fn detach_children<T>(node: &mut Arc<Node<T>>, pending: &mut Vec<Expression<T>>) {
    let Some(node) = Arc::get_mut(node) else {
        return;
    };
    if matches!(node, Node::Value(_) | Node::Var { .. }) {
        return;
    }
    match std::mem::replace(node, Node::Var { name: String::new() }) {
        Node::Binary { left, right, .. } => {
            pending.push(left);
            pending.push(right);
        }
        Node::Unary { operand, .. } => pending.push(operand),
        Node::Value(_) | Node::Var { .. } => {}
    }
}

impl<T> From<Node<T>> for Expression<T> {
    fn from(node: Node<T>) -> Self {
        Self {
            node: Arc::new(node),
        }
    }
}

impl<T> Expression<T> {
    pub fn node(&self) -> &Node<T> {
        &self.node
    }

    /// True if both handles point at the very same node.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.node, &other.node)
    }

    /// No fields are expressions
    pub fn is_atomic(&self) -> bool {
        match self.node() {
            Node::Value(_) | Node::Var { .. } => true,
            Node::Binary { .. } | Node::Unary { .. } => false,
        }
    }
}

impl<T: Scalar> Expression<T> {
    pub fn value(value: T) -> Self {
        Node::Value(value).into()
    }

    pub fn variable(name: impl Into<String>) -> Self {
        Node::Var { name: name.into() }.into()
    }

    pub fn from_value(value: T) -> Self {
        Self::value(value)
    }

    pub fn from_variable(name: impl Into<String>) -> Self {
        Self::variable(name)
    }

    pub fn zero() -> Self {
        Self::value(T::zero())
    }

    pub fn one() -> Self {
        Self::value(T::one())
    }

    pub fn binary(op: BinaryOp, left: Self, right: Self) -> Self {
        Node::Binary { op, left, right }.into()
    }

    pub fn unary(op: UnaryOp, operand: Self) -> Self {
        Node::Unary { op, operand }.into()
    }

    #[allow(clippy::should_implement_trait)]
    pub fn add(self, rhs: Self) -> Self {
        Self::binary(BinaryOp::Add, self, rhs)
    }

    #[allow(clippy::should_implement_trait)]
    pub fn sub(self, rhs: Self) -> Self {
        Self::binary(BinaryOp::Sub, self, rhs)
    }

    #[allow(clippy::should_implement_trait)]
    pub fn mul(self, rhs: Self) -> Self {
        Self::binary(BinaryOp::Mul, self, rhs)
    }

    #[allow(clippy::should_implement_trait)]
    pub fn div(self, rhs: Self) -> Self {
        Self::binary(BinaryOp::Div, self, rhs)
    }

    pub fn pow(self, exponent: Self) -> Self {
        Self::binary(BinaryOp::Pow, self, exponent)
    }

    /// In-place counterpart of [`Expression::pow`], the `^=` of the other operators.
    pub fn pow_assign(&mut self, exponent: Self) {
        *self = Self::binary(BinaryOp::Pow, self.clone(), exponent);
    }

    pub fn sin(self) -> Self {
        Self::unary(UnaryOp::Sin, self)
    }

    pub fn cos(self) -> Self {
        Self::unary(UnaryOp::Cos, self)
    }

    pub fn ln(self) -> Self {
        Self::unary(UnaryOp::Ln, self)
    }

    pub fn exp(self) -> Self {
        Self::unary(UnaryOp::Exp, self)
    }

    /// Builds a new node of the same kind with `f` applied to each child. Leaves are copied
    /// into fresh nodes, so the result never shares its root with `self`.
    pub fn map_children<F>(&self, mut f: F) -> Self
    where
        F: FnMut(&Self) -> Self,
    {
        match self.node() {
            Node::Value(value) => Self::value(value.clone()),
            Node::Var { name } => Self::variable(name.clone()),
            Node::Binary { op, left, right } => Self::binary(*op, f(left), f(right)),
            Node::Unary { op, operand } => Self::unary(*op, f(operand)),
        }
    }

    pub fn reduce<U, F, J, D>(&self, f: F, joiner: J, def: D) -> U
    where
        F: Fn(&Self) -> U,
        J: Fn(U, U) -> U,
        D: Fn() -> U,
    {
        match self.node() {
            Node::Value(_) | Node::Var { .. } => def(),
            Node::Binary { left, right, .. } => joiner(f(left), f(right)),
            Node::Unary { operand, .. } => f(operand),
        }
    }

    /// Names of every variable referenced anywhere in the tree.
    pub fn vars(&self) -> BTreeSet<String> {
        if let Node::Var { name } = self.node() {
            BTreeSet::from([name.clone()])
        } else {
            self.reduce(Self::vars, |a, b| &a | &b, BTreeSet::new)
        }
    }

    pub fn depends_on(&self, var: &str) -> bool {
        if let Node::Var { name } = self.node() {
            name == var
        } else {
            self.reduce(|exp| exp.depends_on(var), |a, b| a || b, || false)
        }
    }

    /// Rebuilds the tree over another numeric field, converting each constant with `f`.
    ///
    /// This is how a formula parsed as a real tree is evaluated over the complex numbers.
    pub fn map_values<U, F>(&self, f: &F) -> Expression<U>
    where
        U: Scalar,
        F: Fn(&T) -> U,
    {
        match self.node() {
            Node::Value(value) => Expression::value(f(value)),
            Node::Var { name } => Expression::variable(name.clone()),
            Node::Binary { op, left, right } => {
                Expression::binary(*op, left.map_values(f), right.map_values(f))
            }
            Node::Unary { op, operand } => Expression::unary(*op, operand.map_values(f)),
        }
    }
}

macro_rules! impl_binary_ops {
    ($($op:ident, $method:ident, $assign_op:ident, $assign_method:ident);* $(;)?) => {$(
        impl<T: Scalar> std::ops::$op for Expression<T> {
            type Output = Self;
            fn $method(self, rhs: Self) -> Self::Output {
                Self::binary(BinaryOp::$op, self, rhs)
            }
        }

        impl<T: Scalar> std::ops::$op for &Expression<T> {
            type Output = Expression<T>;
            fn $method(self, rhs: Self) -> Self::Output {
                Expression::binary(BinaryOp::$op, self.clone(), rhs.clone())
            }
        }

        impl<T: Scalar> std::ops::$assign_op for Expression<T> {
            fn $assign_method(&mut self, rhs: Self) {
                *self = Self::binary(BinaryOp::$op, self.clone(), rhs);
            }
        }
    )*};
}

impl_binary_ops!(
    Add, add, AddAssign, add_assign;
    Sub, sub, SubAssign, sub_assign;
    Mul, mul, MulAssign, mul_assign;
    Div, div, DivAssign, div_assign;
);
