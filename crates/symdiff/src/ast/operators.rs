use strum::EnumIter;

#[derive(Debug, Hash, PartialEq, Eq, Clone, Copy, EnumIter)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

impl BinaryOp {
    pub fn symbol(self) -> char {
        use BinaryOp::*;
        match self {
            Add => '+',
            Sub => '-',
            Mul => '*',
            Div => '/',
            Pow => '^',
        }
    }
}

/// The transcendental functions a tree can apply to a single operand.
///
/// The serialized name doubles as the rendered prefix and the function name recognised by
/// the parser, so `"ln".parse::<UnaryOp>()` yields [`UnaryOp::Ln`].
#[derive(
    Debug,
    Hash,
    PartialEq,
    Eq,
    Clone,
    Copy,
    EnumIter,
    strum::Display,
    strum::EnumString,
    strum::IntoStaticStr,
)]
pub enum UnaryOp {
    #[strum(serialize = "sin")]
    Sin,

    #[strum(serialize = "cos")]
    Cos,

    #[strum(serialize = "ln")]
    Ln,

    #[strum(serialize = "exp")]
    Exp,
}

impl UnaryOp {
    pub fn name(self) -> &'static str {
        self.into()
    }
}
