//! Abstract syntax tree for the restricted calculator grammar.

use crate::{
    ops::{BinaryOp, UnaryOp},
    spans::Spanned,
};

/// Arithmetic expression.
///
/// The variant set is closed by design: the only constructs a parsed tree can
/// contain are numeric literals, unary sign and the four binary arithmetic
/// operations. Anything else is unrepresentable, which removes the need to
/// filter a general-purpose AST after the fact. The enum is still marked
/// `#[non_exhaustive]` so that evaluators must keep an explicit whitelist
/// check instead of relying on exhaustiveness.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum Expr<'a> {
    /// Numeric literal, such as `42` or `2.5`.
    Literal(f64),

    /// Expression with an attached unary sign, e.g., `-x`.
    Unary {
        /// Operator.
        op: Spanned<'a, UnaryOp>,
        /// Signed expression.
        inner: Box<SpannedExpr<'a>>,
    },

    /// Binary operation, e.g., `x + 1`.
    Binary {
        /// LHS of the operation.
        lhs: Box<SpannedExpr<'a>>,
        /// Operator.
        op: Spanned<'a, BinaryOp>,
        /// RHS of the operation.
        rhs: Box<SpannedExpr<'a>>,
    },
}

impl Expr<'_> {
    /// Returns a short description of this expression, e.g. for error reporting.
    pub fn ty(&self) -> &'static str {
        match self {
            Self::Literal(_) => "number literal",
            Self::Unary { .. } => "unary operation",
            Self::Binary { .. } => "binary operation",
        }
    }
}

/// `Expr` with the associated code span.
pub type SpannedExpr<'a> = Spanned<'a, Expr<'a>>;
