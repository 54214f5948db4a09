//! Expression tree validation and evaluation.

use calc_parser::{BinaryOp, Expr, Location, SpannedExpr, UnaryOp};

use crate::error::{Error, ErrorKind};

fn unsafe_construct(construct: &'static str, location: Location) -> Error {
    Error::with_location(ErrorKind::UnsafeConstruct { construct }, location)
}

/// Recursively confirms that every node of the tree is in the whitelisted
/// node set, and every operator in the whitelisted operator set.
///
/// The parser cannot currently produce anything outside these sets, but the
/// AST enums are non-exhaustive; this check is retained as defense in depth
/// against the tree originating from a wider grammar.
///
/// # Errors
///
/// Returns [`ErrorKind::UnsafeConstruct`] pointing at the first node outside
/// the whitelist.
pub fn validate(expr: &SpannedExpr<'_>) -> Result<(), Error> {
    match &expr.extra {
        Expr::Literal(_) => Ok(()),

        Expr::Unary { op, inner } => {
            match op.extra {
                UnaryOp::Neg | UnaryOp::Plus => { /* whitelisted */ }
                _ => return Err(unsafe_construct("unary operator", Location::from(op))),
            }
            validate(inner)
        }

        Expr::Binary { lhs, op, rhs } => {
            match op.extra {
                BinaryOp::Add | BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div => {
                    /* whitelisted */
                }
                _ => return Err(unsafe_construct("binary operator", Location::from(op))),
            }
            validate(lhs)?;
            validate(rhs)
        }

        other => Err(unsafe_construct(other.ty(), Location::from(expr))),
    }
}

/// Evaluates a parsed expression tree.
///
/// The tree is validated with [`validate()`] first; evaluation is then a
/// post-order walk, with children evaluated left to right before the parent
/// operation is applied. No intermediate results are cached and there is no
/// short-circuiting.
///
/// The returned value is *not* checked for finiteness or magnitude; that is
/// the job of [`check_result()`](crate::check_result).
///
/// # Errors
///
/// Returns [`ErrorKind::UnsafeConstruct`] for non-whitelisted nodes and
/// [`ErrorKind::DivisionByZero`] if the divisor of a division node evaluates
/// to zero, pointing at the divisor.
pub fn evaluate(expr: &SpannedExpr<'_>) -> Result<f64, Error> {
    validate(expr)?;
    evaluate_node(expr)
}

fn evaluate_node(expr: &SpannedExpr<'_>) -> Result<f64, Error> {
    match &expr.extra {
        Expr::Literal(value) => Ok(*value),

        Expr::Unary { op, inner } => {
            let inner_value = evaluate_node(inner)?;
            match op.extra {
                UnaryOp::Neg => Ok(-inner_value),
                UnaryOp::Plus => Ok(inner_value),
                _ => Err(unsafe_construct("unary operator", Location::from(op))),
            }
        }

        Expr::Binary { lhs, op, rhs } => {
            let lhs_value = evaluate_node(lhs)?;
            let rhs_value = evaluate_node(rhs)?;
            match op.extra {
                BinaryOp::Add => Ok(lhs_value + rhs_value),
                BinaryOp::Sub => Ok(lhs_value - rhs_value),
                BinaryOp::Mul => Ok(lhs_value * rhs_value),
                BinaryOp::Div => {
                    if rhs_value == 0.0 {
                        Err(Error::with_location(
                            ErrorKind::DivisionByZero,
                            Location::from(rhs.as_ref()),
                        ))
                    } else {
                        Ok(lhs_value / rhs_value)
                    }
                }
                _ => Err(unsafe_construct("binary operator", Location::from(op))),
            }
        }

        other => Err(unsafe_construct(other.ty(), Location::from(expr))),
    }
}
