//! Parser for the restricted arithmetic grammar of a calculator backend.
//!
//! The grammar is deliberately tiny: the only constructs are
//!
//! - numeric literals (IEEE-754 `f64`, digits with at most one decimal
//!   point — no exponent notation, no `inf`/`nan` spellings);
//! - unary sign (`-x`, `+x`), binding tightest;
//! - the four binary arithmetic operations `+`, `-`, `*`, `/` with standard
//!   precedence, left-associative within a level;
//! - parentheses.
//!
//! There are no variables, function calls, statements or assignments; the
//! produced [`Expr`] tree is a closed tagged union, so a wider construct is
//! unrepresentable rather than filtered out after parsing.
//!
//! Parsing is complemented by a pre-parse filter ([`Limits`]) that rejects
//! characters outside a fixed whitelist and inputs whose length, parenthesis
//! count or operator runs exceed configured limits. The filter bounds the
//! recursion depth of everything downstream; the grammar itself does not
//! assume the filter ran.
//!
//! # Examples
//!
//! ```
//! use calc_parser::{parse_expression, BinaryOp, Expr, Limits};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let input = "1 + 2 * (3 - 4)";
//! Limits::default().validate(input)?;
//! let ast = parse_expression(input)?;
//! match &ast.extra {
//!     Expr::Binary { op, .. } => assert_eq!(op.extra, BinaryOp::Add),
//!     other => panic!("Unexpected expr: {other:?}"),
//! }
//! assert_eq!(*ast.fragment(), input);
//! # Ok(())
//! # }
//! ```
//!
//! Errors carry the span of the offending fragment, but their messages never
//! echo the input itself:
//!
//! ```
//! use calc_parser::{parse_expression, ErrorKind};
//!
//! let err = parse_expression("1 + (2 *").unwrap_err();
//! assert!(matches!(err.kind(), ErrorKind::UnexpectedTerm));
//! assert_eq!(err.location().line, 1);
//! ```

pub use crate::{
    ast::{Expr, SpannedExpr},
    error::{Complexity, Error, ErrorKind},
    filter::{is_allowed_char, Limits},
    ops::{BinaryOp, OpPriority, UnaryOp},
    parser::parse_expression,
    spans::{InputSpan, LocatedSpan, Location, NomResult, Spanned},
};

mod ast;
mod error;
mod filter;
mod ops;
mod parser;
mod spans;
