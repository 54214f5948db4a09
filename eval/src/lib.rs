//! Safe evaluator for calculator arithmetic expressions.
//!
//! # How it works
//!
//! 1. A candidate expression is checked against the character whitelist and
//!    the [`Limits`] on length, parenthesis pairs and operator runs.
//! 2. The [`calc-parser`] crate parses it into a closed AST containing only
//!    numeric literals, unary sign and the four arithmetic operations.
//! 3. The tree is [validated](validate) against an explicit node whitelist
//!    and [evaluated](evaluate) in post order, with a zero-divisor check at
//!    every division.
//! 4. The computed value is [checked](check_result) for finiteness and
//!    magnitude before it is returned.
//!
//! Scientific functions ([`fns::SciFunction`]) bypass the parser — their
//! operands are already bare values — and go through operand validation,
//! per-function domain preconditions and the same result check.
//!
//! Every evaluation is a pure, synchronous computation over request-scoped
//! input: the crate holds no process-wide state and no locking is required.
//! Per-session state (history, angle mode, memory register) lives in
//! [`Session`] and is owned by the caller.
//!
//! [`calc-parser`]: calc_parser
//!
//! # Examples
//!
//! ```
//! use calc_eval::{evaluate_expression, evaluate_function, ErrorKind};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! assert_eq!(evaluate_expression("123 + 456")?, 579.0);
//! assert_eq!(evaluate_expression("(1 + 2) * 3")?, 9.0);
//!
//! let err = evaluate_expression("10 / 0").unwrap_err();
//! assert!(matches!(err.kind(), ErrorKind::DivisionByZero));
//!
//! assert_eq!(evaluate_function("sqrt", 25.0)?, 5.0);
//! assert_eq!(evaluate_function("power", (2.0, 3.0))?, 8.0);
//! # Ok(())
//! # }
//! ```
//!
//! Session state with history and degree-mode trigonometry:
//!
//! ```
//! use calc_eval::{AngleUnit, Session};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut session = Session::new();
//! session.set_angle_unit(AngleUnit::Degrees);
//! session.evaluate("25 * 4")?;
//! let sine = session.call_function("sin", 90.0)?;
//! assert!((sine - 1.0).abs() < 1e-10);
//! assert_eq!(session.history().len(), 1);
//! # Ok(())
//! # }
//! ```

pub use crate::{
    error::{Error, ErrorKind},
    exec::{evaluate, validate},
    fns::{FnArgs, SciFunction},
    history::{History, HistoryEntry, DISPLAY_WINDOW, MAX_ENTRIES},
    session::{AngleUnit, Session},
    validator::{check_result, MAGNITUDE_LIMIT},
};
// Re-exported for callers assembling the pipeline manually.
pub use calc_parser::Limits;

mod error;
mod exec;
pub mod fns;
mod history;
mod session;
mod validator;

/// Evaluates an arithmetic expression through the full validation pipeline
/// with default [`Limits`]: character/length/complexity filtering, parsing
/// into the restricted AST, whitelist validation, post-order evaluation and
/// the result check.
///
/// The pipeline short-circuits on the first failure and never returns a
/// partial result. Evaluation is stateless; history recording is the caller's
/// concern (see [`Session::evaluate()`]).
///
/// # Errors
///
/// Returns the error of the first pipeline stage that rejects the input; see
/// [`ErrorKind`] for the possible kinds.
pub fn evaluate_expression(expression: &str) -> Result<f64, Error> {
    evaluate_expression_with_limits(expression, &Limits::default())
}

/// Same as [`evaluate_expression()`], with explicit input [`Limits`].
///
/// # Errors
///
/// See [`evaluate_expression()`].
pub fn evaluate_expression_with_limits(expression: &str, limits: &Limits) -> Result<f64, Error> {
    limits.validate(expression)?;
    let ast = calc_parser::parse_expression(expression)?;
    let value = exec::evaluate(&ast)?;
    validator::check_result(value)
}

/// Evaluates a whitelisted scientific function over one or two operands,
/// then validates the result.
///
/// `args` accepts an `f64` for single-operand functions or an `(f64, f64)`
/// tuple for `power`. The dispatcher operates in radians; angle-unit
/// conversion is the caller's responsibility (see [`Session::call_function()`]).
///
/// # Errors
///
/// Returns [`ErrorKind::UnknownFunction`] for names outside the whitelist,
/// [`ErrorKind::InvalidInput`] for non-finite/oversized operands or an arity
/// mismatch, [`ErrorKind::Domain`] / [`ErrorKind::DivisionByZero`] for
/// violated preconditions, and the result-check kinds for out-of-range
/// outputs.
pub fn evaluate_function(name: &str, args: impl Into<FnArgs>) -> Result<f64, Error> {
    let function: SciFunction = name.parse()?;
    apply_function(function, args.into())
}

/// Evaluates an already resolved [`SciFunction`] and validates the result.
///
/// # Errors
///
/// Same as [`evaluate_function()`], except `UnknownFunction` cannot occur.
pub fn apply_function(function: SciFunction, args: FnArgs) -> Result<f64, Error> {
    let value = fns::dispatch(function, args)?;
    validator::check_result(value)
}
