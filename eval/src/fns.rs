//! Scientific function dispatch.
//!
//! Unlike expression evaluation, function calls do not go through the parser:
//! operands arrive as bare values, so the dispatcher validates the function
//! name against a fixed whitelist and checks the per-function domain
//! preconditions directly before computing. All trigonometry operates in
//! radians; angle-unit conversion belongs to the caller (see
//! [`Session`](crate::Session)).

use core::{fmt, str::FromStr};

use crate::{
    error::{Error, ErrorKind},
    validator::MAGNITUDE_LIMIT,
};

/// Bound on the exponent magnitude accepted by [`SciFunction::Power`].
pub const MAX_POWER_EXPONENT: f64 = 1_000.0;

/// Tolerance under which a `power` exponent is considered an integer, which
/// permits a negative base. Exponents within the tolerance are rounded before
/// computing, so the result stays real.
pub const INTEGER_EPSILON: f64 = 1e-9;

/// Whitelisted scientific function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum SciFunction {
    /// Sine of an angle in radians.
    Sin,
    /// Cosine of an angle in radians.
    Cos,
    /// Tangent of an angle in radians.
    Tan,
    /// Inverse sine, returning radians.
    Asin,
    /// Inverse cosine, returning radians.
    Acos,
    /// Inverse tangent, returning radians.
    Atan,
    /// Base-10 logarithm.
    Log,
    /// Natural logarithm.
    Ln,
    /// Natural exponential.
    Exp,
    /// Square root.
    Sqrt,
    /// Square.
    Square,
    /// Multiplicative inverse.
    Reciprocal,
    /// `base` raised to `exponent`; the only binary function.
    Power,
}

impl SciFunction {
    /// All whitelisted functions.
    pub const ALL: [Self; 13] = [
        Self::Sin,
        Self::Cos,
        Self::Tan,
        Self::Asin,
        Self::Acos,
        Self::Atan,
        Self::Log,
        Self::Ln,
        Self::Exp,
        Self::Sqrt,
        Self::Square,
        Self::Reciprocal,
        Self::Power,
    ];

    /// Returns the name of this function.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Asin => "asin",
            Self::Acos => "acos",
            Self::Atan => "atan",
            Self::Log => "log",
            Self::Ln => "ln",
            Self::Exp => "exp",
            Self::Sqrt => "sqrt",
            Self::Square => "square",
            Self::Reciprocal => "reciprocal",
            Self::Power => "power",
        }
    }

    /// Returns the number of operands this function takes.
    pub fn arity(self) -> usize {
        match self {
            Self::Power => 2,
            _ => 1,
        }
    }

    /// Checks whether the operand of this function is an angle.
    pub fn takes_angle(self) -> bool {
        matches!(self, Self::Sin | Self::Cos | Self::Tan)
    }

    /// Checks whether the result of this function is an angle.
    pub fn returns_angle(self) -> bool {
        matches!(self, Self::Asin | Self::Acos | Self::Atan)
    }
}

impl fmt::Display for SciFunction {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for SciFunction {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|function| function.as_str() == name)
            .ok_or_else(|| Error::new(ErrorKind::UnknownFunction))
    }
}

/// Operands of a scientific function call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FnArgs {
    /// Single operand.
    Unary(f64),
    /// Two operands: base and exponent for [`SciFunction::Power`].
    Binary(f64, f64),
}

impl FnArgs {
    /// Returns the number of operands.
    pub fn len(&self) -> usize {
        match self {
            Self::Unary(_) => 1,
            Self::Binary(..) => 2,
        }
    }

    /// Always false; there is no zero-operand call shape.
    pub fn is_empty(&self) -> bool {
        false
    }

    fn values(&self) -> [Option<f64>; 2] {
        match *self {
            Self::Unary(x) => [Some(x), None],
            Self::Binary(x, y) => [Some(x), Some(y)],
        }
    }
}

impl From<f64> for FnArgs {
    fn from(value: f64) -> Self {
        Self::Unary(value)
    }
}

impl From<(f64, f64)> for FnArgs {
    fn from((first, second): (f64, f64)) -> Self {
        Self::Binary(first, second)
    }
}

fn domain(requirement: &'static str) -> Error {
    Error::new(ErrorKind::Domain { requirement })
}

/// Dispatches a whitelisted function over validated operands. The result is
/// *not* range-checked here; see [`check_result()`](crate::check_result).
pub(crate) fn dispatch(function: SciFunction, args: FnArgs) -> Result<f64, Error> {
    for value in args.values().into_iter().flatten() {
        if !value.is_finite() || value.abs() >= MAGNITUDE_LIMIT {
            return Err(Error::new(ErrorKind::InvalidInput));
        }
    }
    if args.len() != function.arity() {
        return Err(Error::new(ErrorKind::InvalidInput));
    }

    match (function, args) {
        (SciFunction::Power, FnArgs::Binary(base, exponent)) => power(base, exponent),
        (function, FnArgs::Unary(x)) => apply_unary(function, x),
        _ => Err(Error::new(ErrorKind::InvalidInput)),
    }
}

fn apply_unary(function: SciFunction, x: f64) -> Result<f64, Error> {
    match function {
        SciFunction::Sin => Ok(x.sin()),
        SciFunction::Cos => Ok(x.cos()),
        SciFunction::Tan => Ok(x.tan()),
        SciFunction::Asin => {
            if (-1.0..=1.0).contains(&x) {
                Ok(x.asin())
            } else {
                Err(domain("asin requires an argument between -1 and 1"))
            }
        }
        SciFunction::Acos => {
            if (-1.0..=1.0).contains(&x) {
                Ok(x.acos())
            } else {
                Err(domain("acos requires an argument between -1 and 1"))
            }
        }
        SciFunction::Atan => Ok(x.atan()),
        SciFunction::Log => {
            if x > 0.0 {
                Ok(x.log10())
            } else {
                Err(domain("log requires a positive argument"))
            }
        }
        SciFunction::Ln => {
            if x > 0.0 {
                Ok(x.ln())
            } else {
                Err(domain("ln requires a positive argument"))
            }
        }
        SciFunction::Exp => Ok(x.exp()),
        SciFunction::Sqrt => {
            if x >= 0.0 {
                Ok(x.sqrt())
            } else {
                Err(domain("sqrt requires a non-negative argument"))
            }
        }
        SciFunction::Square => Ok(x * x),
        SciFunction::Reciprocal => {
            if x == 0.0 {
                Err(Error::new(ErrorKind::DivisionByZero))
            } else {
                Ok(x.recip())
            }
        }
        // `Power` and possible future functions never reach here; `dispatch`
        // checks arity beforehand.
        _ => Err(Error::new(ErrorKind::InvalidInput)),
    }
}

fn power(base: f64, exponent: f64) -> Result<f64, Error> {
    if base == 0.0 && exponent == 0.0 {
        return Err(domain("power(0, 0) is undefined"));
    }
    if exponent.abs() >= MAX_POWER_EXPONENT {
        return Err(domain("power exponent magnitude must be below 1000"));
    }
    if base < 0.0 {
        if !is_integer(exponent) {
            return Err(domain("a negative base requires an integer exponent"));
        }
        // Round the exponent so the computation stays real for exponents
        // within the integer tolerance.
        return Ok(base.powf(exponent.round()));
    }
    Ok(base.powf(exponent))
}

fn is_integer(value: f64) -> bool {
    (value - value.round()).abs() <= INTEGER_EPSILON
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn call(function: SciFunction, args: impl Into<FnArgs>) -> Result<f64, Error> {
        dispatch(function, args.into())
    }

    #[test]
    fn function_names_resolve() {
        for function in SciFunction::ALL {
            assert_eq!(function.as_str().parse::<SciFunction>().unwrap(), function);
        }

        for name in ["eval", "exec", "__import__", "open", "compile", "SIN", ""] {
            let err = name.parse::<SciFunction>().unwrap_err();
            assert_matches!(err.kind(), ErrorKind::UnknownFunction);
        }
    }

    #[test]
    fn trig_functions() {
        assert!(call(SciFunction::Sin, 0.0).unwrap().abs() < 1e-10);
        assert!((call(SciFunction::Sin, std::f64::consts::FRAC_PI_2).unwrap() - 1.0).abs() < 1e-10);
        assert!((call(SciFunction::Cos, std::f64::consts::PI).unwrap() + 1.0).abs() < 1e-10);
        assert!(
            (call(SciFunction::Tan, std::f64::consts::FRAC_PI_4).unwrap() - 1.0).abs() < 1e-10
        );
        assert!(
            (call(SciFunction::Atan, 1.0).unwrap() - std::f64::consts::FRAC_PI_4).abs() < 1e-10
        );
    }

    #[test]
    fn inverse_trig_domain() {
        assert!((call(SciFunction::Asin, 1.0).unwrap() - std::f64::consts::FRAC_PI_2).abs() < 1e-10);
        assert_eq!(call(SciFunction::Acos, 1.0).unwrap(), 0.0);

        for args in [1.5, -1.5] {
            let err = call(SciFunction::Asin, args).unwrap_err();
            assert_matches!(err.kind(), ErrorKind::Domain { .. });
            let err = call(SciFunction::Acos, args).unwrap_err();
            assert_matches!(err.kind(), ErrorKind::Domain { .. });
        }
    }

    #[test]
    fn logarithms() {
        assert!((call(SciFunction::Log, 100.0).unwrap() - 2.0).abs() < 1e-10);
        assert!(call(SciFunction::Log, 1.0).unwrap().abs() < 1e-10);
        assert!((call(SciFunction::Ln, std::f64::consts::E).unwrap() - 1.0).abs() < 1e-10);

        for bad in [0.0, -5.0] {
            assert_matches!(
                call(SciFunction::Log, bad).unwrap_err().kind(),
                ErrorKind::Domain { .. }
            );
            assert_matches!(
                call(SciFunction::Ln, bad).unwrap_err().kind(),
                ErrorKind::Domain { .. }
            );
        }
    }

    #[test]
    fn sqrt_and_square() {
        assert_eq!(call(SciFunction::Sqrt, 25.0).unwrap(), 5.0);
        assert_eq!(call(SciFunction::Sqrt, 0.0).unwrap(), 0.0);
        assert_eq!(call(SciFunction::Square, -3.0).unwrap(), 9.0);

        let err = call(SciFunction::Sqrt, -1.0).unwrap_err();
        assert_matches!(err.kind(), ErrorKind::Domain { .. });
    }

    #[test]
    fn reciprocal() {
        assert_eq!(call(SciFunction::Reciprocal, 2.0).unwrap(), 0.5);
        assert_eq!(call(SciFunction::Reciprocal, -5.0).unwrap(), -0.2);

        let err = call(SciFunction::Reciprocal, 0.0).unwrap_err();
        assert_matches!(err.kind(), ErrorKind::DivisionByZero);
    }

    #[test]
    fn power_basics() {
        assert_eq!(call(SciFunction::Power, (2.0, 3.0)).unwrap(), 8.0);
        assert_eq!(call(SciFunction::Power, (5.0, 0.0)).unwrap(), 1.0);
        assert_eq!(call(SciFunction::Power, (2.0, -2.0)).unwrap(), 0.25);
        assert_eq!(call(SciFunction::Power, (4.0, 0.5)).unwrap(), 2.0);
        assert_eq!(call(SciFunction::Power, (0.0, 2.0)).unwrap(), 0.0);
        assert_eq!(call(SciFunction::Power, (-2.0, 3.0)).unwrap(), -8.0);
    }

    #[test]
    fn power_domain() {
        let err = call(SciFunction::Power, (0.0, 0.0)).unwrap_err();
        assert_matches!(err.kind(), ErrorKind::Domain { .. });

        let err = call(SciFunction::Power, (-4.0, 0.5)).unwrap_err();
        assert_matches!(err.kind(), ErrorKind::Domain { .. });

        let err = call(SciFunction::Power, (2.0, 10_000.0)).unwrap_err();
        assert_matches!(err.kind(), ErrorKind::Domain { .. });
    }

    #[test]
    fn power_integer_exponent_tolerance() {
        // Exponents within the tolerance are treated as integers and rounded.
        let near_integer = 3.0 + 1e-10;
        assert_eq!(call(SciFunction::Power, (-2.0, near_integer)).unwrap(), -8.0);

        let err = call(SciFunction::Power, (-2.0, 3.001)).unwrap_err();
        assert_matches!(err.kind(), ErrorKind::Domain { .. });
    }

    #[test]
    fn non_finite_and_oversized_operands() {
        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY, 1e101] {
            let err = call(SciFunction::Sin, bad).unwrap_err();
            assert_matches!(err.kind(), ErrorKind::InvalidInput);
        }

        let err = call(SciFunction::Power, (1e101, 2.0)).unwrap_err();
        assert_matches!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn arity_mismatches() {
        let err = call(SciFunction::Power, 2.0).unwrap_err();
        assert_matches!(err.kind(), ErrorKind::InvalidInput);

        let err = call(SciFunction::Sin, (1.0, 2.0)).unwrap_err();
        assert_matches!(err.kind(), ErrorKind::InvalidInput);
    }
}
