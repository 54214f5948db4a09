//! Evaluation errors.

use core::fmt;

use calc_parser::{Complexity, ErrorKind as ParseErrorKind, Location};

/// Errors that can occur during evaluating an expression or dispatching
/// a scientific function.
///
/// The variants cover the whole validation pipeline: pre-parse filtering,
/// structural parsing, tree evaluation and result validation. `Display`
/// messages are safe to surface to users verbatim; they never embed the
/// rejected input (its location is available via [`Error::location()`]).
#[derive(Debug)]
#[non_exhaustive]
pub enum ErrorKind {
    /// Input contains a character outside the expression whitelist.
    InvalidCharacter,

    /// Input is longer than the configured limit.
    TooLong {
        /// Actual length of the input, in chars.
        len: usize,
        /// Maximum allowed length, in chars.
        max_len: usize,
    },

    /// Input exceeds a complexity limit.
    TooComplex(Complexity),

    /// Input cannot be parsed into an expression.
    Syntax(ParseErrorKind),

    /// Parsed tree contains a node or operation outside the evaluation
    /// whitelist.
    UnsafeConstruct {
        /// Description of the rejected construct kind.
        construct: &'static str,
    },

    /// Division by zero, either at a division node or in `reciprocal`.
    DivisionByZero,

    /// Operand is outside the mathematical domain of the called function.
    Domain {
        /// Description of the violated precondition.
        requirement: &'static str,
    },

    /// Function operand is non-finite, out of the accepted range, or does not
    /// match the function arity.
    InvalidInput,

    /// Function name is not in the function whitelist.
    UnknownFunction,

    /// Computed value is NaN or infinite.
    NonFiniteResult,

    /// Computed value's magnitude exceeds the result bound.
    ResultOutOfRange,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCharacter => formatter.write_str("Unsupported character in expression"),
            Self::TooLong { len, max_len } => write!(
                formatter,
                "Expression is too long: {} chars (max {})",
                len, max_len
            ),
            Self::TooComplex(complexity) => {
                write!(formatter, "Expression is too complex: {}", complexity)
            }
            Self::Syntax(kind) => fmt::Display::fmt(kind, formatter),
            Self::UnsafeConstruct { construct } => {
                write!(formatter, "Unsupported construct in expression: {}", construct)
            }
            Self::DivisionByZero => formatter.write_str("Division by zero"),
            Self::Domain { requirement } => write!(formatter, "Domain error: {}", requirement),
            Self::InvalidInput => {
                formatter.write_str("Invalid input: operand must be a finite number in range")
            }
            Self::UnknownFunction => formatter.write_str("Unknown function"),
            Self::NonFiniteResult => formatter.write_str("Result is not a finite number"),
            Self::ResultOutOfRange => formatter.write_str("Result out of range"),
        }
    }
}

impl ErrorKind {
    /// Returns a short description of this error kind.
    pub fn to_short_string(&self) -> &'static str {
        match self {
            Self::InvalidCharacter => "invalid character",
            Self::TooLong { .. } => "expression too long",
            Self::TooComplex(_) => "expression too complex",
            Self::Syntax(_) => "syntax error",
            Self::UnsafeConstruct { .. } => "unsafe construct",
            Self::DivisionByZero => "division by zero",
            Self::Domain { .. } => "domain error",
            Self::InvalidInput => "invalid input",
            Self::UnknownFunction => "unknown function",
            Self::NonFiniteResult => "non-finite result",
            Self::ResultOutOfRange => "result out of range",
        }
    }

    /// Returns a hint helping the user to fix the error, if one applies.
    pub fn help(&self) -> Option<&'static str> {
        Some(match self {
            Self::TooLong { .. } | Self::TooComplex(_) => {
                "Simplify the expression or split it into smaller steps"
            }
            Self::InvalidInput => "Operands must be finite with magnitude below 1e100",
            Self::ResultOutOfRange => "Results must stay below 1e100 in magnitude",
            Self::DivisionByZero => "The divisor evaluates to zero",
            _ => return None,
        })
    }
}

/// Evaluation error, optionally referencing the location of the offending
/// fragment within the evaluated expression.
///
/// Unlike the parser's spanned errors, this type is owned: it retains where
/// the problem occurred, not the problematic text, and thus can outlive the
/// request that carried the expression.
#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    location: Option<Location>,
}

impl Error {
    pub(crate) fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            location: None,
        }
    }

    pub(crate) fn with_location(kind: ErrorKind, location: Location) -> Self {
        Self {
            kind,
            location: Some(location),
        }
    }

    /// Returns the kind of this error.
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// Returns the location of the offending fragment, if one is known.
    pub fn location(&self) -> Option<Location> {
        self.location
    }
}

impl fmt::Display for Error {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(location) = &self.location {
            write!(formatter, "{}: {}", location, self.kind)
        } else {
            fmt::Display::fmt(&self.kind, formatter)
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.kind {
            ErrorKind::Syntax(kind) => Some(kind),
            _ => None,
        }
    }
}

impl From<calc_parser::Error<'_>> for Error {
    fn from(error: calc_parser::Error<'_>) -> Self {
        let (kind, location) = error.into_parts();
        let kind = match kind {
            ParseErrorKind::InvalidCharacter => ErrorKind::InvalidCharacter,
            ParseErrorKind::TooLong { len, max_len } => ErrorKind::TooLong { len, max_len },
            ParseErrorKind::TooComplex(complexity) => ErrorKind::TooComplex(complexity),
            other => ErrorKind::Syntax(other),
        };
        Self::with_location(kind, location)
    }
}
