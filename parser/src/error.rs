//! Error handling.

use nom::{
    error::{ErrorKind as NomErrorKind, FromExternalError, ParseError},
    Slice,
};

use core::fmt;

use crate::{InputSpan, Location, Spanned};

/// Reason why an expression was rejected as too complex.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Complexity {
    /// The number of parenthesis pairs exceeds the limit.
    ParenPairs {
        /// Maximum allowed number of pairs.
        max_pairs: usize,
    },
    /// A run of consecutive operator characters exceeds the limit.
    OperatorRun {
        /// Maximum allowed run length.
        max_run: usize,
    },
}

impl fmt::Display for Complexity {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ParenPairs { max_pairs } => {
                write!(formatter, "more than {} parenthesis pairs", max_pairs)
            }
            Self::OperatorRun { max_run } => write!(
                formatter,
                "more than {} consecutive operator characters",
                max_run
            ),
        }
    }
}

/// Parsing error kind.
///
/// The first three variants are produced by the pre-parse [`Limits`](crate::Limits)
/// check; the remaining ones are produced by the structural parser. None of the
/// `Display` messages embed the rejected input itself; the location of the
/// offending fragment is carried by [`Error`] separately.
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

    /// Input is syntactically parseable but exceeds a complexity limit.
    TooComplex(Complexity),

    /// Error parsing a numeric literal.
    Literal(anyhow::Error),

    /// No rules were expecting this character.
    UnexpectedChar,

    /// Unexpected expression end.
    UnexpectedTerm,

    /// Leftover characters after parsing.
    Leftovers,

    /// Other parsing error.
    Other {
        /// `nom`-defined error kind.
        kind: NomErrorKind,
    },
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
            Self::Literal(err) => write!(formatter, "Invalid number literal: {}", err),
            Self::UnexpectedChar => formatter.write_str("Unexpected character in expression"),
            Self::UnexpectedTerm => formatter.write_str("Unfinished expression"),
            Self::Leftovers => formatter.write_str("Uninterpreted characters after expression"),
            Self::Other { .. } => formatter.write_str("Cannot parse sequence"),
        }
    }
}

impl ErrorKind {
    /// Creates a `Literal` error kind from the external cause.
    pub(crate) fn literal<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Literal(anyhow::Error::new(error))
    }

    /// Checks whether this kind describes a structural (syntax) problem rather
    /// than a pre-parse limit violation.
    pub fn is_syntax(&self) -> bool {
        matches!(
            self,
            Self::Literal(_)
                | Self::UnexpectedChar
                | Self::UnexpectedTerm
                | Self::Leftovers
                | Self::Other { .. }
        )
    }

}

impl std::error::Error for ErrorKind {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Literal(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

/// Parsing error with the associated code span.
#[derive(Debug)]
pub struct Error<'a> {
    inner: Spanned<'a, ErrorKind>,
}

impl<'a> Error<'a> {
    pub(crate) fn new(span: InputSpan<'a>, kind: ErrorKind) -> Self {
        Self {
            inner: Spanned::new(span, kind),
        }
    }

    /// Returns the kind of this error.
    pub fn kind(&self) -> &ErrorKind {
        &self.inner.extra
    }

    /// Returns the span of this error.
    pub fn span(&self) -> Spanned<'a> {
        self.inner.with_no_extra()
    }

    /// Returns the location of this error within the parsed code.
    pub fn location(&self) -> Location {
        Location::from(&self.inner)
    }

    /// Decomposes this error into its kind and location, dropping the reference
    /// to the parsed code.
    pub fn into_parts(self) -> (ErrorKind, Location) {
        let location = Location::from(&self.inner);
        (self.inner.extra, location)
    }
}

impl fmt::Display for Error<'_> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            formatter,
            "{}:{}: {}",
            self.inner.location_line(),
            self.inner.get_column(),
            self.inner.extra
        )
    }
}

impl std::error::Error for Error<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(&self.inner.extra)
    }
}

impl<'a> ParseError<InputSpan<'a>> for Error<'a> {
    fn from_error_kind(mut input: InputSpan<'a>, kind: NomErrorKind) -> Self {
        let char_based = matches!(kind, NomErrorKind::Char | NomErrorKind::OneOf);
        if char_based && !input.fragment().is_empty() {
            // Truncate the error span to the first ineligible char.
            input = input.slice(..1);
        }

        let error_kind = if char_based {
            if input.fragment().is_empty() {
                ErrorKind::UnexpectedTerm
            } else {
                ErrorKind::UnexpectedChar
            }
        } else {
            ErrorKind::Other { kind }
        };

        Error::new(input, error_kind)
    }

    fn append(_: InputSpan<'a>, _: NomErrorKind, other: Self) -> Self {
        other
    }
}

impl<'a> FromExternalError<InputSpan<'a>, ErrorKind> for Error<'a> {
    fn from_external_error(input: InputSpan<'a>, _: NomErrorKind, kind: ErrorKind) -> Self {
        Self::new(input, kind)
    }
}
