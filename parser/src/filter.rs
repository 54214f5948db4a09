//! Pre-parse input filter.
//!
//! The filter runs before structural parsing and rejects inputs that are
//! either outside the expression character whitelist or degenerate enough to
//! probe parser robustness (excessive length, parenthesis nesting, or operator
//! runs). It performs no numeric computation and has no side effects; the
//! limits also bound the recursion depth of the downstream parser and
//! evaluator.

use nom::Slice;

use crate::{
    error::{Complexity, Error, ErrorKind},
    spans::InputSpan,
};

/// Checks whether `ch` belongs to the expression character whitelist:
/// digits, the four arithmetic operators, parentheses, decimal point and space.
pub fn is_allowed_char(ch: char) -> bool {
    matches!(ch, '0'..='9' | '+' | '-' | '*' | '/' | '(' | ')' | '.' | ' ')
}

fn is_operator_char(ch: char) -> bool {
    matches!(ch, '+' | '-' | '*' | '/')
}

/// Limits imposed on a candidate expression before it is parsed.
///
/// Defaults: at most 200 chars, at most 50 parenthesis pairs and at most
/// 2 operator characters in immediate succession (so `1 - -2` passes and
/// `1---2` does not).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Maximum input length in chars.
    pub max_len: usize,
    /// Maximum number of parenthesis pairs, counted by opening parens.
    pub max_paren_pairs: usize,
    /// Maximum number of consecutive operator characters.
    pub max_op_run: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_len: 200,
            max_paren_pairs: 50,
            max_op_run: 2,
        }
    }
}

impl Limits {
    /// Validates a candidate expression against the character whitelist and
    /// these limits.
    ///
    /// # Errors
    ///
    /// - [`ErrorKind::TooLong`] if the input exceeds [`Self::max_len`], regardless
    ///   of its content.
    /// - [`ErrorKind::InvalidCharacter`] if any char is outside the whitelist.
    /// - [`ErrorKind::TooComplex`] if the input has more than
    ///   [`Self::max_paren_pairs`] opening parens, or a run of more than
    ///   [`Self::max_op_run`] consecutive operator chars.
    pub fn validate<'a>(&self, expression: &'a str) -> Result<(), Error<'a>> {
        let input = InputSpan::new(expression);

        let len = expression.chars().count();
        if len > self.max_len {
            let kind = ErrorKind::TooLong {
                len,
                max_len: self.max_len,
            };
            return Err(Error::new(input, kind));
        }

        for (pos, ch) in expression.char_indices() {
            if !is_allowed_char(ch) {
                let span = input.slice(pos..(pos + ch.len_utf8()));
                return Err(Error::new(span, ErrorKind::InvalidCharacter));
            }
        }

        let mut open_parens = 0_usize;
        let mut run_start = 0_usize;
        let mut run_len = 0_usize;
        for (pos, ch) in expression.char_indices() {
            if ch == '(' {
                open_parens += 1;
                if open_parens > self.max_paren_pairs {
                    let kind = ErrorKind::TooComplex(Complexity::ParenPairs {
                        max_pairs: self.max_paren_pairs,
                    });
                    return Err(Error::new(input.slice(pos..pos + 1), kind));
                }
            }

            if is_operator_char(ch) {
                if run_len == 0 {
                    run_start = pos;
                }
                run_len += 1;
                if run_len > self.max_op_run {
                    let kind = ErrorKind::TooComplex(Complexity::OperatorRun {
                        max_run: self.max_op_run,
                    });
                    return Err(Error::new(input.slice(run_start..pos + 1), kind));
                }
            } else {
                run_len = 0;
            }
        }

        Ok(())
    }
}
