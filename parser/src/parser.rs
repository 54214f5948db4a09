//! Parsers for the restricted calculator grammar.

use core::mem;

use nom::{
    branch::alt,
    bytes::complete::take_while,
    character::complete::{char as tag_char, digit0, digit1, one_of},
    combinator::{cut, map, map_res, opt, recognize},
    multi::many0,
    sequence::{delimited, pair, preceded, terminated, tuple},
    Err as NomErr,
};

use crate::{
    ast::{Expr, SpannedExpr},
    error::{Error, ErrorKind},
    ops::{BinaryOp, UnaryOp},
    spans::{unite_spans, with_span, InputSpan, NomResult, Spanned},
};

impl UnaryOp {
    fn from_span(span: Spanned<'_, char>) -> Spanned<'_, Self> {
        match span.extra {
            '-' => span.copy_with_extra(UnaryOp::Neg),
            '+' => span.copy_with_extra(UnaryOp::Plus),
            _ => unreachable!(),
        }
    }
}

impl BinaryOp {
    fn from_span(span: Spanned<'_, char>) -> Spanned<'_, Self> {
        match span.extra {
            '+' => span.copy_with_extra(BinaryOp::Add),
            '-' => span.copy_with_extra(BinaryOp::Sub),
            '*' => span.copy_with_extra(BinaryOp::Mul),
            '/' => span.copy_with_extra(BinaryOp::Div),
            _ => unreachable!(),
        }
    }
}

/// Whitespace between tokens. Only the space char is whitelisted, so other
/// whitespace kinds (tabs, newlines) are rejected as unexpected chars.
fn ws(input: InputSpan<'_>) -> NomResult<'_, InputSpan<'_>> {
    take_while(|c: char| c == ' ')(input)
}

/// Numeric literal: digits with at most one decimal point (`42`, `2.5`, `5.`,
/// `.5`). Exponent notation and `inf` / `nan` spellings are not part of the
/// grammar, so a literal can never parse to a non-finite value directly.
fn number(input: InputSpan<'_>) -> NomResult<'_, f64> {
    let digits = alt((
        recognize(pair(digit1, opt(pair(tag_char('.'), digit0)))),
        recognize(pair(tag_char('.'), digit1)),
    ));
    map_res(digits, |span: InputSpan<'_>| {
        span.fragment().parse::<f64>().map_err(ErrorKind::literal)
    })(input)
}

/// Expression enclosed in parentheses. The returned expression keeps the node
/// parsed from the interior, re-spanned to cover the parentheses.
fn paren_expr(input: InputSpan<'_>) -> NomResult<'_, SpannedExpr<'_>> {
    let parser = preceded(
        terminated(tag_char('('), ws),
        // Once we've encountered the opening `(`, the input *must* correspond
        // to the parser.
        cut(terminated(expr, preceded(ws, tag_char(')')))),
    );
    with_span(parser)(input).map(|(rest, parsed)| (rest, parsed.map_extra(|inner| inner.extra)))
}

/// Parses a simple expression, i.e., one not containing binary operations.
///
/// From the construction, the evaluation priorities within such an expression
/// are always higher than for possible binary ops surrounding it.
fn simplest_expr(input: InputSpan<'_>) -> NomResult<'_, SpannedExpr<'_>> {
    alt((
        map(with_span(number), |span| span.map_extra(Expr::Literal)),
        map(
            with_span(tuple((
                terminated(with_span(one_of("-+")), ws),
                simplest_expr,
            ))),
            |spanned| {
                spanned.map_extra(|(op, inner)| Expr::Unary {
                    op: UnaryOp::from_span(op),
                    inner: Box::new(inner),
                })
            },
        ),
        paren_expr,
    ))(input)
}

/// Parses an expression with binary operations into a tree with the hierarchy
/// reflecting the evaluation order of the operations.
fn binary_expr(input: InputSpan<'_>) -> NomResult<'_, SpannedExpr<'_>> {
    // First, the expression is parsed into a list of simple expressions
    // interspersed with operators, e.g. `1 + 2 * 3` becomes
    //
    //     [ 1, +, 2, *, 3 ]
    //
    // which `fold_binary_expr` then folds by operator priority.
    let binary_op = map(with_span(one_of("+-*/")), BinaryOp::from_span);
    let mut parser = tuple((
        simplest_expr,
        many0(tuple((delimited(ws, binary_op, ws), cut(simplest_expr)))),
    ));

    let (rest, (first, chained)) = parser(input)?;
    Ok((rest, fold_binary_expr(input, first, chained)))
}

// The op list is folded while tracking the `right_contour` of the already
// built tree: a new operation is inserted below every contour operation with
// a strictly lower priority, so that `1 + 2 * 3 - 7` ends up as
// `(1 + (2 * 3)) - 7` with left associativity within each priority level.
fn fold_binary_expr<'a>(
    input: InputSpan<'a>,
    first: SpannedExpr<'a>,
    chained: Vec<(Spanned<'a, BinaryOp>, SpannedExpr<'a>)>,
) -> SpannedExpr<'a> {
    let mut right_contour: Vec<BinaryOp> = vec![];

    chained.into_iter().fold(first, |mut acc, (new_op, expr)| {
        let united_span = unite_spans(input, &acc, &expr);

        let insert_pos = right_contour
            .iter()
            .position(|past_op| past_op.priority() >= new_op.extra.priority())
            .unwrap_or(right_contour.len());
        right_contour.truncate(insert_pos);
        right_contour.push(new_op.extra);

        if insert_pos == 0 {
            united_span.copy_with_extra(Expr::Binary {
                lhs: Box::new(acc),
                op: new_op,
                rhs: Box::new(expr),
            })
        } else {
            let mut parent = &mut acc;
            for _ in 1..insert_pos {
                parent = match &mut parent.extra {
                    Expr::Binary { rhs, .. } => rhs,
                    _ => unreachable!(),
                };
            }

            *parent = unite_spans(input, parent, &expr).copy_with_extra(parent.extra.clone());
            if let Expr::Binary { rhs, .. } = &mut parent.extra {
                let rhs_span = unite_spans(input, rhs, &expr);
                // Replace `rhs` with a placeholder to take ownership of the old value.
                let placeholder = Box::new(rhs.copy_with_extra(Expr::Literal(0.0)));
                let old_rhs = mem::replace(rhs, placeholder);
                let new_expr = Expr::Binary {
                    lhs: old_rhs,
                    op: new_op,
                    rhs: Box::new(expr),
                };
                *rhs = Box::new(rhs_span.copy_with_extra(new_expr));
            }
            united_span.copy_with_extra(acc.extra)
        }
    })
}

fn expr(input: InputSpan<'_>) -> NomResult<'_, SpannedExpr<'_>> {
    binary_expr(input)
}

/// Parses a complete arithmetic expression.
///
/// The whole input must be consumed; surrounding whitespace is allowed. The
/// grammar admits only numeric literals, unary sign, the four binary
/// arithmetic operators and parentheses. This function does not apply
/// [`Limits`](crate::Limits); callers assembling the full validation pipeline
/// should run [`Limits::validate()`](crate::Limits::validate) first.
///
/// # Errors
///
/// Returns a syntax error (unexpected or leftover chars, an unfinished
/// expression, or a malformed literal) with the span of the offending
/// fragment.
pub fn parse_expression(input: &str) -> Result<SpannedExpr<'_>, Error<'_>> {
    let span = InputSpan::new(input);
    match delimited(ws, expr, ws)(span) {
        Ok((rest, parsed)) => {
            if rest.fragment().is_empty() {
                Ok(parsed)
            } else {
                Err(Error::new(rest, ErrorKind::Leftovers))
            }
        }
        Err(NomErr::Error(err)) | Err(NomErr::Failure(err)) => Err(err),
        // The grammar uses complete parsers only.
        Err(NomErr::Incomplete(_)) => Err(Error::new(span, ErrorKind::UnexpectedTerm)),
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn literal_value(expr: &SpannedExpr<'_>) -> f64 {
        match expr.extra {
            Expr::Literal(value) => value,
            ref other => panic!("Unexpected expr: {other:?}"),
        }
    }

    #[test]
    fn number_literals() {
        for (input, expected) in [
            ("42", 42.0),
            ("2.5", 2.5),
            ("5.", 5.0),
            (".5", 0.5),
            ("0", 0.0),
            ("123456789", 123_456_789.0),
        ] {
            let parsed = parse_expression(input).unwrap();
            assert_eq!(literal_value(&parsed), expected, "input: {input}");
        }
    }

    #[test]
    fn non_finite_spellings_are_not_literals() {
        for input in ["inf", "Infinity", "NaN", "1e10", "0x1f"] {
            let err = parse_expression(input).unwrap_err();
            assert!(err.kind().is_syntax(), "input: {input}");
        }
    }

    #[test]
    fn multiple_decimal_points_are_rejected() {
        let err = parse_expression("1.2.3").unwrap_err();
        assert_matches!(err.kind(), ErrorKind::Leftovers);
        assert_eq!(err.location().offset, 3);
    }

    #[test]
    fn binary_ops_are_left_associative() {
        let parsed = parse_expression("1 - 2 - 3").unwrap();
        let (lhs, op) = match &parsed.extra {
            Expr::Binary { lhs, op, rhs } => {
                assert_eq!(literal_value(rhs), 3.0);
                (lhs, op)
            }
            other => panic!("Unexpected expr: {other:?}"),
        };
        assert_eq!(op.extra, BinaryOp::Sub);
        assert_eq!(*lhs.fragment(), "1 - 2");
        assert_matches!(lhs.extra, Expr::Binary { .. });
    }

    #[test]
    fn multiplication_binds_tighter_than_addition() {
        let parsed = parse_expression("1 + 2 * 3").unwrap();
        match &parsed.extra {
            Expr::Binary { lhs, op, rhs } => {
                assert_eq!(literal_value(lhs), 1.0);
                assert_eq!(op.extra, BinaryOp::Add);
                assert_eq!(*rhs.fragment(), "2 * 3");
                assert_matches!(
                    &rhs.extra,
                    Expr::Binary { op, .. } if op.extra == BinaryOp::Mul
                );
            }
            other => panic!("Unexpected expr: {other:?}"),
        }
    }

    #[test]
    fn parens_override_priority() {
        let parsed = parse_expression("(1 + 2) * 3").unwrap();
        match &parsed.extra {
            Expr::Binary { lhs, op, .. } => {
                assert_eq!(op.extra, BinaryOp::Mul);
                assert_eq!(*lhs.fragment(), "(1 + 2)");
                assert_matches!(lhs.extra, Expr::Binary { .. });
            }
            other => panic!("Unexpected expr: {other:?}"),
        }
    }

    #[test]
    fn unary_sign_binds_tighter_than_binary_ops() {
        let parsed = parse_expression("-2 * 3").unwrap();
        match &parsed.extra {
            Expr::Binary { lhs, op, rhs } => {
                assert_eq!(op.extra, BinaryOp::Mul);
                assert_eq!(literal_value(rhs), 3.0);
                assert_matches!(
                    &lhs.extra,
                    Expr::Unary { op, .. } if op.extra == UnaryOp::Neg
                );
            }
            other => panic!("Unexpected expr: {other:?}"),
        }
    }

    #[test]
    fn nested_unary_signs() {
        let parsed = parse_expression("- -5").unwrap();
        match &parsed.extra {
            Expr::Unary { op, inner } => {
                assert_eq!(op.extra, UnaryOp::Neg);
                assert_matches!(
                    &inner.extra,
                    Expr::Unary { op, .. } if op.extra == UnaryOp::Neg
                );
            }
            other => panic!("Unexpected expr: {other:?}"),
        }

        let parsed = parse_expression("+5").unwrap();
        assert_matches!(
            &parsed.extra,
            Expr::Unary { op, .. } if op.extra == UnaryOp::Plus
        );
    }

    #[test]
    fn unmatched_parens_are_rejected() {
        let err = parse_expression("(1 + 2").unwrap_err();
        assert_matches!(err.kind(), ErrorKind::UnexpectedTerm);

        let err = parse_expression("1 + 2)").unwrap_err();
        assert_matches!(err.kind(), ErrorKind::Leftovers);
        assert_eq!(*err.span().fragment(), ")");
    }

    #[test]
    fn empty_subexpressions_are_rejected() {
        for input in ["", "   ", "()", "(   )", "1 + ()"] {
            let err = parse_expression(input).unwrap_err();
            assert!(err.kind().is_syntax(), "input: {input}");
        }
    }

    #[test]
    fn dangling_operators_are_rejected() {
        let err = parse_expression("2 +").unwrap_err();
        assert_matches!(err.kind(), ErrorKind::UnexpectedTerm);

        let err = parse_expression("* 2").unwrap_err();
        assert!(err.kind().is_syntax());
    }

    #[test]
    fn statement_separators_are_rejected() {
        for input in ["1; 2", "1 + 2; 3 * 4", "x = 5"] {
            let err = parse_expression(input).unwrap_err();
            assert!(err.kind().is_syntax(), "input: {input}");
        }
    }

    #[test]
    fn spans_cover_expressions() {
        let parsed = parse_expression("  1 + 2 * 3 ").unwrap();
        assert_eq!(*parsed.fragment(), "1 + 2 * 3");
        assert_eq!(parsed.location_offset(), 2);

        match &parsed.extra {
            Expr::Binary { op, .. } => assert_eq!(op.get_column(), 5),
            other => panic!("Unexpected expr: {other:?}"),
        }
    }
}
