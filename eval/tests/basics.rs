//! Tests of the full evaluation pipeline.

use assert_matches::assert_matches;

use calc_eval::{
    evaluate_expression, evaluate_expression_with_limits, evaluate_function, ErrorKind, Limits,
};
use calc_parser::Complexity;

#[test]
fn well_formed_expressions_evaluate_correctly() {
    let cases = [
        ("123+456", 579.0),
        ("25*4", 100.0),
        ("100 - 42", 58.0),
        ("144 / 12", 12.0),
        ("2 + 3 * 4", 14.0),
        ("(2 + 3) * 4", 20.0),
        ("10 / 4", 2.5),
        ("-3 + 10", 7.0),
        ("2 * (3 + (4 - 1))", 12.0),
        ("0.1 + 0.2", 0.1_f64 + 0.2_f64),
        (".5 * 8", 4.0),
    ];
    for (expression, expected) in cases {
        assert_eq!(
            evaluate_expression(expression).unwrap(),
            expected,
            "expression: {expression}"
        );
    }
}

#[test]
fn evaluation_is_idempotent() {
    for expression in ["1 + 2 * 3", "10 / 4", "-(5 - 2)"] {
        let first = evaluate_expression(expression).unwrap();
        let second = evaluate_expression(expression).unwrap();
        assert_eq!(first, second, "expression: {expression}");
    }
}

#[test]
fn non_whitelisted_characters_fail() {
    let inputs = [
        "1 + a",
        "2 ** 3; import os",
        "__import__('os')",
        "1 & 2",
        "sin(1)",
        "1\u{a0}+ 2",
    ];
    for input in inputs {
        let err = evaluate_expression(input).unwrap_err();
        assert_matches!(
            err.kind(),
            ErrorKind::InvalidCharacter,
            "input: {input}"
        );
    }
}

#[test]
fn overlong_input_fails_regardless_of_content() {
    let valid_but_long = "1+".repeat(100) + "1";
    assert_eq!(valid_but_long.len(), 201);
    let err = evaluate_expression(&valid_but_long).unwrap_err();
    assert_matches!(err.kind(), ErrorKind::TooLong { len: 201, max_len: 200 });

    let garbage = "?".repeat(300);
    let err = evaluate_expression(&garbage).unwrap_err();
    assert_matches!(err.kind(), ErrorKind::TooLong { .. });
}

#[test]
fn paren_pair_boundary() {
    // Exactly 50 pairs is allowed.
    let ok = format!("{}1{}", "(".repeat(50), ")".repeat(50));
    assert_eq!(evaluate_expression(&ok).unwrap(), 1.0);

    let too_many = format!("{}1{}", "(".repeat(51), ")".repeat(51));
    let err = evaluate_expression(&too_many).unwrap_err();
    assert_matches!(
        err.kind(),
        ErrorKind::TooComplex(Complexity::ParenPairs { max_pairs: 50 })
    );
}

#[test]
fn operator_runs_fail() {
    let err = evaluate_expression("1---2").unwrap_err();
    assert_matches!(
        err.kind(),
        ErrorKind::TooComplex(Complexity::OperatorRun { max_run: 2 })
    );
}

#[test]
fn syntax_errors() {
    for input in ["1 +", "(1 + 2", "1 + 2)", "()", "1.2.3", "", "   "] {
        let err = evaluate_expression(input).unwrap_err();
        assert_matches!(err.kind(), ErrorKind::Syntax(_), "input: {input}");
    }
}

#[test]
fn division_by_zero() {
    let err = evaluate_expression("10/0").unwrap_err();
    assert_matches!(err.kind(), ErrorKind::DivisionByZero);

    let err = evaluate_expression("1 / (3 - 3)").unwrap_err();
    assert_matches!(err.kind(), ErrorKind::DivisionByZero);
}

#[test]
fn oversized_results_are_rejected() {
    // 1e99 * 100 crosses the magnitude bound.
    let expression = format!("1{} * 100", "0".repeat(99));
    let err = evaluate_expression(&expression).unwrap_err();
    assert_matches!(err.kind(), ErrorKind::ResultOutOfRange);

    // An oversized bare literal is caught by the same check.
    let literal = format!("1{}", "0".repeat(120));
    let err = evaluate_expression(&literal).unwrap_err();
    assert_matches!(err.kind(), ErrorKind::ResultOutOfRange);

    // Just below the bound passes.
    let below = format!("9{}", "0".repeat(98));
    evaluate_expression(&below).unwrap();
}

#[test]
fn non_finite_intermediate_results_are_rejected() {
    // Literals cannot spell infinity, but arithmetic can overflow f64.
    let huge = format!("9{}", "0".repeat(98));
    let expression = format!("{huge} * {huge} * {huge} * {huge}");
    let limits = Limits {
        max_len: 500,
        ..Limits::default()
    };
    let err = evaluate_expression_with_limits(&expression, &limits).unwrap_err();
    assert_matches!(
        err.kind(),
        ErrorKind::NonFiniteResult | ErrorKind::ResultOutOfRange
    );
}

#[test]
fn sqrt_properties() {
    assert_eq!(evaluate_function("sqrt", 25.0).unwrap(), 5.0);

    let err = evaluate_function("sqrt", -1.0).unwrap_err();
    assert_matches!(err.kind(), ErrorKind::Domain { .. });
}

#[test]
fn power_properties() {
    assert_eq!(evaluate_function("power", (2.0, 3.0)).unwrap(), 8.0);

    let err = evaluate_function("power", (0.0, 0.0)).unwrap_err();
    assert_matches!(err.kind(), ErrorKind::Domain { .. });

    let err = evaluate_function("power", (-4.0, 0.5)).unwrap_err();
    assert_matches!(err.kind(), ErrorKind::Domain { .. });
}

#[test]
fn power_results_are_range_checked() {
    // 10^150 is finite but beyond the result magnitude bound.
    let err = evaluate_function("power", (10.0, 150.0)).unwrap_err();
    assert_matches!(err.kind(), ErrorKind::ResultOutOfRange);

    // 10^999 is within the exponent limit but overflows `f64` entirely.
    let err = evaluate_function("power", (10.0, 999.0)).unwrap_err();
    assert_matches!(err.kind(), ErrorKind::NonFiniteResult);
}

#[test]
fn unknown_functions_are_rejected() {
    for name in ["eval", "exec", "system", "log2", ""] {
        let err = evaluate_function(name, 1.0).unwrap_err();
        assert_matches!(err.kind(), ErrorKind::UnknownFunction, "name: {name}");
    }
}

#[test]
fn inverse_function_properties() {
    for x in [0.5, 1.0, 2.0, 10.0, 123.456] {
        let roundtrip = evaluate_function("exp", evaluate_function("ln", x).unwrap()).unwrap();
        assert!((roundtrip - x).abs() < 1e-10, "x: {x}");
    }

    for x in [-7.5, -1.0, 0.0, 3.25] {
        let roundtrip =
            evaluate_function("sqrt", evaluate_function("square", x).unwrap()).unwrap();
        assert!((roundtrip - x.abs()).abs() < 1e-10, "x: {x}");
    }
}

#[test]
fn error_messages_do_not_echo_input() {
    let secret = "9999912345";
    let input = format!("{secret} + $");
    let err = evaluate_expression(&input).unwrap_err();
    let message = err.to_string();
    assert!(!message.contains(secret), "message: {message}");
    assert!(!message.contains('$'), "message: {message}");
}
