use std::collections::HashMap;

use pawx_eval::language::builders::function;
use pawx_eval::{lang, DiagnosticPrinter, Value};

fn eval(expr: &str) -> Value {
    pawx_eval::evaluate(expr, &Value::Null)
        .unwrap_or_else(|e| panic!("evaluation of {:?} failed: {}", expr, e))
}

fn eval_with(expr: &str, parameter: &Value) -> Value {
    pawx_eval::evaluate(expr, parameter)
        .unwrap_or_else(|e| panic!("evaluation of {:?} failed: {}", expr, e))
}

fn assert_number(expr: &str, expected: f64) {
    assert_eq!(eval(expr), Value::Number(expected), "expr: {:?}", expr);
}

fn assert_bool(expr: &str, expected: bool) {
    assert_eq!(eval(expr), Value::Bool(expected), "expr: {:?}", expr);
}

fn assert_string(expr: &str, expected: &str) {
    assert_eq!(
        eval(expr),
        Value::String(expected.to_string()),
        "expr: {:?}",
        expr
    );
}

fn assert_error(expr: &str, code: &str) {
    match pawx_eval::evaluate(expr, &Value::Null) {
        Ok(v) => panic!("expected {} for {:?}, got {:?}", code, expr, v),
        Err(e) => assert_eq!(e.code, code, "expr: {:?}, error: {}", expr, e),
    }
}

#[test]
fn arithmetic_operators() {
    assert_number("2 + 3", 5.0);
    assert_number("10 - 4", 6.0);
    assert_number("6 * 7", 42.0);
    assert_number("7 / 2", 3.5);
    assert_number("10 % 3", 1.0);
    assert_number("2 ** 8", 256.0);
    assert_number("-(4 + 1)", -5.0);
    assert_number("3.5 + 1.5", 5.0);
    assert_number("1e3 + 1", 1001.0);
}

#[test]
fn division_follows_float_semantics() {
    assert_eq!(eval("1 / 0"), Value::Number(f64::INFINITY));
    assert_eq!(eval("-1 / 0"), Value::Number(f64::NEG_INFINITY));
}

#[test]
fn numeric_comparisons() {
    assert_bool("2 < 3", true);
    assert_bool("2 > 3", false);
    assert_bool("2 <= 2", true);
    assert_bool("2 >= 3", false);
    assert_bool("2 == 2", true);
    assert_bool("2 != 2", false);
}

#[test]
fn equality_falls_back_to_deep_equality() {
    assert_bool("\"a\" == \"a\"", true);
    assert_bool("1 == \"1\"", false);
    assert_bool("[1, 2] == [1, 2]", true);
    assert_bool("[1, 2] != [2, 1]", true);
    assert_bool("{\"a\": 1} == {\"a\": 1}", true);
}

#[test]
fn numeric_strings_coerce_for_numeric_operators() {
    assert_number("\"5\" * \"3\"", 15.0);
    assert_number("\"5\" + 1", 6.0);
    assert_error("\"claw\" * 2", "E_TYPE");
}

#[test]
fn bitmask_operators() {
    assert_number("6 & 3", 2.0);
    assert_number("6 | 3", 7.0);
    assert_number("6 ^ 3", 5.0);
    assert_number("1 << 4", 16.0);
    assert_number("256 >> 4", 16.0);
    assert_number("~0", -1.0);
}

#[test]
fn text_operators() {
    assert_string("\"paw\" + \"x\"", "pawx");
    assert_bool("\"a\" < \"b\"", true);
    assert_bool("\"b\" <= \"a\"", false);
    assert_bool("\"b\" > \"a\"", true);
    assert_string("\"line\\none\" + \"!\"", "line\none!");
}

#[test]
fn regex_match_operators() {
    assert_bool("\"pawx\" =~ \"^pa\"", true);
    assert_bool("\"pawx\" =~ \"^x\"", false);
    assert_bool("\"pawx\" !~ \"^x\"", true);
    assert_bool("42 =~ \"^4\"", true);
}

#[test]
fn constant_regex_patterns_fail_at_compile_time() {
    let err = pawx_eval::compile("\"a\" =~ \"(\"").unwrap_err();
    assert_eq!(err.code, "E_FORMAT");
}

#[test]
fn propositional_logic() {
    assert_bool("true && false", false);
    assert_bool("true || false", true);
    assert_bool("!false", true);
    assert_bool("!(1 == 2)", true);
    assert_bool("1 < 2 && 2 < 3", true);
    assert_error("1 && 2", "E_TYPE");
}

#[test]
fn coalescing_operator() {
    assert_number("false ?? 1", 1.0);
    assert_number("2 ?? 1", 2.0);
    assert_string("\"\" ?? \"fallback\"", "");
}

#[test]
fn ternary_operator() {
    assert_number("1 == 1 ? 10 : 20", 10.0);
    assert_number("false ? 10 : 20", 20.0);
    assert_number("true ? 1 : 2 + 3", 1.0);
    assert_number("1 > 2 ? 1 : 2 > 1 ? 2 : 3", 2.0);
    assert_error("true ? 1", "E_PARSE");
}

#[test]
fn membership_operator() {
    assert_bool("2 in [1, 2, 3]", true);
    assert_bool("5 in [1, 2, 3]", false);
    assert_bool("\"b\" in [\"a\", \"b\"]", true);
    assert_error("1 in 2", "E_TYPE");
}

#[test]
fn json_literals() {
    assert_eq!(
        eval("[1, 2 + 3]"),
        Value::Array(vec![Value::Number(1.0), Value::Number(5.0)])
    );
    assert_eq!(eval("[]"), Value::Array(Vec::new()));

    let result = eval("{\"a\": 1, \"b\": 2 * 2}");
    let mut expected = HashMap::new();
    expected.insert("a".to_string(), Value::Number(1.0));
    expected.insert("b".to_string(), Value::Number(4.0));
    assert_eq!(result, Value::Object(expected));

    assert_eq!(
        eval("{\"outer\": [1, {\"inner\": true}]}"),
        Value::Object(
            [(
                "outer".to_string(),
                Value::Array(vec![
                    Value::Number(1.0),
                    Value::Object(
                        [("inner".to_string(), Value::Bool(true))]
                            .into_iter()
                            .collect()
                    ),
                ]),
            )]
            .into_iter()
            .collect()
        )
    );
}

#[test]
fn parameter_navigation() {
    let parameter: Value = serde_json::json!({
        "foo": 42,
        "nested": { "bar": "claw" },
        "items": [10, 20, 30]
    })
    .into();

    assert_eq!(eval_with("foo", &parameter), Value::Number(42.0));
    assert_eq!(eval_with("foo + 1", &parameter), Value::Number(43.0));
    assert_eq!(
        eval_with("nested.bar", &parameter),
        Value::String("claw".to_string())
    );
    assert_eq!(eval_with("items[1]", &parameter), Value::Number(20.0));
    assert_eq!(eval_with("items[1 + 1]", &parameter), Value::Number(30.0));
    assert_eq!(
        eval_with("nested[\"bar\"]", &parameter),
        Value::String("claw".to_string())
    );

    let err = pawx_eval::evaluate("missing.field", &parameter).unwrap_err();
    assert_eq!(err.code, "E_REFERENCE");
    assert!(err.message.contains("missing"), "message: {}", err.message);

    let err = pawx_eval::evaluate("items[99]", &parameter).unwrap_err();
    assert_eq!(err.code, "E_REFERENCE");
}

#[test]
fn date_function() {
    assert_bool("date(\"2024-03-01\") == date(\"2024-03-01\")", true);
    assert_bool("date(\"2024-03-01\") != date(\"2024-03-02\")", true);
    assert_bool(
        "date(\"2024-03-01T10:30:00Z\") == date(\"2024-03-01 10:30:00+0000\")",
        true,
    );

    assert_error("date()", "E_ARITY");
    assert_error("date(1, 2)", "E_ARITY");
    assert_error("date(1)", "E_TYPE");
    assert_error("date(\"not a date\")", "E_FORMAT");
}

#[test]
fn registered_functions_and_optional_parentheses() {
    let language = lang::full_with(vec![
        function("add", |_, args| {
            let mut sum = 0.0;
            for arg in &args {
                sum += arg.as_float().ok_or_else(|| {
                    pawx_eval::EvalError::type_error(format!(
                        "add() expects numbers, got {}",
                        arg.type_name()
                    ))
                })?;
            }
            Ok(Value::Number(sum))
        }),
        function("two", |_, _| Ok(Value::Number(2.0))),
    ]);

    assert_eq!(
        language.evaluate("add(1, 2, 3)", &Value::Null).unwrap(),
        Value::Number(6.0)
    );
    assert_eq!(
        language.evaluate("add() + 1", &Value::Null).unwrap(),
        Value::Number(1.0)
    );
    // Parentheses are optional on calls.
    assert_eq!(
        language.evaluate("two + two()", &Value::Null).unwrap(),
        Value::Number(4.0)
    );
    assert_eq!(
        language.evaluate("add(two, 1) * 2", &Value::Null).unwrap(),
        Value::Number(6.0)
    );

    let err = language.evaluate("add(1, true)", &Value::Null).unwrap_err();
    assert_eq!(err.code, "E_TYPE");
}

#[test]
fn unknown_function_calls_are_parse_errors() {
    let err = pawx_eval::compile("nope(1)").unwrap_err();
    assert_eq!(err.code, "E_PARSE");
    assert!(err.message.contains("nope"), "message: {}", err.message);
}

#[test]
fn parse_errors_carry_positions() {
    let err = pawx_eval::compile("1 +").unwrap_err();
    assert_eq!(err.code, "E_PARSE");

    let err = pawx_eval::compile("(1 + 2").unwrap_err();
    assert_eq!(err.code, "E_PARSE");
    assert!(err.message.contains(')'), "message: {}", err.message);

    let err = pawx_eval::compile("1 ! 2").unwrap_err();
    assert_eq!(err.code, "E_PARSE");
    assert_eq!(err.span.column, 2);
}

#[test]
fn diagnostics_render_caret_under_offending_token() {
    let source = "1 + 2 3";
    let err = pawx_eval::compile(source).unwrap_err();

    let rendered = DiagnosticPrinter::new(source).render(&err);
    assert!(rendered.contains("error[E_PARSE]"), "rendered: {}", rendered);
    assert!(rendered.contains("1 + 2 3"), "rendered: {}", rendered);
    assert!(rendered.contains("      ^"), "rendered: {}", rendered);
}

#[test]
fn evaluation_errors_name_the_expression() {
    let err = pawx_eval::evaluate("1 + \"a\"", &Value::Null).unwrap_err();
    assert!(
        err.message.contains("1 + \\\"a\\\"") || err.message.contains("can not evaluate"),
        "message: {}",
        err.message
    );
}
