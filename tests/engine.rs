use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use pawx_eval::language::builders::{
    constant, function, infix_number_operator, precedence, precedence_right, variable_selector,
};
use pawx_eval::{lang, CancelToken, Evaluable, Language, Value};

fn assert_number(expr: &str, expected: f64) {
    match pawx_eval::evaluate(expr, &Value::Null) {
        Ok(Value::Number(n)) => assert_eq!(n, expected, "wrong result for {:?}", expr),
        other => panic!("expected {} for {:?}, got {:?}", expected, expr, other),
    }
}

#[test]
fn precedence_drives_evaluation_order() {
    assert_number("2 + 3 * 4", 14.0);
    assert_number("(2 + 3) * 4", 20.0);
    assert_number("2 * 3 + 4", 10.0);
    assert_number("1 - 2 - 3", -4.0);
    assert_number("2 ** 3 ** 2", 64.0);
}

#[test]
fn short_circuit_skips_right_operand_evaluation() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();

    let language = lang::full_with(vec![function("sideEffect", move |_, _| {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(Value::Bool(true))
    })]);

    let result = language
        .evaluate("false && sideEffect()", &Value::Null)
        .unwrap();
    assert_eq!(result, Value::Bool(false));
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    let result = language
        .evaluate("true && sideEffect()", &Value::Null)
        .unwrap();
    assert_eq!(result, Value::Bool(true));
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    let result = language
        .evaluate("true || sideEffect()", &Value::Null)
        .unwrap();
    assert_eq!(result, Value::Bool(true));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn one_symbol_dispatches_by_operand_type() {
    assert_number("1 + 1", 2.0);

    let result = pawx_eval::evaluate("\"a\" + \"b\"", &Value::Null).unwrap();
    assert_eq!(result, Value::String("ab".to_string()));

    let err = pawx_eval::evaluate("1 + \"a\"", &Value::Null).unwrap_err();
    assert_eq!(err.code, "E_TYPE");
}

#[test]
fn constant_folding_marks_and_precomputes() {
    let eval = pawx_eval::compile("-5").unwrap();
    assert!(eval.is_const());

    // A constant expression ignores whatever input it is given.
    let input = Value::Object(
        [("anything".to_string(), Value::Number(99.0))]
            .into_iter()
            .collect(),
    );
    let result = eval.evaluate(&CancelToken::new(), &input).unwrap();
    assert_eq!(result, Value::Number(-5.0));

    // Folding surfaces operand errors at compile time.
    let err = pawx_eval::compile("-true").unwrap_err();
    assert_eq!(err.code, "E_TYPE");

    // Parameter-dependent expressions stay non-constant.
    assert!(!pawx_eval::compile("-foo").unwrap().is_const());
}

#[test]
fn trailing_input_is_rejected() {
    let err = pawx_eval::compile("1 + 2 3").unwrap_err();
    assert_eq!(err.code, "E_PARSE");
    assert!(err.message.contains('3'), "message: {}", err.message);
    assert_eq!(err.span.line, 1);
    assert_eq!(err.span.column, 6);
}

#[test]
fn composition_is_associative_for_disjoint_fragments() {
    let a = || Language::compose(vec![lang::arithmetic(), constant("alpha", Value::Number(2.0))]);
    let b = || constant("beta", Value::Number(3.0));
    let c = || constant("gamma", Value::Number(4.0));

    let left = Language::compose(vec![Language::compose(vec![a(), b()]), c()]);
    let right = Language::compose(vec![a(), Language::compose(vec![b(), c()])]);

    for expr in ["alpha + beta * gamma", "gamma - beta - alpha", "(alpha + beta) * gamma"] {
        let lhs = left.evaluate(expr, &Value::Null).unwrap();
        let rhs = right.evaluate(expr, &Value::Null).unwrap();
        assert_eq!(lhs, rhs, "composition order changed {:?}", expr);
    }

    let result = left.evaluate("alpha + beta * gamma", &Value::Null).unwrap();
    assert_eq!(result, Value::Number(14.0));
}

#[test]
fn compiled_evaluables_are_safe_to_share_across_threads() {
    let eval = pawx_eval::compile("2 ** 10 + 1").unwrap();

    let mut handles = Vec::new();
    for _ in 0..2 {
        let eval = eval.clone();
        handles.push(std::thread::spawn(move || {
            let cancel = CancelToken::new();
            (0..100)
                .map(|_| eval.evaluate(&cancel, &Value::Null).unwrap())
                .collect::<Vec<_>>()
        }));
    }

    for handle in handles {
        for value in handle.join().unwrap() {
            assert_eq!(value, Value::Number(1025.0));
        }
    }
}

#[test]
fn precedence_only_declarations_complete_across_fragments() {
    // The handler and the binding power come from different fragments;
    // the merge has to marry them.
    let language = lang::full_with(vec![
        infix_number_operator("<+>", |a, b| Ok(Value::Number(a.max(b)))),
        precedence("<+>", 120),
    ]);

    let result = language.evaluate("2 <+> 3 * 4", &Value::Null).unwrap();
    assert_eq!(result, Value::Number(12.0));

    let result = language.evaluate("2 <+> 3 + 4", &Value::Null).unwrap();
    assert_eq!(result, Value::Number(7.0));
}

#[test]
fn right_associative_operators_nest_rightward() {
    let language = lang::full_with(vec![
        infix_number_operator("^^", |a, b| Ok(Value::Number(a.powf(b)))),
        precedence_right("^^", 200),
    ]);

    // 2 ^^ (3 ^^ 2), not (2 ^^ 3) ^^ 2
    let result = language.evaluate("2 ^^ 3 ^^ 2", &Value::Null).unwrap();
    assert_eq!(result, Value::Number(512.0));
}

#[test]
fn host_selector_overrides_parameter_navigation() {
    let language = lang::full_with(vec![variable_selector(|path| {
        Evaluable::new(move |cancel, parameter| {
            let mut keys = Vec::new();
            for key in &path {
                keys.push(key.evaluate(cancel, parameter)?.stringify());
            }
            Ok(Value::String(keys.join("/")))
        })
    })]);

    let result = language.evaluate("a.b.c", &Value::Null).unwrap();
    assert_eq!(result, Value::String("a/b/c".to_string()));

    let result = language.evaluate("a[1 + 1]", &Value::Null).unwrap();
    assert_eq!(result, Value::String("a/2".to_string()));
}

#[test]
fn cancellation_token_reaches_registered_functions() {
    let language = lang::full_with(vec![function("guard", |cancel, _| {
        if cancel.is_cancelled() {
            return Err(pawx_eval::EvalError::runtime_error("cancelled"));
        }
        Ok(Value::Bool(true))
    })]);

    let eval = language.compile("guard()").unwrap();

    let cancel = CancelToken::new();
    assert_eq!(
        eval.evaluate(&cancel, &Value::Null).unwrap(),
        Value::Bool(true)
    );

    cancel.cancel();
    let err = eval.evaluate(&cancel, &Value::Null).unwrap_err();
    assert_eq!(err.code, "E_RUNTIME");
}

#[test]
fn identical_evaluations_are_deterministic() {
    let language = lang::full();
    let eval = language.compile("(1 + 2) * 3 == 9 && \"x\" + \"y\" == \"xy\"").unwrap();
    let cancel = CancelToken::new();

    let first = eval.evaluate(&cancel, &Value::Null).unwrap();
    let second = eval.evaluate(&cancel, &Value::Null).unwrap();
    assert_eq!(first, second);
    assert_eq!(first, Value::Bool(true));
}
