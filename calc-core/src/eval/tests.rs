use std::{rc::Rc, sync::{atomic::AtomicBool, Arc}};

use crate::{
    environment::prelude::{Environment, Value, FALSE, MAX_INT, MAX_VARIABLES, TRUE},
    parser::prelude::ParseErrorType,
    utils::prelude::{Error, SrcSpan, VectorWarningEmitterIO, Warning},
};

use super::{evaluate, evaluate_with, run, EvalOptions, Evaluated};
use super::error::{EvalWarning, RuntimeErrorType};

fn int(value: i64) -> Value {
    Value::from(value)
}

fn values(src: &str) -> Result<Vec<Value>, Error> {
    Ok(evaluate(src, &mut Environment::new())?.values)
}

fn runtime_error(result: Result<Evaluated, Error>) -> RuntimeErrorType {
    match result {
        Err(Error::Runtime { error, .. }) => error.error,
        other => panic!("expected a runtime error, got {other:?}")
    }
}

#[test]
fn test_literals() -> Result<(), Error> {
    for literal in [0, 1, 42, MAX_INT] {
        assert_eq!(vec![int(literal)], values(&literal.to_string())?);
    }

    Ok(())
}

#[test]
fn test_arithmetic() -> Result<(), Error> {
    assert_eq!(vec![int(11)], values("3 + 4 * 2")?);
    assert_eq!(vec![int(14)], values("(3 + 4) * 2")?);
    assert_eq!(vec![int(-6)], values("-2 * 3")?);
    assert_eq!(vec![int(5)], values("+5")?);
    assert_eq!(vec![int(2)], values("- -2")?);
    assert_eq!(vec![int(-4)], values("1 - 2 - 3")?);

    Ok(())
}

#[test]
fn test_floor_division() -> Result<(), Error> {
    assert_eq!(vec![int(3)], values("7 / 2")?);
    assert_eq!(vec![int(-4)], values("-7 / 2")?);
    assert_eq!(vec![int(-4)], values("7 / -2")?);
    assert_eq!(vec![int(3)], values("-7 / -2")?);
    assert_eq!(vec![int(-3)], values("-6 / 2")?);

    Ok(())
}

#[test]
fn test_comparisons() -> Result<(), Error> {
    assert_eq!(vec![TRUE, FALSE, TRUE], values("2 > 1; 2 < 1; 3 == 3")?);
    // flat precedence: ((1 + 2) > 2) + 1
    assert_eq!(vec![int(2)], values("1 + 2 > 2 + 1")?);
    assert_eq!(vec![TRUE], values("(1 < 2) == 1")?);

    Ok(())
}

#[test]
fn test_assignment_then_read() -> Result<(), Error> {
    let mut env = Environment::new();

    let evaluated = evaluate("x = 5; x; x * 2", &mut env)?;

    assert_eq!(vec![int(5), int(10)], evaluated.values);
    assert!(evaluated.warnings.is_empty());
    assert_eq!(Some(Some(int(5))), env.get("x"));

    Ok(())
}

#[test]
fn test_store_persists_between_lines() -> Result<(), Error> {
    let mut env = Environment::new();

    evaluate("a = 2; b = a > 1", &mut env)?;
    let evaluated = evaluate("a + b", &mut env)?;

    assert_eq!(vec![int(3)], evaluated.values);
    assert_eq!(Some(Some(TRUE)), env.get("b"));

    Ok(())
}

#[test]
fn test_names_are_case_sensitive() -> Result<(), Error> {
    let mut env = Environment::new();

    let evaluated = evaluate("x = 1; X", &mut env)?;

    assert!(evaluated.values.is_empty());
    assert_eq!(1, evaluated.warnings.len());

    Ok(())
}

#[test]
fn test_undefined_variable() -> Result<(), Error> {
    let mut env = Environment::new();

    let evaluated = evaluate("y", &mut env)?;

    assert!(evaluated.values.is_empty());
    assert_eq!(
        vec![EvalWarning::UndefinedVariable { name: "y".into(), location: SrcSpan::from(0, 1) }],
        evaluated.warnings
    );

    Ok(())
}

#[test]
fn test_absent_propagates() -> Result<(), Error> {
    let mut env = Environment::new();

    let evaluated = evaluate("1 + y * 2; y < 3; -y; 4", &mut env)?;

    assert_eq!(vec![int(4)], evaluated.values);
    assert_eq!(3, evaluated.warnings.len());

    Ok(())
}

#[test]
fn test_both_operands_evaluated() -> Result<(), Error> {
    let evaluated = evaluate("p + q", &mut Environment::new())?;

    let names = evaluated.warnings.iter()
        .map(|warning| match warning {
            EvalWarning::UndefinedVariable { name, .. } => name.as_str(),
            other => panic!("unexpected warning {other:?}")
        })
        .collect::<Vec<_>>();

    assert_eq!(vec!["p", "q"], names);

    Ok(())
}

#[test]
fn test_absent_assignment_binds_silently() -> Result<(), Error> {
    let mut env = Environment::new();

    let first = evaluate("x = y", &mut env)?;
    assert_eq!(1, first.warnings.len());
    assert_eq!(Some(None), env.get("x"));

    let second = evaluate("x", &mut env)?;
    assert!(second.values.is_empty());
    assert!(second.warnings.is_empty());

    Ok(())
}

#[test]
fn test_division_by_zero_is_soft() -> Result<(), Error> {
    let mut env = Environment::new();

    let evaluated = evaluate("10 / 0; 7", &mut env)?;

    assert_eq!(vec![int(7)], evaluated.values);
    assert_eq!(
        vec![EvalWarning::DivisionByZero { location: SrcSpan::from(5, 6) }],
        evaluated.warnings
    );
    assert_eq!("division by zero", evaluated.warnings[0].to_string());

    Ok(())
}

#[test]
fn test_overflow_is_fatal() {
    let mut env = Environment::new();

    assert_eq!(
        RuntimeErrorType::Overflow,
        runtime_error(evaluate("x = 2147483647 + 1", &mut env))
    );
    assert!(!env.contains("x"));

    assert_eq!(RuntimeErrorType::Overflow, runtime_error(evaluate("0 - 2147483647 - 1", &mut env)));
    assert_eq!(RuntimeErrorType::Overflow, runtime_error(evaluate("65536 * 65536", &mut env)));
    assert_eq!(
        RuntimeErrorType::Overflow,
        runtime_error(evaluate("9223372036854775807 * 2", &mut env))
    );
}

#[test]
fn test_bounds_are_symmetric() -> Result<(), Error> {
    assert_eq!(vec![int(-MAX_INT)], values("0 - 2147483647")?);
    assert_eq!(vec![int(MAX_INT)], values("2147483646 + 1")?);

    Ok(())
}

#[test]
fn test_comparisons_skip_overflow_guard() -> Result<(), Error> {
    assert_eq!(vec![TRUE], values("9999999999 > 1")?);

    Ok(())
}

#[test]
fn test_failure_keeps_earlier_assignments() {
    let mut env = Environment::new();

    let result = evaluate("a = 1; b = 2147483647 * 2; c = 3", &mut env);

    assert_eq!(RuntimeErrorType::Overflow, runtime_error(result));
    assert_eq!(Some(Some(int(1))), env.get("a"));
    assert!(!env.contains("b"));
    assert!(!env.contains("c"));
}

#[test]
fn test_conditionals() -> Result<(), Error> {
    assert_eq!(vec![int(1)], values("if 2 > 1 then 1 else 2")?);
    assert_eq!(vec![int(2)], values("if 2 < 1 then 1 else 2")?);
    assert_eq!(Vec::<Value>::new(), values("if 0 then 1")?);
    assert_eq!(vec![int(1)], values("if 5 then 1")?);

    let mut env = Environment::new();
    let evaluated = evaluate("if x then 1 else 2", &mut env)?;
    assert_eq!(vec![int(2)], evaluated.values);
    assert_eq!(1, evaluated.warnings.len());

    let evaluated = evaluate("if 1 then y = 4 else y = 5; y", &mut env)?;
    assert_eq!(vec![int(4)], evaluated.values);

    Ok(())
}

#[test]
fn test_while_loop() -> Result<(), Error> {
    let mut env = Environment::new();

    let evaluated = evaluate("i = 0; s = 0; while i < 5 do { i = i + 1; s = s + i }; s", &mut env)?;

    assert_eq!(vec![int(15)], evaluated.values);
    assert_eq!(Some(Some(int(5))), env.get("i"));

    Ok(())
}

#[test]
fn test_while_yields_nothing() -> Result<(), Error> {
    let evaluated = evaluate("i = 0; while i < 3 do { i = i + 1; i }", &mut Environment::new())?;

    assert!(evaluated.values.is_empty());

    Ok(())
}

#[test]
fn test_while_absent_condition_stops() -> Result<(), Error> {
    let evaluated = evaluate("while z do { 1 }; 2", &mut Environment::new())?;

    assert_eq!(vec![int(2)], evaluated.values);
    assert_eq!(1, evaluated.warnings.len());

    Ok(())
}

#[test]
fn test_infinite_loop_needs_external_bound() {
    let mut env = Environment::new();
    let options = EvalOptions {
        max_loop_iterations: Some(1000),
        ..Default::default()
    };

    let result = evaluate_with("while 1 < 2 do { x = x + 1 }", &mut env, &options);

    assert_eq!(RuntimeErrorType::LoopLimitExceeded { limit: 1000 }, runtime_error(result));
    // the first iteration found `x` undefined and bound it to no value
    assert_eq!(Some(None), env.get("x"));
}

#[test]
fn test_interrupt_stops_loop() {
    let interrupt = Arc::new(AtomicBool::new(true));
    let options = EvalOptions {
        interrupt: Some(interrupt),
        ..Default::default()
    };

    let result = evaluate_with("while 1 do { }", &mut Environment::new(), &options);

    assert_eq!(RuntimeErrorType::Interrupted, runtime_error(result));
}

#[test]
fn test_variable_capacity() -> Result<(), Error> {
    let mut env = Environment::new();

    let names = (0..MAX_VARIABLES)
        .map(|idx| {
            let first = char::from(b'a' + (idx / 26) as u8);
            let second = char::from(b'a' + (idx % 26) as u8);
            format!("{first}{second}")
        })
        .collect::<Vec<String>>();

    for name in &names {
        evaluate(&format!("{name} = 1"), &mut env)?;
    }

    assert_eq!(MAX_VARIABLES, env.len());

    let err = evaluate("zz = 1", &mut env).unwrap_err();
    match &err {
        Error::Runtime { error, .. } => {
            assert!(error.is_limit());
            assert_eq!(RuntimeErrorType::TooManyVariables { limit: MAX_VARIABLES }, error.error);
        },
        other => panic!("expected a runtime error, got {other:?}")
    }
    assert!(!env.contains("zz"));

    evaluate(&format!("{} = 7", names[0]), &mut env)?;
    assert_eq!(Some(Some(int(7))), env.get(&names[0]));
    assert_eq!(MAX_VARIABLES, env.len());

    Ok(())
}

#[test]
fn test_statement_cap_checked_before_evaluation() {
    let mut env = Environment::new();
    let line = vec!["x = 1"; 101].join("; ");

    match evaluate(&line, &mut env) {
        Err(Error::Parse { error, .. }) => assert!(error.is_limit()),
        other => panic!("expected a parse error, got {other:?}")
    }

    assert!(env.is_empty());
}

#[test]
fn test_lexical_errors() {
    let mut env = Environment::new();

    match evaluate("abcde = 1", &mut env) {
        Err(Error::Parse { error, .. }) => assert!(error.is_lexical()),
        other => panic!("expected a lexical error, got {other:?}")
    }

    assert!(evaluate("abcd = 1", &mut env).is_ok());
    assert!(evaluate("while 0 do { }", &mut env).is_ok());
}

#[test]
fn test_deep_nesting_is_rejected() {
    let mut env = Environment::new();
    let src = format!("x = {}1{}", "(".repeat(499), ")".repeat(499));

    match evaluate(&src, &mut env) {
        Err(Error::Parse { error, .. }) => assert!(matches!(
            error.error,
            ParseErrorType::TooDeeplyNested { .. }
        )),
        other => panic!("expected a parse error, got {other:?}")
    }

    assert!(env.is_empty());
    assert!(evaluate(&src, &mut env).unwrap_err().pretty_string().contains("Nesting limit exceeded"));
}

#[test]
fn test_syntax_error_evaluates_nothing() {
    let mut env = Environment::new();

    match evaluate("x = 1; (2", &mut env) {
        Err(Error::Parse { error, .. }) => assert!(matches!(
            error.error,
            ParseErrorType::UnexpectedToken { .. }
        )),
        other => panic!("expected a parse error, got {other:?}")
    }

    assert!(env.is_empty());
}

#[test]
fn test_warnings_stream_through_emitter() -> Result<(), Error> {
    let collected = Rc::new(VectorWarningEmitterIO::new());
    let mut env = Environment::new();

    let values = run("q; 1 / 0; 3", &mut env, collected.clone(), &EvalOptions::default())?;

    assert_eq!(vec![int(3)], values);
    assert_eq!(2, collected.len());

    let rendered = collected.take()
        .iter()
        .map(Warning::pretty_string)
        .collect::<Vec<String>>();

    assert!(rendered[0].contains("Undefined variable"));
    assert!(rendered[1].contains("Division by zero"));

    Ok(())
}

#[test]
fn test_errors_render_with_source() {
    let mut env = Environment::new();

    let err = evaluate("x = 2147483647 + 1", &mut env).unwrap_err();
    let rendered = err.pretty_string();

    assert!(rendered.contains("Runtime error"));
    assert!(rendered.contains("2147483647 + 1"));

    let err = evaluate("(1 + 2", &mut env).unwrap_err();
    assert!(err.pretty_string().contains("Syntax error"));
}
