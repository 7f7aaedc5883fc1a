//! Evaluator tests relocated from implementation files, plus end-to-end
//! suites driven through the real lexer and parser.

mod builtins_tests;

use crate::{Interpreter, Value};

/// Lex, parse and evaluate `source` in a fresh interpreter.
fn eval_source(source: &str) -> Value {
    let mut interpreter = Interpreter::new();
    eval_in(&mut interpreter, source)
}

/// Evaluate `source` with an existing interpreter, failing on syntax errors.
fn eval_in(interpreter: &mut Interpreter, source: &str) -> Value {
    let result = monkey_parse::parse(&monkey_lexer::lex(source));
    assert!(
        !result.has_errors(),
        "unexpected syntax errors for {source:?}: {:?}",
        result.error_messages()
    );
    interpreter.eval_program(&result.program)
}

/// Message of an error value, failing the test for anything else.
fn error_message(value: &Value) -> String {
    match value.as_error() {
        Some(err) => err.message(),
        None => panic!("expected an error value, got {value}"),
    }
}
