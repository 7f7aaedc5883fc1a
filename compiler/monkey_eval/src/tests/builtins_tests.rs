//! Tests for the built-in function registry.

use pretty_assertions::assert_eq;

use super::{error_message, eval_source};
use crate::builtins;
use crate::value::Value;

fn ints(values: &[i64]) -> Value {
    Value::array(values.iter().copied().map(Value::int).collect())
}

#[test]
fn test_registry() {
    assert_eq!(
        builtins::names().collect::<Vec<_>>(),
        vec!["len", "first", "last", "rest", "push_back"]
    );
    assert!(builtins::lookup("len").is_some());
    assert!(builtins::lookup("puts").is_none());
}

#[test]
fn test_len() {
    assert_eq!(eval_source(r#"len("")"#), Value::int(0));
    assert_eq!(eval_source(r#"len("four")"#), Value::int(4));
    assert_eq!(eval_source(r#"len("héllo")"#), Value::int(5));
    assert_eq!(eval_source("len([1, 2, 3])"), Value::int(3));
    assert_eq!(
        error_message(&eval_source("len(1)")),
        "argument for the len builtin not supported, got INTEGER"
    );
    assert_eq!(
        error_message(&eval_source(r#"len("one", "two")"#)),
        "wrong number of args, expected=1, got=2"
    );
}

#[test]
fn test_first_and_last() {
    assert_eq!(eval_source("first([1, 2, 3])"), Value::int(1));
    assert_eq!(eval_source("last([1, 2, 3])"), Value::int(3));
    assert_eq!(eval_source("first([])"), Value::NULL);
    assert_eq!(eval_source("last([])"), Value::NULL);
    assert_eq!(
        error_message(&eval_source(r#"first("abc")"#)),
        "argument for the first builtin not supported, got STRING"
    );
    assert_eq!(
        error_message(&eval_source("last()")),
        "wrong number of args, expected=1, got=0"
    );
}

#[test]
fn test_rest() {
    assert_eq!(eval_source("rest([1, 2, 3])"), ints(&[2, 3]));
    assert_eq!(eval_source("rest([1])"), ints(&[]));
    assert_eq!(eval_source("rest([])"), Value::NULL);
    assert_eq!(eval_source("rest(rest([1, 2, 3]))"), ints(&[3]));
}

#[test]
fn test_push_back() {
    assert_eq!(eval_source("push_back([], 1)"), ints(&[1]));
    assert_eq!(eval_source("push_back([1, 2], 3)"), ints(&[1, 2, 3]));
    assert_eq!(
        eval_source("let a = [1]; let b = push_back(a, 2); a"),
        ints(&[1])
    );
    assert_eq!(
        error_message(&eval_source("push_back(1, 1)")),
        "argument for the push_back builtin not supported, got INTEGER"
    );
    assert_eq!(
        error_message(&eval_source("push_back([1])")),
        "wrong number of args, expected=2, got=1"
    );
}

#[test]
fn test_bindings_shadow_builtins() {
    assert_eq!(eval_source("let len = fn(x) { 42 }; len([1])"), Value::int(42));
}

#[test]
fn test_builtin_values() {
    assert_eq!(eval_source("len").to_string(), "builtin(len)");
    assert_eq!(eval_source("len == len"), Value::TRUE);
    assert_eq!(eval_source("len == first"), Value::FALSE);
}

#[test]
fn test_map_with_builtins() {
    let source = "
        let map = fn(arr, f) {
            let iter = fn(arr, acc) {
                if (len(arr) == 0) { acc } else { iter(rest(arr), push_back(acc, f(first(arr)))) }
            };
            iter(arr, [])
        };
        map([1, 2, 3], fn(x) { x * 2 })
    ";
    assert_eq!(eval_source(source), ints(&[2, 4, 6]));
}
