//! Built-in functions.
//!
//! The registry is a static table consulted only when an identifier is not
//! bound in the environment chain, so user bindings shadow built-ins.

use tracing::trace;

use crate::errors::{unsupported_argument, wrong_arg_count, EvalError};
use crate::value::{Builtin, Value};

static BUILTINS: &[Builtin] = &[
    Builtin {
        name: "len",
        func: builtin_len,
    },
    Builtin {
        name: "first",
        func: builtin_first,
    },
    Builtin {
        name: "last",
        func: builtin_last,
    },
    Builtin {
        name: "rest",
        func: builtin_rest,
    },
    Builtin {
        name: "push_back",
        func: builtin_push_back,
    },
];

/// Find a built-in by name.
pub fn lookup(name: &str) -> Option<Builtin> {
    let found = BUILTINS.iter().find(|b| b.name == name).copied();
    if found.is_some() {
        trace!(name, "resolved builtin");
    }
    found
}

/// Names of every built-in, in registry order.
pub fn names() -> impl Iterator<Item = &'static str> {
    BUILTINS.iter().map(|b| b.name)
}

fn check_arity(args: &[Value], expected: usize) -> Result<(), EvalError> {
    if args.len() == expected {
        Ok(())
    } else {
        Err(wrong_arg_count(expected, args.len()))
    }
}

/// Single array argument, or the builtin's type error.
fn array_arg<'a>(name: &'static str, args: &'a [Value]) -> Result<&'a [Value], EvalError> {
    check_arity(args, 1)?;
    match &args[0] {
        Value::Array(items) => Ok(items),
        other => Err(unsupported_argument(name, other.type_name())),
    }
}

fn builtin_len(args: &[Value]) -> Result<Value, EvalError> {
    check_arity(args, 1)?;
    let len = match &args[0] {
        Value::String(s) => s.chars().count(),
        Value::Array(items) => items.len(),
        other => return Err(unsupported_argument("len", other.type_name())),
    };
    Ok(Value::int(i64::try_from(len).unwrap_or(i64::MAX)))
}

fn builtin_first(args: &[Value]) -> Result<Value, EvalError> {
    let items = array_arg("first", args)?;
    Ok(items.first().cloned().unwrap_or(Value::NULL))
}

fn builtin_last(args: &[Value]) -> Result<Value, EvalError> {
    let items = array_arg("last", args)?;
    Ok(items.last().cloned().unwrap_or(Value::NULL))
}

fn builtin_rest(args: &[Value]) -> Result<Value, EvalError> {
    let items = array_arg("rest", args)?;
    match items.split_first() {
        Some((_, rest)) => Ok(Value::array(rest.to_vec())),
        None => Ok(Value::NULL),
    }
}

fn builtin_push_back(args: &[Value]) -> Result<Value, EvalError> {
    check_arity(args, 2)?;
    match &args[0] {
        Value::Array(items) => {
            let mut pushed = Vec::with_capacity(items.len() + 1);
            pushed.extend(items.iter().cloned());
            pushed.push(args[1].clone());
            Ok(Value::array(pushed))
        }
        other => Err(unsupported_argument("push_back", other.type_name())),
    }
}
