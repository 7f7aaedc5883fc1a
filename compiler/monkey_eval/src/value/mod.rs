//! Runtime values.
//!
//! Composite values live behind [`Heap`], whose constructor is private to
//! this module: build values with the factory methods on [`Value`]
//! (`Value::string`, `Value::array`, ...).
//!
//! Booleans and null carry no allocation, so [`Value::TRUE`],
//! [`Value::FALSE`] and [`Value::NULL`] are the only instances there are;
//! comparing them by value is comparing them by identity.

mod function;
mod hash;
mod heap;

use std::fmt;
use std::rc::Rc;

use monkey_ir::FunctionLit;

pub use function::{Builtin, BuiltinFn, FunctionValue};
pub use hash::{HashKey, HashKeyTag, HashValue};
pub use heap::Heap;

use crate::environment::Environment;
use crate::errors::EvalError;

#[derive(Clone, Debug)]
pub enum Value {
    Integer(i64),
    Boolean(bool),
    Null,
    String(Heap<String>),
    Array(Heap<Vec<Value>>),
    Hash(Heap<HashValue>),
    Function(FunctionValue),
    Builtin(Builtin),
    /// A runtime error surfaced at the program boundary.
    Error(Heap<EvalError>),
}

impl Value {
    pub const TRUE: Value = Value::Boolean(true);
    pub const FALSE: Value = Value::Boolean(false);
    pub const NULL: Value = Value::Null;

    // Factory methods

    #[inline]
    pub fn int(value: i64) -> Value {
        Value::Integer(value)
    }

    #[inline]
    pub fn boolean(value: bool) -> Value {
        if value {
            Value::TRUE
        } else {
            Value::FALSE
        }
    }

    pub fn string(value: impl Into<String>) -> Value {
        Value::String(Heap::new(value.into()))
    }

    pub fn array(items: Vec<Value>) -> Value {
        Value::Array(Heap::new(items))
    }

    pub fn hash(contents: HashValue) -> Value {
        Value::Hash(Heap::new(contents))
    }

    pub fn function(lit: Rc<FunctionLit>, env: Environment) -> Value {
        Value::Function(FunctionValue::new(lit, env))
    }

    pub fn builtin(builtin: Builtin) -> Value {
        Value::Builtin(builtin)
    }

    pub fn error(err: EvalError) -> Value {
        Value::Error(Heap::new(err))
    }

    // Inspection

    /// Type name used in diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Integer(_) => "INTEGER",
            Value::Boolean(_) => "BOOLEAN",
            Value::Null => "NULL",
            Value::String(_) => "STRING",
            Value::Array(_) => "ARRAY",
            Value::Hash(_) => "HASH",
            Value::Function(_) => "FUNCTION",
            Value::Builtin(_) => "BUILTIN",
            Value::Error(_) => "ERROR",
        }
    }

    /// Only `false` and `null` are falsy.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Boolean(false) | Value::Null)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Value::Error(_))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_error(&self) -> Option<&EvalError> {
        match self {
            Value::Error(err) => Some(err),
            _ => None,
        }
    }

    /// Key for hash lookup, or `None` if values of this type are unhashable.
    pub fn hash_key(&self) -> Option<HashKey> {
        match self {
            Value::Integer(n) => Some(HashKey::integer(*n)),
            Value::Boolean(b) => Some(HashKey::boolean(*b)),
            Value::String(s) => Some(HashKey::string(s)),
            _ => None,
        }
    }

    /// Identity comparison used by `==` and `!=` outside integers and
    /// strings. Composite values are identical only when they share an
    /// allocation; values of different types never are.
    pub fn identical(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Null, Value::Null) => true,
            (Value::String(a), Value::String(b)) => Heap::ptr_eq(a, b),
            (Value::Array(a), Value::Array(b)) => Heap::ptr_eq(a, b),
            (Value::Hash(a), Value::Hash(b)) => Heap::ptr_eq(a, b),
            (Value::Function(a), Value::Function(b)) => a.ptr_eq(b),
            (Value::Builtin(a), Value::Builtin(b)) => a == b,
            (Value::Error(a), Value::Error(b)) => Heap::ptr_eq(a, b),
            _ => false,
        }
    }
}

/// Structural equality, used by tests and hash key confirmation. Functions
/// compare by identity.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Null, Value::Null) => true,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Hash(a), Value::Hash(b)) => a == b,
            (Value::Function(a), Value::Function(b)) => a.ptr_eq(b),
            (Value::Builtin(a), Value::Builtin(b)) => a == b,
            (Value::Error(a), Value::Error(b)) => a.kind == b.kind,
            _ => false,
        }
    }
}

/// Output form: strings print bare at the top level and quoted inside
/// arrays and hashes.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => f.write_str(s),
            Value::Error(err) => write!(f, "ERROR: {err}"),
            other => fmt_nested(other, f),
        }
    }
}

fn fmt_nested(value: &Value, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match value {
        Value::Integer(n) => write!(f, "{n}"),
        Value::Boolean(b) => write!(f, "{b}"),
        Value::Null => f.write_str("null"),
        Value::String(s) => write!(f, "{:?}", &***s),
        Value::Array(items) => {
            f.write_str("[")?;
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                fmt_nested(item, f)?;
            }
            f.write_str("]")
        }
        Value::Hash(hash) => {
            f.write_str("{")?;
            for (i, (key, value)) in hash.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                fmt_nested(key, f)?;
                f.write_str(": ")?;
                fmt_nested(value, f)?;
            }
            f.write_str("}")
        }
        Value::Function(func) => write!(f, "{func}"),
        Value::Builtin(builtin) => write!(f, "builtin({})", builtin.name),
        Value::Error(err) => write!(f, "ERROR: {err}"),
    }
}
