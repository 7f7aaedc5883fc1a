//! Infix and index operator implementations.
//!
//! Dispatch is a direct match over the operand pair. Integer arithmetic is
//! checked: overflow and division by zero surface as error values rather
//! than wrapping or panicking.

use monkey_ir::InfixOp;

use crate::errors::{
    division_by_zero, index_not_supported, index_out_of_bounds, integer_overflow,
    type_mismatch, unknown_infix_operator, unusable_as_hash_key, EvalError,
};
use crate::value::{HashValue, Value};

/// Checked arithmetic where the only failure is overflow.
#[inline]
fn checked_arith(result: Option<i64>, op_name: &'static str) -> Result<Value, EvalError> {
    result.map(Value::int).ok_or_else(|| integer_overflow(op_name))
}

/// Evaluate `left op right`.
pub fn evaluate_infix(op: InfixOp, left: &Value, right: &Value) -> Result<Value, EvalError> {
    match (left, right) {
        (Value::Integer(a), Value::Integer(b)) => eval_int_infix(op, *a, *b),
        (Value::String(a), Value::String(b)) => eval_string_infix(op, a, b),
        _ => match op {
            InfixOp::Eq => Ok(Value::boolean(left.identical(right))),
            InfixOp::NotEq => Ok(Value::boolean(!left.identical(right))),
            _ if left.type_name() != right.type_name() => {
                Err(type_mismatch(left.type_name(), op, right.type_name()))
            }
            _ => Err(unknown_infix_operator(
                left.type_name(),
                op,
                right.type_name(),
            )),
        },
    }
}

fn eval_int_infix(op: InfixOp, a: i64, b: i64) -> Result<Value, EvalError> {
    match op {
        InfixOp::Add => checked_arith(a.checked_add(b), "addition"),
        InfixOp::Sub => checked_arith(a.checked_sub(b), "subtraction"),
        InfixOp::Mul => checked_arith(a.checked_mul(b), "multiplication"),
        InfixOp::Div => {
            if b == 0 {
                Err(division_by_zero())
            } else {
                checked_arith(a.checked_div(b), "division")
            }
        }
        InfixOp::Lt => Ok(Value::boolean(a < b)),
        InfixOp::Gt => Ok(Value::boolean(a > b)),
        InfixOp::Eq => Ok(Value::boolean(a == b)),
        InfixOp::NotEq => Ok(Value::boolean(a != b)),
    }
}

/// Strings concatenate with `+` and compare by content.
fn eval_string_infix(op: InfixOp, a: &str, b: &str) -> Result<Value, EvalError> {
    match op {
        InfixOp::Add => {
            let mut joined = String::with_capacity(a.len() + b.len());
            joined.push_str(a);
            joined.push_str(b);
            Ok(Value::string(joined))
        }
        InfixOp::Lt => Ok(Value::boolean(a < b)),
        InfixOp::Gt => Ok(Value::boolean(a > b)),
        InfixOp::Eq => Ok(Value::boolean(a == b)),
        InfixOp::NotEq => Ok(Value::boolean(a != b)),
        InfixOp::Sub | InfixOp::Mul | InfixOp::Div => {
            Err(unknown_infix_operator("STRING", op, "STRING"))
        }
    }
}

/// Evaluate `collection[index]`.
pub fn evaluate_index(collection: &Value, index: &Value) -> Result<Value, EvalError> {
    match (collection, index) {
        (Value::Array(items), Value::Integer(i)) => index_array(items, *i),
        (Value::Hash(hash), key) => index_hash(hash, key),
        _ => Err(index_not_supported(
            collection.type_name(),
            index.type_name(),
        )),
    }
}

fn index_array(items: &[Value], index: i64) -> Result<Value, EvalError> {
    let max = i64::try_from(items.len()).unwrap_or(i64::MAX) - 1;
    usize::try_from(index)
        .ok()
        .and_then(|i| items.get(i))
        .cloned()
        .ok_or_else(|| index_out_of_bounds(max, index))
}

/// Missing keys yield `null`.
fn index_hash(hash: &HashValue, key: &Value) -> Result<Value, EvalError> {
    let hash_key = key
        .hash_key()
        .ok_or_else(|| unusable_as_hash_key(key.type_name()))?;
    Ok(hash.get_keyed(hash_key, key).cloned().unwrap_or(Value::NULL))
}
