//! Prefix operator implementations.

use monkey_ir::PrefixOp;

use crate::errors::{integer_overflow, unknown_prefix_operator, EvalError};
use crate::value::Value;

/// Evaluate `op operand`.
///
/// `!` applies to every value through truthiness; `-` only to integers.
pub fn evaluate_prefix(op: PrefixOp, operand: &Value) -> Result<Value, EvalError> {
    match (op, operand) {
        (PrefixOp::Not, value) => Ok(Value::boolean(!value.is_truthy())),
        (PrefixOp::Neg, Value::Integer(n)) => n
            .checked_neg()
            .map(Value::int)
            .ok_or_else(|| integer_overflow("negation")),
        (PrefixOp::Neg, value) => Err(unknown_prefix_operator(op, value.type_name())),
    }
}
