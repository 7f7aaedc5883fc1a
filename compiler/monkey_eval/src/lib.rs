//! Monkey evaluator.
//!
//! Evaluates a parsed [`Program`](monkey_ir::Program) to a [`Value`].
//!
//! # Architecture
//!
//! - `value`: runtime values, hash keys and hash storage
//! - `environment`: scope frames and closure cycle reclamation
//! - `errors`: [`EvalError`] and the [`ControlAction`] propagation channel
//! - `operators`, `unary_operators`: operator semantics
//! - `builtins`: the built-in function registry
//! - `interpreter`: the tree walk itself

pub mod builtins;
mod environment;
pub mod errors;
mod interpreter;
mod operators;
mod unary_operators;
mod value;

pub use environment::{Environment, WeakEnvironment};
pub use errors::{ControlAction, EvalError, EvalErrorKind, EvalResult};
pub use interpreter::{evaluate, Interpreter, InterpreterBuilder, DEFAULT_MAX_CALL_DEPTH};
pub use operators::{evaluate_index, evaluate_infix};
pub use unary_operators::evaluate_prefix;
pub use value::{Builtin, BuiltinFn, FunctionValue, HashKey, HashKeyTag, HashValue, Heap, Value};

#[cfg(test)]
mod tests;
