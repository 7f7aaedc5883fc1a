//! Evaluation errors and the control channel used to propagate them.
//!
//! Every evaluation step returns [`EvalResult`]. Its error side,
//! [`ControlAction`], carries both a `return` unwinding to the nearest call
//! boundary and a runtime error unwinding to the program boundary, so
//! callers propagate both with `?`.
//!
//! Factory functions below are the public API for building errors; the
//! message text comes from [`EvalErrorKind`]'s `Display`.

use std::fmt;

use monkey_ir::{InfixOp, PrefixOp, Span};

use crate::value::Value;

/// Result of evaluating one node.
pub type EvalResult = Result<Value, ControlAction>;

/// Non-local exits from an evaluation step.
#[derive(Clone, Debug, PartialEq)]
pub enum ControlAction {
    /// `return`: unwound to the enclosing call, or to the program.
    Return(Value),
    /// A runtime error: unwound to the program boundary.
    Error(EvalError),
}

impl ControlAction {
    /// Attach `span` to an error that has none yet.
    #[must_use]
    pub fn with_span(self, span: Span) -> Self {
        match self {
            ControlAction::Error(err) if err.span.is_none() => {
                ControlAction::Error(err.with_span(span))
            }
            other => other,
        }
    }
}

impl From<EvalError> for ControlAction {
    fn from(err: EvalError) -> Self {
        ControlAction::Error(err)
    }
}

/// Typed error category. `Display` produces the user-facing message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EvalErrorKind {
    // Operators
    UnknownPrefixOperator {
        op: PrefixOp,
        operand: &'static str,
    },
    UnknownInfixOperator {
        left: &'static str,
        op: InfixOp,
        right: &'static str,
    },
    TypeMismatch {
        left: &'static str,
        op: InfixOp,
        right: &'static str,
    },

    // Arithmetic
    DivisionByZero,
    IntegerOverflow {
        operation: &'static str,
    },

    // Names and calls
    VariableNotFound {
        name: String,
    },
    NotAFunction {
        type_name: &'static str,
    },
    WrongArgCount {
        expected: usize,
        got: usize,
    },
    UnsupportedArgument {
        builtin: &'static str,
        type_name: &'static str,
    },
    RecursionLimit {
        limit: usize,
    },

    // Indexing
    IndexOutOfBounds {
        max: i64,
        index: i64,
    },
    IndexNotSupported {
        collection: &'static str,
        index: &'static str,
    },
    UnusableAsHashKey {
        type_name: &'static str,
    },
}

impl fmt::Display for EvalErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownPrefixOperator { op, operand } => {
                write!(f, "unknown operator: {op}{operand}")
            }
            Self::UnknownInfixOperator { left, op, right } => {
                write!(f, "unknown operator: {left} {op} {right}")
            }
            Self::TypeMismatch { left, op, right } => {
                write!(f, "type mismatch: {left} {op} {right}")
            }
            Self::DivisionByZero => write!(f, "division by zero"),
            Self::IntegerOverflow { operation } => write!(f, "integer overflow in {operation}"),
            Self::VariableNotFound { name } => write!(f, "variable not found: {name}"),
            Self::NotAFunction { type_name } => write!(f, "not a function: {type_name}"),
            Self::WrongArgCount { expected, got } => {
                write!(f, "wrong number of args, expected={expected}, got={got}")
            }
            Self::UnsupportedArgument { builtin, type_name } => {
                write!(f, "argument for the {builtin} builtin not supported, got {type_name}")
            }
            Self::RecursionLimit { limit } => {
                write!(f, "maximum recursion depth exceeded (limit: {limit})")
            }
            Self::IndexOutOfBounds { max, index } => write!(
                f,
                "array out of bound index, min index=0, max index={max}, got={index}"
            ),
            Self::IndexNotSupported { collection, index } => {
                write!(f, "index operator not supported: {collection}[{index}]")
            }
            Self::UnusableAsHashKey { type_name } => {
                write!(f, "unusable as hash key: {type_name}")
            }
        }
    }
}

/// A runtime error, with the span of the expression that raised it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvalError {
    pub kind: EvalErrorKind,
    pub span: Option<Span>,
}

impl EvalError {
    pub fn new(kind: EvalErrorKind) -> Self {
        EvalError { kind, span: None }
    }

    /// The user-facing message.
    pub fn message(&self) -> String {
        self.kind.to_string()
    }

    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.kind.fmt(f)
    }
}

impl std::error::Error for EvalError {}

// Operator errors

#[cold]
pub fn unknown_prefix_operator(op: PrefixOp, operand: &'static str) -> EvalError {
    EvalError::new(EvalErrorKind::UnknownPrefixOperator { op, operand })
}

#[cold]
pub fn unknown_infix_operator(left: &'static str, op: InfixOp, right: &'static str) -> EvalError {
    EvalError::new(EvalErrorKind::UnknownInfixOperator { left, op, right })
}

#[cold]
pub fn type_mismatch(left: &'static str, op: InfixOp, right: &'static str) -> EvalError {
    EvalError::new(EvalErrorKind::TypeMismatch { left, op, right })
}

#[cold]
pub fn division_by_zero() -> EvalError {
    EvalError::new(EvalErrorKind::DivisionByZero)
}

#[cold]
pub fn integer_overflow(operation: &'static str) -> EvalError {
    EvalError::new(EvalErrorKind::IntegerOverflow { operation })
}

// Name and call errors

#[cold]
pub fn variable_not_found(name: &str) -> EvalError {
    EvalError::new(EvalErrorKind::VariableNotFound {
        name: name.to_string(),
    })
}

#[cold]
pub fn not_a_function(type_name: &'static str) -> EvalError {
    EvalError::new(EvalErrorKind::NotAFunction { type_name })
}

#[cold]
pub fn wrong_arg_count(expected: usize, got: usize) -> EvalError {
    EvalError::new(EvalErrorKind::WrongArgCount { expected, got })
}

#[cold]
pub fn unsupported_argument(builtin: &'static str, type_name: &'static str) -> EvalError {
    EvalError::new(EvalErrorKind::UnsupportedArgument { builtin, type_name })
}

#[cold]
pub fn recursion_limit_exceeded(limit: usize) -> EvalError {
    EvalError::new(EvalErrorKind::RecursionLimit { limit })
}

// Index errors

#[cold]
pub fn index_out_of_bounds(max: i64, index: i64) -> EvalError {
    EvalError::new(EvalErrorKind::IndexOutOfBounds { max, index })
}

#[cold]
pub fn index_not_supported(collection: &'static str, index: &'static str) -> EvalError {
    EvalError::new(EvalErrorKind::IndexNotSupported { collection, index })
}

#[cold]
pub fn unusable_as_hash_key(type_name: &'static str) -> EvalError {
    EvalError::new(EvalErrorKind::UnusableAsHashKey { type_name })
}
