//! Callable values: user functions and built-ins.

use std::fmt;
use std::rc::Rc;

use monkey_ir::{Block, FunctionLit, Ident};

use super::Value;
use crate::environment::Environment;
use crate::errors::EvalError;

/// A function literal closed over the environment it was evaluated in.
#[derive(Clone)]
pub struct FunctionValue {
    lit: Rc<FunctionLit>,
    env: Environment,
}

impl FunctionValue {
    pub fn new(lit: Rc<FunctionLit>, env: Environment) -> Self {
        FunctionValue { lit, env }
    }

    pub fn params(&self) -> &[Ident] {
        &self.lit.params
    }

    pub fn body(&self) -> &Block {
        &self.lit.body
    }

    /// The captured defining environment.
    pub fn env(&self) -> &Environment {
        &self.env
    }

    /// Same literal closed over the same environment.
    pub fn ptr_eq(&self, other: &FunctionValue) -> bool {
        Rc::ptr_eq(&self.lit, &other.lit) && self.env.ptr_eq(&other.env)
    }
}

// The captured environment may contain this function; never print it.
impl fmt::Debug for FunctionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FunctionValue({})", self.lit)
    }
}

impl fmt::Display for FunctionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.lit)
    }
}

/// Host function signature for built-ins.
pub type BuiltinFn = fn(&[Value]) -> Result<Value, EvalError>;

/// A built-in function from the static registry.
#[derive(Copy, Clone)]
pub struct Builtin {
    pub name: &'static str,
    pub func: BuiltinFn,
}

impl Builtin {
    pub fn call(&self, args: &[Value]) -> Result<Value, EvalError> {
        (self.func)(args)
    }
}

impl fmt::Debug for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Builtin({})", self.name)
    }
}

impl PartialEq for Builtin {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}
