//! Function call evaluation methods for the Interpreter.

use monkey_ir::Expr;
use tracing::trace;

use super::Interpreter;
use crate::environment::Environment;
use crate::errors::{
    not_a_function, recursion_limit_exceeded, wrong_arg_count, ControlAction, EvalError,
    EvalResult,
};
use crate::value::{FunctionValue, Value};

impl Interpreter {
    /// `callee(args)`: the callee is checked before any argument is
    /// evaluated.
    pub(super) fn eval_call(&mut self, callee: &Expr, args: &[Expr]) -> EvalResult {
        let function = self.eval_expr(callee)?;
        if !matches!(function, Value::Function(_) | Value::Builtin(_)) {
            return Err(not_a_function(function.type_name()).into());
        }
        let args = self.eval_expr_list(args)?;
        self.apply_function(&function, args)
    }

    /// Apply a function or builtin to already evaluated arguments.
    #[tracing::instrument(level = "debug", skip_all, fields(args = args.len()))]
    pub fn apply_function(&mut self, function: &Value, args: Vec<Value>) -> EvalResult {
        match function {
            Value::Function(func) => self.call_user_function(func, args),
            Value::Builtin(builtin) => {
                trace!(name = builtin.name, "calling builtin");
                Ok(builtin.call(&args)?)
            }
            other => Err(not_a_function(other.type_name()).into()),
        }
    }

    fn call_user_function(&mut self, func: &FunctionValue, args: Vec<Value>) -> EvalResult {
        let params = func.params();
        if args.len() < params.len() {
            return Err(wrong_arg_count(params.len(), args.len()).into());
        }
        self.check_recursion_limit()?;

        let frame = Environment::new_enclosed(func.env());
        // Arguments past the parameter list are dropped.
        for (param, arg) in params.iter().zip(args) {
            frame.set(param.name.as_str(), arg);
        }

        let caller = std::mem::replace(&mut self.env, frame);
        self.call_depth += 1;
        let result = self.eval_block(func.body());
        self.call_depth -= 1;
        self.env = caller;

        match result {
            Err(ControlAction::Return(value)) => Ok(value),
            other => other,
        }
    }

    pub(crate) fn check_recursion_limit(&self) -> Result<(), EvalError> {
        if self.call_depth >= self.max_call_depth {
            return Err(recursion_limit_exceeded(self.max_call_depth));
        }
        Ok(())
    }
}
