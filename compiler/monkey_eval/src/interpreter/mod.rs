//! Tree-walking interpreter.
//!
//! Every evaluation step returns [`EvalResult`]; `return` and runtime errors
//! both travel on the error side as [`ControlAction`], so sequencing stops
//! at the first one with a plain `?`. Only the program boundary
//! ([`Interpreter::eval_program`]) and function application look inside.
//!
//! The interpreter holds the current frame in `env`. Calls swap in a fresh
//! frame enclosing the callee's captured environment and restore the
//! caller's frame afterwards.

mod builder;
mod function_call;

pub use builder::{InterpreterBuilder, DEFAULT_MAX_CALL_DEPTH};

use monkey_ir::{Block, Expr, ExprKind, Program, Stmt, StmtKind};
use monkey_stack::ensure_sufficient_stack;
use tracing::{debug, trace};

use crate::builtins;
use crate::environment::Environment;
use crate::errors::{unusable_as_hash_key, variable_not_found, ControlAction, EvalResult};
use crate::operators::{evaluate_index, evaluate_infix};
use crate::unary_operators::evaluate_prefix;
use crate::value::{HashValue, Value};

/// Whether dropping the interpreter reclaims its root environment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ScopeOwnership {
    /// Supplied by the caller, who decides when it is reclaimed.
    Borrowed,
    /// Created by the builder; reclaimed on drop.
    Owned,
}

pub struct Interpreter {
    /// Root frame handed to the builder.
    root: Environment,
    /// Frame currently being evaluated in.
    env: Environment,
    scope_ownership: ScopeOwnership,
    max_call_depth: usize,
    call_depth: usize,
}

impl Interpreter {
    /// An interpreter with a fresh root environment and default limits.
    pub fn new() -> Self {
        InterpreterBuilder::new().build()
    }

    pub fn builder() -> InterpreterBuilder {
        InterpreterBuilder::new()
    }

    /// The root environment bindings persist in between programs.
    pub fn env(&self) -> &Environment {
        &self.root
    }

    /// Evaluate a whole program.
    ///
    /// A top-level `return` yields its value; a runtime error yields a
    /// [`Value::Error`].
    pub fn eval_program(&mut self, program: &Program) -> Value {
        self.env = self.root.clone();
        self.call_depth = 0;
        match self.eval_statements(&program.statements) {
            Ok(value) | Err(ControlAction::Return(value)) => value,
            Err(ControlAction::Error(err)) => {
                debug!(error = %err, span = ?err.span, "evaluation failed");
                Value::error(err)
            }
        }
    }

    /// Value of the last statement, `null` when there are none.
    fn eval_statements(&mut self, statements: &[Stmt]) -> EvalResult {
        let mut result = Value::NULL;
        for stmt in statements {
            result = self.eval_stmt(stmt)?;
        }
        Ok(result)
    }

    fn eval_stmt(&mut self, stmt: &Stmt) -> EvalResult {
        match &stmt.kind {
            StmtKind::Let { name, value } => {
                let value = self.eval_expr(value)?;
                Ok(self.env.set(name.name.as_str(), value))
            }
            StmtKind::Return { value } => {
                let value = match value {
                    Some(expr) => self.eval_expr(expr)?,
                    None => Value::NULL,
                };
                Err(ControlAction::Return(value))
            }
            StmtKind::Expr(expr) => self.eval_expr(expr),
        }
    }

    /// Blocks leave `return` signals for the enclosing call to unwrap.
    fn eval_block(&mut self, block: &Block) -> EvalResult {
        self.eval_statements(&block.statements)
    }

    pub(crate) fn eval_expr(&mut self, expr: &Expr) -> EvalResult {
        ensure_sufficient_stack(|| self.eval_expr_inner(expr))
            .map_err(|action| action.with_span(expr.span))
    }

    fn eval_expr_inner(&mut self, expr: &Expr) -> EvalResult {
        match &expr.kind {
            ExprKind::Int(n) => Ok(Value::int(*n)),
            ExprKind::Bool(b) => Ok(Value::boolean(*b)),
            ExprKind::Str(s) => Ok(Value::string(s.as_str())),
            ExprKind::Ident(name) => self.eval_ident(name),
            ExprKind::Array(elements) => {
                let items = self.eval_expr_list(elements)?;
                Ok(Value::array(items))
            }
            ExprKind::Hash(pairs) => self.eval_hash_literal(pairs),
            ExprKind::Prefix { op, operand } => {
                let operand = self.eval_expr(operand)?;
                Ok(evaluate_prefix(*op, &operand)?)
            }
            ExprKind::Infix { op, left, right } => {
                let left = self.eval_expr(left)?;
                let right = self.eval_expr(right)?;
                Ok(evaluate_infix(*op, &left, &right)?)
            }
            ExprKind::If {
                condition,
                consequence,
                alternative,
            } => {
                let condition = self.eval_expr(condition)?;
                if condition.is_truthy() {
                    self.eval_block(consequence)
                } else if let Some(alternative) = alternative {
                    self.eval_block(alternative)
                } else {
                    Ok(Value::NULL)
                }
            }
            ExprKind::Function(lit) => Ok(Value::function(lit.clone(), self.env.clone())),
            ExprKind::Call { callee, args } => self.eval_call(callee, args),
            ExprKind::Index { collection, index } => {
                let collection = self.eval_expr(collection)?;
                let index = self.eval_expr(index)?;
                Ok(evaluate_index(&collection, &index)?)
            }
        }
    }

    /// Environment chain first, then built-ins.
    fn eval_ident(&self, name: &str) -> EvalResult {
        if let Some(value) = self.env.get(name) {
            return Ok(value);
        }
        if let Some(builtin) = builtins::lookup(name) {
            return Ok(Value::builtin(builtin));
        }
        trace!(name, "unbound identifier");
        Err(variable_not_found(name).into())
    }

    /// Left to right; the first error aborts.
    fn eval_expr_list(&mut self, exprs: &[Expr]) -> Result<Vec<Value>, ControlAction> {
        let mut values = Vec::with_capacity(exprs.len());
        for expr in exprs {
            values.push(self.eval_expr(expr)?);
        }
        Ok(values)
    }

    /// Pairs in source order, key before value. A repeated key overwrites
    /// the earlier value and keeps its position.
    fn eval_hash_literal(&mut self, pairs: &[(Expr, Expr)]) -> EvalResult {
        let mut hash = HashValue::with_capacity(pairs.len());
        for (key_expr, value_expr) in pairs {
            let key = self.eval_expr(key_expr)?;
            let hash_key = key
                .hash_key()
                .ok_or_else(|| unusable_as_hash_key(key.type_name()).with_span(key_expr.span))?;
            let value = self.eval_expr(value_expr)?;
            hash.insert_keyed(hash_key, key, value);
        }
        Ok(Value::hash(hash))
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Interpreter::new()
    }
}

impl Drop for Interpreter {
    fn drop(&mut self) {
        if self.scope_ownership == ScopeOwnership::Owned {
            self.env = Environment::default();
            std::mem::take(&mut self.root).reclaim();
        }
    }
}

/// Evaluate `program` in `env`.
///
/// Bindings made by the program stay in `env`. Frames created by calls are
/// not reclaimed; pass `env` to [`Environment::reclaim`] when done with it.
pub fn evaluate(program: &Program, env: &Environment) -> Value {
    Interpreter::builder()
        .env(env.clone())
        .build()
        .eval_program(program)
}
