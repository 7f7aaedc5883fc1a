//! `InterpreterBuilder` for creating Interpreter instances.

use super::{Interpreter, ScopeOwnership};
use crate::environment::Environment;

/// Call depth allowed before a call fails with a recursion-limit error.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 10_000;

/// Builder for [`Interpreter`].
///
/// Without [`env`](Self::env) the interpreter creates and owns a fresh root
/// environment, and reclaims every frame under it when dropped. With it,
/// the caller keeps ownership of the environment.
#[derive(Debug)]
pub struct InterpreterBuilder {
    env: Option<Environment>,
    max_call_depth: usize,
}

impl InterpreterBuilder {
    pub fn new() -> Self {
        InterpreterBuilder {
            env: None,
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
        }
    }

    /// Evaluate in an existing root environment.
    #[must_use]
    pub fn env(mut self, env: Environment) -> Self {
        self.env = Some(env);
        self
    }

    /// Maximum depth of nested user function calls. Zero forbids calls.
    #[must_use]
    pub fn max_call_depth(mut self, depth: usize) -> Self {
        self.max_call_depth = depth;
        self
    }

    pub fn build(self) -> Interpreter {
        let (root, scope_ownership) = match self.env {
            Some(env) => (env, ScopeOwnership::Borrowed),
            None => (Environment::new(), ScopeOwnership::Owned),
        };
        Interpreter {
            env: root.clone(),
            root,
            scope_ownership,
            max_call_depth: self.max_call_depth,
            call_depth: 0,
        }
    }
}

impl Default for InterpreterBuilder {
    fn default() -> Self {
        InterpreterBuilder::new()
    }
}
