//! Syntax tree produced by the parser and walked by the evaluator.
//!
//! Every node carries the [`Span`] it was parsed from. Equality is
//! structural and ignores spans, so a program re-parsed from its own
//! canonical rendering compares equal to the original.

mod display;
mod operators;

pub use operators::{InfixOp, PrefixOp};

use std::rc::Rc;

use crate::Span;

/// Root of a parsed program.
#[derive(Clone, Debug, Default)]
pub struct Program {
    pub statements: Vec<Stmt>,
}

impl Program {
    pub fn new(statements: Vec<Stmt>) -> Self {
        Program { statements }
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}

impl PartialEq for Program {
    fn eq(&self, other: &Self) -> bool {
        self.statements == other.statements
    }
}
impl Eq for Program {}

/// An identifier occurrence: a `let` target or a function parameter.
#[derive(Clone, Debug)]
pub struct Ident {
    pub name: String,
    pub span: Span,
}

impl Ident {
    pub fn new(name: impl Into<String>, span: Span) -> Self {
        Ident {
            name: name.into(),
            span,
        }
    }
}

impl PartialEq for Ident {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}
impl Eq for Ident {}

/// A statement with its span.
#[derive(Clone, Debug)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

impl Stmt {
    pub fn new(kind: StmtKind, span: Span) -> Self {
        Stmt { kind, span }
    }
}

impl PartialEq for Stmt {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
    }
}
impl Eq for Stmt {}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StmtKind {
    /// `let name = value;`
    Let { name: Ident, value: Expr },
    /// `return value;` or a bare `return;`
    Return { value: Option<Expr> },
    /// An expression evaluated for its value.
    Expr(Expr),
}

/// `{ statements }`: body of a conditional branch or function literal.
#[derive(Clone, Debug)]
pub struct Block {
    pub statements: Vec<Stmt>,
    pub span: Span,
}

impl Block {
    pub fn new(statements: Vec<Stmt>, span: Span) -> Self {
        Block { statements, span }
    }
}

impl PartialEq for Block {
    fn eq(&self, other: &Self) -> bool {
        self.statements == other.statements
    }
}
impl Eq for Block {}

/// An expression with its span.
#[derive(Clone, Debug)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Expr { kind, span }
    }
}

impl PartialEq for Expr {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
    }
}
impl Eq for Expr {}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExprKind {
    Ident(String),
    Int(i64),
    Bool(bool),
    Str(String),
    Array(Vec<Expr>),
    /// Key/value pairs in the order the source listed them.
    Hash(Vec<(Expr, Expr)>),
    Prefix {
        op: PrefixOp,
        operand: Box<Expr>,
    },
    Infix {
        op: InfixOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    If {
        condition: Box<Expr>,
        consequence: Block,
        alternative: Option<Block>,
    },
    /// Shared with every function value created from this literal.
    Function(Rc<FunctionLit>),
    Call {
        callee: Box<Expr>,
        args: Vec<Expr>,
    },
    Index {
        collection: Box<Expr>,
        index: Box<Expr>,
    },
}

/// `fn(params) { body }`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FunctionLit {
    pub params: Vec<Ident>,
    pub body: Block,
}

#[cfg(test)]
mod tests;
