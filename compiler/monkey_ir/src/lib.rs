//! Monkey IR - tokens, spans and the syntax tree.
//!
//! Shared by the lexer (producer of [`TokenList`]), the parser (producer of
//! [`Program`]) and the evaluator (consumer of [`Program`]).

pub mod ast;
mod span;
mod token;

pub use ast::{
    Block, Expr, ExprKind, FunctionLit, Ident, InfixOp, PrefixOp, Program, Stmt, StmtKind,
};
pub use span::Span;
pub use token::{Token, TokenKind, TokenList};
