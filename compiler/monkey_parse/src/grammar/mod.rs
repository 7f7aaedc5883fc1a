//! Grammar productions.
//!
//! - `stmt`: `let`, `return`, expression statements and blocks
//! - `expr`: the Pratt loop, its precedence table and every prefix/infix rule

mod expr;
mod stmt;

pub use expr::Precedence;
