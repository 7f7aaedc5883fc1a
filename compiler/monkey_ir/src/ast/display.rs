//! Canonical rendering of the syntax tree.
//!
//! Every prefix and infix expression is fully parenthesized, so the
//! rendering spells out precedence and parses back to the same tree.

use std::fmt::{self, Display, Formatter, Write};

use super::{Block, Expr, ExprKind, FunctionLit, Ident, Program, Stmt, StmtKind};

impl Display for Program {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write_statements(f, &self.statements)
    }
}

impl Display for Block {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_char('{')?;
        write_statements(f, &self.statements)?;
        f.write_char('}')
    }
}

/// Statements back to back. An expression statement followed by another
/// statement gets a `;` so the two cannot merge into a call or index.
fn write_statements(f: &mut Formatter<'_>, statements: &[Stmt]) -> fmt::Result {
    let last = statements.len().saturating_sub(1);
    for (i, stmt) in statements.iter().enumerate() {
        write!(f, "{stmt}")?;
        if i < last && matches!(stmt.kind, StmtKind::Expr(_)) {
            f.write_char(';')?;
        }
    }
    Ok(())
}

impl Display for Stmt {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.kind {
            StmtKind::Let { name, value } => write!(f, "let {name} = {value};"),
            StmtKind::Return { value: Some(value) } => write!(f, "return {value};"),
            StmtKind::Return { value: None } => f.write_str("return;"),
            StmtKind::Expr(expr) => write!(f, "{expr}"),
        }
    }
}

impl Display for Ident {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ExprKind::Ident(name) => f.write_str(name),
            ExprKind::Int(value) => write!(f, "{value}"),
            ExprKind::Bool(value) => write!(f, "{value}"),
            ExprKind::Str(value) => write_quoted(f, value),
            ExprKind::Array(elements) => {
                f.write_char('[')?;
                write_comma_separated(f, elements)?;
                f.write_char(']')
            }
            ExprKind::Hash(pairs) => {
                f.write_char('{')?;
                for (i, (key, value)) in pairs.iter().enumerate() {
                    if i > 0 {
                        f.write_char(',')?;
                    }
                    write!(f, "{key}:{value}")?;
                }
                f.write_char('}')
            }
            ExprKind::Prefix { op, operand } => write!(f, "({op}{operand})"),
            ExprKind::Infix { op, left, right } => write!(f, "({left}{op}{right})"),
            ExprKind::If {
                condition,
                consequence,
                alternative,
            } => {
                write!(f, "if {condition} {consequence}")?;
                if let Some(alternative) = alternative {
                    write!(f, " else {alternative}")?;
                }
                Ok(())
            }
            ExprKind::Function(lit) => write!(f, "{lit}"),
            ExprKind::Call { callee, args } => {
                write!(f, "{callee}(")?;
                write_comma_separated(f, args)?;
                f.write_char(')')
            }
            ExprKind::Index { collection, index } => write!(f, "({collection}[{index}])"),
        }
    }
}

impl Display for FunctionLit {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("fn(")?;
        write_comma_separated(f, &self.params)?;
        write!(f, ") {}", self.body)
    }
}

fn write_comma_separated<T: Display>(f: &mut Formatter<'_>, items: &[T]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_char(',')?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

fn write_quoted(f: &mut Formatter<'_>, value: &str) -> fmt::Result {
    f.write_char('"')?;
    for c in value.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\t' => f.write_str("\\t")?,
            '\r' => f.write_str("\\r")?,
            _ => f.write_char(c)?,
        }
    }
    f.write_char('"')
}
