//! Command handlers for the `monkey` CLI.
//!
//! Each handler writes to the streams it is given, so the binary passes
//! stdout/stderr and tests pass buffers. Shared helpers for reading
//! sources and reporting syntax errors live here in the module root.

mod debug;
mod repl;
mod run;

use std::io::Write;
use std::path::Path;

use monkey_ir::Program;
use monkey_parse::ParseError;

use crate::CliError;

pub use debug::{lex_source, parse_source};
pub use repl::{run_repl, PROMPT};
pub use run::run_source;

/// Read a source file.
pub fn read_source(path: &Path) -> Result<String, CliError> {
    std::fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Print each syntax error with its location.
fn report_syntax_errors(
    source: &str,
    errors: &[ParseError],
    out: &mut impl Write,
) -> std::io::Result<()> {
    for error in errors {
        let (line, column) = error.span.line_col(source);
        writeln!(out, "error: {}", error.message)?;
        writeln!(out, "  --> {line}:{column}")?;
    }
    Ok(())
}

/// Lex and parse `source`, reporting syntax errors to `err`.
fn parse_program(source: &str, err: &mut impl Write) -> Result<Program, CliError> {
    let result = monkey_parse::parse(&monkey_lexer::lex(source));
    if result.has_errors() {
        report_syntax_errors(source, &result.errors, err)?;
        return Err(CliError::Syntax {
            count: result.errors.len(),
        });
    }
    Ok(result.program)
}
