//! The `run` command: parse and evaluate a whole program.

use std::io::Write;

use monkey_eval::Interpreter;
use tracing::debug;

use super::parse_program;
use crate::cli::Options;
use crate::CliError;

/// Evaluate `source` in a fresh interpreter.
///
/// The final value goes to `out` unless it is `null` or `options.quiet`
/// is set. Syntax errors and a runtime error go to `err`.
pub fn run_source(
    source: &str,
    options: &Options,
    out: &mut impl Write,
    err: &mut impl Write,
) -> Result<(), CliError> {
    let program = parse_program(source, err)?;
    debug!(statements = program.statements.len(), "parsed program");

    let mut interpreter = Interpreter::builder()
        .max_call_depth(options.max_call_depth)
        .build();
    let value = interpreter.eval_program(&program);

    if let Some(error) = value.as_error() {
        writeln!(err, "{value}")?;
        if let Some(span) = error.span {
            let (line, column) = span.line_col(source);
            writeln!(err, "  --> {line}:{column}")?;
        }
        return Err(CliError::Runtime {
            message: error.message(),
        });
    }

    if !value.is_null() && !options.quiet {
        writeln!(out, "{value}")?;
    }
    Ok(())
}
