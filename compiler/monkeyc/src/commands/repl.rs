//! Interactive read-eval-print loop.

use std::io::{BufRead, Write};

use monkey_eval::Interpreter;

use super::report_syntax_errors;
use crate::cli::Options;
use crate::CliError;

pub const PROMPT: &str = ">> ";

/// Read lines from `input` until EOF, evaluating each in one persistent
/// interpreter.
///
/// Lines with syntax errors are reported and skipped. Every value is
/// printed, errors included.
pub fn run_repl(
    input: impl BufRead,
    out: &mut impl Write,
    options: &Options,
) -> Result<(), CliError> {
    if !options.quiet {
        writeln!(
            out,
            "Monkey {} (Ctrl-D to exit)",
            env!("CARGO_PKG_VERSION")
        )?;
    }

    let mut interpreter = Interpreter::builder()
        .max_call_depth(options.max_call_depth)
        .build();
    let mut lines = input.lines();
    loop {
        if !options.quiet {
            write!(out, "{PROMPT}")?;
            out.flush()?;
        }
        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let result = monkey_parse::parse(&monkey_lexer::lex(&line));
        if result.has_errors() {
            report_syntax_errors(&line, &result.errors, out)?;
            continue;
        }
        let value = interpreter.eval_program(&result.program);
        writeln!(out, "{value}")?;
    }

    if !options.quiet {
        writeln!(out)?;
    }
    Ok(())
}
