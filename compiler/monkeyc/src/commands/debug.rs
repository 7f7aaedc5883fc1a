//! Debug commands: `lex` and `parse` for inspecting the front end.

use std::io::Write;

use super::parse_program;
use crate::CliError;

/// Print the token stream, one token per line.
pub fn lex_source(source: &str, out: &mut impl Write) -> Result<(), CliError> {
    for token in &monkey_lexer::lex(source) {
        writeln!(out, "{:?} {} @ {}", token.kind, token.describe(), token.span)?;
    }
    Ok(())
}

/// Print the canonical rendering of the program, or its syntax errors.
pub fn parse_source(
    source: &str,
    out: &mut impl Write,
    err: &mut impl Write,
) -> Result<(), CliError> {
    let program = parse_program(source, err)?;
    writeln!(out, "{program}")?;
    Ok(())
}
