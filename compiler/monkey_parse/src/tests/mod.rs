//! Parser tests, driven through the real lexer.

mod expr_tests;
mod recovery_tests;

use crate::{parse, ParseResult};

fn parse_source(source: &str) -> ParseResult {
    parse(&monkey_lexer::lex(source))
}

/// Parse and render, failing the test on syntax errors.
fn render(source: &str) -> String {
    let result = parse_source(source);
    assert!(
        !result.has_errors(),
        "unexpected errors for {source:?}: {:?}",
        result.error_messages()
    );
    result.program.to_string()
}
