//! Syntax errors.

use std::fmt;

use monkey_ir::{Span, Token, TokenKind};

/// A syntax error with the span of the offending token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseError {
    pub message: String,
    pub span: Span,
}

impl ParseError {
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        ParseError {
            message: message.into(),
            span,
        }
    }

    /// The token cannot start an expression.
    #[cold]
    pub fn no_prefix_rule(token: &Token) -> Self {
        ParseError::new(
            format!("no parse rule for token `{}`", token.describe()),
            token.span,
        )
    }

    /// A specific token was required but something else was found.
    #[cold]
    pub fn unexpected(expected: TokenKind, found: &Token) -> Self {
        ParseError::new(
            format!(
                "expected next token to be `{}`, got `{}`",
                expected.display_name(),
                found.describe()
            ),
            found.span,
        )
    }

    /// Integer literal out of `i64` range.
    #[cold]
    pub fn invalid_integer(token: &Token) -> Self {
        ParseError::new(
            format!("could not parse `{}` as integer", token.text),
            token.span,
        )
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ParseError {}
