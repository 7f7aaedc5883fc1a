//! Token types shared by the lexer and parser.

mod kind;
mod list;

pub use kind::TokenKind;
pub use list::TokenList;

use std::fmt;

use super::Span;

/// A token with its text and span in the source.
///
/// `text` is the source slice for most tokens. For string literals it is the
/// cooked content: quotes removed and escapes resolved.
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub span: Span,
}

impl Token {
    #[inline]
    pub fn new(kind: TokenKind, text: impl Into<String>, span: Span) -> Self {
        Token {
            kind,
            text: text.into(),
            span,
        }
    }

    /// Create a token with a dummy span, for tests and generated code.
    pub fn dummy(kind: TokenKind, text: impl Into<String>) -> Self {
        Token::new(kind, text, Span::DUMMY)
    }

    /// Text shown for this token in diagnostics.
    pub fn describe(&self) -> &str {
        match self.kind {
            TokenKind::Eof => "EOF",
            _ => &self.text,
        }
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({:?}) @ {}", self.kind, self.text, self.span)
    }
}
