//! Pratt parser for Monkey.
//!
//! [`parse`] turns a [`TokenList`] into a [`Program`] and never fails: syntax
//! errors are collected in [`ParseResult::errors`] and parsing resumes at the
//! next statement boundary so later errors surface too. A program with any
//! errors must not be evaluated.

mod cursor;
mod error;
mod grammar;
mod recovery;

#[cfg(test)]
mod tests;

use monkey_ir::{Program, Span, Token, TokenKind, TokenList};
use tracing::debug;

pub use error::ParseError;
pub use grammar::Precedence;

use cursor::Cursor;

/// Result of parsing: a best-effort program plus every syntax error found.
#[derive(Clone, Debug)]
pub struct ParseResult {
    pub program: Program,
    pub errors: Vec<ParseError>,
}

impl ParseResult {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Error messages in the order they were found.
    pub fn error_messages(&self) -> Vec<String> {
        self.errors.iter().map(|e| e.message.clone()).collect()
    }
}

/// Parser state: the cursor plus accumulated errors.
pub struct Parser<'a> {
    cursor: Cursor<'a>,
    errors: Vec<ParseError>,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a TokenList) -> Self {
        Parser {
            cursor: Cursor::new(tokens),
            errors: Vec::new(),
        }
    }

    /// Parse the whole token list.
    pub fn parse_program(mut self) -> ParseResult {
        let mut statements = Vec::new();
        while !self.cursor.is_at_end() {
            if let Some(stmt) = self.parse_statement_recovering() {
                statements.push(stmt);
            }
        }
        ParseResult {
            program: Program::new(statements),
            errors: self.errors,
        }
    }

    // Cursor delegation

    #[inline]
    fn current(&self) -> &'a Token {
        self.cursor.current()
    }

    #[inline]
    fn current_kind(&self) -> TokenKind {
        self.cursor.current_kind()
    }

    #[inline]
    fn current_span(&self) -> Span {
        self.cursor.current_span()
    }

    #[inline]
    fn previous_span(&self) -> Span {
        self.cursor.previous_span()
    }

    #[inline]
    fn check(&self, kind: TokenKind) -> bool {
        self.cursor.check(kind)
    }

    #[inline]
    fn is_at_end(&self) -> bool {
        self.cursor.is_at_end()
    }

    #[inline]
    fn advance(&mut self) -> &'a Token {
        self.cursor.advance()
    }

    #[inline]
    fn eat(&mut self, kind: TokenKind) -> bool {
        self.cursor.eat(kind)
    }

    /// Consume a token of the given kind, or record an error.
    fn expect(&mut self, kind: TokenKind) -> Option<&'a Token> {
        if self.check(kind) {
            Some(self.advance())
        } else {
            self.error(ParseError::unexpected(kind, self.current()));
            None
        }
    }

    fn error(&mut self, error: ParseError) {
        debug!(span = %error.span, message = %error.message, "syntax error");
        self.errors.push(error);
    }
}

/// Parse a token list into a program.
pub fn parse(tokens: &TokenList) -> ParseResult {
    Parser::new(tokens).parse_program()
}
