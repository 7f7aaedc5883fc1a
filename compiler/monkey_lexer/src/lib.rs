//! Lexer for Monkey using logos.
//!
//! Logos recognises [`RawToken`]s; this crate cooks them into
//! [`monkey_ir::Token`]s: comments are dropped, string literals are
//! unescaped, and anything unrecognised becomes a single `Illegal` token so
//! the parser can report it in context.

mod escape;
mod raw_token;

use logos::Logos;
use monkey_ir::{Span, Token, TokenKind, TokenList};

use escape::unescape_string;
use raw_token::RawToken;

/// Pull-based lexer over one source string.
///
/// [`Lexer::next_token`] returns `Eof` once the input is exhausted, and
/// keeps returning it on every further call.
pub struct Lexer<'src> {
    raw: logos::Lexer<'src, RawToken>,
    source_len: usize,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str) -> Self {
        Lexer {
            raw: RawToken::lexer(source),
            source_len: source.len(),
        }
    }

    /// Produce the next token.
    pub fn next_token(&mut self) -> Token {
        while let Some(result) = self.raw.next() {
            let span = Span::from_range(self.raw.span());
            let slice = self.raw.slice();

            let Ok(raw) = result else {
                return Token::new(TokenKind::Illegal, slice, span);
            };
            let Some(kind) = raw.kind() else {
                continue;
            };
            let text = match raw {
                RawToken::Str => unescape_string(&slice[1..slice.len() - 1]),
                _ => slice.to_string(),
            };
            return Token::new(kind, text, span);
        }
        Token::new(
            TokenKind::Eof,
            "",
            Span::from_range(self.source_len..self.source_len),
        )
    }

    /// Lex the remaining input into a list ending with `Eof`.
    pub fn tokenize(mut self) -> TokenList {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token();
            let done = token.kind == TokenKind::Eof;
            tokens.push(token);
            if done {
                return TokenList::from_vec(tokens);
            }
        }
    }
}

/// Lex a whole source string.
pub fn lex(source: &str) -> TokenList {
    Lexer::new(source).tokenize()
}
