//! Token list produced by the lexer.

use super::{Token, TokenKind};
use crate::Span;

/// A list of tokens, always terminated by exactly one [`TokenKind::Eof`].
///
/// Equality compares kinds and text only, so the same program lexed with
/// different whitespace yields equal lists.
#[derive(Clone, Debug)]
pub struct TokenList {
    tokens: Vec<Token>,
}

impl PartialEq for TokenList {
    fn eq(&self, other: &Self) -> bool {
        self.tokens.len() == other.tokens.len()
            && self
                .tokens
                .iter()
                .zip(other.tokens.iter())
                .all(|(a, b)| a.kind == b.kind && a.text == b.text)
    }
}
impl Eq for TokenList {}

impl TokenList {
    /// Build a list from raw tokens.
    ///
    /// Anything after the first `Eof` is dropped, and a missing `Eof` is
    /// appended at the end of the last token.
    pub fn from_vec(mut tokens: Vec<Token>) -> Self {
        if let Some(eof) = tokens.iter().position(|t| t.kind == TokenKind::Eof) {
            tokens.truncate(eof + 1);
        } else {
            let end = tokens.last().map_or(0, |t| t.span.end);
            tokens.push(Token::new(TokenKind::Eof, "", Span::point(end)));
        }
        TokenList { tokens }
    }

    /// Number of tokens, including the trailing `Eof`.
    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// True when the list holds nothing but `Eof`.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.len() <= 1
    }

    #[inline]
    pub fn as_slice(&self) -> &[Token] {
        &self.tokens
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &Token> {
        self.tokens.iter()
    }

    /// Kinds of every token, `Eof` included.
    pub fn kinds(&self) -> Vec<TokenKind> {
        self.tokens.iter().map(|t| t.kind).collect()
    }
}

impl<'a> IntoIterator for &'a TokenList {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}
