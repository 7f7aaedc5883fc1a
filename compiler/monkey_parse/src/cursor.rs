//! Token cursor for navigating the token stream.

use monkey_ir::{Span, Token, TokenKind, TokenList};
use tracing::trace;

/// Position in a [`TokenList`].
///
/// The current token is the next one not yet consumed. The cursor never
/// moves past the trailing `Eof`, so [`Cursor::current`] is always valid.
pub struct Cursor<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(tokens: &'a TokenList) -> Self {
        Cursor {
            tokens: tokens.as_slice(),
            pos: 0,
        }
    }

    /// Used for progress tracking: compare before and after a parse step.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn current(&self) -> &'a Token {
        let tokens: &'a [Token] = self.tokens;
        &tokens[self.pos]
    }

    #[inline]
    pub fn current_kind(&self) -> TokenKind {
        self.current().kind
    }

    #[inline]
    pub fn current_span(&self) -> Span {
        self.current().span
    }

    /// Span of the most recently consumed token.
    #[inline]
    pub fn previous_span(&self) -> Span {
        match self.pos.checked_sub(1) {
            Some(prev) => self.tokens[prev].span,
            None => Span::point(self.current_span().start),
        }
    }

    #[inline]
    pub fn check(&self, kind: TokenKind) -> bool {
        self.current_kind() == kind
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.check(TokenKind::Eof)
    }

    /// Tokens consumed since `start`, a previous [`Cursor::position`].
    pub fn consumed_since(&self, start: usize) -> &'a [Token] {
        let tokens: &'a [Token] = self.tokens;
        &tokens[start.min(self.pos)..self.pos]
    }

    /// Consume the current token and return it. At `Eof` this is a no-op
    /// that returns the `Eof` token.
    pub fn advance(&mut self) -> &'a Token {
        let token = self.current();
        if token.kind != TokenKind::Eof {
            trace!(pos = self.pos, kind = %token.kind, "advance");
            self.pos += 1;
        }
        token
    }

    /// Consume the current token if it has the given kind.
    pub fn eat(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use monkey_ir::{Token, TokenKind, TokenList};

    use super::Cursor;

    #[test]
    fn test_advance_stops_at_eof() {
        let tokens = TokenList::from_vec(vec![Token::dummy(TokenKind::Ident, "x")]);
        let mut cursor = Cursor::new(&tokens);
        assert_eq!(cursor.advance().kind, TokenKind::Ident);
        assert!(cursor.is_at_end());
        assert_eq!(cursor.advance().kind, TokenKind::Eof);
        assert_eq!(cursor.position(), 1);
    }

    #[test]
    fn test_consumed_since() {
        let tokens = TokenList::from_vec(vec![
            Token::dummy(TokenKind::LParen, "("),
            Token::dummy(TokenKind::Ident, "x"),
        ]);
        let mut cursor = Cursor::new(&tokens);
        cursor.advance();
        cursor.advance();
        let kinds: Vec<_> = cursor.consumed_since(1).iter().map(|t| t.kind).collect();
        assert_eq!(kinds, vec![TokenKind::Ident]);
        assert!(cursor.consumed_since(2).is_empty());
    }

    #[test]
    fn test_eat() {
        let tokens = TokenList::from_vec(vec![Token::dummy(TokenKind::Semicolon, ";")]);
        let mut cursor = Cursor::new(&tokens);
        assert!(!cursor.eat(TokenKind::Comma));
        assert!(cursor.eat(TokenKind::Semicolon));
        assert!(cursor.is_at_end());
    }
}
