//! Error recovery: token sets and synchronization.

use monkey_ir::{Token, TokenKind};

use crate::cursor::Cursor;

/// A set of token kinds as a bitset over the kind's discriminant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TokenSet(u64);

impl TokenSet {
    pub const fn new() -> Self {
        TokenSet(0)
    }

    #[must_use]
    pub const fn with(self, kind: TokenKind) -> Self {
        TokenSet(self.0 | (1u64 << kind as u64))
    }

    pub const fn contains(self, kind: TokenKind) -> bool {
        self.0 & (1u64 << kind as u64) != 0
    }
}

impl Default for TokenSet {
    fn default() -> Self {
        TokenSet::new()
    }
}

/// Tokens that close the statement a failed parse was in.
pub const STMT_BOUNDARY: TokenSet = TokenSet::new()
    .with(TokenKind::Semicolon)
    .with(TokenKind::RBrace)
    .with(TokenKind::Eof);

/// Tokens that open a nested delimiter.
const OPENERS: TokenSet = TokenSet::new()
    .with(TokenKind::LParen)
    .with(TokenKind::LBrace)
    .with(TokenKind::LBracket);

/// Tokens that close a nested delimiter.
const CLOSERS: TokenSet = TokenSet::new()
    .with(TokenKind::RParen)
    .with(TokenKind::RBrace)
    .with(TokenKind::RBracket);

/// Delimiters opened and not yet closed in `tokens`.
fn open_depth(tokens: &[Token]) -> usize {
    tokens.iter().fold(0, |depth: usize, token| {
        if OPENERS.contains(token.kind) {
            depth + 1
        } else if CLOSERS.contains(token.kind) {
            depth.saturating_sub(1)
        } else {
            depth
        }
    })
}

/// Skip the rest of the statement that began at `start` until a token in
/// `recovery` is current.
///
/// Delimiters the broken statement opened are skipped through to their
/// closers, so a `}` belonging to the statement is not mistaken for the end
/// of the enclosing block. A `;` stopping point is consumed since it
/// belongs to the broken statement; `}` and `Eof` are left for the
/// enclosing block or program.
pub fn synchronize(cursor: &mut Cursor<'_>, recovery: TokenSet, start: usize) {
    let mut depth = open_depth(cursor.consumed_since(start));
    loop {
        let kind = cursor.current_kind();
        if kind == TokenKind::Eof {
            return;
        }
        if depth > 0 && CLOSERS.contains(kind) {
            depth -= 1;
        } else if depth == 0 && recovery.contains(kind) {
            break;
        } else if OPENERS.contains(kind) {
            depth += 1;
        }
        cursor.advance();
    }
    cursor.eat(TokenKind::Semicolon);
}

#[cfg(test)]
mod tests {
    use monkey_ir::TokenKind;

    use monkey_ir::{Token, TokenList};

    use super::{open_depth, synchronize, TokenSet, STMT_BOUNDARY};
    use crate::cursor::Cursor;

    fn tokens(kinds: &[TokenKind]) -> TokenList {
        TokenList::from_vec(kinds.iter().map(|&kind| Token::dummy(kind, "")).collect())
    }

    #[test]
    fn test_token_set_membership() {
        let set = TokenSet::new().with(TokenKind::Comma).with(TokenKind::Eof);
        assert!(set.contains(TokenKind::Comma));
        assert!(set.contains(TokenKind::Eof));
        assert!(!set.contains(TokenKind::Ident));
    }

    #[test]
    fn test_stmt_boundary() {
        assert!(STMT_BOUNDARY.contains(TokenKind::Semicolon));
        assert!(STMT_BOUNDARY.contains(TokenKind::RBrace));
        assert!(!STMT_BOUNDARY.contains(TokenKind::LBrace));
    }

    #[test]
    fn test_open_depth() {
        let list = tokens(&[
            TokenKind::LBrace,
            TokenKind::LParen,
            TokenKind::RParen,
            TokenKind::RBrace,
            TokenKind::RBrace,
            TokenKind::LBracket,
        ]);
        assert_eq!(open_depth(list.as_slice()), 1);
    }

    #[test]
    fn test_synchronize_skips_own_closer() {
        // `let h = { 1 : } ; x`, failing at the `}`.
        let list = tokens(&[
            TokenKind::Let,
            TokenKind::Ident,
            TokenKind::Assign,
            TokenKind::LBrace,
            TokenKind::Int,
            TokenKind::Colon,
            TokenKind::RBrace,
            TokenKind::Semicolon,
            TokenKind::Ident,
        ]);
        let mut cursor = Cursor::new(&list);
        for _ in 0..6 {
            cursor.advance();
        }
        synchronize(&mut cursor, STMT_BOUNDARY, 0);
        assert_eq!(cursor.current_kind(), TokenKind::Ident);
    }

    #[test]
    fn test_synchronize_leaves_enclosing_closer() {
        // `x + }`, failing at the `}` of an enclosing block.
        let list = tokens(&[TokenKind::Ident, TokenKind::Plus, TokenKind::RBrace]);
        let mut cursor = Cursor::new(&list);
        cursor.advance();
        cursor.advance();
        synchronize(&mut cursor, STMT_BOUNDARY, 0);
        assert_eq!(cursor.current_kind(), TokenKind::RBrace);
    }
}
