//! Statement and block parsing.

use monkey_ir::{Block, Ident, Stmt, StmtKind, TokenKind};
use tracing::trace;

use crate::recovery::{synchronize, STMT_BOUNDARY};
use crate::{Parser, Precedence};

impl Parser<'_> {
    /// Parse one statement; on failure skip to the next statement boundary.
    ///
    /// Always consumes at least one token unless already at `Eof`.
    pub(crate) fn parse_statement_recovering(&mut self) -> Option<Stmt> {
        let start = self.cursor.position();
        let stmt = self.parse_statement();
        if stmt.is_none() {
            if self.cursor.position() == start {
                self.advance();
            }
            synchronize(&mut self.cursor, STMT_BOUNDARY, start);
        }
        stmt
    }

    fn parse_statement(&mut self) -> Option<Stmt> {
        trace!(kind = %self.current_kind(), "parse_statement");
        match self.current_kind() {
            TokenKind::Let => self.parse_let(),
            TokenKind::Return => self.parse_return(),
            _ => self.parse_expression_statement(),
        }
    }

    /// `let IDENT = expr ;?`
    fn parse_let(&mut self) -> Option<Stmt> {
        let start = self.advance().span;
        let name = self.parse_ident()?;
        self.expect(TokenKind::Assign)?;
        let value = self.parse_expression(Precedence::Lowest)?;
        self.eat(TokenKind::Semicolon);
        let span = start.merge(self.previous_span());
        Some(Stmt::new(StmtKind::Let { name, value }, span))
    }

    /// `return expr? ;?`
    fn parse_return(&mut self) -> Option<Stmt> {
        let start = self.advance().span;
        let value = if self.check(TokenKind::Semicolon)
            || self.check(TokenKind::RBrace)
            || self.is_at_end()
        {
            None
        } else {
            Some(self.parse_expression(Precedence::Lowest)?)
        };
        self.eat(TokenKind::Semicolon);
        let span = start.merge(self.previous_span());
        Some(Stmt::new(StmtKind::Return { value }, span))
    }

    fn parse_expression_statement(&mut self) -> Option<Stmt> {
        let expr = self.parse_expression(Precedence::Lowest)?;
        self.eat(TokenKind::Semicolon);
        let span = expr.span.merge(self.previous_span());
        Some(Stmt::new(StmtKind::Expr(expr), span))
    }

    /// `{ stmt* }`. End of input also closes the block.
    pub(crate) fn parse_block(&mut self) -> Option<Block> {
        let start = self.expect(TokenKind::LBrace)?.span;
        let mut statements = Vec::new();
        while !self.check(TokenKind::RBrace) && !self.is_at_end() {
            if let Some(stmt) = self.parse_statement_recovering() {
                statements.push(stmt);
            }
        }
        self.eat(TokenKind::RBrace);
        Some(Block::new(statements, start.merge(self.previous_span())))
    }

    pub(crate) fn parse_ident(&mut self) -> Option<Ident> {
        let token = self.expect(TokenKind::Ident)?;
        Some(Ident::new(token.text.as_str(), token.span))
    }
}
