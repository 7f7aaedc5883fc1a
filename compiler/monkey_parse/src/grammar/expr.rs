//! Expression parsing: the Pratt loop and its rule table.
//!
//! Each token kind maps to at most one prefix rule (the token starts an
//! expression) and at most one infix rule (the token follows a complete
//! left operand). Rules are plain function pointers looked up by
//! [`prefix_rule`] and [`infix_rule`].

use std::rc::Rc;

use monkey_ir::{Expr, ExprKind, FunctionLit, InfixOp, PrefixOp, TokenKind};
use monkey_stack::ensure_sufficient_stack;
use tracing::trace;

use crate::{ParseError, Parser};

/// Binding power, lowest first.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Precedence {
    Lowest,
    /// `==` `!=`
    Equals,
    /// `<` `>`
    LessGreater,
    /// `+` `-`
    Sum,
    /// `*` `/`
    Product,
    /// Unary `!` `-`
    Prefix,
    /// `f(args)`
    Call,
    /// `a[i]`
    Index,
}

type PrefixFn<'a> = fn(&mut Parser<'a>) -> Option<Expr>;
type InfixFn<'a> = fn(&mut Parser<'a>, Expr) -> Option<Expr>;

fn prefix_rule<'a>(kind: TokenKind) -> Option<PrefixFn<'a>> {
    let rule: PrefixFn<'a> = match kind {
        TokenKind::Ident => Parser::parse_identifier,
        TokenKind::Int => Parser::parse_integer,
        TokenKind::Str => Parser::parse_string,
        TokenKind::True | TokenKind::False => Parser::parse_boolean,
        TokenKind::Bang | TokenKind::Minus => Parser::parse_prefix,
        TokenKind::LParen => Parser::parse_grouped,
        TokenKind::If => Parser::parse_if,
        TokenKind::Fn => Parser::parse_function,
        TokenKind::LBracket => Parser::parse_array,
        TokenKind::LBrace => Parser::parse_hash,
        _ => return None,
    };
    Some(rule)
}

fn infix_rule<'a>(kind: TokenKind) -> Option<(Precedence, InfixFn<'a>)> {
    let rule: (Precedence, InfixFn<'a>) = match kind {
        TokenKind::Eq | TokenKind::NotEq => (Precedence::Equals, Parser::parse_infix),
        TokenKind::Lt | TokenKind::Gt => (Precedence::LessGreater, Parser::parse_infix),
        TokenKind::Plus | TokenKind::Minus => (Precedence::Sum, Parser::parse_infix),
        TokenKind::Star | TokenKind::Slash => (Precedence::Product, Parser::parse_infix),
        TokenKind::LParen => (Precedence::Call, Parser::parse_call),
        TokenKind::LBracket => (Precedence::Index, Parser::parse_index),
        _ => return None,
    };
    Some(rule)
}

/// Precedence of `kind` when it appears in infix position.
fn infix_precedence(kind: TokenKind) -> Precedence {
    infix_rule(kind).map_or(Precedence::Lowest, |(precedence, _)| precedence)
}

impl<'a> Parser<'a> {
    /// Parse an expression whose operators all bind tighter than `precedence`.
    pub(crate) fn parse_expression(&mut self, precedence: Precedence) -> Option<Expr> {
        ensure_sufficient_stack(|| self.parse_expression_inner(precedence))
    }

    fn parse_expression_inner(&mut self, precedence: Precedence) -> Option<Expr> {
        let Some(prefix) = prefix_rule(self.current_kind()) else {
            self.error(ParseError::no_prefix_rule(self.current()));
            return None;
        };
        trace!(kind = %self.current_kind(), ?precedence, "prefix rule");
        let mut left = prefix(self)?;

        while !self.check(TokenKind::Semicolon) {
            let Some((next, infix)) = infix_rule(self.current_kind()) else {
                break;
            };
            if next <= precedence {
                break;
            }
            trace!(kind = %self.current_kind(), ?next, "infix rule");
            left = infix(self, left)?;
        }
        Some(left)
    }

    fn parse_identifier(&mut self) -> Option<Expr> {
        let token = self.advance();
        Some(Expr::new(ExprKind::Ident(token.text.clone()), token.span))
    }

    fn parse_integer(&mut self) -> Option<Expr> {
        let token = self.advance();
        match token.text.parse::<i64>() {
            Ok(value) => Some(Expr::new(ExprKind::Int(value), token.span)),
            Err(_) => {
                self.error(ParseError::invalid_integer(token));
                None
            }
        }
    }

    fn parse_string(&mut self) -> Option<Expr> {
        let token = self.advance();
        Some(Expr::new(ExprKind::Str(token.text.clone()), token.span))
    }

    fn parse_boolean(&mut self) -> Option<Expr> {
        let token = self.advance();
        let value = token.kind == TokenKind::True;
        Some(Expr::new(ExprKind::Bool(value), token.span))
    }

    /// `!expr` or `-expr`
    fn parse_prefix(&mut self) -> Option<Expr> {
        let token = self.advance();
        let op = PrefixOp::from_token(token.kind)?;
        let operand = self.parse_expression(Precedence::Prefix)?;
        let span = token.span.merge(operand.span);
        Some(Expr::new(
            ExprKind::Prefix {
                op,
                operand: Box::new(operand),
            },
            span,
        ))
    }

    /// `( expr )`
    fn parse_grouped(&mut self) -> Option<Expr> {
        let start = self.advance().span;
        let inner = self.parse_expression(Precedence::Lowest)?;
        let end = self.expect(TokenKind::RParen)?.span;
        Some(Expr::new(inner.kind, start.merge(end)))
    }

    /// `if cond { ... } else { ... }`
    ///
    /// The condition is any expression; the usual parentheses are just a
    /// grouped expression.
    fn parse_if(&mut self) -> Option<Expr> {
        let start = self.advance().span;
        let condition = self.parse_expression(Precedence::Lowest)?;
        let consequence = self.parse_block()?;
        let alternative = if self.eat(TokenKind::Else) {
            Some(self.parse_block()?)
        } else {
            None
        };
        let span = start.merge(self.previous_span());
        Some(Expr::new(
            ExprKind::If {
                condition: Box::new(condition),
                consequence,
                alternative,
            },
            span,
        ))
    }

    /// `fn ( params ) { body }`
    fn parse_function(&mut self) -> Option<Expr> {
        let start = self.advance().span;
        self.expect(TokenKind::LParen)?;
        let mut params = Vec::new();
        if !self.eat(TokenKind::RParen) {
            loop {
                params.push(self.parse_ident()?);
                if !self.eat(TokenKind::Comma) {
                    break;
                }
            }
            self.expect(TokenKind::RParen)?;
        }
        let body = self.parse_block()?;
        let span = start.merge(body.span);
        Some(Expr::new(
            ExprKind::Function(Rc::new(FunctionLit { params, body })),
            span,
        ))
    }

    /// `[ a, b, ... ]`
    fn parse_array(&mut self) -> Option<Expr> {
        let start = self.current_span();
        let elements = self.parse_expression_list(TokenKind::RBracket)?;
        Some(Expr::new(
            ExprKind::Array(elements),
            start.merge(self.previous_span()),
        ))
    }

    /// `{ key: value, ... }`, trailing comma allowed.
    fn parse_hash(&mut self) -> Option<Expr> {
        let start = self.advance().span;
        let mut pairs = Vec::new();
        while !self.check(TokenKind::RBrace) {
            let key = self.parse_expression(Precedence::Lowest)?;
            self.expect(TokenKind::Colon)?;
            let value = self.parse_expression(Precedence::Lowest)?;
            pairs.push((key, value));
            if !self.check(TokenKind::RBrace) {
                self.expect(TokenKind::Comma)?;
            }
        }
        let end = self.advance().span;
        Some(Expr::new(ExprKind::Hash(pairs), start.merge(end)))
    }

    /// Binary operator with `left` already parsed.
    fn parse_infix(&mut self, left: Expr) -> Option<Expr> {
        let token = self.advance();
        let op = InfixOp::from_token(token.kind)?;
        let right = self.parse_expression(infix_precedence(token.kind))?;
        let span = left.span.merge(right.span);
        Some(Expr::new(
            ExprKind::Infix {
                op,
                left: Box::new(left),
                right: Box::new(right),
            },
            span,
        ))
    }

    /// `callee ( args )`
    fn parse_call(&mut self, callee: Expr) -> Option<Expr> {
        let args = self.parse_expression_list(TokenKind::RParen)?;
        let span = callee.span.merge(self.previous_span());
        Some(Expr::new(
            ExprKind::Call {
                callee: Box::new(callee),
                args,
            },
            span,
        ))
    }

    /// `collection [ index ]`
    fn parse_index(&mut self, collection: Expr) -> Option<Expr> {
        self.advance();
        let index = self.parse_expression(Precedence::Lowest)?;
        let end = self.expect(TokenKind::RBracket)?.span;
        let span = collection.span.merge(end);
        Some(Expr::new(
            ExprKind::Index {
                collection: Box::new(collection),
                index: Box::new(index),
            },
            span,
        ))
    }

    /// Opening delimiter, comma separated expressions, then `end`.
    fn parse_expression_list(&mut self, end: TokenKind) -> Option<Vec<Expr>> {
        self.advance();
        let mut items = Vec::new();
        if self.eat(end) {
            return Some(items);
        }
        loop {
            items.push(self.parse_expression(Precedence::Lowest)?);
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        self.expect(end)?;
        Some(items)
    }
}
