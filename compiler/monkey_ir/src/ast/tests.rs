use std::rc::Rc;

use pretty_assertions::assert_eq;

use super::*;

fn expr(kind: ExprKind) -> Expr {
    Expr::new(kind, Span::DUMMY)
}

fn ident(name: &str) -> Expr {
    expr(ExprKind::Ident(name.to_string()))
}

fn int(value: i64) -> Expr {
    expr(ExprKind::Int(value))
}

fn infix(op: InfixOp, left: Expr, right: Expr) -> Expr {
    expr(ExprKind::Infix {
        op,
        left: Box::new(left),
        right: Box::new(right),
    })
}

fn expr_stmt(e: Expr) -> Stmt {
    Stmt::new(StmtKind::Expr(e), Span::DUMMY)
}

#[test]
fn test_render_prefix_and_infix() {
    let neg_a = expr(ExprKind::Prefix {
        op: PrefixOp::Neg,
        operand: Box::new(ident("a")),
    });
    let product = infix(InfixOp::Mul, neg_a, ident("b"));
    assert_eq!(product.to_string(), "((-a)*b)");
}

#[test]
fn test_render_let_and_return() {
    let program = Program::new(vec![
        Stmt::new(
            StmtKind::Let {
                name: Ident::new("x", Span::DUMMY),
                value: int(5),
            },
            Span::DUMMY,
        ),
        Stmt::new(StmtKind::Return { value: None }, Span::DUMMY),
        Stmt::new(
            StmtKind::Return {
                value: Some(ident("x")),
            },
            Span::DUMMY,
        ),
    ]);
    assert_eq!(program.to_string(), "let x = 5;return;return x;");
}

#[test]
fn test_render_separates_expression_statements() {
    let program = Program::new(vec![
        expr_stmt(infix(InfixOp::Add, int(3), int(4))),
        expr_stmt(ident("x")),
    ]);
    assert_eq!(program.to_string(), "(3+4);x");
}

#[test]
fn test_render_function_call_index() {
    let body = Block::new(
        vec![expr_stmt(infix(InfixOp::Add, ident("x"), ident("y")))],
        Span::DUMMY,
    );
    let lit = FunctionLit {
        params: vec![Ident::new("x", Span::DUMMY), Ident::new("y", Span::DUMMY)],
        body,
    };
    let call = expr(ExprKind::Call {
        callee: Box::new(expr(ExprKind::Function(Rc::new(lit)))),
        args: vec![int(1), int(2)],
    });
    assert_eq!(call.to_string(), "fn(x,y) {(x+y)}(1,2)");

    let index = expr(ExprKind::Index {
        collection: Box::new(expr(ExprKind::Array(vec![int(1), int(2)]))),
        index: Box::new(int(0)),
    });
    assert_eq!(index.to_string(), "([1,2][0])");
}

#[test]
fn test_render_if_and_hash() {
    let if_expr = expr(ExprKind::If {
        condition: Box::new(infix(InfixOp::Lt, ident("a"), ident("b"))),
        consequence: Block::new(vec![expr_stmt(ident("a"))], Span::DUMMY),
        alternative: Some(Block::new(vec![expr_stmt(ident("b"))], Span::DUMMY)),
    });
    assert_eq!(if_expr.to_string(), "if (a<b) {a} else {b}");

    let hash = expr(ExprKind::Hash(vec![
        (expr(ExprKind::Str("one".into())), int(1)),
        (expr(ExprKind::Bool(true)), int(2)),
    ]));
    assert_eq!(hash.to_string(), "{\"one\":1,true:2}");
}

#[test]
fn test_render_string_escapes() {
    let s = expr(ExprKind::Str("say \"hi\"\n\\".into()));
    assert_eq!(s.to_string(), r#""say \"hi\"\n\\""#);
}

#[test]
fn test_equality_ignores_spans() {
    let a = Expr::new(ExprKind::Int(1), Span::new(0, 1));
    let b = Expr::new(ExprKind::Int(1), Span::new(7, 8));
    assert_eq!(a, b);
    assert_ne!(a, int(2));
}
