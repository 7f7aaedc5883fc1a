use monkey_ir::{ExprKind, InfixOp, PrefixOp, StmtKind};
use pretty_assertions::assert_eq;

use super::{parse_source, render};

#[test]
fn test_operator_precedence() {
    let cases = [
        ("-a * b", "((-a)*b)"),
        ("!-a", "(!(-a))"),
        ("a + b + c", "((a+b)+c)"),
        ("a + b - c", "((a+b)-c)"),
        ("a * b * c", "((a*b)*c)"),
        ("a * b / c", "((a*b)/c)"),
        ("a + b / c", "(a+(b/c))"),
        ("a+b*c+d/e-f", "(((a+(b*c))+(d/e))-f)"),
        ("5 > 4 == 3 < 4", "((5>4)==(3<4))"),
        ("5 < 4 != 3 > 4", "((5<4)!=(3>4))"),
        ("3 + 4 * 5 == 3 * 1 + 4 * 5", "((3+(4*5))==((3*1)+(4*5)))"),
        ("true", "true"),
        ("3 > 5 == false", "((3>5)==false)"),
        ("1 + (2 + 3) + 4", "((1+(2+3))+4)"),
        ("(5 + 5) * 2", "((5+5)*2)"),
        ("2 / (5 + 5)", "(2/(5+5))"),
        ("-(5 + 5)", "(-(5+5))"),
        ("!(true == true)", "(!(true==true))"),
        ("a + add(b * c) + d", "((a+add((b*c)))+d)"),
        (
            "add(a, b, 1, 2 * 3, 4 + 5, add(6, 7 * 8))",
            "add(a,b,1,(2*3),(4+5),add(6,(7*8)))",
        ),
        ("add(a + b + c * d / f + g)", "add((((a+b)+((c*d)/f))+g))"),
        ("a * [1, 2, 3, 4][b * c] * d", "((a*([1,2,3,4][(b*c)]))*d)"),
        (
            "add(a * b[2], b[1], 2 * [1, 2][1])",
            "add((a*(b[2])),(b[1]),(2*([1,2][1])))",
        ),
        ("-a[0]", "(-(a[0]))"),
    ];
    for (source, expected) in cases {
        assert_eq!(render(source), expected, "source: {source}");
    }
}

#[test]
fn test_statements_are_separated() {
    assert_eq!(render("3 + 4; -5 * 5"), "(3+4);((-5)*5)");
}

#[test]
fn test_integer_literal() {
    let result = parse_source("5;");
    assert!(!result.has_errors());
    let StmtKind::Expr(expr) = &result.program.statements[0].kind else {
        panic!("expected expression statement");
    };
    assert_eq!(expr.kind, ExprKind::Int(5));
}

#[test]
fn test_prefix_expression_structure() {
    let result = parse_source("!true");
    let StmtKind::Expr(expr) = &result.program.statements[0].kind else {
        panic!("expected expression statement");
    };
    let ExprKind::Prefix { op, operand } = &expr.kind else {
        panic!("expected prefix expression, got {:?}", expr.kind);
    };
    assert_eq!(*op, PrefixOp::Not);
    assert_eq!(operand.kind, ExprKind::Bool(true));
}

#[test]
fn test_infix_expression_structure() {
    let result = parse_source("alice != bob");
    let StmtKind::Expr(expr) = &result.program.statements[0].kind else {
        panic!("expected expression statement");
    };
    let ExprKind::Infix { op, left, right } = &expr.kind else {
        panic!("expected infix expression, got {:?}", expr.kind);
    };
    assert_eq!(*op, InfixOp::NotEq);
    assert_eq!(left.kind, ExprKind::Ident("alice".into()));
    assert_eq!(right.kind, ExprKind::Ident("bob".into()));
}

#[test]
fn test_string_literal() {
    assert_eq!(render(r#""hello world";"#), r#""hello world""#);
    assert_eq!(render(r#""a\"b""#), r#""a\"b""#);
}

#[test]
fn test_if_expression() {
    assert_eq!(render("if (x < y) { x }"), "if (x<y) {x}");
    assert_eq!(
        render("if (x < y) { x } else { y }"),
        "if (x<y) {x} else {y}"
    );
    assert_eq!(render("if x { 1 }"), "if x {1}");
}

#[test]
fn test_function_literal() {
    assert_eq!(render("fn(x, y) { x + y; }"), "fn(x,y) {(x+y)}");
    assert_eq!(render("fn() {}"), "fn() {}");
    assert_eq!(render("fn(x) { x }(5)"), "fn(x) {x}(5)");
}

#[test]
fn test_function_parameters() {
    let cases = [
        ("fn() {};", Vec::<&str>::new()),
        ("fn(x) {};", vec!["x"]),
        ("fn(x, y, z) {};", vec!["x", "y", "z"]),
    ];
    for (source, expected) in cases {
        let result = parse_source(source);
        let StmtKind::Expr(expr) = &result.program.statements[0].kind else {
            panic!("expected expression statement");
        };
        let ExprKind::Function(lit) = &expr.kind else {
            panic!("expected function literal, got {:?}", expr.kind);
        };
        let names: Vec<&str> = lit.params.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, expected);
    }
}

#[test]
fn test_array_and_index() {
    assert_eq!(render("[1, 2 * 2, 3 + 3]"), "[1,(2*2),(3+3)]");
    assert_eq!(render("[]"), "[]");
    assert_eq!(render("myArray[1 + 1]"), "(myArray[(1+1)])");
}

#[test]
fn test_hash_literal() {
    assert_eq!(
        render(r#"{"one": 1, "two": 2, "three": 3}"#),
        r#"{"one":1,"two":2,"three":3}"#
    );
    assert_eq!(render("{}"), "{}");
    assert_eq!(render("{true: 1, 2: \"b\",}"), "{true:1,2:\"b\"}");
    assert_eq!(
        render(r#"{"one": 0 + 1, "two": 10 - 8}"#),
        r#"{"one":(0+1),"two":(10-8)}"#
    );
}

#[test]
fn test_spans_cover_expression() {
    let result = parse_source("1 + 23");
    let StmtKind::Expr(expr) = &result.program.statements[0].kind else {
        panic!("expected expression statement");
    };
    assert_eq!(expr.span, monkey_ir::Span::new(0, 6));
}

#[test]
fn test_deep_nesting() {
    let depth = 5_000;
    let source = format!("{}1{}", "(".repeat(depth), ")".repeat(depth));
    assert_eq!(render(&source), "1");
}

#[test]
fn test_round_trip() {
    let sources = [
        "let x = 5 * (2 + -3); x;",
        "let adder = fn(x) { fn(y) { x + y } }; adder(1)(2)",
        "if (a == b) { return [1, 2][0]; } else { let c = {\"k\": true}; c[\"k\"] }",
        "let s = \"tab\\there\"; len(s) + first([1])",
        "fn(x) { x }(5); !-a * b",
        "return;",
    ];
    for source in sources {
        let first = parse_source(source);
        assert!(!first.has_errors(), "{source}: {:?}", first.error_messages());
        let rendered = first.program.to_string();
        let second = parse_source(&rendered);
        assert!(!second.has_errors(), "{rendered}: {:?}", second.error_messages());
        assert_eq!(first.program, second.program, "rendered as {rendered}");
        assert_eq!(second.program.to_string(), rendered);
    }
}
