use pretty_assertions::assert_eq;

use super::parse_source;

#[test]
fn test_missing_identifier_in_let() {
    let result = parse_source("let = 5;");
    assert_eq!(
        result.error_messages(),
        vec!["expected next token to be `identifier`, got `=`"]
    );
}

#[test]
fn test_missing_assign_in_let() {
    let result = parse_source("let x 5;");
    assert_eq!(
        result.error_messages(),
        vec!["expected next token to be `=`, got `5`"]
    );
}

#[test]
fn test_no_prefix_rule() {
    let result = parse_source("let x = ;");
    assert_eq!(result.error_messages(), vec!["no parse rule for token `;`"]);
}

#[test]
fn test_no_prefix_rule_at_end_of_input() {
    let result = parse_source("1 +");
    assert_eq!(result.error_messages(), vec!["no parse rule for token `EOF`"]);
}

#[test]
fn test_unclosed_call() {
    let result = parse_source("add(1, 2;");
    assert_eq!(
        result.error_messages(),
        vec!["expected next token to be `)`, got `;`"]
    );
}

#[test]
fn test_integer_out_of_range() {
    let result = parse_source("9223372036854775808");
    assert_eq!(
        result.error_messages(),
        vec!["could not parse `9223372036854775808` as integer"]
    );
}

#[test]
fn test_illegal_token() {
    let result = parse_source("let a = @;");
    assert_eq!(result.error_messages(), vec!["no parse rule for token `@`"]);
}

#[test]
fn test_errors_accumulate_across_statements() {
    let result = parse_source("let = 1; let y = 2; let z 3; y");
    assert_eq!(
        result.error_messages(),
        vec![
            "expected next token to be `identifier`, got `=`",
            "expected next token to be `=`, got `3`",
        ]
    );
    assert_eq!(result.program.to_string(), "let y = 2;y");
}

#[test]
fn test_recovery_inside_block() {
    let result = parse_source("let f = fn(x) { x + ; }; let y = 2;");
    assert_eq!(result.error_messages(), vec!["no parse rule for token `;`"]);
    assert_eq!(result.program.statements.len(), 2);
}

#[test]
fn test_stray_closing_brace() {
    let result = parse_source("}; 5");
    assert_eq!(result.error_messages(), vec!["no parse rule for token `}`"]);
    assert_eq!(result.program.to_string(), "5");
}

#[test]
fn test_error_span_points_at_token() {
    let result = parse_source("let x = 1 + ;");
    assert_eq!(result.errors[0].span, monkey_ir::Span::new(12, 13));
}

#[test]
fn test_hash_literal_missing_value_reports_once() {
    let result = parse_source("let h = {1: }; let y = 2;");
    assert_eq!(result.error_messages(), vec!["no parse rule for token `}`"]);
    assert_eq!(result.program.to_string(), "let y = 2;");
}

#[test]
fn test_trailing_comma_in_params_reports_once() {
    let result = parse_source("fn(a,) {a}; 5");
    assert_eq!(
        result.error_messages(),
        vec!["expected next token to be `identifier`, got `)`"]
    );
    assert_eq!(result.program.to_string(), "5");
}

#[test]
fn test_broken_statement_in_block_leaves_block_closer() {
    let result = parse_source("if (x) { y + } else { 1 }; 2");
    assert_eq!(result.error_messages(), vec!["no parse rule for token `}`"]);
    assert_eq!(result.program.to_string(), "if x {} else {1};2");
}
