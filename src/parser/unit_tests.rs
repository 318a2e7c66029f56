use super::api::{unescape_string, JsParser, Rule};
use super::ast::*;

use pest::consumes_to;
use pest::parses_to;

fn parse_ok(code: &str) -> ProgramData {
    match JsParser::parse_to_ast_from_str(code) {
        Ok(p) => p,
        Err(e) => panic!("failed to parse {:?}: {}", code, e),
    }
}

fn single_expression(code: &str) -> ExpressionType {
    let mut program = parse_ok(code);
    assert_eq!(program.body.len(), 1);
    match program.body.remove(0) {
        StatementType::ExpressionStatement { expression, .. } => *expression,
        other => panic!("expected an expression statement, got {:?}", other),
    }
}

// ── Tokens ──────────────────────────────────────────────────

#[test]
fn test_decimal_number_with_no_dot() {
    parses_to! {
        parser: JsParser,
        input: "10",
        rule: Rule::numeric_literal,
        tokens: [numeric_literal(0, 2)]
    };
}

#[test]
fn test_number_with_exponent() {
    parses_to! {
        parser: JsParser,
        input: "1.5e-3",
        rule: Rule::numeric_literal,
        tokens: [numeric_literal(0, 6)]
    };
}

#[test]
fn test_double_quoted_string() {
    parses_to! {
        parser: JsParser,
        input: "\"ab\\\"c\"",
        rule: Rule::string_literal,
        tokens: [string_literal(0, 7, [double_string_chars(1, 6)])]
    };
}

#[test]
fn test_single_quoted_string() {
    parses_to! {
        parser: JsParser,
        input: "'dddd'",
        rule: Rule::string_literal,
        tokens: [string_literal(0, 6, [single_string_chars(1, 5)])]
    };
}

// ── AST ─────────────────────────────────────────────────────

#[test]
fn test_number_literals() {
    match single_expression("0x1F") {
        ExpressionType::Literal(LiteralType::NumberLiteral(n)) => {
            assert_eq!(n, NumberLiteralType::IntegerLiteral(31))
        }
        e => panic!("{:?}", e),
    }
    match single_expression("2.5") {
        ExpressionType::Literal(LiteralType::NumberLiteral(n)) => {
            assert_eq!(n, NumberLiteralType::FloatLiteral(2.5))
        }
        e => panic!("{:?}", e),
    }
}

#[test]
fn test_string_escapes() {
    assert_eq!(unescape_string(r"a\nb").unwrap(), "a\nb");
    assert_eq!(unescape_string(r"\x41B\u{43}").unwrap(), "ABC");
    assert_eq!(unescape_string(r"it\'s").unwrap(), "it's");
    assert!(unescape_string(r"\u{110000}").is_err());
}

#[test]
fn test_multiplication_binds_tighter_than_addition() {
    match single_expression("1 + 2 * 3") {
        ExpressionType::BinaryExpression {
            operator, right, ..
        } => {
            assert_eq!(operator, BinaryOperator::Add);
            assert!(matches!(
                *right,
                ExpressionType::BinaryExpression {
                    operator: BinaryOperator::Multiply,
                    ..
                }
            ));
        }
        e => panic!("{:?}", e),
    }
}

#[test]
fn test_instanceof_is_relational() {
    match single_expression("a instanceof B == true") {
        ExpressionType::BinaryExpression { operator, left, .. } => {
            assert_eq!(operator, BinaryOperator::EqualEqual);
            assert!(matches!(
                *left,
                ExpressionType::BinaryExpression {
                    operator: BinaryOperator::InstanceOf,
                    ..
                }
            ));
        }
        e => panic!("{:?}", e),
    }
}

#[test]
fn test_subtraction_is_left_associative() {
    match single_expression("8 - 4 - 2") {
        ExpressionType::BinaryExpression { left, right, .. } => {
            assert!(matches!(*left, ExpressionType::BinaryExpression { .. }));
            assert!(matches!(*right, ExpressionType::Literal(_)));
        }
        e => panic!("{:?}", e),
    }
}

#[test]
fn test_assignment_is_right_associative() {
    match single_expression("a = b = 1") {
        ExpressionType::AssignmentExpression { left, right, .. } => {
            assert!(matches!(*left, ExpressionType::Identifier(ref n) if n == "a"));
            assert!(matches!(*right, ExpressionType::AssignmentExpression { .. }));
        }
        e => panic!("{:?}", e),
    }
}

#[test]
fn test_member_call_chain() {
    match single_expression("Native.addString('dddd')") {
        ExpressionType::CallExpression { callee, arguments } => {
            assert_eq!(arguments.len(), 1);
            match *callee {
                ExpressionType::MemberExpression { object, property } => {
                    assert!(matches!(*object, ExpressionType::Identifier(ref n) if n == "Native"));
                    assert!(matches!(property, MemberPropertyType::Static(ref n) if n == "addString"));
                }
                e => panic!("{:?}", e),
            }
        }
        e => panic!("{:?}", e),
    }
}

#[test]
fn test_new_with_arguments() {
    match single_expression("new Error('x')") {
        ExpressionType::NewExpression { callee, arguments } => {
            assert!(matches!(*callee, ExpressionType::Identifier(ref n) if n == "Error"));
            assert_eq!(arguments.len(), 1);
        }
        e => panic!("{:?}", e),
    }
}

#[test]
fn test_keywords_are_not_identifiers() {
    let program = parse_ok("var variable = 1; let letter; const constant = 2");
    assert_eq!(program.body.len(), 3);
    match &program.body[0] {
        StatementType::VariableDeclaration(d) => {
            assert_eq!(d.kind, VariableDeclarationKind::Var);
            assert_eq!(d.declarations[0].id, "variable");
        }
        s => panic!("{:?}", s),
    }
    assert!(JsParser::parse_to_ast_from_str("var var = 1").is_err());
}

#[test]
fn test_function_keeps_source_text() {
    let program = parse_ok("function add(a, b) { return a + b }");
    match &program.body[0] {
        StatementType::FunctionDeclaration(f) => {
            assert_eq!(f.id.as_deref(), Some("add"));
            assert_eq!(f.params, vec!["a".to_string(), "b".to_string()]);
            assert_eq!(f.source_text, "function add(a, b) { return a + b }");
        }
        s => panic!("{:?}", s),
    }
}

#[test]
fn test_block_and_object_literal_disambiguation() {
    let program = parse_ok("{ a = 1 }");
    assert!(matches!(program.body[0], StatementType::BlockStatement(_)));
    match single_expression("({ a: 1, 'b': 2, 3: 4 })") {
        ExpressionType::ObjectExpression(props) => assert_eq!(props.len(), 3),
        e => panic!("{:?}", e),
    }
}

#[test]
fn test_statements_without_semicolons() {
    let program = parse_ok("var a = 1\na = a + 1\nif (a) { a-- } else a++\nfor (;;) break");
    assert_eq!(program.body.len(), 4);
    assert!(matches!(program.body[3], StatementType::ForStatement { .. }));
}

#[test]
fn test_try_catch_finally() {
    let program = parse_ok("try { throw 1 } catch (e) { e } finally { 2 }");
    match &program.body[0] {
        StatementType::TryStatement {
            handler, finalizer, ..
        } => {
            assert_eq!(
                handler.as_ref().and_then(|h| h.param.as_deref()),
                Some("e")
            );
            assert!(finalizer.is_some());
        }
        s => panic!("{:?}", s),
    }
}

#[test]
fn test_comments_are_skipped() {
    let program = parse_ok("// line\n/* block */ 1");
    assert_eq!(program.body.len(), 1);
}

// ── Errors ──────────────────────────────────────────────────

#[test]
fn test_invalid_token_reports_position() {
    let err = JsParser::parse_to_ast_from_str("var a = 1;\n  @@").unwrap_err();
    assert_eq!(err.line, 2);
    assert_eq!(err.column, 3);
}

#[test]
fn test_invalid_assignment_target() {
    assert!(JsParser::parse_to_ast_from_str("1 = 2").is_err());
    assert!(JsParser::parse_to_ast_from_str("f()++").is_err());
}

#[test]
fn test_const_requires_initializer() {
    assert!(JsParser::parse_to_ast_from_str("const a;").is_err());
}
