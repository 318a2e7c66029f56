use std::fmt;
use std::rc::Rc;
use std::time::Instant;

use pest::error::{Error, ErrorVariant, LineColLocation};
use pest::iterators::Pair;
use pest::{Parser, Span};
use pest_derive::Parser;

use super::ast::*;

#[derive(Parser)]
#[grammar = "parser/js_grammar.pest"] // relative to src
pub struct JsParser;

const TAB_WIDTH: usize = 2;

type BuildResult<T> = Result<T, JsParseError>;

/// A script that failed to parse, with the 1-based position of the failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsParseError {
    pub message: String,
    pub line: usize,
    pub column: usize,
}
impl fmt::Display for JsParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}:{})", self.message, self.line, self.column)
    }
}
impl std::error::Error for JsParseError {}

impl From<Error<Rule>> for JsParseError {
    fn from(e: Error<Rule>) -> Self {
        let (line, column) = match e.line_col {
            LineColLocation::Pos(pos) => pos,
            LineColLocation::Span(start, _) => start,
        };
        JsParseError {
            message: e.variant.message().to_string(),
            line,
            column,
        }
    }
}

impl JsParser {
    /// Parse a complete script into its AST.
    pub fn parse_to_ast_from_str(script: &str) -> Result<ProgramData, JsParseError> {
        let start = Instant::now();
        let mut pairs = JsParser::parse(Rule::script, script)?;
        let script_pair = match pairs.next() {
            Some(p) => p,
            None => {
                return Err(JsParseError {
                    message: "Empty parse result".to_string(),
                    line: 1,
                    column: 1,
                })
            }
        };
        let meta = get_meta(&script_pair);
        let mut body = vec![];
        for pair in script_pair.into_inner() {
            if pair.as_rule() != Rule::EOI {
                body.push(build_ast_from_statement(pair)?);
            }
        }
        log::trace!(
            "parsed {} top-level statements in {}us",
            body.len(),
            start.elapsed().as_micros()
        );
        Ok(ProgramData { meta, body })
    }
}

/// Render the raw pest token tree of a script, one rule per line.
pub fn parse_to_token_tree(script: &str) -> Result<String, JsParseError> {
    let mut tree = vec![];
    for pair in JsParser::parse(Rule::script, script)? {
        tree.push(pair_to_string(pair, 0).join("\n"));
    }
    Ok(tree.join("\n"))
}

fn pair_to_string(pair: Pair<Rule>, level: usize) -> Vec<String> {
    let mut tree = vec![];
    let span = pair.as_span();
    tree.push(format!(
        "{}{:?} => ({},{}) #{:?}",
        " ".repeat(level * TAB_WIDTH),
        pair.as_rule(),
        span.start(),
        span.end(),
        span.as_str()
    ));
    for child_pair in pair.into_inner() {
        tree.append(pair_to_string(child_pair, level + 1).as_mut());
    }
    tree
}

fn get_meta(pair: &Pair<Rule>) -> Meta {
    let span = pair.as_span();
    Meta {
        start_index: span.start(),
        end_index: span.end(),
    }
}

fn custom_error(message: &str, span: Span) -> JsParseError {
    Error::new_from_span(
        ErrorVariant::<Rule>::CustomError {
            message: message.to_string(),
        },
        span,
    )
    .into()
}

fn get_unexpected_error(code: u32, pair: &Pair<Rule>) -> JsParseError {
    custom_error(
        &format!("Unexpected {:?} (E{})", pair.as_rule(), code),
        pair.as_span(),
    )
}

fn is_keyword(rule: Rule) -> bool {
    matches!(
        rule,
        Rule::kw_var
            | Rule::kw_let
            | Rule::kw_const
            | Rule::kw_function
            | Rule::kw_return
            | Rule::kw_if
            | Rule::kw_else
            | Rule::kw_while
            | Rule::kw_do
            | Rule::kw_for
            | Rule::kw_break
            | Rule::kw_continue
            | Rule::kw_throw
            | Rule::kw_try
            | Rule::kw_catch
            | Rule::kw_finally
            | Rule::kw_new
    )
}

/// Inner pairs with the keyword tokens filtered out.
fn children(pair: Pair<Rule>) -> std::vec::IntoIter<Pair<Rule>> {
    pair.into_inner()
        .filter(|p| !is_keyword(p.as_rule()))
        .collect::<Vec<_>>()
        .into_iter()
}

fn expect_next<'i>(
    iter: &mut impl Iterator<Item = Pair<'i, Rule>>,
    span: &Span<'i>,
) -> BuildResult<Pair<'i, Rule>> {
    iter.next()
        .ok_or_else(|| custom_error("Incomplete syntax tree", span.clone()))
}

// ---------------------------------------------------------------------------
// Statements
// ---------------------------------------------------------------------------

fn build_ast_from_statement(pair: Pair<Rule>) -> BuildResult<StatementType> {
    let meta = get_meta(&pair);
    let span = pair.as_span();
    Ok(match pair.as_rule() {
        Rule::block_statement => StatementType::BlockStatement(build_block(pair)?),
        Rule::variable_statement => {
            StatementType::VariableDeclaration(build_variable_declaration(pair)?)
        }
        Rule::function_declaration => {
            StatementType::FunctionDeclaration(Rc::new(build_function(pair)?))
        }
        Rule::if_statement => {
            let mut inner = children(pair);
            let test = build_expression(expect_next(&mut inner, &span)?)?;
            let consequent = build_ast_from_statement(expect_next(&mut inner, &span)?)?;
            let alternate = match inner.next() {
                Some(p) => Some(Box::new(build_ast_from_statement(p)?)),
                None => None,
            };
            StatementType::IfStatement {
                meta,
                test: Box::new(test),
                consequent: Box::new(consequent),
                alternate,
            }
        }
        Rule::while_statement => {
            let mut inner = children(pair);
            let test = build_expression(expect_next(&mut inner, &span)?)?;
            let body = build_ast_from_statement(expect_next(&mut inner, &span)?)?;
            StatementType::WhileStatement {
                meta,
                test: Box::new(test),
                body: Box::new(body),
            }
        }
        Rule::do_while_statement => {
            let mut inner = children(pair);
            let body = build_ast_from_statement(expect_next(&mut inner, &span)?)?;
            let test = build_expression(expect_next(&mut inner, &span)?)?;
            StatementType::DoWhileStatement {
                meta,
                body: Box::new(body),
                test: Box::new(test),
            }
        }
        Rule::for_statement => build_for_statement(pair)?,
        Rule::return_statement => {
            let argument = match children(pair).next() {
                Some(p) => Some(Box::new(build_expression(p)?)),
                None => None,
            };
            StatementType::ReturnStatement { meta, argument }
        }
        Rule::throw_statement => {
            let mut inner = children(pair);
            let argument = build_expression(expect_next(&mut inner, &span)?)?;
            StatementType::ThrowStatement {
                meta,
                argument: Box::new(argument),
            }
        }
        Rule::try_statement => build_try_statement(pair)?,
        Rule::break_statement => StatementType::BreakStatement { meta },
        Rule::continue_statement => StatementType::ContinueStatement { meta },
        Rule::empty_statement => StatementType::EmptyStatement { meta },
        Rule::expression_statement => {
            let mut inner = children(pair);
            let expression = build_expression(expect_next(&mut inner, &span)?)?;
            StatementType::ExpressionStatement {
                meta,
                expression: Box::new(expression),
            }
        }
        _ => return Err(get_unexpected_error(1, &pair)),
    })
}

fn build_block(pair: Pair<Rule>) -> BuildResult<BlockStatementData> {
    let meta = get_meta(&pair);
    let mut body = vec![];
    for p in children(pair) {
        body.push(build_ast_from_statement(p)?);
    }
    Ok(BlockStatementData { meta, body })
}

/// Shared by `variable_statement` and the declaration form of a `for` initializer.
fn build_variable_declaration(pair: Pair<Rule>) -> BuildResult<VariableDeclarationData> {
    let meta = get_meta(&pair);
    let span = pair.as_span();
    let mut inner = children(pair);
    let kind_pair = expect_next(&mut inner, &span)?;
    let kind = match kind_pair.as_str() {
        "var" => VariableDeclarationKind::Var,
        "let" => VariableDeclarationKind::Let,
        "const" => VariableDeclarationKind::Const,
        _ => return Err(get_unexpected_error(2, &kind_pair)),
    };
    let mut declarations = vec![];
    for declarator in inner {
        let declarator_span = declarator.as_span();
        let mut parts = declarator.into_inner();
        let id = expect_next(&mut parts, &declarator_span)?.as_str().to_string();
        let init = match parts.next() {
            Some(initializer) => {
                // initializer = assign_sign ~ assignment_expression
                let value = initializer
                    .into_inner()
                    .find(|p| p.as_rule() == Rule::assignment_expression)
                    .ok_or_else(|| custom_error("Missing initializer", declarator_span.clone()))?;
                Some(Box::new(build_expression(value)?))
            }
            None => None,
        };
        if kind == VariableDeclarationKind::Const && init.is_none() {
            return Err(custom_error(
                "Missing initializer in const declaration",
                declarator_span,
            ));
        }
        declarations.push(VariableDeclaratorData { id, init });
    }
    Ok(VariableDeclarationData {
        meta,
        kind,
        declarations,
    })
}

fn build_function(pair: Pair<Rule>) -> BuildResult<FunctionData> {
    let meta = get_meta(&pair);
    let source_text = pair.as_str().to_string();
    let mut id = None;
    let mut params = vec![];
    let mut body = vec![];
    for p in children(pair) {
        match p.as_rule() {
            Rule::identifier => id = Some(p.as_str().to_string()),
            Rule::formal_parameters => {
                params = p.into_inner().map(|param| param.as_str().to_string()).collect();
            }
            Rule::function_body => {
                for s in p.into_inner() {
                    body.push(build_ast_from_statement(s)?);
                }
            }
            _ => return Err(get_unexpected_error(3, &p)),
        }
    }
    Ok(FunctionData {
        meta,
        id,
        params,
        body,
        source_text,
    })
}

fn build_for_statement(pair: Pair<Rule>) -> BuildResult<StatementType> {
    let meta = get_meta(&pair);
    let span = pair.as_span();
    let mut init = None;
    let mut test = None;
    let mut update = None;
    let mut body = None;
    for p in children(pair) {
        match p.as_rule() {
            Rule::for_init => {
                let p_span = p.as_span();
                let inner = expect_next(&mut p.into_inner(), &p_span)?;
                init = Some(if inner.as_rule() == Rule::for_declaration {
                    ForInitType::VariableDeclaration(build_variable_declaration(inner)?)
                } else {
                    ForInitType::Expression(Box::new(build_expression(inner)?))
                });
            }
            Rule::for_test => {
                let p_span = p.as_span();
                let inner = expect_next(&mut p.into_inner(), &p_span)?;
                test = Some(Box::new(build_expression(inner)?));
            }
            Rule::for_update => {
                let p_span = p.as_span();
                let inner = expect_next(&mut p.into_inner(), &p_span)?;
                update = Some(Box::new(build_expression(inner)?));
            }
            _ => body = Some(Box::new(build_ast_from_statement(p)?)),
        }
    }
    let body = body.ok_or_else(|| custom_error("Missing loop body", span))?;
    Ok(StatementType::ForStatement {
        meta,
        init,
        test,
        update,
        body,
    })
}

fn build_try_statement(pair: Pair<Rule>) -> BuildResult<StatementType> {
    let meta = get_meta(&pair);
    let span = pair.as_span();
    let mut inner = children(pair);
    let block = build_block(expect_next(&mut inner, &span)?)?;
    let mut handler = None;
    let mut finalizer = None;
    for p in inner {
        match p.as_rule() {
            Rule::catch_clause => {
                let mut param = None;
                let mut body = None;
                for c in children(p) {
                    match c.as_rule() {
                        Rule::identifier => param = Some(c.as_str().to_string()),
                        _ => body = Some(build_block(c)?),
                    }
                }
                let body = body.ok_or_else(|| custom_error("Missing catch block", span.clone()))?;
                handler = Some(CatchClauseData { param, body });
            }
            Rule::finally_clause => {
                let p_span = p.as_span();
                finalizer = Some(build_block(expect_next(&mut children(p), &p_span)?)?);
            }
            _ => return Err(get_unexpected_error(4, &p)),
        }
    }
    Ok(StatementType::TryStatement {
        meta,
        block,
        handler,
        finalizer,
    })
}

// ---------------------------------------------------------------------------
// Expressions
// ---------------------------------------------------------------------------

fn build_expression(pair: Pair<Rule>) -> BuildResult<ExpressionType> {
    let span = pair.as_span();
    match pair.as_rule() {
        Rule::expression => {
            let mut expressions = vec![];
            for p in pair.into_inner() {
                expressions.push(build_expression(p)?);
            }
            if expressions.len() == 1 {
                expressions
                    .pop()
                    .ok_or_else(|| custom_error("Empty expression", span))
            } else {
                Ok(ExpressionType::SequenceExpression(expressions))
            }
        }
        Rule::assignment_expression => {
            let mut inner = pair.into_inner();
            let left = build_expression(expect_next(&mut inner, &span)?)?;
            match inner.next() {
                None => Ok(left),
                Some(op_pair) => {
                    if !left.is_simple_assignment_target() {
                        return Err(custom_error(
                            "Invalid left-hand side in assignment",
                            op_pair.as_span(),
                        ));
                    }
                    let operator = match op_pair.as_str() {
                        "=" => AssignmentOperator::Equals,
                        "+=" => AssignmentOperator::AddEquals,
                        "-=" => AssignmentOperator::SubtractEquals,
                        "*=" => AssignmentOperator::MultiplyEquals,
                        "/=" => AssignmentOperator::DivideEquals,
                        "%=" => AssignmentOperator::ModuloEquals,
                        _ => return Err(get_unexpected_error(5, &op_pair)),
                    };
                    let right = build_expression(expect_next(&mut inner, &span)?)?;
                    Ok(ExpressionType::AssignmentExpression {
                        operator,
                        left: Box::new(left),
                        right: Box::new(right),
                    })
                }
            }
        }
        Rule::conditional_expression => {
            let mut inner = pair.into_inner();
            let test = build_expression(expect_next(&mut inner, &span)?)?;
            match inner.next() {
                None => Ok(test),
                Some(consequent) => {
                    let consequent = build_expression(consequent)?;
                    let alternate = build_expression(expect_next(&mut inner, &span)?)?;
                    Ok(ExpressionType::ConditionalExpression {
                        test: Box::new(test),
                        consequent: Box::new(consequent),
                        alternate: Box::new(alternate),
                    })
                }
            }
        }
        Rule::logical_or_expression
        | Rule::logical_and_expression
        | Rule::equality_expression
        | Rule::relational_expression
        | Rule::additive_expression
        | Rule::multiplicative_expression => build_left_associative(pair),
        Rule::unary_expression => build_unary_expression(pair),
        Rule::postfix_expression => {
            let mut inner = pair.into_inner();
            let argument = build_expression(expect_next(&mut inner, &span)?)?;
            match inner.next() {
                None => Ok(argument),
                Some(op_pair) => build_update(op_pair, argument, false),
            }
        }
        Rule::call_member_expression | Rule::new_target => build_call_member_chain(pair),
        Rule::new_expression => {
            let mut inner = children(pair);
            let callee = build_expression(expect_next(&mut inner, &span)?)?;
            let arguments = match inner.next() {
                Some(args) => build_arguments(args)?,
                None => vec![],
            };
            Ok(ExpressionType::NewExpression {
                callee: Box::new(callee),
                arguments,
            })
        }
        Rule::parenthesized_expression => {
            build_expression(expect_next(&mut pair.into_inner(), &span)?)
        }
        Rule::this_expression => Ok(ExpressionType::ThisExpression),
        Rule::null_literal => Ok(ExpressionType::Literal(LiteralType::NullLiteral)),
        Rule::boolean_literal => Ok(ExpressionType::Literal(LiteralType::BooleanLiteral(
            pair.as_str() == "true",
        ))),
        Rule::numeric_literal => Ok(ExpressionType::Literal(LiteralType::NumberLiteral(
            build_number(&pair)?,
        ))),
        Rule::string_literal => Ok(ExpressionType::Literal(LiteralType::StringLiteral(
            build_string(pair)?,
        ))),
        Rule::identifier => Ok(ExpressionType::Identifier(pair.as_str().to_string())),
        Rule::function_expression => Ok(ExpressionType::FunctionExpression(Rc::new(
            build_function(pair)?,
        ))),
        Rule::array_literal => {
            let mut elements = vec![];
            for p in pair.into_inner() {
                elements.push(build_expression(p)?);
            }
            Ok(ExpressionType::ArrayExpression(elements))
        }
        Rule::object_literal => {
            let mut properties = vec![];
            for property in pair.into_inner() {
                let property_span = property.as_span();
                let mut parts = property.into_inner();
                let name_pair = expect_next(&mut parts, &property_span)?;
                let name_pair = expect_next(&mut name_pair.into_inner(), &property_span)?;
                let name = match name_pair.as_rule() {
                    Rule::numeric_literal => PropertyNameType::Number(build_number(&name_pair)?),
                    Rule::string_literal => PropertyNameType::Name(build_string(name_pair)?),
                    _ => PropertyNameType::Name(name_pair.as_str().to_string()),
                };
                let value = build_expression(expect_next(&mut parts, &property_span)?)?;
                properties.push((name, value));
            }
            Ok(ExpressionType::ObjectExpression(properties))
        }
        _ => Err(get_unexpected_error(6, &pair)),
    }
}

fn build_left_associative(pair: Pair<Rule>) -> BuildResult<ExpressionType> {
    let span = pair.as_span();
    let mut inner = pair.into_inner();
    let mut left = build_expression(expect_next(&mut inner, &span)?)?;
    while let Some(op_pair) = inner.next() {
        let right = build_expression(expect_next(&mut inner, &span)?)?;
        left = match op_pair.as_str() {
            "||" => ExpressionType::LogicalExpression {
                operator: LogicalOperator::Or,
                left: Box::new(left),
                right: Box::new(right),
            },
            "&&" => ExpressionType::LogicalExpression {
                operator: LogicalOperator::And,
                left: Box::new(left),
                right: Box::new(right),
            },
            op => {
                let operator = match op {
                    "==" => BinaryOperator::EqualEqual,
                    "!=" => BinaryOperator::NotEqual,
                    "===" => BinaryOperator::StrictlyEqual,
                    "!==" => BinaryOperator::StrictlyUnequal,
                    "<" => BinaryOperator::LessThan,
                    "<=" => BinaryOperator::LessThanEqual,
                    ">" => BinaryOperator::GreaterThan,
                    ">=" => BinaryOperator::GreaterThanEqual,
                    "instanceof" => BinaryOperator::InstanceOf,
                    "+" => BinaryOperator::Add,
                    "-" => BinaryOperator::Subtract,
                    "*" => BinaryOperator::Multiply,
                    "/" => BinaryOperator::Divide,
                    "%" => BinaryOperator::Modulo,
                    _ => return Err(get_unexpected_error(7, &op_pair)),
                };
                ExpressionType::BinaryExpression {
                    operator,
                    left: Box::new(left),
                    right: Box::new(right),
                }
            }
        };
    }
    Ok(left)
}

fn build_unary_expression(pair: Pair<Rule>) -> BuildResult<ExpressionType> {
    let span = pair.as_span();
    let mut inner = pair.into_inner();
    let first = expect_next(&mut inner, &span)?;
    match first.as_rule() {
        Rule::unary_operator => {
            let operator = match first.as_str() {
                "!" => UnaryOperator::LogicalNot,
                "-" => UnaryOperator::Minus,
                "+" => UnaryOperator::Plus,
                "typeof" => UnaryOperator::TypeOf,
                "void" => UnaryOperator::Void,
                _ => return Err(get_unexpected_error(8, &first)),
            };
            let argument = build_expression(expect_next(&mut inner, &span)?)?;
            Ok(ExpressionType::UnaryExpression {
                operator,
                argument: Box::new(argument),
            })
        }
        Rule::update_operator => {
            let argument = build_expression(expect_next(&mut inner, &span)?)?;
            build_update(first, argument, true)
        }
        _ => build_expression(first),
    }
}

fn build_update(
    op_pair: Pair<Rule>,
    argument: ExpressionType,
    prefix: bool,
) -> BuildResult<ExpressionType> {
    if !argument.is_simple_assignment_target() {
        return Err(custom_error(
            "Invalid left-hand side expression in update operation",
            op_pair.as_span(),
        ));
    }
    let operator = if op_pair.as_str() == "++" {
        UpdateOperator::PlusPlus
    } else {
        UpdateOperator::MinusMinus
    };
    Ok(ExpressionType::UpdateExpression {
        operator,
        prefix,
        argument: Box::new(argument),
    })
}

fn build_call_member_chain(pair: Pair<Rule>) -> BuildResult<ExpressionType> {
    let span = pair.as_span();
    let mut inner = pair.into_inner();
    let mut expression = build_expression(expect_next(&mut inner, &span)?)?;
    for suffix in inner {
        expression = match suffix.as_rule() {
            Rule::arguments => ExpressionType::CallExpression {
                callee: Box::new(expression),
                arguments: build_arguments(suffix)?,
            },
            Rule::member_dot => {
                let suffix_span = suffix.as_span();
                let name = expect_next(&mut suffix.into_inner(), &suffix_span)?;
                ExpressionType::MemberExpression {
                    object: Box::new(expression),
                    property: MemberPropertyType::Static(name.as_str().to_string()),
                }
            }
            Rule::member_index => {
                let suffix_span = suffix.as_span();
                let index = expect_next(&mut suffix.into_inner(), &suffix_span)?;
                ExpressionType::MemberExpression {
                    object: Box::new(expression),
                    property: MemberPropertyType::Computed(Box::new(build_expression(index)?)),
                }
            }
            _ => return Err(get_unexpected_error(9, &suffix)),
        };
    }
    Ok(expression)
}

fn build_arguments(pair: Pair<Rule>) -> BuildResult<Vec<ExpressionType>> {
    let mut arguments = vec![];
    for p in pair.into_inner() {
        arguments.push(build_expression(p)?);
    }
    Ok(arguments)
}

fn build_number(pair: &Pair<Rule>) -> BuildResult<NumberLiteralType> {
    let text = pair.as_str();
    if let Some(hex) = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        return Ok(match i64::from_str_radix(hex, 16) {
            Ok(i) => NumberLiteralType::IntegerLiteral(i),
            Err(_) => NumberLiteralType::FloatLiteral(
                hex.chars()
                    .filter_map(|c| c.to_digit(16))
                    .fold(0.0, |acc, d| acc * 16.0 + d as f64),
            ),
        });
    }
    if !text.contains(|c| c == '.' || c == 'e' || c == 'E') {
        if let Ok(i) = text.parse::<i64>() {
            return Ok(NumberLiteralType::IntegerLiteral(i));
        }
    }
    text.parse::<f64>()
        .map(NumberLiteralType::FloatLiteral)
        .map_err(|_| get_unexpected_error(10, pair))
}

fn build_string(pair: Pair<Rule>) -> BuildResult<String> {
    let span = pair.as_span();
    let raw = expect_next(&mut pair.into_inner(), &span)?;
    unescape_string(raw.as_str()).map_err(|message| custom_error(&message, span))
}

/// Resolve the escape sequences of a string literal body.
pub(crate) fn unescape_string(raw: &str) -> Result<String, String> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let escaped = chars
            .next()
            .ok_or_else(|| "Unterminated escape sequence".to_string())?;
        match escaped {
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            'b' => out.push('\u{0008}'),
            'f' => out.push('\u{000C}'),
            'v' => out.push('\u{000B}'),
            '0' => out.push('\0'),
            // Line continuation.
            '\n' => {}
            'x' => {
                let hex: String = chars.by_ref().take(2).collect();
                out.push(decode_code_point(&hex)?);
            }
            'u' => {
                let hex: String = if chars.peek() == Some(&'{') {
                    chars.next();
                    chars.by_ref().take_while(|c| *c != '}').collect()
                } else {
                    chars.by_ref().take(4).collect()
                };
                out.push(decode_code_point(&hex)?);
            }
            other => out.push(other),
        }
    }
    Ok(out)
}

fn decode_code_point(hex: &str) -> Result<char, String> {
    u32::from_str_radix(hex, 16)
        .ok()
        .and_then(std::char::from_u32)
        .ok_or_else(|| format!("Invalid escape sequence '{}'", hex))
}
