//! Statement execution.
//!
//! Declarations are instantiated when their scope is entered: `var` names
//! anywhere in a function body (or script) are created in the variable scope
//! initialized to `undefined`, function declarations are bound to their
//! function objects, and `let`/`const` names are created uninitialized in the
//! block that declares them.

use crate::parser::ast::{
    BlockStatementData, CatchClauseData, ExpressionType, ForInitType, ProgramData, StatementType,
    VariableDeclarationData, VariableDeclarationKind,
};
use crate::runner::ds::env_record::EnvironmentRecord;
use crate::runner::ds::error::JErrorType;
use crate::runner::ds::operations::type_conversion::to_boolean;
use crate::runner::ds::value::JsValue;
use crate::runner::plugin::types::EvalContext;
use crate::runner::std_lib::error::error_to_js_value;

use super::expression::evaluate_expression;
use super::function::create_function_object;
use super::types::{Completion, CompletionType, EvalResult, ValueResult};

/// Run a whole script in `ctx` and return its completion value.
///
/// The completion value is the value of the last statement that produced
/// one, so `var a = 1; a + 1` yields 2 and `var a = 1;` yields `undefined`.
pub fn evaluate_program(program: &ProgramData, ctx: &mut EvalContext) -> ValueResult {
    instantiate_declarations(&program.body, ctx, true)?;
    let completion = execute_statement_list(&program.body, ctx)?;
    match completion.completion_type {
        CompletionType::Normal => Ok(completion.get_value()),
        CompletionType::Return => Err(JErrorType::SyntaxError(
            "Illegal return statement".to_string(),
        )),
        CompletionType::Break => Err(JErrorType::SyntaxError(
            "Illegal break statement".to_string(),
        )),
        CompletionType::Continue => Err(JErrorType::SyntaxError(
            "Illegal continue statement".to_string(),
        )),
    }
}

/// Run a function body in a context whose scopes are already set up for the call.
pub(crate) fn execute_function_body(body: &[StatementType], ctx: &mut EvalContext) -> EvalResult {
    instantiate_declarations(body, ctx, true)?;
    execute_statement_list(body, ctx)
}

/// Execute a statement and return its completion.
pub fn execute_statement(stmt: &StatementType, ctx: &mut EvalContext) -> EvalResult {
    ctx.record_step();
    match stmt {
        StatementType::EmptyStatement { .. } | StatementType::FunctionDeclaration(_) => {
            Ok(Completion::normal())
        }

        StatementType::ExpressionStatement { expression, .. } => {
            let value = evaluate_expression(expression, ctx)?;
            Ok(Completion::normal_with_value(value))
        }

        StatementType::BlockStatement(block) => execute_block(block, ctx),

        StatementType::VariableDeclaration(decl) => {
            execute_variable_declaration(decl, ctx)?;
            Ok(Completion::normal())
        }

        StatementType::IfStatement {
            test,
            consequent,
            alternate,
            ..
        } => {
            let t = evaluate_expression(test, ctx)?;
            if to_boolean(&t) {
                execute_statement(consequent, ctx)
            } else if let Some(alt) = alternate {
                execute_statement(alt, ctx)
            } else {
                Ok(Completion::normal())
            }
        }

        StatementType::WhileStatement { test, body, .. } => {
            execute_loop(None, Some(&**test), None, body, false, ctx)
        }

        StatementType::DoWhileStatement { body, test, .. } => {
            execute_loop(None, Some(&**test), None, body, true, ctx)
        }

        StatementType::ForStatement {
            init,
            test,
            update,
            body,
            ..
        } => {
            let saved = ctx.lex_env.clone();
            ctx.push_block_scope();
            let result = execute_loop(
                init.as_ref(),
                test.as_deref(),
                update.as_deref(),
                body,
                false,
                ctx,
            );
            ctx.lex_env = saved;
            result
        }

        StatementType::ReturnStatement { argument, .. } => {
            let value = match argument {
                Some(e) => evaluate_expression(e, ctx)?,
                None => JsValue::Undefined,
            };
            Ok(Completion::return_value(value))
        }

        StatementType::ThrowStatement { argument, .. } => {
            let value = evaluate_expression(argument, ctx)?;
            Err(JErrorType::Thrown(value))
        }

        StatementType::TryStatement {
            block,
            handler,
            finalizer,
            ..
        } => execute_try(block, handler.as_ref(), finalizer.as_ref(), ctx),

        StatementType::BreakStatement { .. } => Ok(Completion::break_completion()),

        StatementType::ContinueStatement { .. } => Ok(Completion::continue_completion()),
    }
}

fn execute_statement_list(statements: &[StatementType], ctx: &mut EvalContext) -> EvalResult {
    let mut last: Option<JsValue> = None;
    for stmt in statements {
        let completion = execute_statement(stmt, ctx)?;
        if completion.value.is_some() {
            last = completion.value.clone();
        }
        if completion.is_abrupt() {
            return Ok(completion.update_empty(last));
        }
    }
    Ok(match last {
        Some(v) => Completion::normal_with_value(v),
        None => Completion::normal(),
    })
}

fn execute_block(block: &BlockStatementData, ctx: &mut EvalContext) -> EvalResult {
    let saved = ctx.lex_env.clone();
    ctx.push_block_scope();
    let result = instantiate_declarations(&block.body, ctx, false)
        .and_then(|_| execute_statement_list(&block.body, ctx));
    ctx.lex_env = saved;
    result
}

/// Shared driver for `while`, `do-while` and `for`. The caller owns the loop scope.
fn execute_loop(
    init: Option<&ForInitType>,
    test: Option<&ExpressionType>,
    update: Option<&ExpressionType>,
    body: &StatementType,
    test_after_body: bool,
    ctx: &mut EvalContext,
) -> EvalResult {
    match init {
        Some(ForInitType::VariableDeclaration(decl)) => {
            declare_lexical(decl, ctx)?;
            execute_variable_declaration(decl, ctx)?;
        }
        Some(ForInitType::Expression(e)) => {
            evaluate_expression(e, ctx)?;
        }
        None => {}
    }
    let mut last: Option<JsValue> = None;
    let mut first = true;
    loop {
        if !(first && test_after_body) {
            if let Some(t) = test {
                let v = evaluate_expression(t, ctx)?;
                if !to_boolean(&v) {
                    break;
                }
            }
        }
        first = false;
        let completion = execute_statement(body, ctx)?;
        if completion.value.is_some() {
            last = completion.value.clone();
        }
        match completion.completion_type {
            CompletionType::Break => break,
            CompletionType::Return => return Ok(completion.update_empty(last)),
            CompletionType::Normal | CompletionType::Continue => {}
        }
        if let Some(u) = update {
            evaluate_expression(u, ctx)?;
        }
    }
    Ok(match last {
        Some(v) => Completion::normal_with_value(v),
        None => Completion::normal(),
    })
}

fn execute_try(
    block: &BlockStatementData,
    handler: Option<&CatchClauseData>,
    finalizer: Option<&BlockStatementData>,
    ctx: &mut EvalContext,
) -> EvalResult {
    let result = match (execute_block(block, ctx), handler) {
        (Err(err), Some(h)) => {
            log::trace!("caught {}", err.error_name());
            execute_catch(h, error_to_js_value(&err), ctx)
        }
        (other, _) => other,
    };
    match finalizer {
        None => result,
        Some(f) => {
            let completion = execute_block(f, ctx)?;
            if completion.is_abrupt() {
                Ok(completion)
            } else {
                result
            }
        }
    }
}

fn execute_catch(handler: &CatchClauseData, thrown: JsValue, ctx: &mut EvalContext) -> EvalResult {
    let saved = ctx.lex_env.clone();
    ctx.push_block_scope();
    if let Some(param) = &handler.param {
        let mut env = ctx.lex_env.borrow_mut();
        env.create_mutable_binding(param, true);
        env.initialize_binding(param, thrown)?;
    }
    let result = execute_block(&handler.body, ctx);
    ctx.lex_env = saved;
    result
}

fn execute_variable_declaration(
    decl: &VariableDeclarationData,
    ctx: &mut EvalContext,
) -> Result<(), JErrorType> {
    for d in &decl.declarations {
        match decl.kind {
            VariableDeclarationKind::Var => {
                if let Some(init) = &d.init {
                    let value = evaluate_expression(init, ctx)?;
                    ctx.set_binding(&d.id, value)?;
                }
            }
            VariableDeclarationKind::Let | VariableDeclarationKind::Const => {
                let value = match &d.init {
                    Some(init) => evaluate_expression(init, ctx)?,
                    None => JsValue::Undefined,
                };
                let record = ctx.lex_env.clone();
                let mut env = record.borrow_mut();
                if !env.has_binding(&d.id) {
                    create_lexical_binding(&mut env, decl.kind, &d.id);
                }
                env.initialize_binding(&d.id, value)?;
            }
        }
    }
    Ok(())
}

fn create_lexical_binding(
    env: &mut EnvironmentRecord,
    kind: VariableDeclarationKind,
    name: &str,
) {
    if kind == VariableDeclarationKind::Const {
        env.create_immutable_binding(name);
    } else {
        env.create_mutable_binding(name, false);
    }
}

/// Create uninitialized `let`/`const` bindings in the current lexical scope.
fn declare_lexical(decl: &VariableDeclarationData, ctx: &mut EvalContext) -> Result<(), JErrorType> {
    if decl.kind == VariableDeclarationKind::Var {
        return Ok(());
    }
    let mut env = ctx.lex_env.borrow_mut();
    for d in &decl.declarations {
        if env.has_binding(&d.id) {
            return Err(JErrorType::SyntaxError(format!(
                "Identifier '{}' has already been declared",
                d.id
            )));
        }
        create_lexical_binding(&mut env, decl.kind, &d.id);
    }
    Ok(())
}

fn instantiate_declarations(
    body: &[StatementType],
    ctx: &mut EvalContext,
    is_var_scope: bool,
) -> Result<(), JErrorType> {
    if is_var_scope {
        let mut names = vec![];
        for stmt in body {
            collect_var_names(stmt, &mut names);
        }
        let mut env = ctx.var_env.borrow_mut();
        for name in names {
            if !env.has_binding(&name) {
                env.create_mutable_binding(&name, true);
            }
        }
    }
    for stmt in body {
        match stmt {
            StatementType::VariableDeclaration(decl) => declare_lexical(decl, ctx)?,
            StatementType::FunctionDeclaration(data) => {
                if let Some(name) = &data.id {
                    let f = create_function_object(data, ctx.lex_env.clone());
                    let target = if is_var_scope {
                        ctx.var_env.clone()
                    } else {
                        ctx.lex_env.clone()
                    };
                    let mut env = target.borrow_mut();
                    env.create_mutable_binding(name, true);
                    env.initialize_binding(name, f)?;
                }
            }
            _ => {}
        }
    }
    Ok(())
}

/// `var` names declared anywhere in a statement, not descending into functions.
fn collect_var_names(stmt: &StatementType, out: &mut Vec<String>) {
    match stmt {
        StatementType::VariableDeclaration(decl) if decl.kind == VariableDeclarationKind::Var => {
            out.extend(decl.declarations.iter().map(|d| d.id.clone()));
        }
        StatementType::BlockStatement(block) => {
            block.body.iter().for_each(|s| collect_var_names(s, out));
        }
        StatementType::IfStatement {
            consequent,
            alternate,
            ..
        } => {
            collect_var_names(consequent, out);
            if let Some(alt) = alternate {
                collect_var_names(alt, out);
            }
        }
        StatementType::WhileStatement { body, .. }
        | StatementType::DoWhileStatement { body, .. } => collect_var_names(body, out),
        StatementType::ForStatement { init, body, .. } => {
            if let Some(ForInitType::VariableDeclaration(decl)) = init {
                if decl.kind == VariableDeclarationKind::Var {
                    out.extend(decl.declarations.iter().map(|d| d.id.clone()));
                }
            }
            collect_var_names(body, out);
        }
        StatementType::TryStatement {
            block,
            handler,
            finalizer,
            ..
        } => {
            block.body.iter().for_each(|s| collect_var_names(s, out));
            if let Some(h) = handler {
                h.body.body.iter().for_each(|s| collect_var_names(s, out));
            }
            if let Some(f) = finalizer {
                f.body.iter().for_each(|s| collect_var_names(s, out));
            }
        }
        _ => {}
    }
}
