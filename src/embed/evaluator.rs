//! Running script source in a context.

use crate::embed::context::Context;
use crate::embed::error::{EmbedError, Result};
use crate::embed::handle::NativeHandle;
use crate::embed::value::ValueHandle;
use crate::parser::JsParser;
use crate::runner::ds::operations::type_conversion::to_string;
use crate::runner::ds::value::JsValue;
use crate::runner::eval::statement::evaluate_program;
use crate::runner::plugin::types::EvalContext;

pub struct Evaluator;

impl Evaluator {
    /// Run `source` and return its completion value converted to a string.
    ///
    /// Script failures are contained: a syntax error, an uncaught exception or
    /// a completion value with no string form all give `Ok(None)` and leave
    /// the context usable. Only a destroyed context (or VM) is an `Err`.
    ///
    /// A bridged callback may destroy the running context or its VM. The
    /// script then runs to completion on the state it already holds, no
    /// result is stored, and the call returns `Err(DestroyedHandleError)`
    /// whatever `store_result_as_global` says.
    pub fn eval_script(
        context: &Context,
        source: &str,
        source_name: &str,
        store_result_as_global: bool,
    ) -> Result<Option<String>> {
        let value = match run(context, source, source_name, store_result_as_global)? {
            Ok(value) => value,
            Err(e) => {
                log::debug!("{}: {}", source_name, e);
                return Ok(None);
            }
        };
        match to_string(&value) {
            Ok(s) => Ok(Some(s)),
            Err(e) => {
                log::debug!("{}: result has no string form: {:?}", source_name, e);
                Ok(None)
            }
        }
    }

    /// Like [`Evaluator::eval_script`], but every failure is reported as its own error kind.
    pub fn eval_script_value(
        context: &Context,
        source: &str,
        source_name: &str,
        store_result_as_global: bool,
    ) -> Result<ValueHandle> {
        let value = run(context, source, source_name, store_result_as_global)??;
        Ok(ValueHandle::from_js_value(
            context.raw_handle().registry(),
            value,
        ))
    }
}

/// The outer error is a host fault; the inner one is the script's.
fn run(
    context: &Context,
    source: &str,
    source_name: &str,
    store_result_as_global: bool,
) -> Result<std::result::Result<JsValue, EmbedError>> {
    let realm = context.realm()?;
    let program = match JsParser::parse_to_ast_from_str(source) {
        Ok(program) => program,
        Err(e) => return Ok(Err(e.into())),
    };
    log::debug!("evaluating {} ({} statements)", source_name, program.body.len());
    // No registry borrow is held from here on, so bridged callbacks may re-enter.
    let mut eval_ctx = EvalContext::for_realm(realm);
    let completion = evaluate_program(&program, &mut eval_ctx);
    // A callback may have torn the context down while the script ran.
    context.raw_handle().ensure_valid()?;
    match completion {
        Ok(value) => {
            if store_result_as_global {
                context.store_result(value.clone())?;
            }
            Ok(Ok(value))
        }
        Err(e) => Ok(Err(e.into())),
    }
}
