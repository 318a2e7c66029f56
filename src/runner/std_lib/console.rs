//! Console built-in object.
//!
//! `console.log`, `info`, `warn`, `error` and `debug` write through the `log`
//! facade under the `jsbridge::console` target, so the embedding
//! application decides where script output goes.

use crate::runner::ds::error::JErrorType;
use crate::runner::ds::operations::type_conversion::to_string;
use crate::runner::ds::value::JsValue;
use crate::runner::plugin::registry::BuiltInRegistry;
use crate::runner::plugin::types::{BuiltInObject, EvalContext};

pub const CONSOLE_TARGET: &str = "jsbridge::console";

/// Register the console object with the registry.
pub fn register(registry: &mut BuiltInRegistry) {
    let console = BuiltInObject::new("console")
        .add_method("log", console_log)
        .add_method("info", console_info)
        .add_method("warn", console_warn)
        .add_method("error", console_error)
        .add_method("debug", console_debug);

    registry.register_object(console);
}

/// Format a JsValue for console output. Symbols print in descriptive form.
fn format_value(value: &JsValue) -> String {
    match value {
        JsValue::Symbol(s) => s.descriptive_string(),
        v => to_string(v).unwrap_or_else(|_| v.to_string()),
    }
}

/// Format all arguments for console output.
pub fn format_args(args: &[JsValue]) -> String {
    args.iter()
        .map(format_value)
        .collect::<Vec<_>>()
        .join(" ")
}

fn console_log(
    _ctx: &mut EvalContext,
    _this: JsValue,
    args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    log::info!(target: CONSOLE_TARGET, "{}", format_args(&args));
    Ok(JsValue::Undefined)
}

fn console_info(
    _ctx: &mut EvalContext,
    _this: JsValue,
    args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    log::info!(target: CONSOLE_TARGET, "{}", format_args(&args));
    Ok(JsValue::Undefined)
}

fn console_warn(
    _ctx: &mut EvalContext,
    _this: JsValue,
    args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    log::warn!(target: CONSOLE_TARGET, "{}", format_args(&args));
    Ok(JsValue::Undefined)
}

fn console_error(
    _ctx: &mut EvalContext,
    _this: JsValue,
    args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    log::error!(target: CONSOLE_TARGET, "{}", format_args(&args));
    Ok(JsValue::Undefined)
}

fn console_debug(
    _ctx: &mut EvalContext,
    _this: JsValue,
    args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    log::debug!(target: CONSOLE_TARGET, "{}", format_args(&args));
    Ok(JsValue::Undefined)
}
