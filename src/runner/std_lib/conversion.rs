//! `String`, `Number` and `Boolean` conversion functions.

use crate::runner::ds::error::JErrorType;
use crate::runner::ds::operations::type_conversion::{to_boolean, to_number, to_string};
use crate::runner::ds::value::JsValue;
use crate::runner::plugin::registry::BuiltInRegistry;
use crate::runner::plugin::types::{BuiltInObject, EvalContext};

pub fn register(registry: &mut BuiltInRegistry) {
    registry.register_object(BuiltInObject::new("String").with_call(string_call));
    registry.register_object(BuiltInObject::new("Number").with_call(number_call));
    registry.register_object(BuiltInObject::new("Boolean").with_call(boolean_call));
}

/// Unlike implicit conversion, `String(sym)` yields the symbol's descriptive string.
fn string_call(
    _ctx: &mut EvalContext,
    _this: JsValue,
    args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    Ok(JsValue::String(match args.first() {
        None => String::new(),
        Some(JsValue::Symbol(s)) => s.descriptive_string(),
        Some(v) => to_string(v)?,
    }))
}

fn number_call(
    _ctx: &mut EvalContext,
    _this: JsValue,
    args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    match args.first() {
        None => Ok(JsValue::from_f64(0.0)),
        Some(v) => Ok(JsValue::Number(to_number(v)?)),
    }
}

fn boolean_call(
    _ctx: &mut EvalContext,
    _this: JsValue,
    args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    Ok(JsValue::Boolean(
        args.first().map(to_boolean).unwrap_or(false),
    ))
}

/// Generic `toString` for values that have no own `toString` property.
pub fn value_to_string(
    _ctx: &mut EvalContext,
    this: JsValue,
    _args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    Ok(JsValue::String(to_string(&this)?))
}
