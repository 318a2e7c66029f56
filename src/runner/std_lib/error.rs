//! Error built-in objects.
//!
//! Provides the Error, TypeError, ReferenceError, SyntaxError and RangeError
//! constructors. Calling one without `new` behaves the same as constructing it.

use crate::runner::ds::error::JErrorType;
use crate::runner::ds::object::JsObject;
use crate::runner::ds::operations::type_conversion::to_string;
use crate::runner::ds::value::JsValue;
use crate::runner::plugin::registry::BuiltInRegistry;
use crate::runner::plugin::types::{BuiltInObject, EvalContext};

/// Register all error types with the registry.
pub fn register(registry: &mut BuiltInRegistry) {
    registry.register_object(BuiltInObject::new("Error").with_constructor(error_constructor));
    registry.register_object(
        BuiltInObject::new("TypeError").with_constructor(type_error_constructor),
    );
    registry.register_object(
        BuiltInObject::new("ReferenceError").with_constructor(reference_error_constructor),
    );
    registry.register_object(
        BuiltInObject::new("SyntaxError").with_constructor(syntax_error_constructor),
    );
    registry.register_object(
        BuiltInObject::new("RangeError").with_constructor(range_error_constructor),
    );
}

/// Build the error object a script sees for an engine-raised error.
pub fn error_to_js_value(err: &JErrorType) -> JsValue {
    match err {
        JErrorType::Thrown(v) => v.clone(),
        JErrorType::ReferenceError(m)
        | JErrorType::TypeError(m)
        | JErrorType::RangeError(m)
        | JErrorType::SyntaxError(m)
        | JErrorType::CoercionError(m) => {
            JsValue::Object(JsObject::new_error(err.error_name(), Some(m.to_string())))
        }
    }
}

fn create_error(name: &str, args: &[JsValue]) -> Result<JsValue, JErrorType> {
    let message = match args.first() {
        None | Some(JsValue::Undefined) => None,
        Some(v) => Some(to_string(v)?),
    };
    Ok(JsValue::Object(JsObject::new_error(name, message)))
}

fn error_constructor(
    _ctx: &mut EvalContext,
    _this: JsValue,
    args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    create_error("Error", &args)
}

fn type_error_constructor(
    _ctx: &mut EvalContext,
    _this: JsValue,
    args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    create_error("TypeError", &args)
}

fn reference_error_constructor(
    _ctx: &mut EvalContext,
    _this: JsValue,
    args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    create_error("ReferenceError", &args)
}

fn syntax_error_constructor(
    _ctx: &mut EvalContext,
    _this: JsValue,
    args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    create_error("SyntaxError", &args)
}

fn range_error_constructor(
    _ctx: &mut EvalContext,
    _this: JsValue,
    args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    create_error("RangeError", &args)
}
