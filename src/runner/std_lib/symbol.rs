//! Symbol built-in: `Symbol(desc)`, `Symbol.for(key)` and `Symbol.keyFor(sym)`.
//!
//! `Symbol.for` uses the registry shared by every realm of the runtime, so a
//! host holding the same runtime sees the same symbols.

use crate::runner::ds::error::JErrorType;
use crate::runner::ds::operations::type_conversion::to_string;
use crate::runner::ds::symbol::SymbolData;
use crate::runner::ds::value::JsValue;
use crate::runner::plugin::registry::BuiltInRegistry;
use crate::runner::plugin::types::{BuiltInObject, EvalContext};

pub fn register(registry: &mut BuiltInRegistry) {
    let symbol = BuiltInObject::new("Symbol")
        .with_call(symbol_call)
        .add_method("for", symbol_for)
        .add_method("keyFor", symbol_key_for);
    registry.register_object(symbol);
}

fn symbol_call(
    _ctx: &mut EvalContext,
    _this: JsValue,
    args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    let description = match args.first() {
        None | Some(JsValue::Undefined) => None,
        Some(v) => Some(to_string(v)?),
    };
    Ok(JsValue::Symbol(SymbolData::new(description)))
}

fn symbol_for(
    ctx: &mut EvalContext,
    _this: JsValue,
    args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    let key = to_string(args.first().unwrap_or(&JsValue::Undefined))?;
    let symbol = ctx.realm.symbols.borrow_mut().for_key(&key);
    Ok(JsValue::Symbol(symbol))
}

fn symbol_key_for(
    ctx: &mut EvalContext,
    _this: JsValue,
    args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    match args.first() {
        Some(JsValue::Symbol(s)) => Ok(match ctx.realm.symbols.borrow().key_for(s) {
            Some(key) => JsValue::String(key),
            None => JsValue::Undefined,
        }),
        _ => Err(JErrorType::TypeError("Symbol.keyFor requires a symbol".to_string())),
    }
}

/// `Symbol.prototype.toString`, reached through member access on a symbol.
pub fn symbol_to_string(
    _ctx: &mut EvalContext,
    this: JsValue,
    _args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    match this {
        JsValue::Symbol(s) => Ok(JsValue::String(s.descriptive_string())),
        _ => Err(JErrorType::TypeError(
            "Symbol.prototype.toString requires a symbol".to_string(),
        )),
    }
}
