//! Core built-ins registration.

use crate::runner::ds::value::{JsNumberType, JsValue};
use crate::runner::plugin::registry::BuiltInRegistry;

use super::console;
use super::conversion;
use super::error;
use super::symbol;

/// Register all core built-in objects with the registry.
pub fn register_core_builtins(registry: &mut BuiltInRegistry) {
    registry.register_value("undefined", JsValue::Undefined);
    registry.register_value("NaN", JsValue::Number(JsNumberType::NaN));
    registry.register_value("Infinity", JsValue::Number(JsNumberType::PositiveInfinity));
    error::register(registry);
    symbol::register(registry);
    conversion::register(registry);
    console::register(registry);
}
