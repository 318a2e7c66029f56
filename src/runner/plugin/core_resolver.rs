//! Core plugin resolver: exposes a `BuiltInRegistry` through the super-global scope.

use crate::runner::ds::error::JErrorType;
use crate::runner::ds::object::{FunctionKind, JsObject, NativeFunctionData, ObjectClass};
use crate::runner::ds::object_property::PropertyKey;
use crate::runner::ds::value::JsValue;
use crate::runner::plugin::registry::BuiltInRegistry;
use crate::runner::plugin::resolver::PluginResolver;
use crate::runner::plugin::types::EvalContext;

/// Wraps a `BuiltInRegistry` as a `PluginResolver`.
///
/// Resolving a built-in object materializes a fresh engine object for the
/// realm: a function object when the built-in is callable, an ordinary
/// object otherwise, with every registered method installed as a property.
pub struct CorePluginResolver {
    registry: BuiltInRegistry,
}

impl CorePluginResolver {
    pub fn new(registry: BuiltInRegistry) -> Self {
        CorePluginResolver { registry }
    }

    pub fn registry(&self) -> &BuiltInRegistry {
        &self.registry
    }
}

impl PluginResolver for CorePluginResolver {
    fn has_binding(&self, name: &str) -> bool {
        self.registry.has_object(name)
    }

    fn resolve(&self, name: &str, _ctx: &mut EvalContext) -> Result<JsValue, JErrorType> {
        if let Some(value) = self.registry.get_value(name) {
            return Ok(value.clone());
        }
        let builtin = self
            .registry
            .get_object(name)
            .ok_or_else(|| JErrorType::ReferenceError(format!("{} is not defined", name)))?;

        // A constructor-only built-in behaves the same when called without `new`.
        let class = match builtin.call.or(builtin.constructor) {
            None => ObjectClass::Ordinary,
            Some(call) => ObjectClass::Function(FunctionKind::Native(NativeFunctionData {
                name: builtin.name.to_string(),
                call,
                construct: builtin.constructor,
            })),
        };
        let mut obj = JsObject::new(class);
        for (method_name, method) in &builtin.methods {
            obj.define(
                PropertyKey::Str(method_name.to_string()),
                JsValue::Object(JsObject::new_native_function(method_name, *method)),
            );
        }
        for (prop_name, value) in &builtin.properties {
            obj.define(PropertyKey::Str(prop_name.to_string()), value.clone());
        }
        log::trace!("materialized built-in {}", name);
        Ok(JsValue::Object(obj.into_ref()))
    }

    fn name(&self) -> &str {
        "core"
    }
}
