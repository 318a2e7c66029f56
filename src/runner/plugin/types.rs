//! Core types for the plugin architecture and the evaluation context.

use std::collections::HashMap;
use std::rc::Rc;

use crate::runner::ds::env_record::{resolve_binding, EnvironmentRecord, EnvironmentRecordType};
use crate::runner::ds::error::JErrorType;
use crate::runner::ds::realm::Realm;
use crate::runner::ds::value::JsValue;
use crate::runner::plugin::resolver::PluginResolver;

/// Execution state threaded through the interpreter and passed to native functions.
pub struct EvalContext {
    pub realm: Rc<Realm>,
    /// Innermost scope, where `let`, `const` and block scopes live.
    pub lex_env: EnvironmentRecordType,
    /// Scope that receives `var` and function declarations.
    pub var_env: EnvironmentRecordType,
    pub this_value: JsValue,
}

impl EvalContext {
    /// A context on a fresh standalone realm with the core built-ins.
    pub fn new() -> Self {
        Self::for_realm(Realm::new_standalone())
    }

    /// A context positioned at the global scope of `realm`.
    pub fn for_realm(realm: Rc<Realm>) -> Self {
        let global = realm.global_env.clone();
        EvalContext {
            realm,
            lex_env: global.clone(),
            var_env: global,
            this_value: JsValue::Undefined,
        }
    }

    pub fn add_resolver(&self, resolver: Rc<dyn PluginResolver>) {
        self.realm.super_global.borrow_mut().add_resolver(resolver);
    }

    /// Read a name through the scope chain, then the super-global scope.
    pub fn get_binding(&mut self, name: &str) -> Result<JsValue, JErrorType> {
        if let Some(env) = resolve_binding(&self.lex_env, name) {
            let value = env.borrow().get_binding_value(name);
            return value;
        }
        self.resolve_super_global(name)
    }

    /// Whether `name` resolves anywhere, including not-yet-materialized built-ins.
    pub fn has_binding(&self, name: &str) -> bool {
        resolve_binding(&self.lex_env, name).is_some()
            || self.realm.super_global.borrow().has_name(name)
    }

    /// Assign to an existing binding, or create a global one when none exists.
    pub fn set_binding(&mut self, name: &str, value: JsValue) -> Result<(), JErrorType> {
        match resolve_binding(&self.lex_env, name) {
            Some(env) => {
                let result = env.borrow_mut().set_mutable_binding(name, value);
                result
            }
            None => {
                let mut global = self.realm.global_env.borrow_mut();
                global.create_mutable_binding(name, true);
                global.initialize_binding(name, value)
            }
        }
    }

    pub fn push_block_scope(&mut self) {
        self.lex_env = EnvironmentRecord::new(Some(self.lex_env.clone()));
    }

    pub fn pop_block_scope(&mut self) {
        let outer = self.lex_env.borrow().outer();
        if let Some(outer) = outer {
            self.lex_env = outer;
        }
    }

    /// Count one unit of work against the collection trigger.
    pub fn record_step(&self) {
        self.realm.heap.record_step();
    }

    fn resolve_super_global(&mut self, name: &str) -> Result<JsValue, JErrorType> {
        let cached = self.realm.super_global.borrow().cached(name);
        if let Some(value) = cached {
            return Ok(value);
        }
        let resolver = self.realm.super_global.borrow().find_resolver(name);
        match resolver {
            Some(resolver) => {
                let value = resolver.resolve(name, self)?;
                self.realm
                    .super_global
                    .borrow_mut()
                    .store(name, value.clone());
                Ok(value)
            }
            None => Err(JErrorType::ReferenceError(format!("{} is not defined", name))),
        }
    }
}

impl Default for EvalContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Function signature for built-in methods.
/// Native functions receive the evaluation context, `this` value, and arguments.
pub type NativeFn = fn(
    ctx: &mut EvalContext,
    this: JsValue,
    args: Vec<JsValue>,
) -> Result<JsValue, JErrorType>;

/// Built-in object definition, materialized per realm on first use.
pub struct BuiltInObject {
    /// Name of the object (e.g., "Symbol", "console").
    pub name: String,

    /// Methods installed as properties of the object.
    pub methods: HashMap<String, NativeFn>,

    /// Static properties.
    pub properties: HashMap<String, JsValue>,

    /// Behaviour when the object is called as a function.
    pub call: Option<NativeFn>,

    /// Behaviour under `new`.
    pub constructor: Option<NativeFn>,
}

impl BuiltInObject {
    pub fn new(name: impl Into<String>) -> Self {
        BuiltInObject {
            name: name.into(),
            methods: HashMap::new(),
            properties: HashMap::new(),
            call: None,
            constructor: None,
        }
    }

    pub fn add_method(mut self, name: impl Into<String>, func: NativeFn) -> Self {
        self.methods.insert(name.into(), func);
        self
    }

    pub fn add_property(mut self, name: impl Into<String>, value: JsValue) -> Self {
        self.properties.insert(name.into(), value);
        self
    }

    pub fn with_call(mut self, call: NativeFn) -> Self {
        self.call = Some(call);
        self
    }

    pub fn with_constructor(mut self, constructor: NativeFn) -> Self {
        self.constructor = Some(constructor);
        self
    }
}
