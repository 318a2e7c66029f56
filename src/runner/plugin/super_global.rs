//! Super-global environment, the bottom of the scope chain.
//!
//! When a name is not bound anywhere in the lexical chain, including the
//! global scope, the super-global environment asks its resolvers for it:
//!
//! ```text
//! Symbol.for('app')
//!      ↓
//! 1. Check local and outer scopes → not found
//! 2. Check global scope → not found
//! 3. Check super-global cache → miss
//! 4. CorePluginResolver claims "Symbol", materializes it
//! 5. Cache and return
//! ```
//!
//! Scripts never write here. Assigning to a super-global name creates a
//! global binding that shadows it.

use std::collections::HashMap;
use std::rc::Rc;

use crate::runner::ds::value::JsValue;
use crate::runner::plugin::resolver::PluginResolver;

pub struct SuperGlobalEnvironment {
    /// Registered plugin resolvers, queried in order.
    resolvers: Vec<Rc<dyn PluginResolver>>,
    /// Already-resolved bindings.
    cache: HashMap<String, JsValue>,
}

impl SuperGlobalEnvironment {
    pub fn new() -> Self {
        SuperGlobalEnvironment {
            resolvers: Vec::new(),
            cache: HashMap::new(),
        }
    }

    /// Register a plugin resolver. Resolvers are queried in registration order.
    pub fn add_resolver(&mut self, resolver: Rc<dyn PluginResolver>) {
        log::debug!("super-global resolver added: {}", resolver.name());
        self.resolvers.push(resolver);
    }

    pub fn cached(&self, name: &str) -> Option<JsValue> {
        self.cache.get(name).cloned()
    }

    /// The resolver that owns `name`. Callers release their borrow of this
    /// environment before resolving, since resolution runs script-visible code.
    pub fn find_resolver(&self, name: &str) -> Option<Rc<dyn PluginResolver>> {
        self.resolvers
            .iter()
            .find(|r| r.has_binding(name))
            .cloned()
    }

    pub fn store(&mut self, name: &str, value: JsValue) {
        self.cache.insert(name.to_string(), value);
    }

    pub fn has_name(&self, name: &str) -> bool {
        self.cache.contains_key(name) || self.resolvers.iter().any(|r| r.has_binding(name))
    }

    pub fn resolvers(&self) -> &[Rc<dyn PluginResolver>] {
        &self.resolvers
    }
}

impl Default for SuperGlobalEnvironment {
    fn default() -> Self {
        Self::new()
    }
}
