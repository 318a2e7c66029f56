//! Registry of the built-in objects and values a realm can resolve.

use std::collections::HashMap;

use super::types::BuiltInObject;
use crate::runner::ds::value::JsValue;
use crate::runner::std_lib::register_core_builtins;

pub struct BuiltInRegistry {
    objects: HashMap<String, BuiltInObject>,
    values: HashMap<String, JsValue>,
}

impl BuiltInRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        BuiltInRegistry {
            objects: HashMap::new(),
            values: HashMap::new(),
        }
    }

    /// Create a registry with the core built-ins.
    pub fn with_core() -> Self {
        let mut registry = Self::new();
        register_core_builtins(&mut registry);
        registry
    }

    pub fn register_object(&mut self, obj: BuiltInObject) {
        self.objects.insert(obj.name.clone(), obj);
    }

    /// Register a plain value such as `NaN`.
    pub fn register_value(&mut self, name: impl Into<String>, value: JsValue) {
        self.values.insert(name.into(), value);
    }

    pub fn get_object(&self, name: &str) -> Option<&BuiltInObject> {
        self.objects.get(name)
    }

    pub fn get_value(&self, name: &str) -> Option<&JsValue> {
        self.values.get(name)
    }

    pub fn has_object(&self, name: &str) -> bool {
        self.objects.contains_key(name) || self.values.contains_key(name)
    }

    pub fn object_names(&self) -> Vec<&str> {
        self.objects
            .keys()
            .chain(self.values.keys())
            .map(|k| k.as_str())
            .collect()
    }
}

impl Default for BuiltInRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn core_registry_provides_builtins() {
        let registry = BuiltInRegistry::with_core();
        for name in &["Symbol", "Error", "TypeError", "String", "console", "NaN", "undefined"] {
            assert!(registry.has_object(name), "missing {}", name);
        }
        assert!(!registry.has_object("Math"));
    }
}
