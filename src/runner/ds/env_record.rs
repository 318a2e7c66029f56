use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::runner::ds::error::JErrorType;
use crate::runner::ds::value::JsValue;

pub type EnvironmentRecordType = Rc<RefCell<EnvironmentRecord>>;

struct Binding {
    value: JsValue,
    mutable: bool,
    initialized: bool,
}

/// A declarative scope: function, block, catch clause, or the global scope.
pub struct EnvironmentRecord {
    bindings: HashMap<String, Binding>,
    outer: Option<EnvironmentRecordType>,
}

impl EnvironmentRecord {
    pub fn new(outer: Option<EnvironmentRecordType>) -> EnvironmentRecordType {
        Rc::new(RefCell::new(EnvironmentRecord {
            bindings: HashMap::new(),
            outer,
        }))
    }

    pub fn outer(&self) -> Option<EnvironmentRecordType> {
        self.outer.clone()
    }

    pub fn has_binding(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    /// `var`-style bindings are created initialized to `undefined`; `let` ones start uninitialized.
    pub fn create_mutable_binding(&mut self, name: &str, initialized: bool) {
        self.bindings.insert(
            name.to_string(),
            Binding {
                value: JsValue::Undefined,
                mutable: true,
                initialized,
            },
        );
    }

    pub fn create_immutable_binding(&mut self, name: &str) {
        self.bindings.insert(
            name.to_string(),
            Binding {
                value: JsValue::Undefined,
                mutable: false,
                initialized: false,
            },
        );
    }

    pub fn initialize_binding(&mut self, name: &str, value: JsValue) -> Result<(), JErrorType> {
        match self.bindings.get_mut(name) {
            Some(b) => {
                b.value = value;
                b.initialized = true;
                Ok(())
            }
            None => Err(JErrorType::ReferenceError(format!("{} is not defined", name))),
        }
    }

    pub fn set_mutable_binding(&mut self, name: &str, value: JsValue) -> Result<(), JErrorType> {
        match self.bindings.get_mut(name) {
            Some(b) if !b.initialized => Err(JErrorType::ReferenceError(format!(
                "Cannot access '{}' before initialization",
                name
            ))),
            Some(b) if !b.mutable => Err(JErrorType::TypeError(
                "Assignment to constant variable".to_string(),
            )),
            Some(b) => {
                b.value = value;
                Ok(())
            }
            None => Err(JErrorType::ReferenceError(format!("{} is not defined", name))),
        }
    }

    pub fn get_binding_value(&self, name: &str) -> Result<JsValue, JErrorType> {
        match self.bindings.get(name) {
            Some(b) if !b.initialized => Err(JErrorType::ReferenceError(format!(
                "Cannot access '{}' before initialization",
                name
            ))),
            Some(b) => Ok(b.value.clone()),
            None => Err(JErrorType::ReferenceError(format!("{} is not defined", name))),
        }
    }
}

/// Walks the scope chain from `env` and returns the record that binds `name`.
pub fn resolve_binding(env: &EnvironmentRecordType, name: &str) -> Option<EnvironmentRecordType> {
    let mut current = Some(env.clone());
    while let Some(e) = current {
        let next = {
            let record = e.borrow();
            if record.has_binding(name) {
                None
            } else {
                Some(record.outer())
            }
        };
        match next {
            None => return Some(e),
            Some(outer) => current = outer,
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::ds::value::JsNumberType;

    #[test]
    fn lookup_reaches_outer_scope() {
        let global = EnvironmentRecord::new(None);
        global.borrow_mut().create_mutable_binding("a", true);
        let inner = EnvironmentRecord::new(Some(global.clone()));
        let found = resolve_binding(&inner, "a").unwrap();
        assert!(Rc::ptr_eq(&found, &global));
        assert!(resolve_binding(&inner, "b").is_none());
    }

    #[test]
    fn const_binding_rejects_assignment() {
        let env = EnvironmentRecord::new(None);
        let mut record = env.borrow_mut();
        record.create_immutable_binding("c");
        record
            .initialize_binding("c", JsValue::Number(JsNumberType::Integer(1)))
            .unwrap();
        assert!(matches!(
            record.set_mutable_binding("c", JsValue::Null),
            Err(JErrorType::TypeError(_))
        ));
    }

    #[test]
    fn uninitialized_binding_is_in_dead_zone() {
        let env = EnvironmentRecord::new(None);
        env.borrow_mut().create_mutable_binding("x", false);
        assert!(matches!(
            env.borrow().get_binding_value("x"),
            Err(JErrorType::ReferenceError(_))
        ));
    }
}
