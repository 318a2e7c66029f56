//! Exposing host functions to scripts as `namespace.property(arg?)`.

use std::rc::Rc;

use crate::embed::context::Context;
use crate::embed::error::Result;
use crate::runner::ds::object::{FunctionKind, JsObject, JsObjectType};
use crate::runner::ds::object_property::PropertyKey;
use crate::runner::ds::realm::Realm;
use crate::runner::ds::value::JsValue;

pub struct Bridge;

impl Bridge {
    /// Bind `callback` as `namespace.property` in the context's global scope.
    ///
    /// The namespace object is created on first use. A global of the same name
    /// that is not an object is replaced. Registering the same key again
    /// replaces the callback for calls that start afterwards.
    pub fn register<F>(context: &Context, namespace: &str, property: &str, callback: F) -> Result<()>
    where
        F: Fn(Option<String>) -> Option<String> + 'static,
    {
        let realm = context.realm()?;
        let replaced = realm
            .host_functions
            .borrow_mut()
            .register(namespace, property, Rc::new(callback));
        let target = namespace_object(&realm, namespace)?;
        let trampoline = JsObject::new_function(FunctionKind::Host {
            namespace: namespace.to_string(),
            property: property.to_string(),
        });
        target
            .borrow_mut()
            .set(PropertyKey::from(property), JsValue::Object(trampoline))?;
        log::debug!(
            "{} {}.{}",
            if replaced { "re-registered" } else { "registered" },
            namespace,
            property
        );
        Ok(())
    }
}

fn namespace_object(realm: &Realm, namespace: &str) -> Result<JsObjectType> {
    let existing = {
        let global = realm.global_env.borrow();
        if global.has_binding(namespace) {
            global.get_binding_value(namespace).ok()
        } else {
            None
        }
    };
    match existing {
        Some(JsValue::Object(o)) => return Ok(o),
        Some(other) => log::warn!(
            "replacing global '{}' ({}) with a namespace object",
            namespace,
            other
        ),
        None => {}
    }
    let object = JsObject::new_ordinary();
    let mut global = realm.global_env.borrow_mut();
    global.create_mutable_binding(namespace, true);
    global.initialize_binding(namespace, JsValue::Object(object.clone()))?;
    Ok(object)
}
