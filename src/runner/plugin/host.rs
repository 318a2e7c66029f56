//! Host functions bridged into a realm.
//!
//! A bridged function is stored as a keyed callback in the realm's table and
//! exposed to scripts as a `FunctionKind::Host` trampoline. The trampoline
//! looks the callback up on every call, so re-registering a key affects
//! later calls only.

use std::collections::HashMap;
use std::rc::Rc;

use crate::runner::ds::error::JErrorType;
use crate::runner::ds::operations::type_conversion::to_string;
use crate::runner::ds::value::JsValue;
use crate::runner::plugin::types::EvalContext;

/// A host callback: one optional string in, one optional string out.
pub type HostCallback = Rc<dyn Fn(Option<String>) -> Option<String>>;

#[derive(Default)]
pub struct HostFunctionTable {
    callbacks: HashMap<(String, String), HostCallback>,
}

impl HostFunctionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `namespace.property`. Returns true when an earlier binding was replaced.
    pub fn register(&mut self, namespace: &str, property: &str, callback: HostCallback) -> bool {
        self.callbacks
            .insert((namespace.to_string(), property.to_string()), callback)
            .is_some()
    }

    pub fn get(&self, namespace: &str, property: &str) -> Option<HostCallback> {
        self.callbacks
            .get(&(namespace.to_string(), property.to_string()))
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }
}

/// Invoke the host callback bound to `namespace.property`.
///
/// The first argument, when present, is converted to a string before the
/// callback runs; a Symbol fails with `CoercionError` and the callback is not
/// invoked. Further arguments are ignored. No engine borrow is held while the
/// callback runs, so it may evaluate more script in the same realm.
pub fn call_host_function(
    ctx: &mut EvalContext,
    namespace: &str,
    property: &str,
    args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    let callback = ctx
        .realm
        .host_functions
        .borrow()
        .get(namespace, property)
        .ok_or_else(|| {
            JErrorType::TypeError(format!("{}.{} is not a function", namespace, property))
        })?;
    let argument = match args.first() {
        Some(value) => Some(to_string(value)?),
        None => None,
    };
    log::trace!(
        "bridge call {}.{} with {} argument",
        namespace,
        property,
        if argument.is_some() { "one" } else { "no" }
    );
    Ok(match callback(argument) {
        Some(s) => JsValue::String(s),
        None => JsValue::Undefined,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::ds::symbol::SymbolData;
    use std::cell::Cell;

    #[test]
    fn register_reports_replacement() {
        let mut table = HostFunctionTable::new();
        assert!(!table.register("Native", "f", Rc::new(|_: Option<String>| -> Option<String> { None })));
        assert!(table.register("Native", "f", Rc::new(|_: Option<String>| -> Option<String> { None })));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn symbol_argument_is_rejected_before_callback() {
        let mut ctx = EvalContext::new();
        let calls = Rc::new(Cell::new(0));
        let seen = calls.clone();
        ctx.realm.host_functions.borrow_mut().register(
            "Native",
            "f",
            Rc::new(move |_: Option<String>| -> Option<String> {
                seen.set(seen.get() + 1);
                None
            }),
        );
        let result = call_host_function(
            &mut ctx,
            "Native",
            "f",
            vec![JsValue::Symbol(SymbolData::new(None))],
        );
        assert!(matches!(result, Err(JErrorType::CoercionError(_))));
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn extra_arguments_are_ignored() {
        let mut ctx = EvalContext::new();
        ctx.realm
            .host_functions
            .borrow_mut()
            .register("Native", "echo", Rc::new(|s: Option<String>| s));
        let result = call_host_function(
            &mut ctx,
            "Native",
            "echo",
            vec![JsValue::String("a".to_string()), JsValue::Null],
        )
        .unwrap();
        assert_eq!(result, JsValue::String("a".to_string()));
    }
}
