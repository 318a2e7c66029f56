use std::rc::Rc;

use crate::embed::error::Result;
use crate::embed::handle::{HandleId, NativeHandle, RawHandle};
use crate::embed::registry::{ContextData, Resource};
use crate::embed::value::ValueHandle;
use crate::embed::vm::VmInstance;
use crate::runner::ds::realm::Realm;
use crate::runner::ds::value::JsValue;

/// Global binding through which scripts see the persisted result.
pub const LAST_RESULT_BINDING: &str = "$_";

/// An execution scope bound to one VM for its whole life.
#[derive(Debug, Clone)]
pub struct Context {
    raw: RawHandle,
}

impl Context {
    pub fn create(vm: &VmInstance) -> Result<Context> {
        let registry = vm.raw_handle().registry().clone();
        let vm_id = vm.handle_id();
        let realm = {
            let r = registry.borrow();
            let data = r.vm(vm_id)?;
            Realm::new(data.symbols.clone(), r.heap.clone(), r.config.max_call_depth)
        };
        let id = {
            let mut r = registry.borrow_mut();
            let id = r.insert(Resource::Context(ContextData {
                vm: vm_id,
                realm,
                last_result: None,
            }));
            r.vm_mut(vm_id)?.contexts.push(id);
            id
        };
        log::debug!("context {} created on vm {}", id, vm_id);
        Ok(Context {
            raw: RawHandle::new(id, registry),
        })
    }

    /// The VM this context was created from.
    pub fn vm_handle_id(&self) -> Result<HandleId> {
        Ok(self.raw.registry().borrow().context(self.raw.id())?.vm)
    }

    /// The value most recently stored by an evaluation with `store_result_as_global`.
    pub fn last_result(&self) -> Result<Option<ValueHandle>> {
        let value = self
            .raw
            .registry()
            .borrow()
            .context(self.raw.id())?
            .last_result
            .clone();
        Ok(value.map(|v| ValueHandle::from_js_value(self.raw.registry(), v)))
    }

    /// The realm, cloned out so that no registry borrow outlives this call.
    pub(crate) fn realm(&self) -> Result<Rc<Realm>> {
        Ok(self.raw.registry().borrow().context(self.raw.id())?.realm.clone())
    }

    pub(crate) fn store_result(&self, value: JsValue) -> Result<()> {
        let realm = {
            let mut r = self.raw.registry().borrow_mut();
            let data = r.context_mut(self.raw.id())?;
            data.last_result = Some(value.clone());
            data.realm.clone()
        };
        let mut global = realm.global_env.borrow_mut();
        global.create_mutable_binding(LAST_RESULT_BINDING, true);
        global.initialize_binding(LAST_RESULT_BINDING, value)?;
        Ok(())
    }
}

impl NativeHandle for Context {
    fn raw_handle(&self) -> &RawHandle {
        &self.raw
    }
}
