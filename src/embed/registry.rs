//! The resource table behind every handle of one `Globals` instance.

use std::cell::RefCell;
use std::rc::Rc;

use crate::embed::config::EngineConfig;
use crate::embed::error::{EmbedError, Result};
use crate::embed::handle::{HandleArena, HandleId};
use crate::runner::ds::heap::Heap;
use crate::runner::ds::realm::Realm;
use crate::runner::ds::symbol::SymbolRegistry;
use crate::runner::ds::value::JsValue;

pub(crate) type RegistryRef = Rc<RefCell<Registry>>;

pub(crate) struct VmData {
    pub locale: String,
    pub timezone: String,
    pub symbols: Rc<RefCell<SymbolRegistry>>,
    pub contexts: Vec<HandleId>,
}

pub(crate) struct ContextData {
    pub vm: HandleId,
    pub realm: Rc<Realm>,
    pub last_result: Option<JsValue>,
}

pub(crate) enum Resource {
    Vm(VmData),
    Context(ContextData),
    Value(JsValue),
}

pub(crate) struct Registry {
    arena: HandleArena<Resource>,
    pub config: EngineConfig,
    pub heap: Rc<Heap>,
}

impl Registry {
    /// A fresh registry whose heap sweeps it on every collection cycle.
    pub fn new(config: EngineConfig) -> RegistryRef {
        let heap = Rc::new(Heap::new());
        let registry = Rc::new(RefCell::new(Registry {
            arena: HandleArena::new(),
            config,
            heap: heap.clone(),
        }));
        let weak = Rc::downgrade(&registry);
        heap.set_collector(Box::new(move || match weak.upgrade() {
            // A cycle that starts while the registry is borrowed is skipped.
            Some(registry) => match registry.try_borrow_mut() {
                Ok(mut r) => r.sweep(),
                Err(_) => 0,
            },
            None => 0,
        }));
        registry
    }

    pub fn insert(&mut self, resource: Resource) -> HandleId {
        self.arena.insert(resource)
    }

    pub fn is_live(&self, id: HandleId) -> bool {
        self.arena.is_live(id)
    }

    /// Release `id`; a VM takes its contexts with it, and a context leaves its
    /// VM's list. Returns false when already released.
    pub fn release(&mut self, id: HandleId) -> bool {
        let (dependents, owner) = match self.arena.get(id) {
            Some(Resource::Vm(vm)) => (vm.contexts.clone(), None),
            Some(Resource::Context(c)) => (vec![], Some(c.vm)),
            _ => (vec![], None),
        };
        if !self.arena.release(id) {
            return false;
        }
        for context in dependents {
            if self.arena.release(context) {
                log::debug!("context {} released with its vm {}", context, id);
            }
        }
        if let Some(owner) = owner {
            if let Ok(vm) = self.vm_mut(owner) {
                vm.contexts.retain(|c| *c != id);
            }
        }
        true
    }

    pub fn release_all(&mut self) -> usize {
        self.arena.release_all()
    }

    pub fn sweep(&mut self) -> usize {
        self.arena.sweep()
    }

    pub fn live_count(&self) -> usize {
        self.arena.live_count()
    }

    pub fn released_count(&self) -> usize {
        self.arena.released_count()
    }

    pub fn vm(&self, id: HandleId) -> Result<&VmData> {
        match self.arena.get(id) {
            Some(Resource::Vm(vm)) => Ok(vm),
            _ => Err(EmbedError::DestroyedHandleError),
        }
    }

    pub fn vm_mut(&mut self, id: HandleId) -> Result<&mut VmData> {
        match self.arena.get_mut(id) {
            Some(Resource::Vm(vm)) => Ok(vm),
            _ => Err(EmbedError::DestroyedHandleError),
        }
    }

    pub fn context(&self, id: HandleId) -> Result<&ContextData> {
        match self.arena.get(id) {
            Some(Resource::Context(c)) => Ok(c),
            _ => Err(EmbedError::DestroyedHandleError),
        }
    }

    pub fn context_mut(&mut self, id: HandleId) -> Result<&mut ContextData> {
        match self.arena.get_mut(id) {
            Some(Resource::Context(c)) => Ok(c),
            _ => Err(EmbedError::DestroyedHandleError),
        }
    }

    pub fn value(&self, id: HandleId) -> Result<&JsValue> {
        match self.arena.get(id) {
            Some(Resource::Value(v)) => Ok(v),
            _ => Err(EmbedError::DestroyedHandleError),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vm_data() -> VmData {
        VmData {
            locale: "en-US".to_string(),
            timezone: "UTC".to_string(),
            symbols: Rc::new(RefCell::new(SymbolRegistry::new())),
            contexts: vec![],
        }
    }

    #[test]
    fn releasing_a_vm_releases_its_contexts() {
        let registry = Registry::new(EngineConfig::default());
        let mut r = registry.borrow_mut();
        let vm = r.insert(Resource::Vm(vm_data()));
        let ctx = r.insert(Resource::Context(ContextData {
            vm,
            realm: Realm::new_standalone(),
            last_result: None,
        }));
        r.vm_mut(vm).unwrap().contexts.push(ctx);
        assert!(r.release(vm));
        assert!(!r.is_live(ctx));
        assert!(!r.release(vm));
        assert_eq!(r.released_count(), 2);
    }

    #[test]
    fn released_contexts_leave_their_vm() {
        let registry = Registry::new(EngineConfig::default());
        let mut r = registry.borrow_mut();
        let vm = r.insert(Resource::Vm(vm_data()));
        for _ in 0..16 {
            let ctx = r.insert(Resource::Context(ContextData {
                vm,
                realm: Realm::new_standalone(),
                last_result: None,
            }));
            r.vm_mut(vm).unwrap().contexts.push(ctx);
            assert_eq!(r.vm(vm).unwrap().contexts.len(), 1);
            assert!(r.release(ctx));
        }
        assert!(r.vm(vm).unwrap().contexts.is_empty());
        assert!(r.is_live(vm));
    }

    #[test]
    fn heap_collection_sweeps_released_slots() {
        let registry = Registry::new(EngineConfig::default());
        let heap = registry.borrow().heap.clone();
        let id = registry
            .borrow_mut()
            .insert(Resource::Value(JsValue::Null));
        registry.borrow_mut().release(id);
        assert_eq!(heap.collect(), 1);
        assert_eq!(registry.borrow().released_count(), 0);
    }

    #[test]
    fn collection_during_a_borrow_is_skipped() {
        let registry = Registry::new(EngineConfig::default());
        let heap = registry.borrow().heap.clone();
        let id = registry
            .borrow_mut()
            .insert(Resource::Value(JsValue::Null));
        registry.borrow_mut().release(id);
        let guard = registry.borrow();
        assert_eq!(heap.collect(), 0);
        drop(guard);
        assert_eq!(heap.collect(), 1);
    }
}
