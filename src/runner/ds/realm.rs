use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::runner::ds::env_record::{EnvironmentRecord, EnvironmentRecordType};
use crate::runner::ds::error::JErrorType;
use crate::runner::ds::heap::Heap;
use crate::runner::ds::symbol::SymbolRegistry;
use crate::runner::plugin::core_resolver::CorePluginResolver;
use crate::runner::plugin::host::HostFunctionTable;
use crate::runner::plugin::registry::BuiltInRegistry;
use crate::runner::plugin::super_global::SuperGlobalEnvironment;

pub const DEFAULT_MAX_CALL_DEPTH: usize = 64;

/// Everything one execution scope owns: its global environment, the lazily
/// resolved built-ins, and the host functions bridged into it.
pub struct Realm {
    pub global_env: EnvironmentRecordType,
    pub super_global: RefCell<SuperGlobalEnvironment>,
    /// Shared with every realm of the same runtime.
    pub symbols: Rc<RefCell<SymbolRegistry>>,
    pub host_functions: RefCell<HostFunctionTable>,
    pub heap: Rc<Heap>,
    call_depth: Cell<usize>,
    max_call_depth: usize,
}

impl Realm {
    pub fn new(
        symbols: Rc<RefCell<SymbolRegistry>>,
        heap: Rc<Heap>,
        max_call_depth: usize,
    ) -> Rc<Realm> {
        let mut super_global = SuperGlobalEnvironment::new();
        super_global.add_resolver(Rc::new(CorePluginResolver::new(
            BuiltInRegistry::with_core(),
        )));
        Rc::new(Realm {
            global_env: EnvironmentRecord::new(None),
            super_global: RefCell::new(super_global),
            symbols,
            host_functions: RefCell::new(HostFunctionTable::new()),
            heap,
            call_depth: Cell::new(0),
            max_call_depth,
        })
    }

    /// A realm with its own symbol registry and heap, for running the engine without a host.
    pub fn new_standalone() -> Rc<Realm> {
        Realm::new(
            Rc::new(RefCell::new(SymbolRegistry::new())),
            Rc::new(Heap::new()),
            DEFAULT_MAX_CALL_DEPTH,
        )
    }

    /// Account for one more active call. The depth drops again when the guard is dropped.
    pub fn enter_call(self: &Rc<Self>) -> Result<CallDepthGuard, JErrorType> {
        let depth = self.call_depth.get();
        if depth >= self.max_call_depth {
            return Err(JErrorType::RangeError(
                "Maximum call stack size exceeded".to_string(),
            ));
        }
        self.call_depth.set(depth + 1);
        Ok(CallDepthGuard {
            realm: self.clone(),
        })
    }

    pub fn call_depth(&self) -> usize {
        self.call_depth.get()
    }

    pub fn max_call_depth(&self) -> usize {
        self.max_call_depth
    }
}

pub struct CallDepthGuard {
    realm: Rc<Realm>,
}

impl Drop for CallDepthGuard {
    fn drop(&mut self) {
        let depth = self.realm.call_depth.get();
        self.realm.call_depth.set(depth.saturating_sub(1));
    }
}
