//! Shared setup for the integration tests.
//!
//! `Globals` is process-wide, and tests in one file run on parallel threads,
//! so every test that initializes it holds `lock()` for its whole body.

#![allow(dead_code)]

use std::sync::{Mutex, MutexGuard};

use jsbridge::embed::{Context, EngineConfig, Globals, VmInstance};

static GLOBALS_LOCK: Mutex<()> = Mutex::new(());

pub fn lock() -> MutexGuard<'static, ()> {
    let _ = env_logger::builder().is_test(true).try_init();
    GLOBALS_LOCK
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Globals, one VM and one context. Fields drop in order, the lock last.
pub struct Fixture {
    pub globals: Globals,
    pub vm: VmInstance,
    pub ctx: Context,
    _lock: MutexGuard<'static, ()>,
}

pub fn setup() -> Fixture {
    setup_with(EngineConfig::default())
}

pub fn setup_with(config: EngineConfig) -> Fixture {
    let lock = lock();
    let globals = Globals::initialize_with(config).unwrap();
    let vm = VmInstance::create(&globals, None, None).unwrap();
    let ctx = Context::create(&vm).unwrap();
    Fixture {
        globals,
        vm,
        ctx,
        _lock: lock,
    }
}
