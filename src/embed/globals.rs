//! Process-wide engine initialization.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::embed::config::EngineConfig;
use crate::embed::error::{EmbedError, Result};
use crate::embed::registry::{Registry, RegistryRef};
use crate::runner::ds::heap::set_gc_frequency;

static INITIALIZED: AtomicBool = AtomicBool::new(false);

/// Proof that the engine is initialized. At most one exists per process.
///
/// Every VM, context and value is created from a `Globals`, and finalizing it
/// (explicitly or by dropping it) invalidates all of them.
pub struct Globals {
    registry: RegistryRef,
}

impl Globals {
    pub fn initialize() -> Result<Globals> {
        Globals::initialize_with(EngineConfig::default())
    }

    pub fn initialize_with(config: EngineConfig) -> Result<Globals> {
        if INITIALIZED
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(EmbedError::GlobalsAlreadyInitialized);
        }
        set_gc_frequency(config.gc_frequency);
        log::debug!(
            "globals initialized: gc_frequency={} max_call_depth={} strict_tags={}",
            config.gc_frequency,
            config.max_call_depth,
            config.strict_tags
        );
        Ok(Globals {
            registry: Registry::new(config),
        })
    }

    /// Release every outstanding handle and allow a later `initialize`.
    pub fn finalize(self) {}

    pub fn is_initialized() -> bool {
        INITIALIZED.load(Ordering::SeqCst)
    }

    pub fn version() -> &'static str {
        env!("CARGO_PKG_VERSION")
    }

    /// Build date in `Mmm dd yyyy` form.
    pub fn build_date() -> &'static str {
        env!("JSBRIDGE_BUILD_DATE")
    }

    pub fn config(&self) -> EngineConfig {
        self.registry.borrow().config.clone()
    }

    pub(crate) fn registry(&self) -> &RegistryRef {
        &self.registry
    }
}

impl Drop for Globals {
    fn drop(&mut self) {
        match self.registry.try_borrow_mut() {
            Ok(mut registry) => {
                let released = registry.release_all();
                let reclaimed = registry.sweep();
                log::debug!(
                    "globals finalized: released {} handles, reclaimed {} slots",
                    released,
                    reclaimed
                );
            }
            Err(_) => log::warn!("globals finalized while the handle registry was in use"),
        }
        INITIALIZED.store(false, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support;

    #[test]
    fn second_initialize_is_rejected_until_finalize() {
        let _lock = test_support::lock();
        let globals = Globals::initialize().unwrap();
        assert!(matches!(
            Globals::initialize(),
            Err(EmbedError::GlobalsAlreadyInitialized)
        ));
        globals.finalize();
        assert!(!Globals::is_initialized());
        Globals::initialize().unwrap().finalize();
    }

    #[test]
    fn build_date_has_month_day_year() {
        let parts: Vec<&str> = Globals::build_date().split_whitespace().collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0].len(), 3);
        assert_eq!(parts[2].len(), 4);
        assert!(!Globals::version().is_empty());
    }
}
