//! Collection controls.

use crate::embed::globals::Globals;
use crate::runner::ds::heap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryStats {
    pub live_handles: usize,
    /// Destroyed handles whose resources the next cycle will reclaim.
    pub pending_release: usize,
    pub collections: usize,
    pub gc_frequency: usize,
}

pub struct Memory;

impl Memory {
    /// Steps between automatic collections, for every runtime in the process. `0` disables them.
    pub fn set_gc_frequency(frequency: usize) {
        heap::set_gc_frequency(frequency);
        log::debug!("gc frequency set to {}", frequency);
    }

    pub fn gc_frequency() -> usize {
        heap::gc_frequency()
    }

    /// Run a collection cycle now. Returns the number of reclaimed slots.
    pub fn gc(globals: &Globals) -> usize {
        let heap = globals.registry().borrow().heap.clone();
        heap.collect()
    }

    pub fn stats(globals: &Globals) -> MemoryStats {
        let registry = globals.registry().borrow();
        MemoryStats {
            live_handles: registry.live_count(),
            pending_release: registry.released_count(),
            collections: registry.heap.collections(),
            gc_frequency: heap::gc_frequency(),
        }
    }
}
