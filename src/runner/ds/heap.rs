//! Step accounting that drives the synchronous collection cycle.
//!
//! The interpreter reports one step per executed statement and per call. Once
//! the process-wide GC frequency is reached, the registered collector runs on
//! the current thread before execution continues.

use std::cell::{Cell, RefCell};
use std::sync::atomic::{AtomicUsize, Ordering};

pub const DEFAULT_GC_FREQUENCY: usize = 4096;

static GC_FREQUENCY: AtomicUsize = AtomicUsize::new(DEFAULT_GC_FREQUENCY);

/// Sets how many steps run between automatic collections. `0` disables them.
pub fn set_gc_frequency(frequency: usize) {
    GC_FREQUENCY.store(frequency, Ordering::SeqCst);
}

pub fn gc_frequency() -> usize {
    GC_FREQUENCY.load(Ordering::SeqCst)
}

pub type Collector = Box<dyn Fn() -> usize>;

pub struct Heap {
    steps: Cell<usize>,
    collections: Cell<usize>,
    collector: RefCell<Option<Collector>>,
}

impl Heap {
    pub fn new() -> Self {
        Heap {
            steps: Cell::new(0),
            collections: Cell::new(0),
            collector: RefCell::new(None),
        }
    }

    pub fn set_collector(&self, collector: Collector) {
        *self.collector.borrow_mut() = Some(collector);
    }

    /// Count one unit of work. Returns true when it triggered a collection.
    pub fn record_step(&self) -> bool {
        let frequency = gc_frequency();
        let steps = self.steps.get() + 1;
        if frequency != 0 && steps >= frequency {
            self.steps.set(0);
            self.collect();
            true
        } else {
            self.steps.set(steps);
            false
        }
    }

    /// Run a collection cycle now and return the number of reclaimed slots.
    pub fn collect(&self) -> usize {
        self.collections.set(self.collections.get() + 1);
        let reclaimed = self.collector.borrow().as_ref().map(|c| c()).unwrap_or(0);
        log::trace!(
            "collection #{} reclaimed {} slots",
            self.collections.get(),
            reclaimed
        );
        reclaimed
    }

    pub fn collections(&self) -> usize {
        self.collections.get()
    }

    pub fn pending_steps(&self) -> usize {
        self.steps.get()
    }
}

impl Default for Heap {
    fn default() -> Self {
        Self::new()
    }
}
