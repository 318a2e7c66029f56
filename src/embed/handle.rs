//! Handles to engine-owned resources.
//!
//! Every VM, context and value the host holds is a [`HandleId`] into one
//! generational arena. Destroying a handle bumps the slot's generation, so
//! every copy of the id becomes stale at once and is detected on use. The
//! resource itself stays in the slot until the next collection cycle sweeps
//! it.

use std::fmt;

use crate::embed::error::{EmbedError, Result};
use crate::embed::registry::RegistryRef;

/// A capability into a [`HandleArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandleId {
    index: u32,
    generation: u32,
}

impl HandleId {
    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }
}

impl fmt::Display for HandleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}v{}", self.index, self.generation)
    }
}

enum SlotState<T> {
    Live(T),
    /// Destroyed by the host, reclaimed at the next sweep.
    Released(T),
    Free,
}

struct Slot<T> {
    generation: u32,
    state: SlotState<T>,
}

pub struct HandleArena<T> {
    slots: Vec<Slot<T>>,
    free: Vec<u32>,
}

impl<T> HandleArena<T> {
    pub fn new() -> Self {
        HandleArena {
            slots: vec![],
            free: vec![],
        }
    }

    pub fn insert(&mut self, value: T) -> HandleId {
        match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index as usize];
                slot.state = SlotState::Live(value);
                HandleId {
                    index,
                    generation: slot.generation,
                }
            }
            None => {
                let index = self.slots.len() as u32;
                self.slots.push(Slot {
                    generation: 0,
                    state: SlotState::Live(value),
                });
                HandleId {
                    index,
                    generation: 0,
                }
            }
        }
    }

    fn slot(&self, id: HandleId) -> Option<&Slot<T>> {
        self.slots
            .get(id.index as usize)
            .filter(|s| s.generation == id.generation)
    }

    pub fn get(&self, id: HandleId) -> Option<&T> {
        match self.slot(id).map(|s| &s.state) {
            Some(SlotState::Live(v)) => Some(v),
            _ => None,
        }
    }

    pub fn get_mut(&mut self, id: HandleId) -> Option<&mut T> {
        match self.slots.get_mut(id.index as usize) {
            Some(Slot {
                generation,
                state: SlotState::Live(v),
            }) if *generation == id.generation => Some(v),
            _ => None,
        }
    }

    pub fn is_live(&self, id: HandleId) -> bool {
        self.get(id).is_some()
    }

    /// Invalidate `id`. Returns false when it was already stale.
    pub fn release(&mut self, id: HandleId) -> bool {
        let slot = match self.slots.get_mut(id.index as usize) {
            Some(slot) if slot.generation == id.generation => slot,
            _ => return false,
        };
        let mut released = false;
        slot.state = match std::mem::replace(&mut slot.state, SlotState::Free) {
            SlotState::Live(v) => {
                slot.generation = slot.generation.wrapping_add(1);
                released = true;
                SlotState::Released(v)
            }
            other => other,
        };
        released
    }

    /// Invalidate every live slot.
    pub fn release_all(&mut self) -> usize {
        let mut count = 0;
        for slot in &mut self.slots {
            slot.state = match std::mem::replace(&mut slot.state, SlotState::Free) {
                SlotState::Live(v) => {
                    slot.generation = slot.generation.wrapping_add(1);
                    count += 1;
                    SlotState::Released(v)
                }
                other => other,
            };
        }
        count
    }

    /// Drop released resources and make their slots reusable.
    pub fn sweep(&mut self) -> usize {
        let mut reclaimed = 0;
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if let SlotState::Released(_) = slot.state {
                slot.state = SlotState::Free;
                self.free.push(index as u32);
                reclaimed += 1;
            }
        }
        reclaimed
    }

    pub fn live_count(&self) -> usize {
        self.slots
            .iter()
            .filter(|s| matches!(s.state, SlotState::Live(_)))
            .count()
    }

    pub fn released_count(&self) -> usize {
        self.slots
            .iter()
            .filter(|s| matches!(s.state, SlotState::Released(_)))
            .count()
    }
}

impl<T> Default for HandleArena<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleState {
    Valid,
    Destroyed,
}

/// Shared plumbing behind every public handle type.
#[derive(Clone)]
pub struct RawHandle {
    id: HandleId,
    registry: RegistryRef,
}

impl RawHandle {
    pub(crate) fn new(id: HandleId, registry: RegistryRef) -> Self {
        RawHandle { id, registry }
    }

    pub fn id(&self) -> HandleId {
        self.id
    }

    pub(crate) fn registry(&self) -> &RegistryRef {
        &self.registry
    }

    pub fn state(&self) -> HandleState {
        if self.registry.borrow().is_live(self.id) {
            HandleState::Valid
        } else {
            HandleState::Destroyed
        }
    }

    pub(crate) fn ensure_valid(&self) -> Result<()> {
        match self.state() {
            HandleState::Valid => Ok(()),
            HandleState::Destroyed => Err(EmbedError::DestroyedHandleError),
        }
    }

    /// Idempotent. Dependent resources are released with it.
    pub fn release(&self) {
        if self.registry.borrow_mut().release(self.id) {
            log::debug!("released handle {}", self.id);
        }
    }
}

impl fmt::Debug for RawHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RawHandle({}, {:?})", self.id, self.state())
    }
}

/// Operations every handle type supports, including after it is destroyed.
pub trait NativeHandle {
    fn raw_handle(&self) -> &RawHandle;

    fn has_valid_native_pointer(&self) -> bool {
        self.raw_handle().state() == HandleState::Valid
    }

    fn destroy(&self) {
        self.raw_handle().release()
    }
}
