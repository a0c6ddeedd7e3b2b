//! Binding instances to reactive state slots.
//!
//! A host framework owns a state cell that triggers a re-render when it is
//! replaced. [`bind`] derives a private machine whose observer pushes every
//! new instance into that cell, then forwards to the original observer.
//! Transition and method semantics are unchanged.

use crate::core::State;
use crate::machine::{Description, Instance, Machine};
use parking_lot::RwLock;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Weak};

/// A host-owned cell holding the current instance.
pub trait StateSlot<D: State>: Send + Sync + 'static {
    /// Replace the held instance, scheduling a re-render.
    fn set(&self, instance: Instance<D>);
}

/// In-process slot that counts how often it was replaced.
pub struct SharedSlot<D: State> {
    current: RwLock<Option<Instance<D>>>,
    renders: AtomicUsize,
}

impl<D: State> SharedSlot<D> {
    pub fn new() -> Self {
        Self {
            current: RwLock::new(None),
            renders: AtomicUsize::new(0),
        }
    }

    /// The instance currently held, if any.
    pub fn get(&self) -> Option<Instance<D>> {
        self.current.read().clone()
    }

    /// Number of times the slot has been set.
    pub fn renders(&self) -> usize {
        self.renders.load(Ordering::SeqCst)
    }
}

impl<D: State> StateSlot<D> for SharedSlot<D> {
    fn set(&self, instance: Instance<D>) {
        *self.current.write() = Some(instance);
        self.renders.fetch_add(1, Ordering::SeqCst);
    }
}

impl<D: State> Default for SharedSlot<D> {
    fn default() -> Self {
        Self::new()
    }
}

/// Bind a new instance of `machine` to `slot`.
///
/// The slot receives the initial instance immediately and then every
/// instance produced by a transition on the returned instance or its
/// descendants. The original observer, if any, runs after the slot update.
///
/// The host owns the slot. The derived machine only holds it weakly, since
/// the slot itself holds an instance of that machine. Once the host drops the
/// slot, transitions on surviving instances no longer render, and everything
/// `bind` allocated is released with the last instance.
pub fn bind<D, S>(machine: &Machine<D>, initial: D, slot: &Arc<S>) -> Instance<D>
where
    D: State,
    S: StateSlot<D>,
{
    let base = machine.description();
    let original = base.observer().cloned();
    let notify = Arc::downgrade(slot);

    let reactive = Arc::new_cyclic(|this: &Weak<Description<D>>| {
        let this = this.clone();
        base.with_observer(move |prev: &D, next: &D| {
            if let (Some(description), Some(slot)) = (this.upgrade(), notify.upgrade()) {
                slot.set(Machine::from_shared(description).new_instance(next.clone()));
            }
            if let Some(original) = &original {
                original(prev, next);
            }
        })
    });

    let instance = Machine::from_shared(reactive).new_instance(initial);
    tracing::trace!(state = instance.discriminant(), "instance bound to slot");
    slot.set(instance.clone());
    instance
}
