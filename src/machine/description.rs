//! Machine descriptions: the declarative half of a machine.
//!
//! A description maps operation names to type-erased functions. Typed
//! closures are erased by [`DescriptionBuilder`] at registration time; the
//! argument and return types are checked again when an instance invokes them.

use crate::builder::DescriptionBuilder;
use crate::core::State;
use crate::machine::error::MachineError;
use futures::future::BoxFuture;
use std::any::{type_name, Any};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Observer invoked with `(prev, next)` after every completed transition.
pub type Observer<D> = Arc<dyn Fn(&D, &D) + Send + Sync>;

/// Whether a transition produces its data immediately or through a future.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransitionMode {
    Sync,
    Async,
}

/// Argument value passed to an erased operation.
pub(crate) struct Args {
    value: Box<dyn Any + Send>,
    type_name: &'static str,
}

impl Args {
    pub(crate) fn new<A: Any + Send>(value: A) -> Self {
        Self {
            value: Box::new(value),
            type_name: type_name::<A>(),
        }
    }

    /// Recover the typed argument an operation was registered with.
    pub(crate) fn take<A: Any>(self, operation: &str) -> Result<A, MachineError> {
        let supplied = self.type_name;
        self.value
            .downcast::<A>()
            .map(|value| *value)
            .map_err(|_| MachineError::ArgumentMismatch {
                operation: operation.to_string(),
                expected: type_name::<A>(),
                supplied,
            })
    }
}

/// Data produced by a transition, either now or later.
pub(crate) enum Next<D> {
    Ready(D),
    Pending(BoxFuture<'static, Result<D, MachineError>>),
}

pub(crate) type TransitionFn<D> =
    Arc<dyn Fn(&Arc<D>, Args) -> Result<Next<D>, MachineError> + Send + Sync>;

pub(crate) type MethodFn<D> =
    Arc<dyn Fn(&D, Args) -> Result<Box<dyn Any + Send>, MachineError> + Send + Sync>;

#[derive(Clone)]
pub(crate) struct TransitionEntry<D> {
    pub(crate) mode: TransitionMode,
    pub(crate) accepts: &'static str,
    pub(crate) func: TransitionFn<D>,
}

#[derive(Clone)]
pub(crate) struct MethodEntry<D> {
    pub(crate) accepts: &'static str,
    pub(crate) returns: &'static str,
    pub(crate) func: MethodFn<D>,
}

/// Immutable description of a machine's operations.
///
/// Descriptions are values: deriving one from another (`with_observer`,
/// `to_builder`) never changes the original. Cloning is cheap; operation
/// functions are shared.
#[derive(Clone)]
pub struct Description<D: State> {
    pub(crate) transitions: BTreeMap<String, TransitionEntry<D>>,
    pub(crate) methods: BTreeMap<String, MethodEntry<D>>,
    pub(crate) observer: Option<Observer<D>>,
}

impl<D: State> Description<D> {
    /// Start building a description.
    pub fn builder() -> DescriptionBuilder<D> {
        DescriptionBuilder::new()
    }

    /// Names of all transitions, in lexical order.
    pub fn transition_names(&self) -> impl Iterator<Item = &str> {
        self.transitions.keys().map(String::as_str)
    }

    /// Names of all methods, in lexical order.
    pub fn method_names(&self) -> impl Iterator<Item = &str> {
        self.methods.keys().map(String::as_str)
    }

    pub fn has_transition(&self, name: &str) -> bool {
        self.transitions.contains_key(name)
    }

    pub fn has_method(&self, name: &str) -> bool {
        self.methods.contains_key(name)
    }

    pub fn transition_mode(&self, name: &str) -> Option<TransitionMode> {
        self.transitions.get(name).map(|entry| entry.mode)
    }

    /// Argument type an operation was registered with.
    pub fn accepts(&self, name: &str) -> Option<&'static str> {
        self.transitions
            .get(name)
            .map(|entry| entry.accepts)
            .or_else(|| self.methods.get(name).map(|entry| entry.accepts))
    }

    /// Return type of a method.
    pub fn returns(&self, name: &str) -> Option<&'static str> {
        self.methods.get(name).map(|entry| entry.returns)
    }

    pub fn observer(&self) -> Option<&Observer<D>> {
        self.observer.as_ref()
    }

    pub fn has_observer(&self) -> bool {
        self.observer.is_some()
    }

    /// Copy of this description with `observer` replacing any existing one.
    pub fn with_observer<F>(&self, observer: F) -> Self
    where
        F: Fn(&D, &D) + Send + Sync + 'static,
    {
        Self {
            observer: Some(Arc::new(observer)),
            ..self.clone()
        }
    }

    /// Copy of this description without an observer.
    pub fn without_observer(&self) -> Self {
        Self {
            observer: None,
            ..self.clone()
        }
    }

    /// Builder seeded with every operation and the observer of this description.
    pub fn to_builder(&self) -> DescriptionBuilder<D> {
        DescriptionBuilder::from_description(self)
    }

    pub(crate) fn transition_entry(&self, name: &str) -> Option<&TransitionEntry<D>> {
        self.transitions.get(name)
    }

    pub(crate) fn method_entry(&self, name: &str) -> Option<&MethodEntry<D>> {
        self.methods.get(name)
    }
}

impl<D: State> fmt::Debug for Description<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Description")
            .field("transitions", &self.transitions.keys().collect::<Vec<_>>())
            .field("methods", &self.methods.keys().collect::<Vec<_>>())
            .field("observer", &self.observer.is_some())
            .finish()
    }
}
