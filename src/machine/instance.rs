//! Instances: one description bound to one immutable data snapshot.

use crate::core::State;
use crate::machine::description::{Args, Description, Next, TransitionEntry, TransitionMode};
use crate::machine::error::MachineError;
use crate::machine::factory::Machine;
use crate::machine::step::{PendingTransition, Step};
use futures::FutureExt;
use serde_json::{Map, Value};
use std::any::{type_name, Any};
use std::fmt;
use std::sync::Arc;

/// What a name resolves to on an instance.
///
/// Operations shadow data fields: a name is looked up as a transition, then
/// as a method, and only then as a field of the data.
#[derive(Clone, Debug, PartialEq)]
pub enum Member {
    Transition(TransitionMode),
    Method,
    Field(Value),
}

/// A live, immutable handle over one data snapshot.
///
/// Every operation of the description is available regardless of the
/// current discriminant. Invoking an operation that makes no sense for the
/// current variant runs it anyway; check [`Instance::discriminant`] first
/// when that matters.
///
/// # Example
///
/// ```rust
/// use machinist::{create_machine, get_state, impl_state, Description};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
/// #[serde(tag = "status", rename_all = "snake_case")]
/// enum Lamp {
///     Off,
///     On { brightness: u8 },
/// }
///
/// impl_state!(Lamp {
///     Off => "off",
///     On => "on",
/// });
///
/// let machine = create_machine(
///     Description::builder()
///         .transition("turn_on", |_: &Lamp, brightness: u8| Lamp::On { brightness })
///         .build()
///         .unwrap(),
/// );
///
/// let off = machine.new_instance(Lamp::Off);
/// let on = off.apply("turn_on", 80u8).unwrap();
///
/// assert_eq!(get_state(&off), &Lamp::Off);
/// assert_eq!(get_state(&on), &Lamp::On { brightness: 80 });
/// ```
pub struct Instance<D: State> {
    description: Arc<Description<D>>,
    data: Arc<D>,
}

impl<D: State> Instance<D> {
    pub(crate) fn from_parts(description: Arc<Description<D>>, data: Arc<D>) -> Self {
        tracing::trace!(state = data.discriminant(), "instance constructed");
        Self { description, data }
    }

    /// The data this instance was constructed with.
    pub fn state(&self) -> &D {
        &self.data
    }

    /// Shared handle to the data, for identity comparisons.
    pub fn snapshot(&self) -> Arc<D> {
        Arc::clone(&self.data)
    }

    pub fn discriminant(&self) -> &str {
        self.data.discriminant()
    }

    pub fn description(&self) -> &Description<D> {
        &self.description
    }

    /// The machine this instance belongs to.
    pub fn machine(&self) -> Machine<D> {
        Machine::from_shared(Arc::clone(&self.description))
    }

    /// Top-level fields of the serialized data.
    ///
    /// Data that does not serialize to a record has no fields.
    pub fn fields(&self) -> Map<String, Value> {
        match serde_json::to_value(self.data.as_ref()) {
            Ok(Value::Object(fields)) => fields,
            Ok(_) => Map::new(),
            Err(error) => {
                tracing::warn!(
                    state = self.discriminant(),
                    %error,
                    "state data could not be spread into fields"
                );
                Map::new()
            }
        }
    }

    /// A single data field, ignoring operations of the same name.
    ///
    /// Each lookup serializes the whole record. Read [`Instance::fields`]
    /// once when several fields are needed.
    pub fn field(&self, name: &str) -> Option<Value> {
        self.fields().remove(name)
    }

    /// Resolve a name with operations taking precedence over data fields.
    ///
    /// The data is only serialized when no operation matches.
    pub fn resolve(&self, name: &str) -> Option<Member> {
        if let Some(mode) = self.description.transition_mode(name) {
            return Some(Member::Transition(mode));
        }
        if self.description.has_method(name) {
            return Some(Member::Method);
        }
        self.field(name).map(Member::Field)
    }

    /// Invoke a transition.
    ///
    /// Synchronous transitions complete before this returns, observer
    /// included. Asynchronous ones return a pending step; the observer runs
    /// when it resolves. Failures are returned without notifying the
    /// observer, and this instance is never affected.
    pub fn transition<A: Any + Send>(&self, name: &str, args: A) -> Result<Step<D>, MachineError> {
        let entry = self.transition_entry(name)?;

        match (entry.func)(&self.data, Args::new(args)) {
            Ok(Next::Ready(next)) => Ok(Step::Ready(settle(
                &self.description,
                name,
                &self.data,
                next,
            ))),
            Ok(Next::Pending(pending)) => {
                let description = Arc::clone(&self.description);
                let prev = Arc::clone(&self.data);
                let operation = name.to_string();
                let resolution = async move {
                    match pending.await {
                        Ok(next) => Ok(settle(&description, &operation, &prev, next)),
                        Err(error) => {
                            tracing::debug!(operation = %operation, %error, "transition failed");
                            Err(error)
                        }
                    }
                };
                Ok(Step::Pending(PendingTransition::new(name, resolution.boxed())))
            }
            Err(error) => {
                tracing::debug!(operation = name, %error, "transition failed");
                Err(error)
            }
        }
    }

    /// Invoke a synchronous transition and return the new instance.
    ///
    /// Asynchronous transitions are refused with [`MachineError::Deferred`]
    /// before they start.
    pub fn apply<A: Any + Send>(&self, name: &str, args: A) -> Result<Instance<D>, MachineError> {
        if self.transition_entry(name)?.mode == TransitionMode::Async {
            return Err(MachineError::Deferred {
                operation: name.to_string(),
            });
        }
        self.transition(name, args)?.into_ready()
    }

    /// Invoke any transition and await the new instance.
    pub async fn apply_async<A: Any + Send>(
        &self,
        name: &str,
        args: A,
    ) -> Result<Instance<D>, MachineError> {
        self.transition(name, args)?.await
    }

    /// Invoke a method and return its result as-is.
    ///
    /// Methods never produce a new instance and never notify the observer.
    pub fn call<A: Any + Send, R: Any>(&self, name: &str, args: A) -> Result<R, MachineError> {
        let entry = self.description.method_entry(name).ok_or_else(|| {
            if self.description.has_transition(name) {
                MachineError::NotAMethod {
                    name: name.to_string(),
                }
            } else {
                MachineError::UnknownOperation {
                    name: name.to_string(),
                }
            }
        })?;

        tracing::trace!(method = name, state = self.discriminant(), "method called");
        let value = (entry.func)(self.state(), Args::new(args))?;

        value
            .downcast::<R>()
            .map(|value| *value)
            .map_err(|_| MachineError::ReturnMismatch {
                operation: name.to_string(),
                actual: entry.returns,
                requested: type_name::<R>(),
            })
    }

    fn transition_entry(&self, name: &str) -> Result<&TransitionEntry<D>, MachineError> {
        self.description.transition_entry(name).ok_or_else(|| {
            if self.description.has_method(name) {
                MachineError::NotATransition {
                    name: name.to_string(),
                }
            } else {
                MachineError::UnknownOperation {
                    name: name.to_string(),
                }
            }
        })
    }
}

/// Finish a transition: notify the observer, then wrap the new data.
fn settle<D: State>(
    description: &Arc<Description<D>>,
    operation: &str,
    prev: &Arc<D>,
    next: D,
) -> Instance<D> {
    let next = Arc::new(next);
    tracing::debug!(
        operation,
        from = prev.discriminant(),
        to = next.discriminant(),
        "transition completed"
    );

    if let Some(observer) = description.observer() {
        observer(prev.as_ref(), next.as_ref());
    }

    Instance::from_parts(Arc::clone(description), next)
}

/// Extract the data of an instance.
///
/// Returns the exact value the instance was constructed with, so repeated
/// calls yield the same reference.
pub fn get_state<D: State>(instance: &Instance<D>) -> &D {
    instance.state()
}

impl<D: State> Clone for Instance<D> {
    fn clone(&self) -> Self {
        Self {
            description: Arc::clone(&self.description),
            data: Arc::clone(&self.data),
        }
    }
}

impl<D: State> fmt::Debug for Instance<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instance")
            .field("state", &self.data)
            .field("description", &self.description)
            .finish()
    }
}
