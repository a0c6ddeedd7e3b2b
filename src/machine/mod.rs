//! Machines, instances and transitions.
//!
//! This module is the runtime half of the crate:
//! - [`Description`]: named transitions, methods and an optional observer
//! - [`Machine`]: the factory turning data into instances
//! - [`Instance`]: one data snapshot with the description's operations bound to it
//!
//! # Transition flow
//!
//! Invoking a transition calls the registered function with the current
//! data. Synchronous transitions settle immediately; asynchronous ones
//! settle when the returned [`Step`] is awaited. Settling notifies the
//! observer exactly once with `(prev, next)` and wraps `next` in a fresh
//! instance. The instance the transition was invoked on never changes.

pub(crate) mod description;
mod error;
mod factory;
mod instance;
mod observer;
mod step;

pub use description::{Description, Observer, TransitionMode};
pub use error::{BoxError, MachineError};
pub use factory::{create_machine, Machine};
pub use instance::{get_state, Instance, Member};
pub use observer::TransitionRecorder;
pub use step::{PendingTransition, Step};
