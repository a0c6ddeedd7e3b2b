//! Observers that record completed transitions.

use crate::core::{State, StateHistory, StateTransition};
use parking_lot::Mutex;
use std::sync::Arc;

/// Shared handle that records every transition it observes.
///
/// Install [`TransitionRecorder::observer`] as a description's
/// `on_transition`; clones of the recorder see the same history.
///
/// # Example
///
/// ```rust
/// use machinist::{create_machine, impl_state, Description, TransitionRecorder};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
/// enum Light { Red, Green }
///
/// impl_state!(Light { Red => "red", Green => "green" });
///
/// let recorder = TransitionRecorder::new();
/// let machine = create_machine(
///     Description::builder()
///         .transition("go", |_: &Light, _: ()| Light::Green)
///         .on_transition(recorder.observer())
///         .build()
///         .unwrap(),
/// );
///
/// machine.new_instance(Light::Red).apply("go", ()).unwrap();
///
/// assert_eq!(recorder.history().get_tags(), vec!["red", "green"]);
/// ```
pub struct TransitionRecorder<S: State> {
    history: Arc<Mutex<StateHistory<S>>>,
}

impl<S: State> TransitionRecorder<S> {
    pub fn new() -> Self {
        Self {
            history: Arc::new(Mutex::new(StateHistory::new())),
        }
    }

    /// Observer appending `(prev, next)` to the shared history.
    pub fn observer(&self) -> impl Fn(&S, &S) + Send + Sync + 'static {
        let history = Arc::clone(&self.history);
        move |prev: &S, next: &S| {
            let mut history = history.lock();
            *history = history.record(StateTransition::new(prev.clone(), next.clone()));
        }
    }

    /// Snapshot of everything recorded so far.
    pub fn history(&self) -> StateHistory<S> {
        self.history.lock().clone()
    }

    /// Number of transitions recorded so far.
    pub fn count(&self) -> usize {
        self.history.lock().len()
    }
}

impl<S: State> Default for TransitionRecorder<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State> Clone for TransitionRecorder<S> {
    fn clone(&self) -> Self {
        Self {
            history: Arc::clone(&self.history),
        }
    }
}
