//! Transition history.
//!
//! An immutable log of completed transitions. Recording returns a new
//! history and leaves the original untouched, mirroring how instances
//! themselves evolve.

use super::state::State;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Record of a single completed transition.
///
/// # Example
///
/// ```rust
/// use machinist::core::{State, StateTransition};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
/// enum Light { Red, Green }
///
/// impl State for Light {
///     fn discriminant(&self) -> &str {
///         match self {
///             Self::Red => "red",
///             Self::Green => "green",
///         }
///     }
/// }
///
/// let transition = StateTransition::new(Light::Red, Light::Green);
/// assert_eq!(transition.to, Light::Green);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateTransition<S: State> {
    /// Data before the transition
    pub from: S,
    /// Data after the transition
    pub to: S,
    /// When the transition completed
    pub timestamp: DateTime<Utc>,
}

impl<S: State> StateTransition<S> {
    /// Record a transition that completed just now.
    pub fn new(from: S, to: S) -> Self {
        Self {
            from,
            to,
            timestamp: Utc::now(),
        }
    }

    /// Whether the transition moved to a different variant.
    pub fn changed_variant(&self) -> bool {
        self.from.discriminant() != self.to.discriminant()
    }
}

/// Ordered history of completed transitions.
///
/// `record` is pure: it returns a new history with the transition appended.
///
/// # Example
///
/// ```rust
/// use machinist::core::{State, StateHistory, StateTransition};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
/// enum Phase { One, Two, Three }
///
/// impl State for Phase {
///     fn discriminant(&self) -> &str {
///         match self {
///             Self::One => "one",
///             Self::Two => "two",
///             Self::Three => "three",
///         }
///     }
/// }
///
/// let history = StateHistory::new()
///     .record(StateTransition::new(Phase::One, Phase::Two))
///     .record(StateTransition::new(Phase::Two, Phase::Three));
///
/// let path = history.get_path();
/// assert_eq!(path, vec![&Phase::One, &Phase::Two, &Phase::Three]);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateHistory<S: State> {
    transitions: Vec<StateTransition<S>>,
}

impl<S: State> Default for StateHistory<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State> StateHistory<S> {
    /// Create a new empty history.
    pub fn new() -> Self {
        Self {
            transitions: Vec::new(),
        }
    }

    /// Record a transition, returning a new history.
    pub fn record(&self, transition: StateTransition<S>) -> Self {
        let mut transitions = self.transitions.clone();
        transitions.push(transition);
        Self { transitions }
    }

    /// Get the path of data traversed.
    ///
    /// Returns the `from` data of the first transition, then the `to` data
    /// of each transition in order.
    pub fn get_path(&self) -> Vec<&S> {
        let mut path = Vec::new();
        if let Some(first) = self.transitions.first() {
            path.push(&first.from);
        }
        for transition in &self.transitions {
            path.push(&transition.to);
        }
        path
    }

    /// Discriminants along the path, e.g. `["pending", "validated"]`.
    pub fn get_tags(&self) -> Vec<&str> {
        self.get_path()
            .into_iter()
            .map(|state| state.discriminant())
            .collect()
    }

    /// Time between the first and last recorded transition.
    ///
    /// Returns `None` if nothing has been recorded.
    pub fn duration(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.transitions.first(), self.transitions.last()) {
            let duration = last.timestamp.signed_duration_since(first.timestamp);
            duration.to_std().ok()
        } else {
            None
        }
    }

    /// All recorded transitions in order.
    pub fn transitions(&self) -> &[StateTransition<S>] {
        &self.transitions
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }
}
