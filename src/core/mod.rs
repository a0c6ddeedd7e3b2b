//! Core state data types.
//!
//! This module contains the pure parts of the crate:
//! - State data via the `State` trait
//! - Immutable transition history
//!
//! Nothing here knows about operations or instances.

mod history;
mod state;

pub use history::{StateHistory, StateTransition};
pub use state::State;
