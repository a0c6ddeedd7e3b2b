//! Machinist: immutable tagged-union state machines
//!
//! A machine is described once, as named transitions and read-only methods
//! over a tagged data type. Every instance wraps one immutable data snapshot;
//! invoking a transition returns a new instance and leaves the old one
//! untouched, so earlier instances double as snapshots.
//!
//! # Core Concepts
//!
//! - **State**: tagged data implementing the [`State`] trait
//! - **Description**: transitions (sync or async), methods and an optional observer
//! - **Machine**: the factory producing instances from data
//! - **Instance**: data plus the description's operations bound to it
//!
//! Every instance exposes every operation of its description, whatever its
//! current discriminant. Nothing at runtime stops a transition from being
//! applied to a variant it was not written for.
//!
//! # Example
//!
//! ```rust
//! use machinist::{create_machine, get_state, impl_state, Description};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
//! #[serde(tag = "status", rename_all = "snake_case")]
//! enum User {
//!     Pending { name: String },
//!     Validated { name: String, email: String },
//! }
//!
//! impl_state!(User {
//!     Pending => "pending",
//!     Validated => "validated",
//! });
//!
//! let machine = create_machine(
//!     Description::builder()
//!         .transition("validate", |prev: &User, email: String| match prev {
//!             User::Pending { name } | User::Validated { name, .. } => User::Validated {
//!                 name: name.clone(),
//!                 email,
//!             },
//!         })
//!         .build()
//!         .unwrap(),
//! );
//!
//! let pending = machine.new_instance(User::Pending { name: "John".to_string() });
//! let validated = pending.apply("validate", "john@domain.org".to_string()).unwrap();
//!
//! assert_eq!(pending.discriminant(), "pending");
//! assert_eq!(
//!     get_state(&validated),
//!     &User::Validated {
//!         name: "John".to_string(),
//!         email: "john@domain.org".to_string(),
//!     }
//! );
//! ```

pub mod builder;
pub mod core;
pub mod machine;
pub mod reactive;

// Re-export commonly used types
pub use builder::{BuildError, DescriptionBuilder};
pub use crate::core::{State, StateHistory, StateTransition};
pub use machine::{
    create_machine, get_state, Description, Instance, Machine, MachineError, Member,
    PendingTransition, Step, TransitionMode, TransitionRecorder,
};
