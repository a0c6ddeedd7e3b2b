//! Builder API for machine descriptions.
//!
//! This module provides the fluent [`DescriptionBuilder`] and the
//! [`impl_state!`](crate::impl_state) macro for declaring state data with
//! minimal boilerplate.

pub mod description;
pub mod error;
pub mod macros;

pub use description::DescriptionBuilder;
pub use error::BuildError;
