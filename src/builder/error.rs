//! Build errors for machine descriptions.

use thiserror::Error;

/// Errors that can occur when building a description.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("Operation name is empty. Every transition and method needs a name")]
    EmptyOperationName,

    #[error("Operation '{name}' is declared more than once")]
    DuplicateOperation { name: String },
}
