//! Errors raised while invoking operations on an instance.

use thiserror::Error;

/// Boxed user error carried by [`MachineError::Failed`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur when invoking an operation on an instance.
#[derive(Debug, Error)]
pub enum MachineError {
    #[error("Operation '{name}' is not declared by this machine")]
    UnknownOperation { name: String },

    #[error("'{name}' is a method, not a transition")]
    NotATransition { name: String },

    #[error("'{name}' is a transition, not a method")]
    NotAMethod { name: String },

    #[error("Operation '{operation}' takes {expected}, got {supplied}")]
    ArgumentMismatch {
        operation: String,
        expected: &'static str,
        supplied: &'static str,
    },

    #[error("Method '{operation}' returns {actual}, not {requested}")]
    ReturnMismatch {
        operation: String,
        actual: &'static str,
        requested: &'static str,
    },

    #[error("Transition '{operation}' is asynchronous and must be awaited")]
    Deferred { operation: String },

    #[error("Operation '{operation}' failed: {source}")]
    Failed {
        operation: String,
        #[source]
        source: BoxError,
    },
}

impl MachineError {
    /// Name of the operation the error was raised for.
    pub fn operation(&self) -> &str {
        match self {
            Self::UnknownOperation { name }
            | Self::NotATransition { name }
            | Self::NotAMethod { name } => name,
            Self::ArgumentMismatch { operation, .. }
            | Self::ReturnMismatch { operation, .. }
            | Self::Deferred { operation }
            | Self::Failed { operation, .. } => operation,
        }
    }

    /// The user error behind a [`MachineError::Failed`], if any.
    pub fn user_error(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        match self {
            Self::Failed { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}
