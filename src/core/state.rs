//! Core State trait for state machine data.
//!
//! Every value an instance wraps implements this trait. The discriminant
//! names the variant the data currently represents.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Debug;

/// Trait for state machine data.
///
/// State data is an immutable record: transitions never mutate it, they
/// build a new record. Data is usually a serde internally-tagged enum so its
/// serialized form is a flat record carrying the discriminant.
///
/// # Required Traits
///
/// - `Clone`: async transitions and observers may need owned copies
/// - `PartialEq`: data is compared by value in tests and observers
/// - `Debug`: data is debuggable for diagnostics
/// - `Serialize` + `Deserialize`: fields are exposed by name and histories
///   can be snapshotted
///
/// # Example
///
/// ```rust
/// use machinist::core::State;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
/// #[serde(tag = "status", rename_all = "snake_case")]
/// enum Door {
///     Open { angle: u8 },
///     Closed,
/// }
///
/// impl State for Door {
///     fn discriminant(&self) -> &str {
///         match self {
///             Self::Open { .. } => "open",
///             Self::Closed => "closed",
///         }
///     }
/// }
///
/// assert_eq!(Door::Open { angle: 90 }.discriminant(), "open");
/// ```
pub trait State:
    Clone + PartialEq + Debug + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Name of the variant this data represents, e.g. `"pending"`.
    fn discriminant(&self) -> &str;
}
