//! Macros for ergonomic state data declarations.

/// Generate the `State` trait implementation for an enum.
///
/// Each variant is mapped to its discriminant string. Unit, tuple and
/// struct variants are all accepted.
///
/// # Example
///
/// ```
/// use machinist::core::State;
/// use machinist::impl_state;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
/// #[serde(tag = "status", rename_all = "snake_case")]
/// enum Order {
///     Placed { items: u32 },
///     Shipped { items: u32, carrier: String },
///     Cancelled,
/// }
///
/// impl_state!(Order {
///     Placed => "placed",
///     Shipped => "shipped",
///     Cancelled => "cancelled",
/// });
///
/// assert_eq!(Order::Cancelled.discriminant(), "cancelled");
/// ```
#[macro_export]
macro_rules! impl_state {
    (
        $name:ident {
            $($variant:ident => $tag:expr),* $(,)?
        }
    ) => {
        impl $crate::core::State for $name {
            fn discriminant(&self) -> &str {
                match self {
                    $(Self::$variant { .. } => $tag),*
                }
            }
        }
    };
}
