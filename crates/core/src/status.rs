//! Text-backed status enums and their transition rules.
//!
//! Statuses are stored as `TEXT` columns guarded by `CHECK` constraints. The
//! enum variants' strings must match those constraints in the migrations.

use std::fmt;

use crate::error::CoreError;

/// Define a status enum whose variants map one-to-one onto fixed strings.
///
/// Generates `as_str`, `ALL`, `Display`, `FromStr` (rejecting unknown values
/// with [`CoreError::Validation`]) and serde impls using the same strings.
macro_rules! define_text_status {
    (
        $(#[$meta:meta])*
        $name:ident ($entity:literal) {
            $( $(#[$vmeta:meta])* $variant:ident => $text:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $text)] $variant ),+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// The string stored in the database and sent over the wire.
            pub fn as_str(self) -> &'static str {
                match self {
                    $( $name::$variant => $text ),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::error::CoreError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $text => Ok($name::$variant), )+
                    other => Err($crate::error::CoreError::Validation(format!(
                        "Invalid {} status '{}'. Must be one of: {}",
                        $entity,
                        other,
                        [$($text),+].join(", ")
                    ))),
                }
            }
        }
    };
}

/// A status with a fixed set of allowed forward moves.
pub trait Lifecycle: Copy + PartialEq + fmt::Display + 'static {
    /// Entity name used in error messages (e.g. `"booking"`).
    const ENTITY: &'static str;

    /// Statuses reachable from `self` in one step.
    fn allowed_transitions(self) -> &'static [Self];

    fn can_transition_to(self, to: Self) -> bool {
        self.allowed_transitions().contains(&to)
    }

    /// A status with no outgoing transitions.
    fn is_terminal(self) -> bool {
        self.allowed_transitions().is_empty()
    }

    /// Check a move from `self` to `to`.
    ///
    /// Moving to the current status counts as a conflict so callers never
    /// re-run side effects for a no-op update.
    fn validate_transition(self, to: Self) -> Result<(), CoreError> {
        if self == to {
            return Err(CoreError::Conflict(format!(
                "The {} is already '{to}'",
                Self::ENTITY
            )));
        }
        if !self.can_transition_to(to) {
            return Err(CoreError::Conflict(format!(
                "Cannot change {} status from '{self}' to '{to}'",
                Self::ENTITY
            )));
        }
        Ok(())
    }
}
