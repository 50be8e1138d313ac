//! Orbital kinematics error types.

use crate::system::BodyHandle;

/// Errors reported while building or mutating an [`OrbitalSystem`](crate::OrbitalSystem).
///
/// Only construction and wiring can fail. Advancing bodies never does.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum OrbitError {
    /// A construction parameter was out of range.
    #[error("invalid body parameter `{name}` = {value}: {reason}")]
    InvalidParameter {
        /// Name of the offending field.
        name: &'static str,
        /// The rejected value.
        value: f64,
        /// What the value must satisfy.
        reason: &'static str,
    },

    /// The handle does not belong to this system.
    #[error("unknown body handle {0:?}")]
    UnknownBody(BodyHandle),

    /// The requested parent/child relation would break the two-level hierarchy.
    #[error("cannot attach {child:?} to {parent:?}: {reason}")]
    InvalidNesting {
        /// Prospective parent.
        parent: BodyHandle,
        /// Prospective child.
        child: BodyHandle,
        /// Why the relation was refused.
        reason: &'static str,
    },
}
