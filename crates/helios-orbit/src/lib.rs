//! Orbital kinematics for the helios solar system model.
//!
//! Every body moves on a fixed-radius circle in the XZ plane of its reference
//! frame and spins about its own (tilted) Y axis. A body's position is a pure
//! function of its orbital angle and radius; there is no velocity state, so
//! nothing drifts no matter how many ticks run.
//!
//! Moons are modeled as children of a planet. A child's position is computed
//! in the parent's local frame and composed with the parent's world position.

mod body;
mod error;
mod system;

pub use body::{Body, BodySpec, BodyState};
pub use error::OrbitError;
pub use system::{BodyHandle, OrbitalSystem};
