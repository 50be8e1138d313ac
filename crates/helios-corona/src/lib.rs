//! Noise-driven corona deformation for the central star.
//!
//! A closed icosphere is pushed in and out along each vertex's base direction
//! by a 3D noise field sampled on a time-animated path. Every tick recomputes
//! every vertex from its immutable base direction and the current time, so the
//! surface never accumulates drift.

mod error;
mod icosphere;
mod noise_field;
mod surface;

pub use error::CoronaError;
pub use icosphere::{IcosphereMesh, MAX_DETAIL, icosphere};
pub use noise_field::{DEFAULT_NOISE_SEED, NoiseField, default_noise};
pub use surface::{CoronaAppearance, CoronaParams, CoronaSurface};
