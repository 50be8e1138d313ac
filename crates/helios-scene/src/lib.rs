//! Scene composition for the helios solar system.
//!
//! Wires the orbital kinematics and the corona deformation together behind a
//! single frame-synchronous tick, and carries the scene dressing around them:
//! the planet catalog, Saturn's ring, the starfield, orbit guides, the camera,
//! pointer picking and the control-panel state.

pub mod camera;
pub mod catalog;
pub mod clock;
pub mod controls;
pub mod guides;
pub mod picking;
pub mod ring;
pub mod starfield;

mod error;
mod system;

pub use camera::Camera;
pub use catalog::{MOON, MoonInfo, PLANETS, PlanetInfo, SUN_SPIN_RATE};
pub use clock::SimulationClock;
pub use controls::{ControlEvent, ControlPanel, DisplaySettings};
pub use error::SceneError;
pub use picking::{PickHit, Ray, Tooltip};
pub use system::{BodyKind, BodyView, FrameView, Planet, SolarSystem, Star};
