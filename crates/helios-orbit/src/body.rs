//! A single orbiting body and its per-tick kinematics.

use glam::{Quat, Vec3};

use crate::OrbitError;

/// Construction parameters for a [`Body`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BodySpec {
    /// Distance from the frame origin. Fixed for the body's lifetime.
    pub orbit_radius: f64,
    /// Radians added to the orbital angle every tick. Negative runs retrograde.
    pub orbit_speed: f64,
    /// Radians added to the spin angle every tick. Negative spins backwards.
    pub spin_speed: f64,
    /// Axial tilt in radians, applied about the Z axis before spin.
    pub tilt: f64,
    /// Orbital phase at creation, in radians.
    pub initial_angle: f64,
}

impl BodySpec {
    /// Create a spec starting at orbital phase zero.
    pub fn new(orbit_radius: f64, orbit_speed: f64, spin_speed: f64, tilt: f64) -> Self {
        Self {
            orbit_radius,
            orbit_speed,
            spin_speed,
            tilt,
            initial_angle: 0.0,
        }
    }

    /// Start the body at a different orbital phase.
    pub fn with_initial_angle(mut self, angle: f64) -> Self {
        self.initial_angle = angle;
        self
    }

    fn validate(&self) -> Result<(), OrbitError> {
        if !self.orbit_radius.is_finite() || self.orbit_radius < 0.0 {
            return Err(OrbitError::InvalidParameter {
                name: "orbit_radius",
                value: self.orbit_radius,
                reason: "must be finite and non-negative",
            });
        }
        let finite = [
            ("orbit_speed", self.orbit_speed),
            ("spin_speed", self.spin_speed),
            ("tilt", self.tilt),
            ("initial_angle", self.initial_angle),
        ];
        for (name, value) in finite {
            if !value.is_finite() {
                return Err(OrbitError::InvalidParameter {
                    name,
                    value,
                    reason: "must be finite",
                });
            }
        }
        Ok(())
    }
}

/// Snapshot of a body after a tick, in the body's own reference frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BodyState {
    /// Position relative to the frame origin (parent-local for moons).
    pub position: Vec3,
    /// Accumulated self-rotation in radians.
    pub spin_angle: f64,
}

/// One orbiting entity: a planet, or a moon when owned by a parent.
///
/// Angles are never normalized. Only their sine and cosine are ever used, so
/// unbounded growth is harmless beyond ordinary floating-point precision.
#[derive(Clone, Debug, PartialEq)]
pub struct Body {
    orbit_angle: f64,
    orbit_speed: f64,
    spin_angle: f64,
    spin_speed: f64,
    orbit_radius: f64,
    tilt: f64,
    visible: bool,
}

impl Body {
    /// Create a visible body from a validated spec.
    ///
    /// # Errors
    ///
    /// Returns [`OrbitError::InvalidParameter`] for a negative or non-finite
    /// radius, or any non-finite speed, tilt or angle.
    pub fn new(spec: BodySpec) -> Result<Self, OrbitError> {
        spec.validate()?;
        Ok(Self {
            orbit_angle: spec.initial_angle,
            orbit_speed: spec.orbit_speed,
            spin_angle: 0.0,
            spin_speed: spec.spin_speed,
            orbit_radius: spec.orbit_radius,
            tilt: spec.tilt,
            visible: true,
        })
    }

    /// Advance one tick: step both angles by their speeds and return the new state.
    pub fn advance(&mut self) -> BodyState {
        self.orbit_angle += self.orbit_speed;
        self.spin_angle += self.spin_speed;
        self.state()
    }

    /// Current state without advancing.
    pub fn state(&self) -> BodyState {
        BodyState {
            position: self.local_position(),
            spin_angle: self.spin_angle,
        }
    }

    /// `(cos(angle) * r, 0, sin(angle) * r)` in the body's reference frame.
    pub fn local_position(&self) -> Vec3 {
        let (sin, cos) = self.orbit_angle.sin_cos();
        Vec3::new(
            (cos * self.orbit_radius) as f32,
            0.0,
            (sin * self.orbit_radius) as f32,
        )
    }

    /// Spin about Y applied on top of the fixed axial tilt about Z.
    pub fn orientation(&self) -> Quat {
        Quat::from_rotation_y(self.spin_angle as f32) * Quat::from_rotation_z(self.tilt as f32)
    }

    /// Orbit angle in radians, unbounded.
    pub fn orbit_angle(&self) -> f64 {
        self.orbit_angle
    }

    /// Orbit angle added per tick, in radians.
    pub fn orbit_speed(&self) -> f64 {
        self.orbit_speed
    }

    /// Spin about the local Y axis in radians, unbounded.
    pub fn spin_angle(&self) -> f64 {
        self.spin_angle
    }

    /// Spin angle added per tick, in radians.
    pub fn spin_speed(&self) -> f64 {
        self.spin_speed
    }

    /// Distance from the parent's origin.
    pub fn orbit_radius(&self) -> f64 {
        self.orbit_radius
    }

    /// Fixed axial tilt about Z in radians.
    pub fn tilt(&self) -> f64 {
        self.tilt
    }

    /// Whether the body should be drawn.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Takes effect on the next tick. Not validated.
    pub fn set_orbit_speed(&mut self, speed: f64) {
        self.orbit_speed = speed;
    }

    /// Takes effect on the next tick. Not validated.
    pub fn set_spin_speed(&mut self, speed: f64) {
        self.spin_speed = speed;
    }

    /// Rendering-only flag; hidden bodies keep moving.
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }
}
