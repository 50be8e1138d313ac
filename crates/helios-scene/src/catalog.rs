//! The bodies of the model: eight planets, one moon, and the star's spin.
//!
//! Distances and sizes are scene units chosen for readability, not scale.

use helios_orbit::BodySpec;

/// Star self-rotation in radians per simulation second.
pub const SUN_SPIN_RATE: f64 = 0.2;

/// Static description of a planet.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlanetInfo {
    pub name: &'static str,
    /// `0xRRGGBB` fallback color when textures are off.
    pub color: u32,
    /// Sphere radius.
    pub size: f32,
    /// Orbit radius around the star.
    pub distance: f64,
    /// Radians per tick.
    pub orbit_speed: f64,
    /// Radians per tick, before the retrograde sign is applied.
    pub rotation_speed: f64,
    pub texture: &'static str,
    pub tilt_degrees: f64,
    /// Spins backwards (Venus, Uranus).
    pub retrograde: bool,
    pub has_ring: bool,
    pub has_moon: bool,
}

impl PlanetInfo {
    /// Signed spin speed.
    pub fn spin_speed(&self) -> f64 {
        if self.retrograde {
            -self.rotation_speed
        } else {
            self.rotation_speed
        }
    }

    pub fn body_spec(&self) -> BodySpec {
        BodySpec::new(
            self.distance,
            self.orbit_speed,
            self.spin_speed(),
            self.tilt_degrees.to_radians(),
        )
    }
}

/// Static description of a moon.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MoonInfo {
    pub name: &'static str,
    pub color: u32,
    pub size: f32,
    /// Orbit radius around the parent planet.
    pub distance: f64,
    pub orbit_speed: f64,
    pub tilt_degrees: f64,
}

impl MoonInfo {
    pub fn body_spec(&self) -> BodySpec {
        BodySpec::new(
            self.distance,
            self.orbit_speed,
            0.0,
            self.tilt_degrees.to_radians(),
        )
    }
}

pub const MOON: MoonInfo = MoonInfo {
    name: "Moon",
    color: 0xaaaaaa,
    size: 0.27,
    distance: 2.0,
    orbit_speed: 0.04,
    tilt_degrees: 6.7,
};

const fn planet(
    name: &'static str,
    color: u32,
    size: f32,
    distance: f64,
    orbit_speed: f64,
    rotation_speed: f64,
    texture: &'static str,
    tilt_degrees: f64,
) -> PlanetInfo {
    PlanetInfo {
        name,
        color,
        size,
        distance,
        orbit_speed,
        rotation_speed,
        texture,
        tilt_degrees,
        retrograde: false,
        has_ring: false,
        has_moon: false,
    }
}

pub const PLANETS: [PlanetInfo; 8] = [
    planet("Mercury", 0xaaaaaa, 0.5, 8.0, 0.02, 0.01, "./textures/mercury.png", 0.03),
    PlanetInfo {
        retrograde: true,
        ..planet("Venus", 0xffcc66, 1.0, 12.0, 0.015, 0.008, "./textures/venus.png", 177.4)
    },
    PlanetInfo {
        has_moon: true,
        ..planet("Earth", 0x3399ff, 1.2, 16.0, 0.01, 0.02, "./textures/earth.png", 23.5)
    },
    planet("Mars", 0xff3300, 1.0, 20.0, 0.008, 0.018, "./textures/mars.png", 25.2),
    planet("Jupiter", 0xff9966, 3.0, 28.0, 0.006, 0.04, "./textures/jupiter.png", 3.1),
    PlanetInfo {
        has_ring: true,
        ..planet("Saturn", 0xffcc99, 2.5, 40.0, 0.004, 0.038, "./textures/saturn.png", 26.7)
    },
    PlanetInfo {
        retrograde: true,
        ..planet("Uranus", 0x66ccff, 2.0, 50.0, 0.003, 0.03, "./textures/uranus.png", 97.8)
    },
    planet("Neptune", 0x3333ff, 2.0, 56.0, 0.002, 0.028, "./textures/neptune.png", 28.3),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_planets_are_ordered_outward() {
        for pair in PLANETS.windows(2) {
            assert!(
                pair[0].distance < pair[1].distance,
                "{} should orbit inside {}",
                pair[0].name,
                pair[1].name
            );
        }
    }

    #[test]
    fn test_only_venus_and_uranus_spin_backwards() {
        let retro: Vec<_> = PLANETS.iter().filter(|p| p.spin_speed() < 0.0).map(|p| p.name).collect();
        assert_eq!(retro, ["Venus", "Uranus"]);
    }

    #[test]
    fn test_single_ring_and_single_moon() {
        assert_eq!(PLANETS.iter().filter(|p| p.has_ring).count(), 1);
        assert_eq!(PLANETS.iter().filter(|p| p.has_moon).count(), 1);
        assert!(PLANETS[5].has_ring && PLANETS[5].name == "Saturn");
        assert!(PLANETS[2].has_moon && PLANETS[2].name == "Earth");
    }

    #[test]
    fn test_body_spec_converts_tilt_to_radians() {
        let earth = PLANETS[2].body_spec();
        assert!((earth.tilt - 23.5_f64.to_radians()).abs() < 1e-12);
        assert_eq!(earth.orbit_radius, 16.0);
        let venus = PLANETS[1].body_spec();
        assert_eq!(venus.spin_speed, -0.008);
    }

    #[test]
    fn test_moon_spec() {
        let spec = MOON.body_spec();
        assert_eq!(spec.orbit_radius, 2.0);
        assert_eq!(spec.orbit_speed, 0.04);
        assert_eq!(spec.spin_speed, 0.0);
    }
}
