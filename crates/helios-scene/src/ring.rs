//! Particle ring around a planet (Saturn's).

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Inner edge of the ring as a multiple of the planet radius.
pub const INNER_RADIUS_FACTOR: f32 = 1.5;
/// Outer edge of the ring as a multiple of the planet radius.
pub const OUTER_RADIUS_FACTOR: f32 = 2.5;
/// Full width of the in-plane jitter applied to each particle.
pub const PLANE_JITTER: f32 = 0.09;
/// Full height of the vertical jitter applied to each particle.
pub const VERTICAL_JITTER: f32 = 0.02;

/// Scatter `count` particles in the planet's local equatorial plane, uniform in
/// angle and radius between the inner and outer edges. Deterministic for a seed.
pub fn ring_particles(seed: u64, count: u32, planet_size: f32) -> Vec<Vec3> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let inner = planet_size * INNER_RADIUS_FACTOR;
    let outer = planet_size * OUTER_RADIUS_FACTOR;

    (0..count)
        .map(|_| {
            let angle = rng.random::<f32>() * std::f32::consts::TAU;
            let r = inner + rng.random::<f32>() * (outer - inner);
            let x = angle.cos() * r + (rng.random::<f32>() - 0.5) * PLANE_JITTER;
            let y = (rng.random::<f32>() - 0.5) * VERTICAL_JITTER;
            let z = angle.sin() * r + (rng.random::<f32>() - 0.5) * PLANE_JITTER;
            Vec3::new(x, y, z)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ring_is_deterministic_per_seed() {
        assert_eq!(ring_particles(3, 100, 2.5), ring_particles(3, 100, 2.5));
        assert_ne!(ring_particles(3, 100, 2.5), ring_particles(4, 100, 2.5));
    }

    #[test]
    fn test_particles_stay_in_annulus() {
        let size = 2.5;
        let slack = PLANE_JITTER;
        for p in ring_particles(11, 2500, size) {
            let planar = (p.x * p.x + p.z * p.z).sqrt();
            assert!(planar >= size * INNER_RADIUS_FACTOR - slack, "too close: {planar}");
            assert!(planar <= size * OUTER_RADIUS_FACTOR + slack, "too far: {planar}");
            assert!(p.y.abs() <= VERTICAL_JITTER * 0.5);
        }
    }

    #[test]
    fn test_requested_count() {
        assert_eq!(ring_particles(0, 2500, 1.0).len(), 2500);
        assert!(ring_particles(0, 0, 1.0).is_empty());
    }
}
