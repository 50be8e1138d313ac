//! Background starfield: points scattered through a cube around the scene.

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Edge length of the cube the stars fill.
pub const DEFAULT_EXTENT: f32 = 2000.0;

/// Generates a deterministic set of background star positions from a seed.
pub struct StarfieldGenerator {
    seed: u64,
    star_count: u32,
    extent: f32,
}

impl StarfieldGenerator {
    /// Create a generator filling a cube of [`DEFAULT_EXTENT`].
    pub fn new(seed: u64, star_count: u32) -> Self {
        Self {
            seed,
            star_count,
            extent: DEFAULT_EXTENT,
        }
    }

    /// Use a cube of a different edge length.
    pub fn with_extent(mut self, extent: f32) -> Self {
        self.extent = extent;
        self
    }

    /// Uniform positions in `[-extent/2, extent/2]^3`. Deterministic for a given seed.
    pub fn generate(&self) -> Vec<Vec3> {
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        let mut stars = Vec::with_capacity(self.star_count as usize);
        for _ in 0..self.star_count {
            let x = (rng.random::<f32>() - 0.5) * self.extent;
            let y = (rng.random::<f32>() - 0.5) * self.extent;
            let z = (rng.random::<f32>() - 0.5) * self.extent;
            stars.push(Vec3::new(x, y, z));
        }
        stars
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starfield_deterministic() {
        let a = StarfieldGenerator::new(42, 500).generate();
        let b = StarfieldGenerator::new(42, 500).generate();
        assert_eq!(a, b);
    }

    #[test]
    fn test_different_seeds_differ() {
        let a = StarfieldGenerator::new(1, 50).generate();
        let b = StarfieldGenerator::new(2, 50).generate();
        assert_ne!(a, b);
    }

    #[test]
    fn test_stars_fill_the_cube() {
        let stars = StarfieldGenerator::new(9, 3000).generate();
        assert_eq!(stars.len(), 3000);
        let half = DEFAULT_EXTENT / 2.0;
        assert!(stars.iter().all(|s| s.abs().max_element() <= half));
        // Spread across all octants rather than clumped near the origin.
        let far = stars.iter().filter(|s| s.length() > half * 0.5).count();
        assert!(far > 2000, "only {far} stars far from origin");
    }

    #[test]
    fn test_custom_extent() {
        let stars = StarfieldGenerator::new(3, 200).with_extent(10.0).generate();
        assert!(stars.iter().all(|s| s.abs().max_element() <= 5.0));
    }
}
