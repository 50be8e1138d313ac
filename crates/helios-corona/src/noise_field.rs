//! The coherent noise capability used to displace the corona.

use noise::{NoiseFn, Perlin};

/// Seed of the default corona noise.
pub const DEFAULT_NOISE_SEED: u32 = 0;

/// A deterministic 3D scalar field, spatially and temporally coherent, with
/// values in approximately `[-1, 1]`.
///
/// Any `noise::NoiseFn<f64, 3>` qualifies, so Perlin, Simplex, or composed
/// generators can be swapped in without touching the deformation code.
pub trait NoiseField {
    fn sample(&self, x: f64, y: f64, z: f64) -> f64;
}

impl<N: NoiseFn<f64, 3>> NoiseField for N {
    fn sample(&self, x: f64, y: f64, z: f64) -> f64 {
        self.get([x, y, z])
    }
}

/// Improved Perlin noise with [`DEFAULT_NOISE_SEED`].
pub fn default_noise() -> Perlin {
    Perlin::new(DEFAULT_NOISE_SEED)
}
