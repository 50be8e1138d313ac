//! The deforming corona surface.

use glam::{DVec3, Vec3};
use noise::Perlin;

use crate::{CoronaError, NoiseField, default_noise, icosphere};

/// Shape parameters of the corona, fixed at construction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CoronaParams {
    /// Undisturbed radius of the shell.
    pub radius: f64,
    /// Icosphere subdivision level.
    pub detail: u32,
    /// Maximum radial push, in world units, for a noise sample of magnitude one.
    pub noise_scale: f64,
    /// Spatial frequency of the noise over the unit sphere. Higher values give
    /// finer, more numerous flares.
    pub distortion: f64,
}

impl Default for CoronaParams {
    fn default() -> Self {
        Self {
            radius: 10.0,
            detail: 18,
            noise_scale: 1.0,
            distortion: 20.0,
        }
    }
}

impl CoronaParams {
    fn validate(&self) -> Result<(), CoronaError> {
        if !self.radius.is_finite() || self.radius <= 0.0 {
            return Err(CoronaError::InvalidParameter {
                name: "radius",
                value: self.radius,
                reason: "must be finite and positive",
            });
        }
        for (name, value) in [
            ("noise_scale", self.noise_scale),
            ("distortion", self.distortion),
        ] {
            if !value.is_finite() {
                return Err(CoronaError::InvalidParameter {
                    name,
                    value,
                    reason: "must be finite",
                });
            }
        }
        Ok(())
    }
}

/// Material hints carried alongside the surface for the renderer. The
/// deformation never reads them.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CoronaAppearance {
    /// `0xRRGGBB`.
    pub base_color: u32,
    pub opacity: f32,
}

impl Default for CoronaAppearance {
    fn default() -> Self {
        Self {
            base_color: 0xffae42,
            opacity: 0.75,
        }
    }
}

/// A closed triangulated shell whose vertices writhe with time.
///
/// `deform` rewrites the whole displaced buffer from the base directions on
/// every call. This costs `O(vertex_count)` per frame, and in exchange a
/// displaced vertex depends only on its base direction and the time passed
/// in: there is no state carried between frames to drift or go stale.
pub struct CoronaSurface<N = Perlin> {
    base: Vec<Vec3>,
    indices: Vec<u32>,
    displaced: Vec<[f32; 3]>,
    params: CoronaParams,
    appearance: CoronaAppearance,
    noise: N,
    dirty: bool,
}

impl CoronaSurface<Perlin> {
    /// Icosphere corona with the default Perlin noise field.
    pub fn with_default_noise(params: CoronaParams) -> Result<Self, CoronaError> {
        Self::new(params, default_noise())
    }
}

impl<N: NoiseField> CoronaSurface<N> {
    /// Build the corona on an icosphere of `params.detail`.
    ///
    /// # Errors
    ///
    /// Returns [`CoronaError`] for a non-positive radius, non-finite noise
    /// parameters, or an excessive detail level.
    pub fn new(params: CoronaParams, noise: N) -> Result<Self, CoronaError> {
        params.validate()?;
        let mesh = icosphere(params.detail)?;
        Self::from_directions(mesh.directions, mesh.indices, params, noise)
    }

    /// Build the corona on externally supplied base directions, e.g. from a
    /// loaded model. Directions are normalized; `params.detail` is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`CoronaError`] for invalid parameters, an empty or degenerate
    /// direction set, or indices that do not form whole in-range triangles.
    pub fn from_directions(
        directions: Vec<Vec3>,
        indices: Vec<u32>,
        params: CoronaParams,
        noise: N,
    ) -> Result<Self, CoronaError> {
        params.validate()?;
        if directions.is_empty() {
            return Err(CoronaError::EmptySurface);
        }
        if indices.len() % 3 != 0 {
            return Err(CoronaError::IncompleteTriangle { len: indices.len() });
        }
        if let Some(&index) = indices.iter().find(|&&i| i as usize >= directions.len()) {
            return Err(CoronaError::IndexOutOfRange {
                index,
                vertex_count: directions.len(),
            });
        }
        let base = directions
            .into_iter()
            .enumerate()
            .map(|(index, d)| {
                d.try_normalize()
                    .ok_or(CoronaError::DegenerateDirection { index })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let radius = params.radius as f32;
        let displaced = base.iter().map(|d| (*d * radius).to_array()).collect();

        log::info!(
            "Corona surface built: {} vertices, {} triangles",
            base.len(),
            indices.len() / 3
        );

        Ok(Self {
            base,
            indices,
            displaced,
            params,
            appearance: CoronaAppearance::default(),
            noise,
            dirty: true,
        })
    }

    /// Replace the forwarded material hints.
    pub fn with_appearance(mut self, appearance: CoronaAppearance) -> Self {
        self.appearance = appearance;
        self
    }

    /// Recompute every displaced vertex for `sim_time` and flag the buffer dirty.
    ///
    /// Each base direction `p` is scaled by the distortion and offset along a
    /// time path `(cos t, sin 0.8t, t)`. The axes deliberately run at
    /// mismatched rates so the motion never visibly loops. The noise sample
    /// `n` at that point moves the vertex to `p * (radius + n * noise_scale)`.
    pub fn deform(&mut self, sim_time: f64) -> &[[f32; 3]] {
        let offset = DVec3::new(sim_time.cos(), (sim_time * 0.8).sin(), sim_time);
        let CoronaParams {
            radius,
            noise_scale,
            distortion,
            ..
        } = self.params;

        for (direction, out) in self.base.iter().zip(self.displaced.iter_mut()) {
            let p = direction.as_dvec3();
            let v = p * distortion + offset;
            let n = self.noise.sample(v.x, v.y, v.z);
            *out = (p * radius + p * (n * noise_scale)).as_vec3().to_array();
        }

        self.dirty = true;
        &self.displaced
    }

    /// Whether the displaced buffer changed since the consumer last copied it.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Return the dirty flag and clear it. Called by the consumer after upload.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::replace(&mut self.dirty, false)
    }

    pub fn displaced(&self) -> &[[f32; 3]] {
        &self.displaced
    }

    /// Displaced positions as raw bytes for GPU upload.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.displaced)
    }

    pub fn base_directions(&self) -> &[Vec3] {
        &self.base
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn vertex_count(&self) -> usize {
        self.base.len()
    }

    pub fn params(&self) -> &CoronaParams {
        &self.params
    }

    pub fn appearance(&self) -> &CoronaAppearance {
        &self.appearance
    }

    pub fn noise(&self) -> &N {
        &self.noise
    }
}
