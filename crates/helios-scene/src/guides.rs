//! Flat annuli marking each planet's orbit.

use glam::Vec3;

/// Half-width of the guide band around the orbit radius.
pub const GUIDE_HALF_WIDTH: f32 = 0.05;
/// Angular segments per guide.
pub const GUIDE_SEGMENTS: u32 = 64;

/// Triangle mesh of a thin ring lying in the XZ plane.
#[derive(Clone, Debug)]
pub struct GuideMesh {
    pub positions: Vec<Vec3>,
    pub indices: Vec<u32>,
}

/// Build the guide for an orbit of radius `distance`: inner and outer rims of
/// `segments + 1` vertices each (the seam vertex is duplicated), stitched
/// into two triangles per segment.
pub fn orbit_guide(distance: f32, segments: u32) -> GuideMesh {
    let segments = segments.max(3);
    let radii = [distance - GUIDE_HALF_WIDTH, distance + GUIDE_HALF_WIDTH];
    let mut positions = Vec::with_capacity(2 * (segments as usize + 1));
    for r in radii {
        for s in 0..=segments {
            let theta = s as f32 / segments as f32 * std::f32::consts::TAU;
            positions.push(Vec3::new(theta.cos() * r, 0.0, theta.sin() * r));
        }
    }

    let outer_start = segments + 1;
    let mut indices = Vec::with_capacity(6 * segments as usize);
    for s in 0..segments {
        let a = s;
        let b = outer_start + s;
        let c = outer_start + s + 1;
        let d = s + 1;
        indices.extend_from_slice(&[a, b, d, b, c, d]);
    }

    GuideMesh { positions, indices }
}
