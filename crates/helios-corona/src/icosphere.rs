//! Subdivided icosahedron used as the corona's base surface.

use glam::Vec3;
use rustc_hash::FxHashMap;

use crate::CoronaError;

/// Largest accepted subdivision level (about 660k vertices).
pub const MAX_DETAIL: u32 = 256;

const BASE_FACES: [u32; 60] = [
    0, 11, 5, 0, 5, 1, 0, 1, 7, 0, 7, 10, 0, 10, 11, 1, 5, 9, 5, 11, 4, 11, 10, 2, 10, 7, 6, 7, 1,
    8, 3, 9, 4, 3, 4, 2, 3, 2, 6, 3, 6, 8, 3, 8, 9, 4, 9, 5, 2, 4, 11, 6, 2, 10, 8, 6, 7, 9, 8, 1,
];

/// Unit directions plus triangle indices of a welded icosphere.
#[derive(Clone, Debug)]
pub struct IcosphereMesh {
    /// Unit-length vertex directions.
    pub directions: Vec<Vec3>,
    /// Counter-clockwise triangle list.
    pub indices: Vec<u32>,
}

/// Identity of a lattice point, shared between faces along edges and corners.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
enum LatticeKey {
    Corner(u32),
    Edge { lo: u32, hi: u32, step: u32 },
    Interior { face: usize, i: u32, j: u32 },
}

fn base_vertices() -> [Vec3; 12] {
    let t = (1.0 + 5.0_f32.sqrt()) / 2.0;
    [
        Vec3::new(-1.0, t, 0.0),
        Vec3::new(1.0, t, 0.0),
        Vec3::new(-1.0, -t, 0.0),
        Vec3::new(1.0, -t, 0.0),
        Vec3::new(0.0, -1.0, t),
        Vec3::new(0.0, 1.0, t),
        Vec3::new(0.0, -1.0, -t),
        Vec3::new(0.0, 1.0, -t),
        Vec3::new(t, 0.0, -1.0),
        Vec3::new(t, 0.0, 1.0),
        Vec3::new(-t, 0.0, -1.0),
        Vec3::new(-t, 0.0, 1.0),
    ]
    .map(Vec3::normalize)
}

fn edge_key(from: u32, to: u32, step: u32, segments: u32) -> LatticeKey {
    if from < to {
        LatticeKey::Edge {
            lo: from,
            hi: to,
            step,
        }
    } else {
        LatticeKey::Edge {
            lo: to,
            hi: from,
            step: segments - step,
        }
    }
}

/// Build an icosphere whose 20 faces are each split into `(detail + 1)^2`
/// triangles. Yields `10 * (detail + 1)^2 + 2` welded vertices.
///
/// # Errors
///
/// Returns [`CoronaError::DetailTooHigh`] above [`MAX_DETAIL`].
pub fn icosphere(detail: u32) -> Result<IcosphereMesh, CoronaError> {
    if detail > MAX_DETAIL {
        return Err(CoronaError::DetailTooHigh {
            detail,
            max: MAX_DETAIL,
        });
    }
    let corners = base_vertices();
    let n = detail + 1;
    let vertex_count = (10 * n * n + 2) as usize;

    let mut lookup: FxHashMap<LatticeKey, u32> = FxHashMap::default();
    lookup.reserve(vertex_count);
    let mut directions = Vec::with_capacity(vertex_count);
    let mut indices = Vec::with_capacity((60 * n * n) as usize);

    for (face, tri) in BASE_FACES.chunks_exact(3).enumerate() {
        let (a, b, c) = (tri[0], tri[1], tri[2]);

        // Lattice point (i, j) sits at a + (b - a) * i/n + (c - a) * j/n.
        let mut vertex = |i: u32, j: u32| -> u32 {
            let key = match (i, j) {
                (0, 0) => LatticeKey::Corner(a),
                (i, 0) if i == n => LatticeKey::Corner(b),
                (0, j) if j == n => LatticeKey::Corner(c),
                (i, 0) => edge_key(a, b, i, n),
                (0, j) => edge_key(a, c, j, n),
                (_, j) if i + j == n => edge_key(b, c, j, n),
                (i, j) => LatticeKey::Interior { face, i, j },
            };
            *lookup.entry(key).or_insert_with(|| {
                let direction = match key {
                    LatticeKey::Corner(v) => corners[v as usize],
                    LatticeKey::Edge { lo, hi, step } => corners[lo as usize]
                        .lerp(corners[hi as usize], step as f32 / n as f32)
                        .normalize(),
                    LatticeKey::Interior { i, j, .. } => {
                        let (pa, pb, pc) = (
                            corners[a as usize],
                            corners[b as usize],
                            corners[c as usize],
                        );
                        (pa + (pb - pa) * (i as f32 / n as f32) + (pc - pa) * (j as f32 / n as f32))
                            .normalize()
                    }
                };
                directions.push(direction);
                (directions.len() - 1) as u32
            })
        };

        for i in 0..n {
            for j in 0..(n - i) {
                let p0 = vertex(i, j);
                let p1 = vertex(i + 1, j);
                let p2 = vertex(i, j + 1);
                indices.extend_from_slice(&[p0, p1, p2]);
                if i + j + 1 < n {
                    let p3 = vertex(i + 1, j + 1);
                    indices.extend_from_slice(&[p1, p3, p2]);
                }
            }
        }
    }

    debug_assert_eq!(directions.len(), vertex_count);
    Ok(IcosphereMesh {
        directions,
        indices,
    })
}
