//! Corona construction errors.

/// Errors raised while building a [`CoronaSurface`](crate::CoronaSurface).
///
/// Deformation itself cannot fail; only invalid construction input is reported.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CoronaError {
    /// A shape parameter was out of range.
    #[error("invalid corona parameter `{name}` = {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    /// Subdivision level would produce an unreasonably large mesh.
    #[error("corona detail {detail} exceeds the maximum of {max}")]
    DetailTooHigh { detail: u32, max: u32 },

    /// No base directions were supplied.
    #[error("corona surface has no vertices")]
    EmptySurface,

    /// A base direction cannot be normalized.
    #[error("base direction {index} has zero or non-finite length")]
    DegenerateDirection { index: usize },

    /// A triangle refers to a vertex that does not exist.
    #[error("index {index} is out of range for {vertex_count} vertices")]
    IndexOutOfRange { index: u32, vertex_count: usize },

    /// The index list does not describe whole triangles.
    #[error("index count {len} is not a multiple of three")]
    IncompleteTriangle { len: usize },
}
