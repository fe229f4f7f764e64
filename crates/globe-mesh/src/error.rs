//! Geometry error types.

/// Errors raised while building or shading a mesh.
///
/// All of these indicate malformed geometry and abort the generation run.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeometryError {
    /// A face references a vertex that does not exist or repeats an index.
    #[error("face {face} {indices:?} is invalid for a mesh of {vertex_count} vertices")]
    InvalidFace {
        face: usize,
        indices: [u32; 3],
        vertex_count: usize,
    },

    /// The vertex list cannot be addressed with 32-bit indices.
    #[error("{0} vertices exceed the 32-bit index range")]
    TooManyVertices(usize),

    /// A face has (near) zero area, so its normal is undefined.
    #[error("face {face} is degenerate (cross product magnitude {magnitude:e})")]
    DegenerateFace { face: usize, magnitude: f64 },

    /// The normal list does not pair up with the face list.
    #[error("{normals} normals supplied for {faces} faces")]
    NormalCountMismatch { faces: usize, normals: usize },

    /// A per-corner buffer was paired with a mesh it was not assembled from.
    #[error("{corners} corners do not match a mesh of {faces} faces")]
    CornerCountMismatch { faces: usize, corners: usize },
}
