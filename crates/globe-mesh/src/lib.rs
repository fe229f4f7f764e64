//! Icosphere construction and shading: the base icosahedron, recursive
//! subdivision, elevation displacement, flat normals and per-corner assembly.

pub mod assembled;
pub mod displacement;
pub mod error;
pub mod icosahedron;
pub mod mesh;
pub mod normals;
pub mod palette;
pub mod subdivision;

pub use assembled::{AssembledMesh, assemble};
pub use displacement::{
    Displaced, DisplacementParams, DisplacementReport, ElevationHistogram, displace_mesh,
    displace_vertex, scale_factor,
};
pub use error::GeometryError;
pub use icosahedron::{ICOSAHEDRON_FACES, ICOSAHEDRON_VERTICES, icosahedron};
pub use mesh::{Face, Mesh};
pub use normals::{DEGENERATE_EPSILON, compute_face_normals, face_normal};
pub use palette::{ElevationPalette, SEA_LEVEL_TOLERANCE};
pub use subdivision::{
    MAX_SUBDIVISIONS, MidpointMode, ParseMidpointModeError, face_count_at, icosphere,
    shared_vertex_count_at, subdivide, subdivide_levels,
};
