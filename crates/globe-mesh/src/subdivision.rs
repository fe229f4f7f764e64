//! Recursive triangle subdivision with re-projection onto the unit sphere.
//!
//! Every level is a pure function of the previous mesh: each face becomes
//! four, and each new vertex is the normalized midpoint of an edge.

use std::fmt;
use std::str::FromStr;

use glam::DVec3;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::icosahedron::{ICOSAHEDRON_FACES, icosahedron};
use crate::mesh::{Face, Mesh};

/// Deepest subdivision accepted by [`subdivide_levels`].
///
/// At depth 10 the icosphere has 20,971,520 faces.
pub const MAX_SUBDIVISIONS: u32 = 10;

/// How edge midpoints shared by two faces are stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MidpointMode {
    /// One vertex per edge, looked up by the unordered pair of parent indices.
    #[default]
    Shared,
    /// Each face appends its own three midpoints, so adjacent faces carry
    /// coincident duplicate vertices.
    Duplicated,
}

impl fmt::Display for MidpointMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Shared => "shared",
            Self::Duplicated => "duplicated",
        })
    }
}

/// Returned when a midpoint mode name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown midpoint mode {0:?} (expected shared or duplicated)")]
pub struct ParseMidpointModeError(pub String);

impl FromStr for MidpointMode {
    type Err = ParseMidpointModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "shared" => Ok(Self::Shared),
            "duplicated" => Ok(Self::Duplicated),
            _ => Err(ParseMidpointModeError(s.to_string())),
        }
    }
}

/// Face count of an icosphere after `depth` subdivisions: `20 * 4^depth`.
pub const fn face_count_at(depth: u32) -> usize {
    ICOSAHEDRON_FACES << (2 * depth)
}

/// Vertex count of an icosphere after `depth` subdivisions with
/// [`MidpointMode::Shared`]: `10 * 4^depth + 2`.
pub const fn shared_vertex_count_at(depth: u32) -> usize {
    (10 << (2 * depth)) + 2
}

/// Hands out midpoint vertex indices for one subdivision pass.
struct MidpointCache {
    mode: MidpointMode,
    edges: FxHashMap<(u32, u32), u32>,
}

impl MidpointCache {
    fn new(mode: MidpointMode, face_count: usize) -> Self {
        let edges = match mode {
            // A closed triangle mesh has 3F/2 edges.
            MidpointMode::Shared => {
                FxHashMap::with_capacity_and_hasher(face_count * 3 / 2, Default::default())
            }
            MidpointMode::Duplicated => FxHashMap::default(),
        };
        Self { mode, edges }
    }

    fn midpoint(&mut self, a: u32, b: u32, vertices: &mut Vec<DVec3>) -> u32 {
        match self.mode {
            MidpointMode::Shared => {
                let key = if a < b { (a, b) } else { (b, a) };
                if let Some(&idx) = self.edges.get(&key) {
                    return idx;
                }
                let idx = push_midpoint(a, b, vertices);
                self.edges.insert(key, idx);
                idx
            }
            MidpointMode::Duplicated => push_midpoint(a, b, vertices),
        }
    }
}

fn push_midpoint(a: u32, b: u32, vertices: &mut Vec<DVec3>) -> u32 {
    let mid = ((vertices[a as usize] + vertices[b as usize]) * 0.5).normalize();
    let idx = vertices.len() as u32;
    vertices.push(mid);
    idx
}

/// Split every face of `mesh` into four.
///
/// For a face `(v1, v2, v3)` with edge midpoints `m12`, `m13`, `m23` the
/// children are `(v1, m12, m13)`, `(m12, v2, m23)`, `(m23, v3, m13)` and
/// `(m13, m12, m23)`, all keeping the parent's winding. Parent vertices keep
/// their indices; new vertices are appended in face order, so the output is
/// fully determined by the input and `mode`.
pub fn subdivide(mesh: &Mesh, mode: MidpointMode) -> Mesh {
    let faces = mesh.faces();
    let new_vertex_estimate = match mode {
        MidpointMode::Shared => faces.len() * 3 / 2,
        MidpointMode::Duplicated => faces.len() * 3,
    };

    let mut vertices = Vec::with_capacity(mesh.vertex_count() + new_vertex_estimate);
    vertices.extend_from_slice(mesh.vertices());
    let mut new_faces: Vec<Face> = Vec::with_capacity(faces.len() * 4);
    let mut cache = MidpointCache::new(mode, faces.len());

    for &[v1, v2, v3] in faces {
        let m12 = cache.midpoint(v1, v2, &mut vertices);
        let m13 = cache.midpoint(v1, v3, &mut vertices);
        let m23 = cache.midpoint(v2, v3, &mut vertices);

        new_faces.extend_from_slice(&[
            [v1, m12, m13],
            [m12, v2, m23],
            [m23, v3, m13],
            [m13, m12, m23],
        ]);
    }

    Mesh::from_parts_unchecked(vertices, new_faces)
}

/// Apply [`subdivide`] `depth` times.
///
/// # Panics
///
/// Panics if `depth` exceeds [`MAX_SUBDIVISIONS`].
pub fn subdivide_levels(mesh: &Mesh, depth: u32, mode: MidpointMode) -> Mesh {
    assert!(
        depth <= MAX_SUBDIVISIONS,
        "subdivision depth must be at most {MAX_SUBDIVISIONS}, got {depth}"
    );
    let mut current = mesh.clone();
    for level in 1..=depth {
        current = subdivide(&current, mode);
        tracing::debug!(
            level,
            vertices = current.vertex_count(),
            faces = current.face_count(),
            "Subdivided mesh"
        );
    }
    current
}

/// The icosahedron refined `depth` times.
///
/// # Panics
///
/// Panics if `depth` exceeds [`MAX_SUBDIVISIONS`].
pub fn icosphere(depth: u32, mode: MidpointMode) -> Mesh {
    subdivide_levels(&icosahedron(), depth, mode)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_face_count_grows_by_four() {
        let mut mesh = icosahedron();
        assert_eq!(mesh.face_count(), face_count_at(0));
        for depth in 1..=6 {
            mesh = subdivide(&mesh, MidpointMode::Shared);
            assert_eq!(mesh.face_count(), 20 * 4usize.pow(depth));
            assert_eq!(mesh.face_count(), face_count_at(depth));
        }
    }

    #[test]
    fn test_shared_midpoints_one_level() {
        let mesh = subdivide(&icosahedron(), MidpointMode::Shared);
        // 12 originals + one vertex per icosahedron edge
        assert_eq!(mesh.vertex_count(), 42);
    }

    #[test]
    fn test_duplicated_midpoints_one_level() {
        let mesh = subdivide(&icosahedron(), MidpointMode::Duplicated);
        assert_eq!(mesh.vertex_count(), 12 + 3 * 20);
        assert_eq!(mesh.face_count(), 80);
    }

    #[test]
    fn test_shared_vertex_count_formula() {
        for depth in 0..=5 {
            let mesh = icosphere(depth, MidpointMode::Shared);
            assert_eq!(mesh.vertex_count(), shared_vertex_count_at(depth));
        }
    }

    #[test]
    fn test_vertices_stay_on_unit_sphere() {
        for mode in [MidpointMode::Shared, MidpointMode::Duplicated] {
            let mesh = icosphere(4, mode);
            assert!(
                mesh.max_unit_deviation() < 1e-6,
                "{mode} subdivision left the unit sphere"
            );
        }
    }

    #[test]
    fn test_children_keep_outward_winding() {
        let mesh = icosphere(3, MidpointMode::Shared);
        for i in 0..mesh.face_count() {
            let [a, b, c] = mesh.face_positions(i);
            let normal = (b - a).cross(c - a);
            assert!(normal.dot(a + b + c) > 0.0, "face {i} winds inward");
        }
    }

    #[test]
    fn test_parent_vertices_keep_indices() {
        let base = icosahedron();
        let refined = subdivide(&base, MidpointMode::Shared);
        assert_eq!(&refined.vertices()[..12], base.vertices());
    }

    #[test]
    fn test_child_layout_of_single_face() {
        let tri = Mesh::from_parts(vec![DVec3::X, DVec3::Y, DVec3::Z], vec![[0, 1, 2]]).unwrap();
        let out = subdivide(&tri, MidpointMode::Shared);
        // m12 = 3, m13 = 4, m23 = 5
        assert_eq!(out.faces(), &[[0, 3, 4], [3, 1, 5], [5, 2, 4], [4, 3, 5]]);
        let expected = (DVec3::X + DVec3::Y).normalize();
        assert!((out.vertices()[3] - expected).length() < 1e-12);
    }

    #[test]
    fn test_subdivision_is_deterministic() {
        let a = icosphere(3, MidpointMode::Shared);
        let b = icosphere(3, MidpointMode::Shared);
        assert_eq!(a, b);
    }

    #[test]
    fn test_input_mesh_untouched() {
        let base = icosahedron();
        let snapshot = base.clone();
        let _ = subdivide(&base, MidpointMode::Shared);
        assert_eq!(base, snapshot);
    }

    #[test]
    fn test_depth_zero_is_identity() {
        assert_eq!(icosphere(0, MidpointMode::Shared), icosahedron());
    }

    #[test]
    #[should_panic(expected = "subdivision depth must be at most")]
    fn test_depth_limit() {
        let _ = subdivide_levels(&icosahedron(), MAX_SUBDIVISIONS + 1, MidpointMode::Shared);
    }

    #[test]
    fn test_parse_mode() {
        assert_eq!("Shared".parse::<MidpointMode>(), Ok(MidpointMode::Shared));
        assert_eq!(
            "duplicated".parse::<MidpointMode>(),
            Ok(MidpointMode::Duplicated)
        );
        assert!("merged".parse::<MidpointMode>().is_err());
    }
}
