//! Flat, outward-facing face normals.

use glam::DVec3;

use crate::error::GeometryError;
use crate::mesh::Mesh;

/// Cross products shorter than this are treated as zero-area faces.
pub const DEGENERATE_EPSILON: f64 = 1e-12;

/// Unit normal of the triangle `(v1, v2, v3)`, oriented away from the origin.
///
/// The raw normal is `(v1 - v2) x (v2 - v3)`; it is negated when it points
/// against the centroid direction, which makes it outward-facing for any
/// star-shaped mesh around the origin. Returns `None` for a degenerate face.
#[must_use]
pub fn face_normal(v1: DVec3, v2: DVec3, v3: DVec3) -> Option<DVec3> {
    let mut normal = (v1 - v2).cross(v2 - v3);
    let magnitude = normal.length();
    if magnitude < DEGENERATE_EPSILON {
        return None;
    }
    let centroid = (v1 + v2 + v3) / 3.0;
    if normal.dot(centroid) < 0.0 {
        normal = -normal;
    }
    Some(normal / magnitude)
}

/// One unit normal per face of `mesh`, in face order.
///
/// Fails on the first degenerate face.
pub fn compute_face_normals(mesh: &Mesh) -> Result<Vec<DVec3>, GeometryError> {
    (0..mesh.face_count())
        .map(|i| {
            let [v1, v2, v3] = mesh.face_positions(i);
            face_normal(v1, v2, v3).ok_or_else(|| GeometryError::DegenerateFace {
                face: i,
                magnitude: (v1 - v2).cross(v2 - v3).length(),
            })
        })
        .collect()
}
