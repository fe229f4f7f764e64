//! Indexed triangle mesh on (or around) the unit sphere.

use glam::DVec3;

use crate::error::GeometryError;

/// Three vertex indices, counter-clockwise when seen from outside the sphere.
pub type Face = [u32; 3];

/// An indexed triangle mesh.
///
/// Every face index is distinct within its face and resolves into the vertex
/// list. The fields are private so that invariant holds for every value:
/// external geometry goes through [`Mesh::from_parts`].
#[derive(Clone, Debug, PartialEq)]
pub struct Mesh {
    vertices: Vec<DVec3>,
    faces: Vec<Face>,
}

impl Mesh {
    /// Build a mesh from raw parts, validating every face.
    pub fn from_parts(vertices: Vec<DVec3>, faces: Vec<Face>) -> Result<Self, GeometryError> {
        if u32::try_from(vertices.len()).is_err() {
            return Err(GeometryError::TooManyVertices(vertices.len()));
        }
        let vertex_count = vertices.len();
        for (i, &face) in faces.iter().enumerate() {
            let [a, b, c] = face;
            let in_bounds = face.iter().all(|&idx| (idx as usize) < vertex_count);
            if !in_bounds || a == b || b == c || a == c {
                return Err(GeometryError::InvalidFace {
                    face: i,
                    indices: face,
                    vertex_count,
                });
            }
        }
        Ok(Self { vertices, faces })
    }

    /// Construct without validation. Callers inside the crate guarantee the
    /// index invariant.
    pub(crate) fn from_parts_unchecked(vertices: Vec<DVec3>, faces: Vec<Face>) -> Self {
        debug_assert!(
            faces
                .iter()
                .flatten()
                .all(|&idx| (idx as usize) < vertices.len())
        );
        Self { vertices, faces }
    }

    /// Same connectivity, new vertex positions.
    pub(crate) fn with_vertices(&self, vertices: Vec<DVec3>) -> Self {
        assert_eq!(
            vertices.len(),
            self.vertices.len(),
            "replacement vertex list must keep the vertex count"
        );
        Self {
            vertices,
            faces: self.faces.clone(),
        }
    }

    pub fn vertices(&self) -> &[DVec3] {
        &self.vertices
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// The three corner positions of face `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i >= face_count()`.
    pub fn face_positions(&self, i: usize) -> [DVec3; 3] {
        let [a, b, c] = self.faces[i];
        [
            self.vertices[a as usize],
            self.vertices[b as usize],
            self.vertices[c as usize],
        ]
    }

    /// Largest distance of any vertex from the unit sphere.
    pub fn max_unit_deviation(&self) -> f64 {
        self.vertices
            .iter()
            .map(|v| (v.length() - 1.0).abs())
            .fold(0.0, f64::max)
    }

    /// Consume the mesh, returning its vertices and faces.
    pub fn into_parts(self) -> (Vec<DVec3>, Vec<Face>) {
        (self.vertices, self.faces)
    }
}
