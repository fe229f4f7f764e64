//! Flat-shaded, non-indexed expansion of a mesh for export and drawing.

use glam::DVec3;

use crate::error::GeometryError;
use crate::mesh::Mesh;
use crate::palette::ElevationPalette;

/// A mesh with one position and one normal per triangle corner.
///
/// Corner `3 * f + k` is corner `k` of face `f`; no corner is shared between
/// faces, so every corner carries its face's normal. `indices` is the
/// sequence `0..corner_count`, usable as a triangle list directly.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AssembledMesh {
    /// Corner positions.
    pub positions: Vec<[f32; 3]>,
    /// Corner normals (the owning face's normal).
    pub normals: Vec<[f32; 3]>,
    /// Sequential corner indices, three per face.
    pub indices: Vec<u32>,
    /// Optional per-corner RGB colors in `[0, 1]`.
    pub colors: Option<Vec<[f32; 3]>>,
}

impl AssembledMesh {
    pub fn corner_count(&self) -> usize {
        self.positions.len()
    }

    pub fn face_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Triangles as index triples.
    pub fn faces(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }

    /// Color every corner by its distance from the origin.
    ///
    /// Radii are taken from `mesh`, the `f64` source this was assembled
    /// from, so corners exactly on the sea-level sphere stay sea.
    pub fn apply_palette(
        &mut self,
        mesh: &Mesh,
        palette: &ElevationPalette,
    ) -> Result<(), GeometryError> {
        if mesh.face_count() * 3 != self.corner_count() {
            return Err(GeometryError::CornerCountMismatch {
                faces: mesh.face_count(),
                corners: self.corner_count(),
            });
        }
        let colors = (0..mesh.face_count())
            .flat_map(|f| mesh.face_positions(f))
            .map(|corner| palette.color_for_radius(corner.length()))
            .collect();
        self.colors = Some(colors);
        Ok(())
    }

    /// Position buffer as raw bytes for GPU upload.
    pub fn position_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.positions)
    }

    /// Normal buffer as raw bytes for GPU upload.
    pub fn normal_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.normals)
    }

    /// Index buffer as raw bytes for GPU upload.
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}

fn to_f32(v: DVec3) -> [f32; 3] {
    v.as_vec3().to_array()
}

/// Expand `mesh` into per-corner arrays carrying `normals[f]` at each corner
/// of face `f`.
pub fn assemble(mesh: &Mesh, normals: &[DVec3]) -> Result<AssembledMesh, GeometryError> {
    if normals.len() != mesh.face_count() {
        return Err(GeometryError::NormalCountMismatch {
            faces: mesh.face_count(),
            normals: normals.len(),
        });
    }

    let corner_count = mesh.face_count() * 3;
    if u32::try_from(corner_count).is_err() {
        return Err(GeometryError::TooManyVertices(corner_count));
    }

    let mut positions = Vec::with_capacity(corner_count);
    let mut corner_normals = Vec::with_capacity(corner_count);
    for (i, &normal) in normals.iter().enumerate() {
        let n = to_f32(normal);
        for corner in mesh.face_positions(i) {
            positions.push(to_f32(corner));
            corner_normals.push(n);
        }
    }

    Ok(AssembledMesh {
        positions,
        normals: corner_normals,
        indices: (0..corner_count as u32).collect(),
        colors: None,
    })
}
