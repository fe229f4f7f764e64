//! Mesh serialization: the [`MeshWriter`] contract and a Wavefront OBJ writer.

mod error;
mod obj;

pub use error::ExportError;
pub use obj::{ObjOptions, ObjWriter, export_obj};

/// Destination for an assembled triangle mesh.
///
/// `faces` index into `positions` and `normals`, which are parallel arrays.
pub trait MeshWriter {
    fn write(
        &mut self,
        positions: &[[f32; 3]],
        faces: &[[u32; 3]],
        normals: &[[f32; 3]],
    ) -> Result<(), ExportError>;
}
