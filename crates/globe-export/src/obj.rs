//! Wavefront OBJ output.
//!
//! Each corner becomes one `v` and one `vn` line; faces reference both with
//! the same 1-based index (`f a//a b//b c//c`). Optional vertex colors follow
//! the position on the `v` line (`v x y z r g b`).

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use globe_mesh::AssembledMesh;

use crate::{ExportError, MeshWriter};

/// Options for OBJ export.
#[derive(Clone, Debug, PartialEq)]
pub struct ObjOptions {
    /// Name written on the `o` line.
    pub object_name: String,
    /// Append per-corner RGB to each `v` line.
    pub vertex_colors: bool,
}

impl Default for ObjOptions {
    fn default() -> Self {
        Self {
            object_name: "globe".to_string(),
            vertex_colors: false,
        }
    }
}

/// Writes OBJ text to any [`Write`] sink.
pub struct ObjWriter<'a, W: Write> {
    out: W,
    object_name: String,
    colors: Option<&'a [[f32; 3]]>,
}

impl<'a, W: Write> ObjWriter<'a, W> {
    pub fn new(out: W, object_name: impl Into<String>) -> Self {
        Self {
            out,
            object_name: object_name.into(),
            colors: None,
        }
    }

    /// Emit `colors[i]` after position `i`.
    pub fn with_colors(mut self, colors: &'a [[f32; 3]]) -> Self {
        self.colors = Some(colors);
        self
    }

    /// Return the underlying sink.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> MeshWriter for ObjWriter<'_, W> {
    fn write(
        &mut self,
        positions: &[[f32; 3]],
        faces: &[[u32; 3]],
        normals: &[[f32; 3]],
    ) -> Result<(), ExportError> {
        if normals.len() != positions.len() {
            return Err(ExportError::LengthMismatch {
                positions: positions.len(),
                normals: normals.len(),
            });
        }
        if let Some(colors) = self.colors
            && colors.len() != positions.len()
        {
            return Err(ExportError::ColorCountMismatch {
                positions: positions.len(),
                colors: colors.len(),
            });
        }
        for (f, face) in faces.iter().enumerate() {
            if let Some(&index) = face.iter().find(|&&i| i as usize >= positions.len()) {
                return Err(ExportError::IndexOutOfRange {
                    face: f,
                    index,
                    count: positions.len(),
                });
            }
        }

        let out = &mut self.out;
        writeln!(
            out,
            "# {} vertices, {} faces",
            positions.len(),
            faces.len()
        )?;
        writeln!(out, "o {}", self.object_name)?;

        match self.colors {
            Some(colors) => {
                for (p, c) in positions.iter().zip(colors) {
                    writeln!(
                        out,
                        "v {} {} {} {} {} {}",
                        p[0], p[1], p[2], c[0], c[1], c[2]
                    )?;
                }
            }
            None => {
                for p in positions {
                    writeln!(out, "v {} {} {}", p[0], p[1], p[2])?;
                }
            }
        }

        for n in normals {
            writeln!(out, "vn {} {} {}", n[0], n[1], n[2])?;
        }

        for face in faces {
            let [a, b, c] = face.map(|i| i + 1);
            writeln!(out, "f {a}//{a} {b}//{b} {c}//{c}")?;
        }

        out.flush()?;
        Ok(())
    }
}

/// Write `mesh` to `path` as OBJ.
pub fn export_obj(
    path: &Path,
    mesh: &AssembledMesh,
    options: &ObjOptions,
) -> Result<(), ExportError> {
    let colors = if options.vertex_colors {
        Some(mesh.colors.as_deref().ok_or(ExportError::MissingColors)?)
    } else {
        None
    };

    let with_path = |source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(with_path)?;
    let mut writer = ObjWriter::new(BufWriter::new(file), options.object_name.clone());
    if let Some(colors) = colors {
        writer = writer.with_colors(colors);
    }

    let faces: Vec<[u32; 3]> = mesh.faces().collect();
    writer
        .write(&mesh.positions, &faces, &mesh.normals)
        .map_err(|e| match e {
            ExportError::Sink(source) => with_path(source),
            other => other,
        })?;

    tracing::info!(
        path = %path.display(),
        faces = faces.len(),
        "Exported OBJ mesh"
    );
    Ok(())
}
