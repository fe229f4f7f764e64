//! Export error types.

use std::path::PathBuf;

/// Errors that can occur while writing a mesh.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// Creating or writing the output file failed.
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing to a sink with no file path failed.
    #[error("failed to write mesh: {0}")]
    Sink(#[from] std::io::Error),

    /// Positions and normals do not pair up.
    #[error("{positions} positions but {normals} normals")]
    LengthMismatch { positions: usize, normals: usize },

    /// Positions and vertex colors do not pair up.
    #[error("{positions} positions but {colors} colors")]
    ColorCountMismatch { positions: usize, colors: usize },

    /// A face refers past the end of the position list.
    #[error("face {face} references corner {index} of {count}")]
    IndexOutOfRange {
        face: usize,
        index: u32,
        count: usize,
    },

    /// Colors were requested but none are attached to the mesh.
    #[error("vertex colors requested but the mesh has no colors")]
    MissingColors,
}
