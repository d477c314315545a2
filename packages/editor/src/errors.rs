//! Error types for the editor

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Shape error: {0}")]
    Shape(#[from] stencil_tree::ShapeError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid key combo: {0:?}")]
    InvalidKeyCombo(String),
}

impl EditorError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        EditorError::Io {
            path: path.into(),
            source,
        }
    }
}
