use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("file not found: {0}")]
    NotFound(PathBuf),

    #[error("io error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("missing column {0:?}")]
    MissingColumn(String),

    #[error("row {row}: malformed embedding: {source}")]
    Embedding {
        row: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("row {row}: {source}")]
    Tone {
        row: usize,
        #[source]
        source: clausewise_core::ParseError,
    },
}

impl StoreError {
    pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}
