use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PdfError {
    #[error("PDF not found: {0}")]
    NotFound(PathBuf),

    #[error("pdf error: {0}")]
    Lopdf(#[from] lopdf::Error),

    #[error("failed to write {path}: {message}")]
    Write { path: PathBuf, message: String },
}

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("invalid generation options: {0}")]
    Config(String),

    #[error("io error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Pdf(#[from] PdfError),
}
