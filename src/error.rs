//! Error types for export operations.

use thiserror::Error;

/// Errors that can occur while building an export document.
#[derive(Error, Debug)]
pub enum Error {
    #[error("post not found: {0}")]
    PostNotFound(u64),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("layout conversion failed: {0}")]
    Layout(String),

    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),
}

pub type Result<T> = std::result::Result<T, Error>;
