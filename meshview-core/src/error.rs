//! Error types for mesh loading
use std::path::PathBuf;
use thiserror::Error;

pub type ObjResult<T> = Result<T, ObjError>;

/// Reasons a mesh could not be loaded. Every variant is fatal for the load.
#[derive(Debug, Error)]
pub enum ObjError {
    #[error("failed to read {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("line {line}: invalid number {token:?}")]
    InvalidNumber { line: usize, token: String },

    #[error("line {line}: `{record}` record is missing a value")]
    MissingValue { line: usize, record: &'static str },

    /// Malformed corner, or a zero/negative (relative) index.
    #[error("line {line}: unsupported face token {token:?}")]
    InvalidFaceToken { line: usize, token: String },
}
