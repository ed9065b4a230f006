// File: src/error.rs
use std::path::PathBuf;

/// Errors raised by the layers around the transliteration core.
///
/// The core functions themselves never fail; they return an empty slug or
/// `None` instead.
#[derive(Debug, thiserror::Error)]
pub enum SlugError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to encode site snapshot: {0}")]
    Encode(#[from] bincode::Error),

    #[error("Invalid config file {path:?}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    #[error("Update of post {id} rejected: {reason}")]
    UpdateRejected { id: u64, reason: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, SlugError>;
