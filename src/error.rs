use std::path::PathBuf;
use thiserror::Error;

/// The main error type for moving-mnist operations.
#[derive(Debug, Error)]
pub enum MovingMnistError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to download {url}: {message}")]
    Download { url: String, message: String },

    #[error("Failed to open array file {path}: {source}")]
    ArrayOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to deserialize array from {path}: {source}")]
    ArrayDeserialize {
        path: PathBuf,
        #[source]
        source: ndarray_npy::ReadNpyError,
    },

    #[error("Unexpected array shape in {path}: expected {expected}, found {found:?}")]
    ArrayShape {
        path: PathBuf,
        expected: String,
        found: Vec<usize>,
    },

    #[error("Failed to create output file {path}: {source}")]
    OutputCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write shard {path}: {source}")]
    ShardWrite {
        path: PathBuf,
        #[source]
        source: ndarray_npy::WriteNpyError,
    },

    #[error("Failed to write dataset info to {path}: {source}")]
    InfoWrite {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

impl MovingMnistError {
    /// Whether this error came from reading the local array file
    /// (missing, truncated, or of unexpected rank/dtype/dims).
    pub fn is_deserialization(&self) -> bool {
        matches!(
            self,
            Self::ArrayOpen { .. } | Self::ArrayDeserialize { .. } | Self::ArrayShape { .. }
        )
    }

    /// Whether this error was reported by a downloader.
    pub fn is_download(&self) -> bool {
        matches!(self, Self::Download { .. })
    }
}
