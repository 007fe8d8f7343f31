use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Error type shared by the diff engine and the batch matcher
#[derive(Error, Debug)]
pub enum SnapDiffError {
    #[error("Failed to decode {}: {message}", .path.display())]
    Decode { path: PathBuf, message: String },

    #[error(
        "Image size mismatch: {expected_width}x{expected_height} vs {actual_width}x{actual_height}"
    )]
    SizeMismatch {
        expected_width: u32,
        expected_height: u32,
        actual_width: u32,
        actual_height: u32,
    },

    #[error("Invalid raster: {0}")]
    InvalidRaster(String),

    #[error("Failed to encode {}: {message}", .path.display())]
    Encode { path: PathBuf, message: String },

    #[error("IO error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid arguments: {0}")]
    Argument(String),

    #[error("No reference found for {}", .failure.display())]
    NoMatchFound { failure: PathBuf },
}

/// Coarse error classes used for reporting and propagation decisions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// An input image could not be decoded or does not fit its counterpart
    Input,
    Io,
    Encode,
    Argument,
    NoMatch,
}

impl SnapDiffError {
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        SnapDiffError::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            SnapDiffError::Decode { .. }
            | SnapDiffError::SizeMismatch { .. }
            | SnapDiffError::InvalidRaster(_) => ErrorKind::Input,
            SnapDiffError::Encode { .. } => ErrorKind::Encode,
            SnapDiffError::Io { .. } => ErrorKind::Io,
            SnapDiffError::Argument(_) => ErrorKind::Argument,
            SnapDiffError::NoMatchFound { .. } => ErrorKind::NoMatch,
        }
    }
}
