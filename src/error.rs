//! Error types for corpus aggregation.
//!
//! Every failure carries the path it happened on. Nothing in the
//! aggregation pipeline recovers from these; they propagate to `main`.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while reading the corpus or the cache artifact.
#[derive(Debug, Error)]
pub enum CorpusError {
    /// Missing or unreadable directory, or a file that cannot be read/written.
    #[error("Filesystem error at {path}: {source}")]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Corpus file is not valid JSON or a record lacks an expected field.
    #[error("Failed to parse corpus file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Cache artifact could not be encoded or decoded.
    #[error("Cache serialization error at {path}: {source}")]
    Serialization {
        path: PathBuf,
        #[source]
        source: bincode::Error,
    },
}

impl CorpusError {
    pub fn filesystem(path: &Path, source: std::io::Error) -> Self {
        Self::Filesystem {
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn parse(path: &Path, source: serde_json::Error) -> Self {
        Self::Parse {
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn serialization(path: &Path, source: bincode::Error) -> Self {
        Self::Serialization {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Result alias for the aggregation pipeline.
pub type Result<T> = std::result::Result<T, CorpusError>;
