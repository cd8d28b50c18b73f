//! On-disk cache of aggregation results.
//!
//! The artifact is a bincode encoding of [`AggregationResult`]. It is not
//! meant to be portable between versions of this tool.

use crate::error::{CorpusError, Result};
use crate::models::AggregationResult;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

/// File name of the cache artifact inside the cache directory.
pub const CACHE_FILE_NAME: &str = "cut_result.bin";

/// Full path of the cache artifact for a cache directory.
pub fn cache_path(cache_dir: &Path) -> PathBuf {
    cache_dir.join(CACHE_FILE_NAME)
}

/// Create the cache directory if it does not exist yet.
///
/// Only the last path component is created; a missing parent is an error.
pub fn ensure_dir(cache_dir: &Path) -> Result<()> {
    if cache_dir.exists() {
        return Ok(());
    }
    debug!("Creating cache directory: {}", cache_dir.display());
    fs::create_dir(cache_dir).map_err(|e| CorpusError::filesystem(cache_dir, e))
}

/// Load a previously stored result.
pub fn load(path: &Path) -> Result<AggregationResult> {
    let file = File::open(path).map_err(|e| CorpusError::filesystem(path, e))?;
    let result = bincode::deserialize_from(BufReader::new(file))
        .map_err(|e| CorpusError::serialization(path, e))?;
    debug!("Loaded cached result from {}", path.display());
    Ok(result)
}

/// Store a result, replacing any existing artifact.
///
/// The encoding goes to a temporary file in the same directory, which is
/// then renamed over `path`. Readers never see a partial artifact.
pub fn store(path: &Path, result: &AggregationResult) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let tmp = NamedTempFile::new_in(dir).map_err(|e| CorpusError::filesystem(dir, e))?;

    let mut writer = BufWriter::new(tmp);
    bincode::serialize_into(&mut writer, result)
        .map_err(|e| CorpusError::serialization(path, e))?;
    let tmp = writer
        .into_inner()
        .map_err(|e| CorpusError::filesystem(path, e.into_error()))?;

    tmp.persist(path)
        .map_err(|e| CorpusError::filesystem(path, e.error))?;
    debug!("Stored result to {}", path.display());
    Ok(())
}

/// Delete the artifact. Returns whether a file was removed.
pub fn remove(path: &Path) -> Result<bool> {
    if !path.exists() {
        return Ok(false);
    }
    fs::remove_file(path).map_err(|e| CorpusError::filesystem(path, e))?;
    Ok(true)
}
