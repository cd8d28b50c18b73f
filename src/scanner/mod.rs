//! Corpus file discovery.
//!
//! Lists the files of a corpus directory in the order the filesystem
//! returns them. Subdirectories are not descended into.

use crate::error::{CorpusError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Configuration for corpus scanning.
#[derive(Debug, Clone, Default)]
pub struct ScanConfig {
    /// File extensions to include (empty means every file).
    pub extensions: Vec<String>,
    /// Maximum number of files to return.
    pub max_files: Option<usize>,
}

impl From<&crate::config::CorpusConfig> for ScanConfig {
    fn from(config: &crate::config::CorpusConfig) -> Self {
        Self {
            extensions: config.extensions.clone(),
            max_files: config.max_files,
        }
    }
}

/// A corpus file found by the scanner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorpusFile {
    /// Full path to the file.
    pub path: PathBuf,
    /// File size in bytes
    pub size: u64,
}

/// Scanner over one corpus directory.
pub struct CorpusScanner {
    config: ScanConfig,
    root: PathBuf,
}

impl CorpusScanner {
    /// Create a new corpus scanner.
    pub fn new(root: impl Into<PathBuf>, config: ScanConfig) -> Self {
        Self {
            config,
            root: root.into(),
        }
    }

    /// List the corpus files in directory-listing order.
    ///
    /// Fails if the directory is missing or unreadable.
    pub fn scan(&self) -> Result<Vec<CorpusFile>> {
        let entries =
            fs::read_dir(&self.root).map_err(|e| CorpusError::filesystem(&self.root, e))?;

        let mut files = Vec::new();
        for entry in entries {
            if let Some(max) = self.config.max_files {
                if files.len() >= max {
                    break;
                }
            }

            let entry = entry.map_err(|e| CorpusError::filesystem(&self.root, e))?;
            let path = entry.path();
            let metadata = fs::metadata(&path).map_err(|e| CorpusError::filesystem(&path, e))?;

            if !metadata.is_file() {
                debug!("Skipping non-file entry: {}", path.display());
                continue;
            }

            if !self.matches(&path) {
                debug!("Skipping filtered file: {}", path.display());
                continue;
            }

            files.push(CorpusFile {
                path,
                size: metadata.len(),
            });
        }

        debug!("Found {} corpus files in {}", files.len(), self.root.display());
        Ok(files)
    }

    /// Check if a file passes the extension filter.
    pub fn matches(&self, path: &Path) -> bool {
        if self.config.extensions.is_empty() {
            return true;
        }

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        self.config
            .extensions
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(ext))
    }
}
