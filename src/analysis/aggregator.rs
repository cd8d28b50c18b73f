//! Corpus aggregation.
//!
//! Walks the corpus directory, segments every line, and accumulates the
//! counters of [`AggregationResult`]. The finished result is cached; a
//! present cache artifact is returned without looking at the corpus.

use crate::cache;
use crate::error::{CorpusError, Result};
use crate::models::{is_chinese_word, AggregationResult, PoemRecord, LINE_TERMINATOR};
use crate::scanner::{CorpusFile, CorpusScanner, ScanConfig};
use crate::segmenter::Segmenter;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Builds corpus statistics with a given segmenter.
pub struct CorpusAggregator<S: Segmenter> {
    segmenter: S,
    scan_config: ScanConfig,
    show_progress: bool,
}

impl<S: Segmenter> CorpusAggregator<S> {
    /// Create an aggregator that reads every file of the corpus directory.
    pub fn new(segmenter: S) -> Self {
        Self {
            segmenter,
            scan_config: ScanConfig::default(),
            show_progress: false,
        }
    }

    /// Restrict which corpus files are read.
    pub fn with_scan_config(mut self, scan_config: ScanConfig) -> Self {
        self.scan_config = scan_config;
        self
    }

    /// Show a progress bar over corpus files.
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Path of the cache artifact inside `cache_dir`.
    pub fn cache_path(cache_dir: &Path) -> PathBuf {
        cache::cache_path(cache_dir)
    }

    /// Aggregate the corpus in `source_dir`, caching under `cache_dir`.
    ///
    /// If the cache artifact already exists it is returned as-is, even if
    /// the corpus has changed since it was written.
    pub fn aggregate(&self, source_dir: &Path, cache_dir: &Path) -> Result<AggregationResult> {
        cache::ensure_dir(cache_dir)?;
        let target = Self::cache_path(cache_dir);

        if target.exists() {
            println!("load existed cut result.");
            info!("Loading cached result from {}", target.display());
            return cache::load(&target);
        }

        println!("begin cutting poetry...");
        let scanner = CorpusScanner::new(source_dir, self.scan_config.clone());
        let files = scanner.scan()?;
        info!(
            "Segmenting {} corpus files ({} bytes) from {}",
            files.len(),
            files.iter().map(|f| f.size).sum::<u64>(),
            source_dir.display()
        );

        let result = self.build(&files)?;

        cache::store(&target, &result)?;
        info!("Cached result at {}", target.display());
        Ok(result)
    }

    /// Aggregate an explicit list of files, in order, without caching.
    pub fn build(&self, files: &[CorpusFile]) -> Result<AggregationResult> {
        let progress = self.progress_bar(files.len() as u64);
        let mut result = AggregationResult::new();

        for file in files {
            if let Some(ref pb) = progress {
                pb.set_message(file_label(&file.path));
            }

            let poems = read_poems(&file.path)?;
            debug!("{}: {} poems", file.path.display(), poems.len());
            for poem in &poems {
                self.ingest_poem(&mut result, poem);
            }

            if let Some(ref pb) = progress {
                pb.inc(1);
            }
        }

        if let Some(pb) = progress {
            pb.finish_with_message("Segmentation complete");
        }

        Ok(result)
    }

    /// Fold one poem into `result`.
    pub fn ingest_poem(&self, result: &mut AggregationResult, poem: &PoemRecord) {
        result.record_poem(&poem.author, &poem.form_name);

        for line in &poem.lines {
            result.record_characters(line);

            let mut pieces: Vec<String> = Vec::new();
            for tagged in self.segmenter.tag(line) {
                if !is_chinese_word(&tagged.word) {
                    continue;
                }
                result.record_word(&tagged.word, &tagged.tag);
                pieces.push(tagged.word);
            }
            pieces.push(LINE_TERMINATOR.to_string());

            result.append_author_segment(&poem.author, &pieces);
        }
    }

    fn progress_bar(&self, len: u64) -> Option<ProgressBar> {
        if !self.show_progress {
            return None;
        }

        let pb = ProgressBar::new(len);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-");
        pb.set_style(style);
        Some(pb)
    }
}

/// Read one corpus file as a list of poem records.
pub fn read_poems(path: &Path) -> Result<Vec<PoemRecord>> {
    let content = fs::read_to_string(path).map_err(|e| CorpusError::filesystem(path, e))?;
    serde_json::from_str(&content).map_err(|e| CorpusError::parse(path, e))
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_default()
}
