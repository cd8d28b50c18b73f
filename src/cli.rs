//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use crate::config::GeneralConfig;
use clap::Parser;
use std::path::PathBuf;

/// Songci - segmentation statistics for classical Chinese ci poetry
///
/// Segments every line of a poetry corpus, counts characters, words,
/// authors, forms and part-of-speech tags, and caches the result.
///
/// Examples:
///   songci --source ./chinese-poetry/ci
///   songci --source ./ci --cache-dir ./cache --format json --output stats.json
///   songci --source ./ci --rebuild --no-hmm
///   songci --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Directory containing the corpus JSON files
    ///
    /// Each file holds a JSON array of poems with `author`, `rhythmic`
    /// and `paragraphs` fields. Can also be set in .songci.toml.
    #[arg(short, long, value_name = "DIR")]
    pub source: Option<PathBuf>,

    /// Directory for the cached segmentation result
    ///
    /// Created if missing. An existing cache is reused as-is.
    #[arg(long, value_name = "DIR", env = "SONGCI_CACHE_DIR")]
    pub cache_dir: Option<PathBuf>,

    /// Output file path for the report
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format (markdown, json)
    #[arg(long, default_value = "markdown", value_name = "FORMAT")]
    pub format: OutputFormat,

    /// Number of rows in each ranking table of the report
    #[arg(long, value_name = "COUNT")]
    pub top: Option<usize>,

    /// File extensions to read from the corpus directory (comma-separated)
    ///
    /// Example: --extensions json
    #[arg(long, value_name = "EXTS", value_delimiter = ',')]
    pub extensions: Option<Vec<String>>,

    /// Maximum number of corpus files to read
    #[arg(long, value_name = "COUNT")]
    pub max_files: Option<usize>,

    /// Disable the HMM model for out-of-dictionary words
    #[arg(long)]
    pub no_hmm: bool,

    /// Delete the cached result before aggregating
    #[arg(long)]
    pub rebuild: bool,

    /// Skip writing the report
    #[arg(long)]
    pub no_report: bool,

    /// Path to configuration file
    ///
    /// If not specified, looks for .songci.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long)]
    pub quiet: bool,

    /// Generate a default .songci.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

/// Output format for the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Markdown format (default)
    #[default]
    Markdown,
    /// JSON format
    Json,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        if self.init_config {
            return Ok(());
        }

        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        if self.top == Some(0) {
            return Err("Top must be at least 1".to_string());
        }

        if self.max_files == Some(0) {
            return Err("Max files must be at least 1".to_string());
        }

        if let Some(ref source) = self.source {
            if !source.exists() {
                return Err(format!(
                    "Source directory does not exist: {}",
                    source.display()
                ));
            }
            if !source.is_dir() {
                return Err(format!(
                    "Source path is not a directory: {}",
                    source.display()
                ));
            }
        }

        Ok(())
    }

    /// Returns the log level from the flags and the `[general]` config.
    ///
    /// `--quiet` wins over a verbose config file.
    pub fn log_level(&self, general: &GeneralConfig) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose || general.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn make_args() -> Args {
        Args {
            source: None,
            cache_dir: None,
            output: None,
            format: OutputFormat::Markdown,
            top: None,
            extensions: None,
            max_files: None,
            no_hmm: false,
            rebuild: false,
            no_report: false,
            config: None,
            verbose: false,
            quiet: false,
            init_config: false,
        }
    }

    #[test]
    fn test_parse_flags() {
        let args = Args::parse_from([
            "songci",
            "--source",
            "ci",
            "--format",
            "json",
            "--extensions",
            "json,txt",
            "--rebuild",
        ]);
        assert_eq!(args.source, Some(PathBuf::from("ci")));
        assert_eq!(args.format, OutputFormat::Json);
        assert_eq!(
            args.extensions,
            Some(vec!["json".to_string(), "txt".to_string()])
        );
        assert!(args.rebuild);
        assert!(!args.no_hmm);
    }

    #[test]
    fn test_validation_missing_source() {
        let mut args = make_args();
        args.source = Some(PathBuf::from("/definitely/not/here"));
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validation_source_directory() {
        let dir = TempDir::new().unwrap();
        let mut args = make_args();
        args.source = Some(dir.path().to_path_buf());
        assert!(args.validate().is_ok());

        let file = dir.path().join("ci.json");
        std::fs::write(&file, "[]").unwrap();
        args.source = Some(file);
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validation_conflicting_options() {
        let mut args = make_args();
        args.verbose = true;
        args.quiet = true;
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validation_zero_top() {
        let mut args = make_args();
        args.top = Some(0);
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_log_level() {
        let general = GeneralConfig::default();
        let mut args = make_args();
        assert_eq!(args.log_level(&general), tracing::Level::INFO);

        args.verbose = true;
        assert_eq!(args.log_level(&general), tracing::Level::DEBUG);

        args.verbose = false;
        args.quiet = true;
        assert_eq!(args.log_level(&general), tracing::Level::ERROR);
    }
}
