//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.songci.toml` files.

use crate::cli::OutputFormat;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the configuration file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = ".songci.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Corpus and cache locations.
    #[serde(default)]
    pub corpus: CorpusConfig,

    /// Segmenter settings.
    #[serde(default)]
    pub segmenter: SegmenterConfig,

    /// Report settings.
    #[serde(default)]
    pub report: ReportConfig,
}

/// General application settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Enable verbose logging by default.
    #[serde(default)]
    pub verbose: bool,
}

/// Where the corpus is read from and where results are cached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorpusConfig {
    /// Directory holding the corpus JSON files.
    #[serde(default)]
    pub source_dir: Option<String>,

    /// Directory holding the cache artifact.
    #[serde(default = "default_cache_dir")]
    pub cache_dir: String,

    /// File extensions to read (empty reads every file).
    #[serde(default)]
    pub extensions: Vec<String>,

    /// Maximum number of corpus files to read.
    #[serde(default)]
    pub max_files: Option<usize>,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            source_dir: None,
            cache_dir: default_cache_dir(),
            extensions: Vec::new(),
            max_files: None,
        }
    }
}

fn default_cache_dir() -> String {
    "cache".to_string()
}

/// Segmenter settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SegmenterConfig {
    /// Use jieba's HMM for out-of-dictionary words.
    #[serde(default = "default_true")]
    pub hmm: bool,
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self { hmm: true }
    }
}

/// Report generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Write a report after aggregation.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Report path; defaults to `songci_report.<ext>` for the chosen format.
    #[serde(default)]
    pub output: Option<String>,

    /// Rows per ranking table.
    #[serde(default = "default_top")]
    pub top: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            output: None,
            top: default_top(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_top() -> usize {
    20
}

impl ReportConfig {
    /// Path the report is written to for `format`.
    pub fn output_path(&self, format: OutputFormat) -> PathBuf {
        match self.output {
            Some(ref output) => PathBuf::from(output),
            None => {
                let ext = match format {
                    OutputFormat::Markdown => "md",
                    OutputFormat::Json => "json",
                };
                PathBuf::from(format!("songci_report.{}", ext))
            }
        }
    }
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(CONFIG_FILE_NAME);

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(ref source) = args.source {
            self.corpus.source_dir = Some(source.display().to_string());
        }
        if let Some(ref cache_dir) = args.cache_dir {
            self.corpus.cache_dir = cache_dir.display().to_string();
        }
        if let Some(ref extensions) = args.extensions {
            self.corpus.extensions = extensions.clone();
        }
        if args.max_files.is_some() {
            self.corpus.max_files = args.max_files;
        }

        if args.no_hmm {
            self.segmenter.hmm = false;
        }

        if let Some(ref output) = args.output {
            self.report.output = Some(output.display().to_string());
        }
        if let Some(top) = args.top {
            self.report.top = top;
        }
        if args.no_report {
            self.report.enabled = false;
        }

        if args.verbose {
            self.general.verbose = true;
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Args;
    use clap::Parser;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.corpus.cache_dir, "cache");
        assert!(config.corpus.source_dir.is_none());
        assert!(config.segmenter.hmm);
        assert_eq!(config.report.top, 20);
        assert!(config.report.enabled);
    }

    #[test]
    fn test_parse_config() {
        let toml_content = r#"
[general]
verbose = true

[corpus]
source_dir = "chinese-poetry/ci"
cache_dir = "data/cache"
extensions = ["json"]

[segmenter]
hmm = false

[report]
output = "stats.json"
top = 50
"#;

        let config: Config = toml::from_str(toml_content).unwrap();
        assert!(config.general.verbose);
        assert_eq!(config.corpus.source_dir.as_deref(), Some("chinese-poetry/ci"));
        assert_eq!(config.corpus.cache_dir, "data/cache");
        assert_eq!(config.corpus.extensions, vec!["json"]);
        assert!(!config.segmenter.hmm);
        assert_eq!(config.report.output.as_deref(), Some("stats.json"));
        assert_eq!(config.report.top, 50);
        assert!(config.report.enabled);
    }

    #[test]
    fn test_merge_with_args_overrides() {
        let mut config: Config = toml::from_str(
            r#"
[corpus]
source_dir = "from-config"
cache_dir = "config-cache"

[report]
top = 5
"#,
        )
        .unwrap();

        let args = Args::parse_from([
            "songci",
            "--source",
            "from-cli",
            "--no-hmm",
            "--no-report",
        ]);
        config.merge_with_args(&args);

        assert_eq!(config.corpus.source_dir.as_deref(), Some("from-cli"));
        assert_eq!(config.corpus.cache_dir, "config-cache");
        assert!(!config.segmenter.hmm);
        assert!(!config.report.enabled);
        assert_eq!(config.report.top, 5);
    }

    #[test]
    fn test_report_path_follows_format() {
        let report = ReportConfig::default();
        assert_eq!(
            report.output_path(OutputFormat::Markdown),
            PathBuf::from("songci_report.md")
        );
        assert_eq!(
            report.output_path(OutputFormat::Json),
            PathBuf::from("songci_report.json")
        );

        let mut config = Config::default();
        let args = Args::parse_from(["songci", "--format", "json", "--output", "stats.txt"]);
        config.merge_with_args(&args);
        assert_eq!(
            config.report.output_path(args.format),
            PathBuf::from("stats.txt")
        );
    }

    #[test]
    fn test_verbose_from_config_file() {
        let config: Config = toml::from_str("[general]\nverbose = true\n").unwrap();
        let args = Args::parse_from(["songci"]);
        assert_eq!(args.log_level(&config.general), tracing::Level::DEBUG);

        let quiet = Args::parse_from(["songci", "--quiet"]);
        assert_eq!(quiet.log_level(&config.general), tracing::Level::ERROR);
        assert_eq!(
            args.log_level(&GeneralConfig::default()),
            tracing::Level::INFO
        );
    }

    #[test]
    fn test_default_toml_generation() {
        let toml_str = Config::default_toml();
        assert!(!toml_str.is_empty());
        assert!(toml_str.contains("[corpus]"));
        assert!(toml_str.contains("[segmenter]"));
        assert!(toml_str.contains("[report]"));
    }
}
