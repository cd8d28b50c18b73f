//! Songci - segmentation statistics for classical Chinese ci poetry
//!
//! A CLI tool that segments a corpus of poems with jieba, counts
//! characters, words, authors, forms and part-of-speech tags, and caches
//! the aggregated result on disk.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Runtime error (missing corpus, malformed file, cache failure, etc.)

mod analysis;
mod cache;
mod cli;
mod config;
mod error;
mod models;
mod report;
mod scanner;
mod segmenter;

use analysis::CorpusAggregator;
use anyhow::{Context, Result};
use chrono::Utc;
use cli::{Args, OutputFormat};
use config::{Config, CONFIG_FILE_NAME};
use models::{CorpusSummary, ReportMetadata};
use segmenter::JiebaSegmenter;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, error, info};
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<()> {
    let args = Args::parse_args();

    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    // Config is needed before logging: `[general] verbose` sets the level
    let config = match load_config(&args) {
        Ok(mut config) => {
            config.merge_with_args(&args);
            config
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    };

    init_logging(args.log_level(&config.general));

    info!("Songci v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    if let Err(e) = run(args, config) {
        error!("Run failed: {:#}", e);
        eprintln!("\n❌ Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

/// Handle --init-config: generate a default .songci.toml.
fn handle_init_config() -> Result<()> {
    let path = std::path::Path::new(CONFIG_FILE_NAME);

    if path.exists() {
        eprintln!("⚠️  {} already exists. Remove it first or edit it manually.", CONFIG_FILE_NAME);
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content)
        .with_context(|| format!("Failed to write {}", CONFIG_FILE_NAME))?;

    println!("✅ Created {} with default settings.", CONFIG_FILE_NAME);
    Ok(())
}

/// Initialize logging based on verbosity settings.
fn init_logging(level: tracing::Level) {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }
}

/// Aggregate the corpus and write the report.
fn run(args: Args, config: Config) -> Result<()> {
    let start_time = Instant::now();

    let source_dir = config
        .corpus
        .source_dir
        .as_ref()
        .map(PathBuf::from)
        .context("No corpus directory given; pass --source or set corpus.source_dir")?;
    let cache_dir = PathBuf::from(&config.corpus.cache_dir);
    let cache_path = CorpusAggregator::<JiebaSegmenter>::cache_path(&cache_dir);

    if args.rebuild && cache::remove(&cache_path)? {
        info!("Removed cached result at {}", cache_path.display());
    }
    let from_cache = cache_path.exists();

    println!("📚 Corpus: {}", source_dir.display());
    println!("💾 Cache: {}", cache_path.display());

    let scan_config = scanner::ScanConfig::from(&config.corpus);
    let aggregator = CorpusAggregator::new(JiebaSegmenter::new(config.segmenter.hmm))
        .with_scan_config(scan_config)
        .with_progress(!args.quiet);

    let result = aggregator
        .aggregate(&source_dir, &cache_dir)
        .with_context(|| format!("Failed to aggregate corpus at {}", source_dir.display()))?;

    let duration = start_time.elapsed().as_secs_f64();
    let summary = CorpusSummary::from_result(&result);

    println!("\n📊 Corpus Summary:");
    println!("   Poems: {} | Lines: {}", summary.total_poems, summary.total_lines);
    println!(
        "   Characters: {} ({} distinct)",
        summary.total_characters, summary.distinct_characters
    );
    println!(
        "   Words: {} ({} distinct, {} tags)",
        summary.total_words, summary.distinct_words, summary.distinct_tags
    );
    println!(
        "   Authors: {} | Forms: {}",
        summary.distinct_authors, summary.distinct_forms
    );
    println!("   Duration: {:.1}s", duration);

    if !config.report.enabled {
        debug!("Report disabled");
        return Ok(());
    }

    let metadata = ReportMetadata {
        source_dir: source_dir.display().to_string(),
        cache_path: cache_path.display().to_string(),
        from_cache,
        generated_at: Utc::now(),
        duration_seconds: duration,
    };
    let report = report::build_report(&result, metadata, config.report.top);

    let output = match args.format {
        OutputFormat::Json => report::generate_json_report(&report)?,
        OutputFormat::Markdown => report::generate_markdown_report(&report),
    };

    let output_path = config.report.output_path(args.format);
    std::fs::write(&output_path, &output)
        .with_context(|| format!("Failed to write report to {}", output_path.display()))?;

    println!("\n✅ Done! Report saved to: {}", output_path.display());
    Ok(())
}

/// Load configuration from file or use defaults.
///
/// Runs before the subscriber is installed, so a broken default config
/// is reported on stderr.
fn load_config(args: &Args) -> Result<Config> {
    if let Some(ref config_path) = args.config {
        return Config::load(config_path);
    }

    match Config::load_default() {
        Ok(Some(config)) => Ok(config),
        Ok(None) => Ok(Config::default()),
        Err(e) => {
            eprintln!("⚠️  Failed to load {}: {:#}", CONFIG_FILE_NAME, e);
            Ok(Config::default())
        }
    }
}
