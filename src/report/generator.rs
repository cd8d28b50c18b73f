//! Statistics report generation.
//!
//! This module turns an aggregation result into Markdown or JSON
//! reports with summary numbers and ranking tables.

use crate::analysis::{tag_distribution, top_n};
use crate::models::{AggregationResult, CorpusSummary, RankedEntry, Report, ReportMetadata};
use anyhow::Result;

/// Build a report with `top` rows per ranking table.
pub fn build_report(result: &AggregationResult, metadata: ReportMetadata, top: usize) -> Report {
    let ranked = |entries: Vec<(String, u64)>| -> Vec<RankedEntry> {
        entries
            .into_iter()
            .map(|(key, count)| RankedEntry::new(key, count))
            .collect()
    };

    let top_characters = top_n(&result.character_counts, top)
        .into_iter()
        .map(|(c, count)| RankedEntry::new(c.to_string(), count))
        .collect();

    let mut tags = tag_distribution(result);
    tags.truncate(top);

    Report {
        metadata,
        summary: CorpusSummary::from_result(result),
        top_characters,
        top_words: ranked(top_n(&result.word_counts, top)),
        top_authors: ranked(top_n(&result.author_counts, top)),
        top_forms: ranked(top_n(&result.form_counts, top)),
        tags: ranked(tags),
    }
}

/// Generate a complete Markdown report.
pub fn generate_markdown_report(report: &Report) -> String {
    let mut output = String::new();

    output.push_str("# Songci Corpus Report\n\n");
    output.push_str(&generate_metadata_section(&report.metadata));
    output.push_str(&generate_summary_section(&report.summary));
    output.push_str(&generate_ranking_section(
        "Top Characters",
        "Character",
        &report.top_characters,
    ));
    output.push_str(&generate_ranking_section("Top Words", "Word", &report.top_words));
    output.push_str(&generate_ranking_section(
        "Top Authors",
        "Author",
        &report.top_authors,
    ));
    output.push_str(&generate_ranking_section(
        "Top Forms",
        "Form",
        &report.top_forms,
    ));
    output.push_str(&generate_ranking_section(
        "Part-of-Speech Tags",
        "Tag",
        &report.tags,
    ));
    output.push_str(&generate_footer());

    output
}

/// Generate the metadata section.
fn generate_metadata_section(metadata: &ReportMetadata) -> String {
    let mut section = String::new();

    section.push_str("## Metadata\n\n");
    section.push_str(&format!("- **Corpus:** `{}`\n", metadata.source_dir));
    section.push_str(&format!("- **Cache:** `{}`\n", metadata.cache_path));
    section.push_str(&format!(
        "- **Served From Cache:** {}\n",
        if metadata.from_cache { "yes" } else { "no" }
    ));
    section.push_str(&format!(
        "- **Generated:** {}\n",
        metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    section.push_str(&format!(
        "- **Duration:** {:.1}s\n",
        metadata.duration_seconds
    ));
    section.push('\n');

    section
}

/// Generate the summary section.
fn generate_summary_section(summary: &CorpusSummary) -> String {
    let mut section = String::new();

    section.push_str("## Summary\n\n");
    section.push_str("| Poems | Lines | Characters | Words |\n");
    section.push_str("|:---:|:---:|:---:|:---:|\n");
    section.push_str(&format!(
        "| {} | {} | {} | {} |\n\n",
        summary.total_poems, summary.total_lines, summary.total_characters, summary.total_words
    ));

    section.push_str("| Distinct | Count |\n");
    section.push_str("|:---|:---:|\n");
    section.push_str(&format!("| Characters | {} |\n", summary.distinct_characters));
    section.push_str(&format!("| Words | {} |\n", summary.distinct_words));
    section.push_str(&format!("| Authors | {} |\n", summary.distinct_authors));
    section.push_str(&format!("| Forms | {} |\n", summary.distinct_forms));
    section.push_str(&format!("| Tags | {} |\n", summary.distinct_tags));
    section.push('\n');

    section
}

/// Generate one ranking table; empty rankings produce nothing.
fn generate_ranking_section(title: &str, column: &str, entries: &[RankedEntry]) -> String {
    if entries.is_empty() {
        return String::new();
    }

    let mut section = String::new();

    section.push_str(&format!("## {}\n\n", title));
    section.push_str(&format!("| # | {} | Count |\n", column));
    section.push_str("|:---:|:---|:---:|\n");

    for (i, entry) in entries.iter().enumerate() {
        section.push_str(&format!("| {} | {} | {} |\n", i + 1, entry.key, entry.count));
    }
    section.push('\n');

    section
}

fn generate_footer() -> String {
    "---\n\n*Report generated by songci*\n".to_string()
}

/// Generate a JSON report.
pub fn generate_json_report(report: &Report) -> Result<String> {
    serde_json::to_string_pretty(report).map_err(Into::into)
}
