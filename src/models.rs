//! Data models for the corpus aggregator.
//!
//! This module contains the poem record read from the corpus, the
//! aggregated statistics that get cached, and the CJK predicates used
//! to decide what is counted.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Marker appended after the words of every line in the author text.
pub const LINE_TERMINATOR: &str = "\n";

/// Returns true if `c` lies in the core CJK Unified Ideographs block.
pub fn is_chinese(c: char) -> bool {
    ('\u{4e00}'..='\u{9fff}').contains(&c)
}

/// Returns true if `word` is non-empty and made only of CJK ideographs.
pub fn is_chinese_word(word: &str) -> bool {
    !word.is_empty() && word.chars().all(is_chinese)
}

/// A single poem as stored in the corpus JSON files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoemRecord {
    /// Poet name.
    pub author: String,
    /// Form name (词牌名).
    #[serde(rename = "rhythmic")]
    pub form_name: String,
    /// Text lines in order.
    #[serde(rename = "paragraphs")]
    pub lines: Vec<String>,
}

/// A word produced by the segmenter together with its part-of-speech tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedWord {
    pub word: String,
    pub tag: String,
}

impl TaggedWord {
    pub fn new(word: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            tag: tag.into(),
        }
    }
}

/// Aggregated statistics over the whole corpus.
///
/// This is the value persisted to the cache artifact. Once loaded from
/// the cache it is handed out as-is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregationResult {
    /// Occurrences of each Chinese character.
    pub character_counts: HashMap<char, u64>,
    /// Number of poems per author.
    pub author_counts: HashMap<String, u64>,
    /// Occurrences of each form name.
    pub form_counts: HashMap<String, u64>,
    /// Distinct Chinese words seen.
    pub vocabulary: HashSet<String>,
    /// Occurrences of each word.
    pub word_counts: HashMap<String, u64>,
    /// Word occurrences split by part-of-speech tag.
    pub word_counts_by_tag: HashMap<String, HashMap<String, u64>>,
    /// Segmented text per author, in first-appearance order.
    pub author_text: IndexMap<String, String>,
}

impl AggregationResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one poem for its author and form.
    pub fn record_poem(&mut self, author: &str, form_name: &str) {
        *self.author_counts.entry(author.to_string()).or_insert(0) += 1;
        *self.form_counts.entry(form_name.to_string()).or_insert(0) += 1;
    }

    /// Count every Chinese character of a raw line.
    pub fn record_characters(&mut self, line: &str) {
        for c in line.chars().filter(|c| is_chinese(*c)) {
            *self.character_counts.entry(c).or_insert(0) += 1;
        }
    }

    /// Count one occurrence of `word` under `tag`.
    pub fn record_word(&mut self, word: &str, tag: &str) {
        *self
            .word_counts_by_tag
            .entry(tag.to_string())
            .or_default()
            .entry(word.to_string())
            .or_insert(0) += 1;
        self.vocabulary.insert(word.to_string());
        *self.word_counts.entry(word.to_string()).or_insert(0) += 1;
    }

    /// Append one line's words (already terminated) to the author's text.
    ///
    /// Pieces are joined with single spaces; a non-empty existing text is
    /// separated from the new segment by one more space.
    pub fn append_author_segment<S: AsRef<str>>(&mut self, author: &str, pieces: &[S]) {
        let text = self.author_text.entry(author.to_string()).or_default();
        if !text.is_empty() {
            text.push(' ');
        }
        for (i, piece) in pieces.iter().enumerate() {
            if i > 0 {
                text.push(' ');
            }
            text.push_str(piece.as_ref());
        }
    }

    /// Total count of `word` across all tags.
    #[cfg(test)]
    pub fn tagged_total(&self, word: &str) -> u64 {
        self.word_counts_by_tag
            .values()
            .filter_map(|words| words.get(word))
            .sum()
    }
}

/// Headline numbers derived from an [`AggregationResult`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpusSummary {
    /// Number of poems processed.
    pub total_poems: u64,
    /// Number of lines processed.
    pub total_lines: u64,
    /// Chinese character occurrences.
    pub total_characters: u64,
    /// Chinese word occurrences.
    pub total_words: u64,
    pub distinct_characters: usize,
    pub distinct_words: usize,
    pub distinct_authors: usize,
    pub distinct_forms: usize,
    pub distinct_tags: usize,
}

impl CorpusSummary {
    /// Creates a summary from aggregated statistics.
    pub fn from_result(result: &AggregationResult) -> Self {
        let total_lines = result
            .author_text
            .values()
            .map(|text| text.matches(LINE_TERMINATOR).count() as u64)
            .sum();

        Self {
            total_poems: result.author_counts.values().sum(),
            total_lines,
            total_characters: result.character_counts.values().sum(),
            total_words: result.word_counts.values().sum(),
            distinct_characters: result.character_counts.len(),
            distinct_words: result.vocabulary.len(),
            distinct_authors: result.author_counts.len(),
            distinct_forms: result.form_counts.len(),
            distinct_tags: result.word_counts_by_tag.len(),
        }
    }
}

/// One row of a ranking table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedEntry {
    pub key: String,
    pub count: u64,
}

impl RankedEntry {
    pub fn new(key: impl Into<String>, count: u64) -> Self {
        Self {
            key: key.into(),
            count,
        }
    }
}

/// Metadata about a statistics report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Corpus directory that was aggregated.
    pub source_dir: String,
    /// Cache artifact path.
    pub cache_path: String,
    /// Whether the result came from the cache.
    pub from_cache: bool,
    /// Date and time of the run.
    pub generated_at: DateTime<Utc>,
    /// Duration of the run in seconds.
    pub duration_seconds: f64,
}

/// Statistics report over an aggregated corpus.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub metadata: ReportMetadata,
    pub summary: CorpusSummary,
    pub top_characters: Vec<RankedEntry>,
    pub top_words: Vec<RankedEntry>,
    pub top_authors: Vec<RankedEntry>,
    pub top_forms: Vec<RankedEntry>,
    /// Word occurrences per part-of-speech tag.
    pub tags: Vec<RankedEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_chinese() {
        assert!(is_chinese('雨'));
        assert!(is_chinese('\u{4e00}'));
        assert!(is_chinese('\u{9fff}'));
        assert!(!is_chinese('。'));
        assert!(!is_chinese('a'));
        assert!(!is_chinese('3'));
    }

    #[test]
    fn test_is_chinese_word() {
        assert!(is_chinese_word("风骤"));
        assert!(!is_chinese_word(""));
        assert!(!is_chinese_word("风a"));
        assert!(!is_chinese_word("。"));
        assert!(!is_chinese_word("2"));
    }

    #[test]
    fn test_poem_record_field_names() {
        let json = r#"{"author":"李清照","rhythmic":"如梦令","paragraphs":["昨夜雨疏风骤。"],"notes":[]}"#;
        let poem: PoemRecord = serde_json::from_str(json).unwrap();
        assert_eq!(poem.author, "李清照");
        assert_eq!(poem.form_name, "如梦令");
        assert_eq!(poem.lines, vec!["昨夜雨疏风骤。".to_string()]);
    }

    #[test]
    fn test_poem_record_missing_field() {
        let json = r#"{"author":"李清照","paragraphs":[]}"#;
        assert!(serde_json::from_str::<PoemRecord>(json).is_err());
    }

    #[test]
    fn test_record_word_keeps_tag_totals() {
        let mut result = AggregationResult::new();
        result.record_word("东风", "n");
        result.record_word("东风", "ns");
        result.record_word("东风", "n");

        assert!(result.vocabulary.contains("东风"));
        assert_eq!(result.word_counts["东风"], 3);
        assert_eq!(result.word_counts_by_tag["n"]["东风"], 2);
        assert_eq!(result.tagged_total("东风"), 3);
    }

    #[test]
    fn test_record_characters_skips_punctuation() {
        let mut result = AggregationResult::new();
        result.record_characters("知否，知否？");
        assert_eq!(result.character_counts.len(), 2);
        assert_eq!(result.character_counts[&'知'], 2);
        assert_eq!(result.character_counts[&'否'], 2);
    }

    #[test]
    fn test_append_author_segment_spacing() {
        let mut result = AggregationResult::new();
        result.append_author_segment("晏殊", &["一曲", "新词", LINE_TERMINATOR]);
        result.append_author_segment("晏殊", &["酒", "一杯", LINE_TERMINATOR]);
        assert_eq!(result.author_text["晏殊"], "一曲 新词 \n 酒 一杯 \n");
    }

    #[test]
    fn test_summary_from_result() {
        let mut result = AggregationResult::new();
        result.record_poem("晏殊", "浣溪沙");
        result.record_characters("一曲新词酒一杯。");
        result.record_word("一曲", "m");
        result.record_word("新词", "n");
        result.append_author_segment("晏殊", &["一曲", "新词", LINE_TERMINATOR]);

        let summary = CorpusSummary::from_result(&result);
        assert_eq!(summary.total_poems, 1);
        assert_eq!(summary.total_lines, 1);
        assert_eq!(summary.total_characters, 7);
        assert_eq!(summary.total_words, 2);
        assert_eq!(summary.distinct_tags, 2);
        assert_eq!(summary.distinct_authors, 1);
    }
}
