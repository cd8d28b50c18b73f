//! Rankings and distributions over aggregated statistics.
//!
//! The aggregation result only stores raw counters. These helpers turn
//! them into sorted views for reporting.

use crate::models::AggregationResult;
use std::collections::HashMap;
use std::hash::Hash;

/// Entries of a counter sorted by count (highest first), then by key.
pub fn top_n<K>(counts: &HashMap<K, u64>, n: usize) -> Vec<(K, u64)>
where
    K: Clone + Ord + Hash,
{
    let mut entries: Vec<(K, u64)> = counts.iter().map(|(k, v)| (k.clone(), *v)).collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    entries.truncate(n);
    entries
}

/// Total word occurrences per part-of-speech tag, most frequent first.
pub fn tag_distribution(result: &AggregationResult) -> Vec<(String, u64)> {
    let totals: HashMap<String, u64> = result
        .word_counts_by_tag
        .iter()
        .map(|(tag, words)| (tag.clone(), words.values().sum()))
        .collect();

    top_n(&totals, totals.len())
}
