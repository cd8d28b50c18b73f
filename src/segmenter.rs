//! Word segmentation and part-of-speech tagging.
//!
//! The aggregator only depends on the [`Segmenter`] trait. The production
//! implementation wraps `jieba-rs`.

use crate::models::TaggedWord;
use jieba_rs::Jieba;
use tracing::debug;

/// Splits a line into tagged words.
///
/// The returned words cover the whole line in order, punctuation and
/// non-Chinese runs included. Calling `tag` again on the same line yields
/// the same sequence.
pub trait Segmenter {
    fn tag(&self, line: &str) -> Vec<TaggedWord>;
}

/// Segmenter backed by jieba's default dictionary.
pub struct JiebaSegmenter {
    jieba: Jieba,
    /// Use the HMM model for words missing from the dictionary.
    hmm: bool,
}

impl JiebaSegmenter {
    /// Create a segmenter; loading the dictionary takes a moment.
    pub fn new(hmm: bool) -> Self {
        debug!("Loading jieba dictionary (hmm: {})", hmm);
        Self {
            jieba: Jieba::new(),
            hmm,
        }
    }
}

impl Default for JiebaSegmenter {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Segmenter for JiebaSegmenter {
    fn tag(&self, line: &str) -> Vec<TaggedWord> {
        self.jieba
            .tag(line, self.hmm)
            .into_iter()
            .map(|tag| TaggedWord::new(tag.word, tag.tag))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jieba_covers_whole_line() {
        let segmenter = JiebaSegmenter::default();
        let line = "昨夜雨疏风骤。";
        let words = segmenter.tag(line);

        assert!(!words.is_empty());
        let joined: String = words.iter().map(|w| w.word.as_str()).collect();
        assert_eq!(joined, line);
        assert!(words.iter().all(|w| !w.tag.is_empty()));
    }

    #[test]
    fn test_jieba_is_restartable() {
        let segmenter = JiebaSegmenter::new(false);
        let line = "知否，知否？应是绿肥红瘦。";
        assert_eq!(segmenter.tag(line), segmenter.tag(line));
    }
}
