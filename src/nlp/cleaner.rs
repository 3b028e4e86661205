//! Raw text to token sequence
//!
//! The phrase miner only needs a token sequence in which filtered positions
//! are replaced by the sentinel. [`TextCleaner`] is that contract;
//! [`BasicCleaner`] is a small whitespace-based implementation for social
//! posts. Language-aware tokenization is left to callers who plug in their
//! own cleaner.

use super::stopwords::StopwordFilter;
use crate::types::DEFAULT_SENTINEL;

const MIN_TOKEN_LEN: usize = 2;

/// Turns one raw text into a cleaned token sequence.
///
/// Implementations must emit `sentinel` wherever a word was filtered so the
/// frequency model does not count adjacency across the gap.
pub trait TextCleaner: Send + Sync {
    fn clean(&self, text: &str) -> Vec<String>;
}

/// Whitespace tokenizer for tweets.
///
/// Lowercases, trims surrounding punctuation, and replaces URLs, mentions,
/// numbers, stopwords and single-character tokens with the
/// sentinel. Hashtags keep their word (`#deepdish` -> `deepdish`).
#[derive(Debug, Clone)]
pub struct BasicCleaner {
    stopwords: StopwordFilter,
    sentinel: String,
}

impl Default for BasicCleaner {
    fn default() -> Self {
        Self::new(StopwordFilter::default())
    }
}

impl BasicCleaner {
    pub fn new(stopwords: StopwordFilter) -> Self {
        Self {
            stopwords,
            sentinel: DEFAULT_SENTINEL.to_string(),
        }
    }

    /// Use a different sentinel (must match `MinerConfig::sentinel`)
    pub fn with_sentinel(mut self, sentinel: impl Into<String>) -> Self {
        self.sentinel = sentinel.into();
        self
    }

    fn normalize(&self, raw: &str) -> Option<String> {
        let lower = raw.to_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") || lower.starts_with("www.") {
            return None;
        }
        if lower.starts_with('@') {
            return None;
        }

        let word = lower
            .trim_matches(|c: char| !c.is_alphanumeric())
            .to_string();
        if word.chars().count() < MIN_TOKEN_LEN {
            return None;
        }
        if word.chars().all(|c| c.is_numeric()) {
            return None;
        }
        if self.stopwords.is_stopword(&word) {
            return None;
        }
        Some(word)
    }
}

impl TextCleaner for BasicCleaner {
    fn clean(&self, text: &str) -> Vec<String> {
        text.split_whitespace()
            .map(|raw| {
                self.normalize(raw)
                    .unwrap_or_else(|| self.sentinel.clone())
            })
            .collect()
    }
}
