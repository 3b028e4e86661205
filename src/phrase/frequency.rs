//! Unigram and bigram statistics
//!
//! Counts are indexed by [`TokenId`], so iterating them follows the order in
//! which tokens first appeared in the corpus.

use super::corpus::Corpus;
use crate::types::{MinerConfig, TokenId};
use rustc_hash::FxHashMap;

/// Corpus-wide occurrence statistics
#[derive(Debug, Clone, Default)]
pub struct FrequencyModel {
    /// Occurrences per token id
    unigrams: Vec<u32>,
    /// Symmetric adjacency counts: token id -> (neighbour id -> count)
    bigrams: Vec<FxHashMap<TokenId, u32>>,
    /// Sum of all unigram counts
    total: u64,
    /// Minimum support derived from the corpus size
    min_sup: f64,
}

impl FrequencyModel {
    /// Count every non-sentinel token and every adjacent non-sentinel pair
    pub fn build(corpus: &Corpus, config: &MinerConfig) -> Self {
        let vocab = corpus.vocabulary_size();
        let mut unigrams = vec![0u32; vocab];
        let mut bigrams: Vec<FxHashMap<TokenId, u32>> = vec![FxHashMap::default(); vocab];

        for doc in corpus.documents() {
            let mut last: Option<TokenId> = None;
            for &slot in doc {
                if let Some(token) = slot {
                    unigrams[token as usize] += 1;
                    if let Some(prev) = last {
                        *bigrams[prev as usize].entry(token).or_insert(0) += 1;
                        *bigrams[token as usize].entry(prev).or_insert(0) += 1;
                    }
                }
                last = slot;
            }
        }

        let total = unigrams.iter().map(|&c| c as u64).sum();

        Self {
            unigrams,
            bigrams,
            total,
            min_sup: config.min_support(corpus.num_docs()),
        }
    }

    /// Occurrences of `token`
    pub fn unigram(&self, token: TokenId) -> u32 {
        self.unigrams.get(token as usize).copied().unwrap_or(0)
    }

    /// Adjacent co-occurrences of `a` and `b` (either order)
    pub fn bigram(&self, a: TokenId, b: TokenId) -> u32 {
        self.bigrams
            .get(a as usize)
            .and_then(|row| row.get(&b))
            .copied()
            .unwrap_or(0)
    }

    /// Neighbours of `token` with their counts, sorted by id
    pub fn neighbors(&self, token: TokenId) -> Vec<(TokenId, u32)> {
        let mut row: Vec<_> = self
            .bigrams
            .get(token as usize)
            .map(|row| row.iter().map(|(&k, &v)| (k, v)).collect())
            .unwrap_or_default();
        row.sort_by_key(|(k, _)| *k);
        row
    }

    /// All unigram counts, indexed by token id
    pub fn unigram_counts(&self) -> &[u32] {
        &self.unigrams
    }

    /// Total number of counted tokens
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Minimum support threshold for this corpus
    pub fn min_sup(&self) -> f64 {
        self.min_sup
    }

    /// Number of distinct tokens
    pub fn vocabulary_size(&self) -> usize {
        self.unigrams.len()
    }
}
