//! Phrase table
//!
//! Level `L` maps a prefix of `L - 1` tokens to the tokens that extend it
//! into a retained phrase of length `L`. Prefixes and extensions keep their
//! insertion order so that every traversal is reproducible.

use crate::nlp::interner::TokenPool;
use crate::types::TokenId;
use rustc_hash::FxHashMap;
use serde::Serialize;

/// Statistics stored for a retained phrase
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhraseStats {
    /// Observed occurrences across the corpus
    pub count: u32,
    /// `count / total` where `total` is the corpus token count
    pub frequency: f64,
}

/// All retained phrases of one length
#[derive(Debug, Clone, Default)]
pub struct PhraseLevel {
    length: usize,
    prefixes: Vec<Vec<TokenId>>,
    index: FxHashMap<Vec<TokenId>, usize>,
    extensions: Vec<Vec<(TokenId, PhraseStats)>>,
}

impl PhraseLevel {
    /// Create an empty level for phrases of `length` tokens
    pub fn new(length: usize) -> Self {
        Self {
            length,
            ..Default::default()
        }
    }

    /// Record that `prefix + [extension]` is a retained phrase
    pub fn insert(&mut self, prefix: &[TokenId], extension: TokenId, stats: PhraseStats) {
        debug_assert_eq!(prefix.len() + 1, self.length);

        let slot = match self.index.get(prefix) {
            Some(&slot) => slot,
            None => {
                let slot = self.prefixes.len();
                self.index.insert(prefix.to_vec(), slot);
                self.prefixes.push(prefix.to_vec());
                self.extensions.push(Vec::new());
                slot
            }
        };

        let exts = &mut self.extensions[slot];
        match exts.iter_mut().find(|(t, _)| *t == extension) {
            Some(entry) => entry.1 = stats,
            None => exts.push((extension, stats)),
        }
    }

    /// Extensions recorded for `prefix`
    pub fn extensions(&self, prefix: &[TokenId]) -> Option<&[(TokenId, PhraseStats)]> {
        self.index
            .get(prefix)
            .map(|&slot| self.extensions[slot].as_slice())
    }

    /// Statistics for `prefix + [extension]`
    pub fn get(&self, prefix: &[TokenId], extension: TokenId) -> Option<PhraseStats> {
        self.extensions(prefix)?
            .iter()
            .find(|(t, _)| *t == extension)
            .map(|(_, stats)| *stats)
    }

    /// Check whether any phrase of this level starts with `prefix`
    pub fn contains_prefix(&self, prefix: &[TokenId]) -> bool {
        self.index.contains_key(prefix)
    }

    /// Iterate `(prefix, extensions)` in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&[TokenId], &[(TokenId, PhraseStats)])> {
        self.prefixes
            .iter()
            .zip(self.extensions.iter())
            .map(|(p, e)| (p.as_slice(), e.as_slice()))
    }

    /// Phrase length of this level
    pub fn length(&self) -> usize {
        self.length
    }

    /// Number of retained phrases
    pub fn len(&self) -> usize {
        self.extensions.iter().map(Vec::len).sum()
    }

    /// Check if the level holds no phrases
    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty()
    }
}

/// A retained phrase rendered to strings
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedPhrase {
    pub length: usize,
    pub prefix: String,
    pub extension: String,
    pub count: u32,
    pub frequency: f64,
}

/// Retained phrases of every length, starting at 2
#[derive(Debug, Clone, Default)]
pub struct PhraseTable {
    levels: Vec<PhraseLevel>,
}

impl PhraseTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the next level; lengths must be consecutive from 2
    pub fn push_level(&mut self, level: PhraseLevel) {
        debug_assert_eq!(level.length(), self.levels.len() + 2);
        self.levels.push(level);
    }

    /// The level holding phrases of `length` tokens
    pub fn level(&self, length: usize) -> Option<&PhraseLevel> {
        length.checked_sub(2).and_then(|i| self.levels.get(i))
    }

    /// All levels, shortest first
    pub fn levels(&self) -> &[PhraseLevel] {
        &self.levels
    }

    /// Length of the longest stored level (0 when empty)
    pub fn max_length(&self) -> usize {
        self.levels.last().map(PhraseLevel::length).unwrap_or(0)
    }

    /// Check whether `phrase` (two or more tokens) was retained
    pub fn contains(&self, phrase: &[TokenId]) -> bool {
        match phrase.split_last() {
            Some((&last, prefix)) if !prefix.is_empty() => self
                .level(phrase.len())
                .is_some_and(|level| level.get(prefix, last).is_some()),
            _ => false,
        }
    }

    /// Check whether `token` begins any length-2 phrase
    pub fn starts_phrase(&self, token: TokenId) -> bool {
        self.level(2)
            .is_some_and(|level| level.contains_prefix(&[token]))
    }

    /// Every retained phrase as a full token sequence, level by level
    pub fn phrases(&self) -> impl Iterator<Item = Vec<TokenId>> + '_ {
        self.levels.iter().flat_map(|level| {
            level.iter().flat_map(|(prefix, exts)| {
                exts.iter().map(move |(ext, _)| {
                    let mut phrase = prefix.to_vec();
                    phrase.push(*ext);
                    phrase
                })
            })
        })
    }

    /// Total number of retained phrases
    pub fn num_phrases(&self) -> usize {
        self.levels.iter().map(PhraseLevel::len).sum()
    }

    /// Check if no phrase was retained
    pub fn is_empty(&self) -> bool {
        self.levels.iter().all(PhraseLevel::is_empty)
    }

    /// Materialize the table as strings, prefixes joined by `delimiter`
    pub fn render(&self, pool: &TokenPool, delimiter: &str) -> Vec<RenderedPhrase> {
        let mut out = Vec::with_capacity(self.num_phrases());
        for level in &self.levels {
            for (prefix, exts) in level.iter() {
                let prefix_str = pool.join(prefix, delimiter);
                for (ext, stats) in exts {
                    out.push(RenderedPhrase {
                        length: level.length(),
                        prefix: prefix_str.clone(),
                        extension: pool.get(*ext).unwrap_or_default().to_string(),
                        count: stats.count,
                        frequency: stats.frequency,
                    });
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(count: u32) -> PhraseStats {
        PhraseStats {
            count,
            frequency: count as f64 / 10.0,
        }
    }

    #[test]
    fn test_level_insert_and_lookup() {
        let mut level = PhraseLevel::new(2);
        level.insert(&[0], 1, stats(3));
        level.insert(&[0], 2, stats(4));
        level.insert(&[5], 1, stats(2));

        assert_eq!(level.iter().count(), 2);
        assert_eq!(level.len(), 3);
        assert_eq!(level.get(&[0], 2), Some(stats(4)));
        assert_eq!(level.get(&[0], 9), None);
        assert!(level.contains_prefix(&[5]));
        assert!(!level.contains_prefix(&[1]));

        let order: Vec<_> = level.iter().map(|(p, _)| p.to_vec()).collect();
        assert_eq!(order, vec![vec![0], vec![5]]);
    }

    #[test]
    fn test_reinsert_overwrites() {
        let mut level = PhraseLevel::new(2);
        level.insert(&[0], 1, stats(3));
        level.insert(&[0], 1, stats(7));
        assert_eq!(level.len(), 1);
        assert_eq!(level.get(&[0], 1).unwrap().count, 7);
    }

    #[test]
    fn test_table_contains_and_phrases() {
        let mut two = PhraseLevel::new(2);
        two.insert(&[0], 1, stats(3));
        let mut three = PhraseLevel::new(3);
        three.insert(&[0, 1], 2, stats(2));

        let mut table = PhraseTable::new();
        table.push_level(two);
        table.push_level(three);

        assert!(table.contains(&[0, 1]));
        assert!(table.contains(&[0, 1, 2]));
        assert!(!table.contains(&[1, 2]));
        assert!(!table.contains(&[0]));
        assert!(table.starts_phrase(0));
        assert!(!table.starts_phrase(1));
        assert_eq!(table.max_length(), 3);
        assert_eq!(table.num_phrases(), 2);

        let all: Vec<_> = table.phrases().collect();
        assert_eq!(all, vec![vec![0, 1], vec![0, 1, 2]]);
    }

    #[test]
    fn test_render() {
        let mut pool = TokenPool::new();
        let navy = pool.intern("navy");
        let pier = pool.intern("pier");

        let mut two = PhraseLevel::new(2);
        two.insert(&[navy], pier, stats(5));
        let mut table = PhraseTable::new();
        table.push_level(two);

        let rendered = table.render(&pool, "|");
        assert_eq!(rendered.len(), 1);
        assert_eq!(rendered[0].prefix, "navy");
        assert_eq!(rendered[0].extension, "pier");
        assert_eq!(rendered[0].length, 2);
    }

    #[test]
    fn test_empty_table() {
        let table = PhraseTable::new();
        assert!(table.is_empty());
        assert_eq!(table.max_length(), 0);
        assert!(table.level(2).is_none());
        assert!(!table.starts_phrase(0));
    }
}
