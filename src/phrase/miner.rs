//! Statistical phrase mining
//!
//! Phrases are grown one token at a time. A candidate made of a prefix `P`
//! and an extension token `w`, observed `C` times in a corpus of `N` tokens,
//! is kept when
//!
//! ```text
//! freq(P) >= min_sup,  freq(w) >= min_sup,  C >= min_sup,
//! C * N / (freq(P) * freq(w)) > threshold
//! ```
//!
//! Length-2 phrases are seeded from bigram counts. Each longer level joins a
//! retained phrase with the continuations of its trailing `L - 1` tokens and
//! re-counts the candidate directly over the interned documents.

use super::corpus::Corpus;
use super::frequency::FrequencyModel;
use super::table::{PhraseLevel, PhraseStats, PhraseTable};
use crate::types::{MinerConfig, TokenId};

/// Generalized PMI ratio test with minimum support
#[derive(Debug, Clone, Copy)]
pub struct SignificanceTest {
    pub min_sup: f64,
    pub threshold: f64,
    pub total: f64,
}

impl SignificanceTest {
    /// Build the test for a frequency model
    pub fn for_model(freq: &FrequencyModel, threshold: f64) -> Self {
        Self {
            min_sup: freq.min_sup(),
            threshold,
            total: freq.total() as f64,
        }
    }

    /// `joint * total / (prefix * extension)`, or `None` when the
    /// denominator is zero or the result is not finite
    pub fn ratio(&self, joint: f64, prefix: f64, extension: f64) -> Option<f64> {
        let denominator = prefix * extension;
        if denominator <= 0.0 {
            return None;
        }
        let ratio = joint * self.total / denominator;
        ratio.is_finite().then_some(ratio)
    }

    /// Apply the support filters and the ratio threshold
    pub fn accepts(&self, joint: f64, prefix: f64, extension: f64) -> bool {
        if prefix < self.min_sup || extension < self.min_sup || joint < self.min_sup {
            return false;
        }
        self.ratio(joint, prefix, extension)
            .is_some_and(|ratio| ratio > self.threshold)
    }
}

/// Count non-overlapping occurrences of `phrase` across the corpus
///
/// Windows containing a sentinel never match.
pub fn count_occurrences(corpus: &Corpus, phrase: &[TokenId]) -> u32 {
    let n = phrase.len();
    if n == 0 {
        return 0;
    }

    let mut count = 0;
    for doc in corpus.documents() {
        let mut i = 0;
        while i + n <= doc.len() {
            let hit = doc[i..i + n]
                .iter()
                .zip(phrase)
                .all(|(slot, token)| *slot == Some(*token));
            if hit {
                count += 1;
                i += n;
            } else {
                i += 1;
            }
        }
    }
    count
}

/// Phrase miner
#[derive(Debug, Clone, Default)]
pub struct PhraseMiner {
    config: MinerConfig,
}

impl PhraseMiner {
    /// Create a miner with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a miner with custom settings
    pub fn with_config(config: MinerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MinerConfig {
        &self.config
    }

    /// Discover every significant phrase of length 2..=`max_phrase_len`
    pub fn mine(&self, corpus: &Corpus, freq: &FrequencyModel) -> PhraseTable {
        let test = SignificanceTest::for_model(freq, self.config.threshold);
        let mut table = PhraseTable::new();

        let seed = self.seed(freq, &test);
        #[cfg(feature = "tracing")]
        tracing::debug!(length = 2, phrases = seed.len(), "seeded phrase level");
        if seed.is_empty() {
            return table;
        }
        table.push_level(seed);

        let max_len = self.config.max_phrase_len.min(crate::types::MAX_PHRASE_LEN);
        while table.max_length() < max_len {
            let Some(current) = table.levels().last() else {
                break;
            };
            let next = self.extend(corpus, freq, &test, current);
            #[cfg(feature = "tracing")]
            tracing::debug!(length = next.length(), phrases = next.len(), "extended phrase level");
            if next.is_empty() {
                break;
            }
            table.push_level(next);
        }

        table
    }

    /// Length-2 phrases straight from the bigram counts
    fn seed(&self, freq: &FrequencyModel, test: &SignificanceTest) -> PhraseLevel {
        let mut level = PhraseLevel::new(2);
        if test.total <= 0.0 {
            return level;
        }

        for key in 0..freq.vocabulary_size() as TokenId {
            let key_count = freq.unigram(key) as f64;
            if key_count < test.min_sup {
                continue;
            }
            for (key2, joint) in freq.neighbors(key) {
                if test.accepts(joint as f64, key_count, freq.unigram(key2) as f64) {
                    level.insert(
                        &[key],
                        key2,
                        PhraseStats {
                            count: joint,
                            frequency: joint as f64 / test.total,
                        },
                    );
                }
            }
        }
        level
    }

    /// Grow every phrase of `current` by one token
    fn extend(
        &self,
        corpus: &Corpus,
        freq: &FrequencyModel,
        test: &SignificanceTest,
        current: &PhraseLevel,
    ) -> PhraseLevel {
        let mut next = PhraseLevel::new(current.length() + 1);
        let mut phrase: Vec<TokenId> = Vec::with_capacity(next.length());

        for (key, exts) in current.iter() {
            for &(key2, stats) in exts {
                phrase.clear();
                phrase.extend_from_slice(key);
                phrase.push(key2);

                // continuations of the trailing L-1 tokens
                let Some(continuations) = current.extensions(&phrase[1..]) else {
                    continue;
                };

                for &(key3, _) in continuations {
                    phrase.push(key3);
                    let count = count_occurrences(corpus, &phrase);
                    phrase.pop();

                    if test.accepts(count as f64, stats.count as f64, freq.unigram(key3) as f64) {
                        next.insert(
                            &phrase,
                            key3,
                            PhraseStats {
                                count,
                                frequency: count as f64 / test.total,
                            },
                        );
                    }
                }
            }
        }
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DEFAULT_SENTINEL;

    fn mine(docs: Vec<Vec<&str>>) -> (Corpus, FrequencyModel, PhraseTable) {
        mine_with(docs, MinerConfig::default())
    }

    fn mine_with(
        docs: Vec<Vec<&str>>,
        config: MinerConfig,
    ) -> (Corpus, FrequencyModel, PhraseTable) {
        let corpus = Corpus::new(docs, DEFAULT_SENTINEL);
        let freq = FrequencyModel::build(&corpus, &config);
        let table = PhraseMiner::with_config(config).mine(&corpus, &freq);
        (corpus, freq, table)
    }

    fn ids(corpus: &Corpus, tokens: &[&str]) -> Vec<TokenId> {
        tokens.iter().map(|t| corpus.pool().id(t).unwrap()).collect()
    }

    #[test]
    fn test_single_document_example() {
        let (corpus, freq, table) = mine(vec![vec!["a", "b", "c"]]);
        let test = SignificanceTest::for_model(&freq, 1.4);

        assert_eq!(test.ratio(1.0, 1.0, 1.0), Some(3.0));
        assert!(table.contains(&ids(&corpus, &["a", "b"])));
        assert!(table.contains(&ids(&corpus, &["b", "c"])));
        assert!(!table.contains(&ids(&corpus, &["a", "c"])));

        let stats = table
            .level(2)
            .unwrap()
            .get(&ids(&corpus, &["a"]), corpus.pool().id("b").unwrap())
            .unwrap();
        assert_eq!(stats.count, 1);
        assert!((stats.frequency - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_ratio_guards_zero_denominator() {
        let test = SignificanceTest {
            min_sup: 0.0,
            threshold: 1.4,
            total: 10.0,
        };
        assert_eq!(test.ratio(1.0, 0.0, 4.0), None);
        assert!(!test.accepts(0.0, 0.0, 0.0));
        assert!(!test.accepts(3.0, 0.0, 2.0));
    }

    #[test]
    fn test_retention_iff_support_and_ratio() {
        let test = SignificanceTest {
            min_sup: 2.0,
            threshold: 1.4,
            total: 100.0,
        };
        // ratio = 2 * 100 / (10 * 10) = 2.0
        assert!(test.accepts(2.0, 10.0, 10.0));
        // joint below support
        assert!(!test.accepts(1.0, 10.0, 10.0));
        // ratio = 2 * 100 / (20 * 10) = 1.0
        assert!(!test.accepts(2.0, 20.0, 10.0));
        // prefix below support
        assert!(!test.accepts(2.0, 1.0, 10.0));
        // ratio = 7 * 100 / (10 * 50) = 1.4, exactly at the threshold
        assert_eq!(test.ratio(7.0, 10.0, 50.0), Some(1.4));
        assert!(!test.accepts(7.0, 10.0, 50.0));
    }

    #[test]
    fn test_monotonic_support() {
        // Three docs -> min_sup = 1.2, so a pair seen once is dropped.
        let docs = vec![
            vec!["navy", "pier", "<unk>", "bean"],
            vec!["navy", "pier", "<unk>", "loop"],
            vec!["bean", "loop"],
        ];
        let (corpus, _, table) = mine(docs);
        assert!(table.contains(&ids(&corpus, &["navy", "pier"])));
        assert!(!table.contains(&ids(&corpus, &["bean", "loop"])));

        let docs = vec![
            vec!["navy", "pier", "<unk>", "bean"],
            vec!["navy", "<unk>", "pier", "loop"],
            vec!["bean", "loop"],
        ];
        let (corpus, _, table) = mine(docs);
        assert!(!table.contains(&ids(&corpus, &["navy", "pier"])));
    }

    #[test]
    fn test_three_token_phrase() {
        let docs = vec![
            vec!["deep", "dish", "pizza", "<unk>", "loop"],
            vec!["deep", "dish", "pizza", "<unk>", "bean"],
            vec!["river", "walk"],
        ];
        let (corpus, _, table) = mine(docs);

        assert!(table.contains(&ids(&corpus, &["deep", "dish"])));
        assert!(table.contains(&ids(&corpus, &["dish", "pizza"])));
        assert!(table.contains(&ids(&corpus, &["deep", "dish", "pizza"])));
        assert_eq!(table.max_length(), 3);

        let stats = table
            .level(3)
            .unwrap()
            .get(&ids(&corpus, &["deep", "dish"]), corpus.pool().id("pizza").unwrap())
            .unwrap();
        assert_eq!(stats.count, 2);
    }

    #[test]
    fn test_four_token_phrase_via_trailing_continuation() {
        let docs = vec![
            vec!["magnificent", "mile", "shopping", "district"],
            vec!["magnificent", "mile", "shopping", "district"],
            vec!["lake", "shore"],
        ];
        let (corpus, _, table) = mine(docs);

        assert!(table.contains(&ids(
            &corpus,
            &["magnificent", "mile", "shopping", "district"]
        )));
        assert_eq!(table.max_length(), 4);
    }

    #[test]
    fn test_max_phrase_len_caps_growth() {
        let docs = vec![
            vec!["magnificent", "mile", "shopping", "district"],
            vec!["magnificent", "mile", "shopping", "district"],
            vec!["lake", "shore"],
        ];
        let config = MinerConfig {
            max_phrase_len: 2,
            ..MinerConfig::default()
        };
        let (_, _, table) = mine_with(docs, config);
        assert_eq!(table.max_length(), 2);
    }

    #[test]
    fn test_count_occurrences_non_overlapping() {
        let corpus = Corpus::new(
            vec![vec!["ha", "ha", "ha", "ha", "ha"], vec!["ha", "<unk>", "ha"]],
            DEFAULT_SENTINEL,
        );
        let ha = corpus.pool().id("ha").unwrap();

        assert_eq!(count_occurrences(&corpus, &[ha, ha]), 2);
        assert_eq!(count_occurrences(&corpus, &[ha, ha, ha]), 1);
        assert_eq!(count_occurrences(&corpus, &[ha]), 7);
        assert_eq!(count_occurrences(&corpus, &[]), 0);
    }

    #[test]
    fn test_degenerate_corpus() {
        let (_, _, table) = mine(vec![]);
        assert!(table.is_empty());

        let (_, _, table) = mine(vec![vec!["<unk>", "<unk>"], vec![]]);
        assert!(table.is_empty());
    }

    #[test]
    fn test_deterministic() {
        let docs = vec![
            vec!["deep", "dish", "pizza", "<unk>", "loop"],
            vec!["navy", "pier", "deep", "dish", "pizza"],
            vec!["navy", "pier", "<unk>", "bean"],
        ];
        let (c1, _, t1) = mine(docs.clone());
        let (c2, _, t2) = mine(docs);

        assert_eq!(t1.render(c1.pool(), "|"), t2.render(c2.pool(), "|"));
    }
}
