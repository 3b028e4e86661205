//! Core types and configuration
//!
//! Configuration is plain serde data. Every section uses `#[serde(default)]`
//! so a JSON document only needs to name the values it overrides:
//!
//! ```json
//! { "miner": { "threshold": 1.6 }, "rank": { "max_iter": 50 }, "top_k": 20 }
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{LocphraseError, Result};

/// Interned token identifier, dense and assigned in first-seen order.
pub type TokenId = u32;

/// Default reserved token marking filtered or boundary positions.
pub const DEFAULT_SENTINEL: &str = "<unk>";

/// Default separator used to render multi-token phrases.
pub const DEFAULT_DELIMITER: &str = "|";

/// Hard upper bound on mined phrase length.
pub const MAX_PHRASE_LEN: usize = 6;

/// How the segmenter decides whether a phrase can grow by one more token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchRule {
    /// Pair the phrase's first token with the token at each probe offset.
    #[default]
    Anchor,
    /// Use the whole accumulated phrase as the prefix for the next token.
    Incremental,
}

/// Phrase mining and segmentation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MinerConfig {
    /// Ratio a candidate must strictly exceed to be kept.
    pub threshold: f64,
    /// Corpora with more documents than this use `large_corpus_min_sup`.
    pub large_corpus_docs: usize,
    /// Fixed minimum support for large corpora.
    pub large_corpus_min_sup: f64,
    /// Minimum support per document for small corpora.
    pub small_corpus_ratio: f64,
    /// Longest phrase the miner will grow (2..=6).
    pub max_phrase_len: usize,
    /// Number of look-ahead offsets tried during segmentation.
    pub max_probe: usize,
    /// Segmentation probe rule.
    pub match_rule: MatchRule,
    /// Separator between tokens of a rendered phrase.
    pub delimiter: String,
    /// Reserved boundary token.
    pub sentinel: String,
}

impl Default for MinerConfig {
    fn default() -> Self {
        Self {
            threshold: 1.4,
            large_corpus_docs: 100,
            large_corpus_min_sup: 20.0,
            small_corpus_ratio: 0.4,
            max_phrase_len: MAX_PHRASE_LEN,
            max_probe: 6,
            match_rule: MatchRule::Anchor,
            delimiter: DEFAULT_DELIMITER.to_string(),
            sentinel: DEFAULT_SENTINEL.to_string(),
        }
    }
}

impl MinerConfig {
    /// Minimum support for a corpus of `num_docs` documents.
    pub fn min_support(&self, num_docs: usize) -> f64 {
        if num_docs > self.large_corpus_docs {
            self.large_corpus_min_sup
        } else {
            self.small_corpus_ratio * num_docs as f64
        }
    }
}

/// Power-iteration settings for the rank scorer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankConfig {
    /// Damping factor (share of mass propagated along edges).
    pub damping: f64,
    /// Maximum number of rounds.
    pub max_iter: usize,
    /// Relative-change tolerance for early stopping.
    pub tol: f64,
}

impl Default for RankConfig {
    fn default() -> Self {
        Self {
            damping: 0.85,
            max_iter: 30,
            tol: 0.0,
        }
    }
}

/// Full per-location pipeline configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyphraseConfig {
    pub miner: MinerConfig,
    pub rank: RankConfig,
    /// Number of ranked phrases kept per location.
    pub top_k: usize,
}

impl Default for KeyphraseConfig {
    fn default() -> Self {
        Self {
            miner: MinerConfig::default(),
            rank: RankConfig::default(),
            top_k: 10,
        }
    }
}

impl KeyphraseConfig {
    /// Parse a configuration from JSON and validate it.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every value is inside its usable range.
    pub fn validate(&self) -> Result<()> {
        let miner = &self.miner;
        if !(miner.threshold.is_finite() && miner.threshold > 0.0) {
            return Err(invalid(format!(
                "miner.threshold must be positive and finite, got {}",
                miner.threshold
            )));
        }
        if !(miner.large_corpus_min_sup.is_finite() && miner.large_corpus_min_sup >= 0.0) {
            return Err(invalid(format!(
                "miner.large_corpus_min_sup must be non-negative, got {}",
                miner.large_corpus_min_sup
            )));
        }
        if !(miner.small_corpus_ratio.is_finite() && miner.small_corpus_ratio >= 0.0) {
            return Err(invalid(format!(
                "miner.small_corpus_ratio must be non-negative, got {}",
                miner.small_corpus_ratio
            )));
        }
        if !(2..=MAX_PHRASE_LEN).contains(&miner.max_phrase_len) {
            return Err(invalid(format!(
                "miner.max_phrase_len must be in 2..={MAX_PHRASE_LEN}, got {}",
                miner.max_phrase_len
            )));
        }
        if !(1..=MAX_PHRASE_LEN).contains(&miner.max_probe) {
            return Err(invalid(format!(
                "miner.max_probe must be in 1..={MAX_PHRASE_LEN}, got {}",
                miner.max_probe
            )));
        }
        if miner.delimiter.is_empty() {
            return Err(invalid("miner.delimiter must not be empty".to_string()));
        }
        if miner.sentinel.is_empty() {
            return Err(invalid("miner.sentinel must not be empty".to_string()));
        }

        let rank = &self.rank;
        if !(0.0..=1.0).contains(&rank.damping) {
            return Err(invalid(format!(
                "rank.damping must be in [0, 1], got {}",
                rank.damping
            )));
        }
        if !(rank.tol.is_finite() && rank.tol >= 0.0) {
            return Err(invalid(format!(
                "rank.tol must be non-negative and finite, got {}",
                rank.tol
            )));
        }
        Ok(())
    }
}

fn invalid(msg: String) -> LocphraseError {
    LocphraseError::InvalidConfig(msg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = KeyphraseConfig::default();
        assert_eq!(cfg.miner.threshold, 1.4);
        assert_eq!(cfg.miner.max_phrase_len, 6);
        assert_eq!(cfg.miner.match_rule, MatchRule::Anchor);
        assert_eq!(cfg.rank.damping, 0.85);
        assert_eq!(cfg.rank.max_iter, 30);
        assert_eq!(cfg.rank.tol, 0.0);
        assert_eq!(cfg.top_k, 10);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_min_support() {
        let miner = MinerConfig::default();
        assert_eq!(miner.min_support(101), 20.0);
        assert_eq!(miner.min_support(500), 20.0);
        assert!((miner.min_support(100) - 40.0).abs() < 1e-12);
        assert!((miner.min_support(1) - 0.4).abs() < 1e-12);
        assert_eq!(miner.min_support(0), 0.0);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let cfg = KeyphraseConfig::from_json(
            r#"{ "miner": { "match_rule": "incremental" }, "top_k": 3 }"#,
        )
        .unwrap();
        assert_eq!(cfg.miner.match_rule, MatchRule::Incremental);
        assert_eq!(cfg.miner.threshold, 1.4);
        assert_eq!(cfg.rank, RankConfig::default());
        assert_eq!(cfg.top_k, 3);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = KeyphraseConfig::from_json(r#"{ "rank": { "damping": 1.5 } }"#).unwrap_err();
        assert!(matches!(err, LocphraseError::InvalidConfig(_)));

        let mut cfg = KeyphraseConfig::default();
        cfg.miner.max_phrase_len = 7;
        assert!(cfg.validate().is_err());

        let mut cfg = KeyphraseConfig::default();
        cfg.miner.delimiter.clear();
        assert!(cfg.validate().is_err());

        let mut cfg = KeyphraseConfig::default();
        cfg.rank.tol = -1.0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_max_probe_bounded() {
        let err = KeyphraseConfig::from_json(r#"{ "miner": { "max_probe": 18446744073709551615 } }"#)
            .unwrap_err();
        assert!(matches!(err, LocphraseError::InvalidConfig(_)));

        let mut cfg = KeyphraseConfig::default();
        cfg.miner.max_probe = 0;
        assert!(cfg.validate().is_err());

        cfg.miner.max_probe = MAX_PHRASE_LEN;
        assert!(cfg.validate().is_ok());
        cfg.miner.max_probe = MAX_PHRASE_LEN + 1;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_malformed_json() {
        let err = KeyphraseConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, LocphraseError::ConfigParse(_)));
    }
}
