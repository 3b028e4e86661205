//! Longest-match re-segmentation
//!
//! Rewrites each document as a sequence of elements, each either a single
//! token or a mined phrase. Sentinel positions are dropped.
//!
//! A scan position only opens a phrase when its token starts some length-2
//! phrase. The segmenter then probes up to `max_probe` tokens ahead and
//! extends the phrase while the probe matches a retained phrase, stopping at
//! the first miss, a sentinel or the end of the document. Under
//! [`MatchRule::Anchor`] the probe is the pair (first token, token at the
//! offset); under [`MatchRule::Incremental`] it is the whole accumulated
//! phrase plus the next token.

use super::corpus::{Corpus, Document};
use super::table::PhraseTable;
use crate::nlp::interner::TokenPool;
use crate::types::{MatchRule, MinerConfig, TokenId, MAX_PHRASE_LEN};
use rustc_hash::FxHashSet;

/// One element of a segmented document (one token, or a phrase of several)
pub type Segment = Vec<TokenId>;

/// A document after re-segmentation
pub type SegmentedDocument = Vec<Segment>;

/// Greedy phrase segmenter over a mined [`PhraseTable`]
#[derive(Debug)]
pub struct Segmenter<'a> {
    table: &'a PhraseTable,
    /// Every retained phrase, flattened across levels
    phrases: FxHashSet<Vec<TokenId>>,
    rule: MatchRule,
    max_probe: usize,
}

impl<'a> Segmenter<'a> {
    pub fn new(table: &'a PhraseTable, config: &MinerConfig) -> Self {
        Self {
            table,
            phrases: table.phrases().collect(),
            rule: config.match_rule,
            max_probe: config.max_probe,
        }
    }

    /// Segment every document of the corpus, preserving order
    pub fn segment_corpus(&self, corpus: &Corpus) -> Vec<SegmentedDocument> {
        corpus
            .documents()
            .iter()
            .map(|doc| self.segment(doc))
            .collect()
    }

    /// Segment a single document
    pub fn segment(&self, doc: &Document) -> SegmentedDocument {
        let mut segments = Vec::new();
        let mut probe: Vec<TokenId> = Vec::with_capacity(self.max_probe.min(MAX_PHRASE_LEN) + 1);
        let mut i = 0;

        while i < doc.len() {
            let Some(start) = doc[i] else {
                i += 1;
                continue;
            };
            if !self.table.starts_phrase(start) {
                segments.push(vec![start]);
                i += 1;
                continue;
            }

            let mut phrase = vec![start];
            for offset in 1..=self.max_probe {
                let Some(&Some(next)) = doc.get(i + offset) else {
                    break;
                };
                let matched = match self.rule {
                    MatchRule::Anchor => self.phrases.contains([start, next].as_slice()),
                    MatchRule::Incremental => {
                        probe.clear();
                        probe.extend_from_slice(&phrase);
                        probe.push(next);
                        self.phrases.contains(&probe)
                    }
                };
                if !matched {
                    break;
                }
                phrase.push(next);
            }

            i += phrase.len();
            segments.push(phrase);
        }

        segments
    }
}

/// Render segments as strings, multi-token elements joined by `delimiter`
pub fn render_segments(
    pool: &TokenPool,
    segments: &[SegmentedDocument],
    delimiter: &str,
) -> Vec<Vec<String>> {
    segments
        .iter()
        .map(|doc| doc.iter().map(|seg| pool.join(seg, delimiter)).collect())
        .collect()
}
