//! Pipeline artifacts.
//!
//! Intermediate stages work on interned ids; strings are materialized only
//! here, at the output boundary.

use serde::Serialize;

use crate::phrase::table::RenderedPhrase;

/// A ranked element: a single token or a delimiter-joined phrase
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Keyphrase {
    pub text: String,
    pub score: f64,
}

/// Score of every ranked node, in node order (first co-occurrence)
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RankScores {
    entries: Vec<Keyphrase>,
}

impl RankScores {
    pub fn new(entries: Vec<Keyphrase>) -> Self {
        Self { entries }
    }

    /// Score of an element by its rendered text
    pub fn get(&self, text: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|entry| entry.text == text)
            .map(|entry| entry.score)
    }

    /// The `k` best elements, highest score first
    ///
    /// Sorting is stable, so ties keep node order. Fewer than `k` scored
    /// elements returns all of them.
    pub fn top_k(&self, k: usize) -> Vec<Keyphrase> {
        let mut ranked = self.entries.clone();
        ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
        ranked.truncate(k);
        ranked
    }

    pub fn iter(&self) -> impl Iterator<Item = &Keyphrase> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Everything one location's run produces
#[derive(Debug, Clone, Default, Serialize)]
pub struct LocationKeyphrases {
    /// Top-K ranked elements
    pub keyphrases: Vec<Keyphrase>,
    /// Full score mapping
    pub scores: RankScores,
    /// Every retained phrase
    pub phrases: Vec<RenderedPhrase>,
    /// Documents after re-segmentation, rendered
    pub segments: Vec<Vec<String>>,
    /// Number of input documents
    pub num_docs: usize,
    /// Power-iteration rounds run
    pub iterations: usize,
    /// Whether the stopping rule fired before the round limit
    pub converged: bool,
}

impl LocationKeyphrases {
    /// Just the ranked texts, best first
    pub fn texts(&self) -> Vec<String> {
        self.keyphrases.iter().map(|k| k.text.clone()).collect()
    }
}
