//! PageRank scoring
//!
//! This module provides the power-iteration scorer used to rank segmented
//! elements over the co-occurrence transition matrix.

pub mod standard;

/// Result of a PageRank computation
#[derive(Debug, Clone, Default)]
pub struct PageRankResult {
    /// Scores for each node (indexed by node ID)
    pub scores: Vec<f64>,
    /// Number of rounds performed
    pub iterations: usize,
    /// Largest relative change seen in the final round
    pub delta: f64,
    /// Whether the stopping rule fired before `max_iter`
    pub converged: bool,
}

impl PageRankResult {
    /// Create a new PageRank result
    pub fn new(scores: Vec<f64>, iterations: usize, delta: f64, converged: bool) -> Self {
        Self {
            scores,
            iterations,
            delta,
            converged,
        }
    }

    /// Number of scored nodes
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    /// Check if nothing was scored
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}
