//! Standard PageRank over a row-normalized transition matrix
//!
//! Each round is computed from a frozen copy of the previous scores:
//!
//! ```text
//! score'[v] = d * sum(score[u] * w[u][v] for u -> v) + (1 - d) / |V|
//! ```
//!
//! Iteration stops once no node's relative change `(score' - score) / score`
//! exceeds the tolerance, or after `max_iterations` rounds. The change is
//! signed, so with the default tolerance of 0 a round stops the iteration
//! only when no score increased.

use super::PageRankResult;
use crate::graph::csr::TransitionMatrix;
use crate::types::RankConfig;

/// Relative change of one node's score, `None` when the previous score is
/// not a positive finite number (the node then counts as not converged).
pub(crate) fn relative_change(old: f64, new: f64) -> Option<f64> {
    if !(old.is_finite() && old > 0.0) {
        return None;
    }
    Some((new - old) / old)
}

/// Standard PageRank implementation
#[derive(Debug, Clone)]
pub struct StandardPageRank {
    /// Damping factor (typically 0.85)
    pub damping: f64,
    /// Maximum number of rounds
    pub max_iterations: usize,
    /// Relative-change tolerance
    pub tolerance: f64,
}

impl Default for StandardPageRank {
    fn default() -> Self {
        Self::from_config(&RankConfig::default())
    }
}

impl StandardPageRank {
    /// Create a new StandardPageRank with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create from a [`RankConfig`]
    pub fn from_config(config: &RankConfig) -> Self {
        Self {
            damping: config.damping,
            max_iterations: config.max_iter,
            tolerance: config.tol,
        }
    }

    /// Set the damping factor
    pub fn with_damping(mut self, damping: f64) -> Self {
        self.damping = damping;
        self
    }

    /// Set the maximum iterations
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Set the relative-change tolerance
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Run PageRank on a transition matrix
    ///
    /// Returns the scores even if the stopping rule never fired, with
    /// `converged = false`.
    pub fn run(&self, graph: &TransitionMatrix) -> PageRankResult {
        let n = graph.num_nodes;
        if n == 0 {
            return PageRankResult::new(vec![], 0, 0.0, true);
        }

        // Initialize scores uniformly
        let mut scores = vec![1.0 / n as f64; n];
        let mut new_scores = vec![0.0; n];

        let teleport = (1.0 - self.damping) / n as f64;
        let mut iterations = 0;
        let mut delta = 0.0;
        let mut converged = false;

        while iterations < self.max_iterations {
            iterations += 1;

            new_scores.fill(teleport);

            // Propagate scores through edges
            for (node, &node_score) in scores.iter().enumerate() {
                for (neighbor, weight) in graph.neighbors(node as u32) {
                    new_scores[neighbor as usize] += self.damping * node_score * weight;
                }
            }

            let mut should_stop = true;
            delta = f64::NEG_INFINITY;
            for (&old, &new) in scores.iter().zip(new_scores.iter()) {
                match relative_change(old, new) {
                    Some(change) => {
                        delta = delta.max(change);
                        if change > self.tolerance {
                            should_stop = false;
                        }
                    }
                    None => {
                        delta = f64::INFINITY;
                        should_stop = false;
                    }
                }
            }

            // Swap buffers
            std::mem::swap(&mut scores, &mut new_scores);

            if should_stop {
                converged = true;
                break;
            }
        }

        PageRankResult::new(scores, iterations, delta, converged)
    }
}
