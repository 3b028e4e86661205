//! Row-normalized transition matrix in Compressed Sparse Row form
//!
//! CSR keeps each node's outgoing edges contiguous, which is what the power
//! iteration walks every round. Nodes without any edge are dropped and the
//! remaining ones are renumbered in their original order.

use super::builder::GraphBuilder;
use crate::nlp::interner::TokenPool;
use crate::phrase::segmenter::Segment;

/// A row-stochastic transition matrix in CSR format
#[derive(Debug, Clone)]
pub struct TransitionMatrix {
    /// Number of nodes
    pub num_nodes: usize,
    /// Row pointers: node i's edges are at indices row_ptr[i]..row_ptr[i+1]
    pub row_ptr: Vec<usize>,
    /// Column indices (target nodes) for each edge
    pub col_idx: Vec<u32>,
    /// Normalized edge weights; each row sums to 1
    pub weights: Vec<f64>,
    /// Element for each node
    pub keys: Vec<Segment>,
}

impl TransitionMatrix {
    /// Normalize a builder's rows, omitting nodes with zero total weight
    pub fn from_builder(builder: &GraphBuilder) -> Self {
        let mut remap: Vec<Option<u32>> = Vec::with_capacity(builder.node_count());
        let mut keys = Vec::new();
        for (_, node) in builder.nodes() {
            if node.total_weight() > 0.0 {
                remap.push(Some(keys.len() as u32));
                keys.push(node.key.clone());
            } else {
                remap.push(None);
            }
        }

        let num_nodes = keys.len();
        let mut row_ptr = Vec::with_capacity(num_nodes + 1);
        let mut col_idx = Vec::new();
        let mut weights = Vec::new();
        row_ptr.push(0);

        for (id, node) in builder.nodes() {
            if remap[id as usize].is_none() {
                continue;
            }

            // Collect and sort edges for deterministic iteration
            let mut edges: Vec<(u32, f64)> = node
                .edges
                .iter()
                .filter_map(|(&k, &v)| remap[k as usize].map(|target| (target, v)))
                .collect();
            edges.sort_by_key(|(k, _)| *k);

            let total: f64 = edges.iter().map(|(_, w)| w).sum();
            for (target, weight) in edges {
                col_idx.push(target);
                weights.push(weight / total);
            }

            row_ptr.push(col_idx.len());
        }

        Self {
            num_nodes,
            row_ptr,
            col_idx,
            weights,
            keys,
        }
    }

    /// Iterate over `(target, normalized weight)` of a node
    pub fn neighbors(&self, node: u32) -> impl Iterator<Item = (u32, f64)> + '_ {
        let start = self.row_ptr[node as usize];
        let end = self.row_ptr[node as usize + 1];
        (start..end).map(move |i| (self.col_idx[i], self.weights[i]))
    }

    /// Sum of a node's outgoing weights (1 up to rounding)
    pub fn row_sum(&self, node: u32) -> f64 {
        self.neighbors(node).map(|(_, w)| w).sum()
    }

    /// Get the element for a node
    pub fn key(&self, node: u32) -> &[u32] {
        &self.keys[node as usize]
    }

    /// Render a node's element, multi-token phrases joined by `delimiter`
    pub fn label(&self, node: u32, pool: &TokenPool, delimiter: &str) -> String {
        pool.join(self.key(node), delimiter)
    }

    /// Check if the matrix is empty
    pub fn is_empty(&self) -> bool {
        self.num_nodes == 0
    }

    /// Get the number of stored directed edges
    pub fn num_edges(&self) -> usize {
        self.col_idx.len()
    }
}

impl Default for TransitionMatrix {
    fn default() -> Self {
        Self {
            num_nodes: 0,
            row_ptr: vec![0],
            col_idx: Vec::new(),
            weights: Vec::new(),
            keys: Vec::new(),
        }
    }
}
