//! Co-occurrence graph builder
//!
//! Nodes are segmented elements (a token or a phrase span). Each adjacent
//! pair of elements in a document adds one unit of weight in both
//! directions. Node ids follow first co-occurrence, and FxHashMap gives O(1)
//! edge lookups during construction.

use crate::phrase::segmenter::{Segment, SegmentedDocument};
use crate::types::TokenId;
use rustc_hash::FxHashMap;

/// A node in the graph builder
#[derive(Debug, Clone)]
pub struct BuilderNode {
    /// The element this node stands for
    pub key: Segment,
    /// Adjacency list: target node ID -> edge weight
    pub edges: FxHashMap<u32, f64>,
}

impl BuilderNode {
    /// Create a new node
    pub fn new(key: Segment) -> Self {
        Self {
            key,
            edges: FxHashMap::default(),
        }
    }

    /// Sum of outgoing edge weights
    pub fn total_weight(&self) -> f64 {
        self.edges.values().sum()
    }
}

/// A mutable graph builder optimized for incremental construction
#[derive(Debug, Default)]
pub struct GraphBuilder {
    /// Maps element -> node ID
    key_to_id: FxHashMap<Segment, u32>,
    /// Node storage
    nodes: Vec<BuilderNode>,
}

impl GraphBuilder {
    /// Create a new empty graph builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a graph builder with pre-allocated capacity
    pub fn with_capacity(node_capacity: usize) -> Self {
        Self {
            key_to_id: FxHashMap::with_capacity_and_hasher(node_capacity, Default::default()),
            nodes: Vec::with_capacity(node_capacity),
        }
    }

    /// Get or create a node for the given element, returning its ID
    pub fn get_or_create_node(&mut self, key: &[TokenId]) -> u32 {
        if let Some(&id) = self.key_to_id.get(key) {
            return id;
        }

        let id = self.nodes.len() as u32;
        self.key_to_id.insert(key.to_vec(), id);
        self.nodes.push(BuilderNode::new(key.to_vec()));
        id
    }

    /// Add `weight` to the edge in both directions
    ///
    /// A self-pair hits the same cell twice, so it gains `2 * weight`.
    pub fn increment_edge(&mut self, from: u32, to: u32, weight: f64) {
        if let Some(node) = self.nodes.get_mut(from as usize) {
            *node.edges.entry(to).or_insert(0.0) += weight;
        }
        if let Some(node) = self.nodes.get_mut(to as usize) {
            *node.edges.entry(from).or_insert(0.0) += weight;
        }
    }

    /// Build a graph from segmented documents
    ///
    /// Only elements adjacent within the same document are linked. A node is
    /// created on its first pair, so node ids follow first co-occurrence and
    /// elements that never neighbour anything are absent.
    pub fn from_segments(documents: &[SegmentedDocument]) -> Self {
        let capacity = documents.iter().map(Vec::len).sum::<usize>() / 2;
        let mut builder = Self::with_capacity(capacity);

        for doc in documents {
            for pair in doc.windows(2) {
                let prev = builder.get_or_create_node(&pair[0]);
                let node = builder.get_or_create_node(&pair[1]);
                builder.increment_edge(prev, node, 1.0);
            }
        }

        builder
    }

    /// Get the number of nodes in the graph
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Get a node by ID
    pub fn get_node(&self, id: u32) -> Option<&BuilderNode> {
        self.nodes.get(id as usize)
    }

    /// Get a node ID by element
    pub fn get_node_id(&self, key: &[TokenId]) -> Option<u32> {
        self.key_to_id.get(key).copied()
    }

    /// Iterate over all nodes
    pub fn nodes(&self) -> impl Iterator<Item = (u32, &BuilderNode)> {
        self.nodes.iter().enumerate().map(|(i, n)| (i as u32, n))
    }

    /// Check if the graph is empty
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
