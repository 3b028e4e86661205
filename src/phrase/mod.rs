//! Phrase mining
//!
//! This module provides the interned corpus, unigram/bigram statistics,
//! significance-tested phrase discovery and longest-match re-segmentation.

pub mod corpus;
pub mod frequency;
pub mod miner;
pub mod segmenter;
pub mod table;
