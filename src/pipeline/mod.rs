//! Pipeline orchestration
//!
//! This module wires the phrase miner, graph builder and PageRank scorer into
//! a per-location pipeline, plus the batch driver that runs many locations on
//! the rayon pool and turns each result into a [`record::LocationRecord`].

pub mod artifacts;
pub mod batch;
pub mod observer;
pub mod record;
pub mod runner;
