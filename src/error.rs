//! Error types
//!
//! The numeric core (frequency model, phrase miner, graph, ranker) never
//! fails: degenerate input produces empty output. Errors only surface at the
//! boundaries: configuration and geo index construction.

use thiserror::Error;

/// Errors returned by configuration handling and location indexing.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LocphraseError {
    /// A configuration value is outside its valid range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The configuration JSON could not be parsed.
    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_json::Error),

    /// A location index was requested over zero reference locations.
    #[error("cannot build a location index without reference locations")]
    NoReferenceLocations,

    /// A reference location carries a NaN or infinite coordinate.
    #[error("reference location {index} has a non-finite coordinate ({lat}, {lon})")]
    InvalidCoordinate { index: usize, lat: f64, lon: f64 },
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, LocphraseError>;
