//! Text handling ahead of phrase mining
//!
//! Token interning, stopword filtering and the raw-text cleaner interface.

pub mod cleaner;
pub mod interner;
pub mod stopwords;
