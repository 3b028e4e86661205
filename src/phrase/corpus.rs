//! Interned per-location corpus
//!
//! Documents are stored as `Option<TokenId>` slots: `None` marks a sentinel
//! (filtered or boundary) position. Empty tokens are treated the same way.

use crate::nlp::interner::TokenPool;
use crate::types::TokenId;

/// One document as interned slots
pub type Document = Vec<Option<TokenId>>;

/// The cleaned documents of a single location
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    pool: TokenPool,
    documents: Vec<Document>,
}

impl Corpus {
    /// Intern a sequence of cleaned token sequences
    pub fn new<D, T>(documents: D, sentinel: &str) -> Self
    where
        D: IntoIterator,
        D::Item: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let mut pool = TokenPool::new();
        let documents = documents
            .into_iter()
            .map(|doc| {
                doc.into_iter()
                    .map(|token| {
                        let token = token.as_ref();
                        if token.is_empty() || token == sentinel {
                            None
                        } else {
                            Some(pool.intern(token))
                        }
                    })
                    .collect()
            })
            .collect();

        Self { pool, documents }
    }

    /// The interned documents, in input order
    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    /// The token table shared by every downstream stage
    pub fn pool(&self) -> &TokenPool {
        &self.pool
    }

    /// Number of documents (including empty ones)
    pub fn num_docs(&self) -> usize {
        self.documents.len()
    }

    /// Number of distinct content tokens
    pub fn vocabulary_size(&self) -> usize {
        self.pool.len()
    }

    /// Check if the corpus has no documents
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}
