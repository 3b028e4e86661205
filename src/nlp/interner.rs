//! String interning
//!
//! Tokens are mapped to dense `u32` ids in first-seen order, so any
//! structure indexed by id iterates in corpus order.

use crate::types::TokenId;
use rustc_hash::FxHashMap;

/// Bidirectional token <-> id table
#[derive(Debug, Clone, Default)]
pub struct TokenPool {
    ids: FxHashMap<String, TokenId>,
    strings: Vec<String>,
}

impl TokenPool {
    /// Create an empty pool
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the id for `token`, assigning the next free id if unseen
    pub fn intern(&mut self, token: &str) -> TokenId {
        if let Some(&id) = self.ids.get(token) {
            return id;
        }

        let id = self.strings.len() as TokenId;
        self.ids.insert(token.to_string(), id);
        self.strings.push(token.to_string());
        id
    }

    /// Look up an id without interning
    pub fn id(&self, token: &str) -> Option<TokenId> {
        self.ids.get(token).copied()
    }

    /// Resolve an id back to its string
    pub fn get(&self, id: TokenId) -> Option<&str> {
        self.strings.get(id as usize).map(String::as_str)
    }

    /// Render a token sequence joined by `delimiter`
    pub fn join(&self, ids: &[TokenId], delimiter: &str) -> String {
        let mut out = String::new();
        for (i, &id) in ids.iter().enumerate() {
            if i > 0 {
                out.push_str(delimiter);
            }
            out.push_str(self.get(id).unwrap_or_default());
        }
        out
    }

    /// Number of distinct tokens
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    /// Check if the pool is empty
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}
