//! Graph construction and representation
//!
//! This module provides the co-occurrence graph builder and its
//! row-normalized CSR transition matrix.

pub mod builder;
pub mod csr;
