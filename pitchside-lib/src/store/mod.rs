//! Vector storage backends
//!
//! # Storage Model
//!
//! Each stored item consists of:
//! - `MatchDoc`: the rendered summary and metadata
//! - `Embedding`: the vector representation
//!
//! Insertion order is preserved and inserting an existing id replaces the
//! stored item, so rebuilding over the same rows never grows the index.
//!
//! # Usage
//!
//! ```ignore
//! use pitchside_lib::store::{DiskStore, VectorStore};
//!
//! let mut store = DiskStore::open(path)?;
//! store.insert(&docs, &embeddings)?;
//! store.persist()?;
//!
//! // Search by vector similarity
//! let results = store.search(&query_embedding, 20)?;
//!
//! // Full scan for metadata filtering
//! let all = store.all();
//! ```

use serde::{Deserialize, Serialize};

use crate::doc::MatchDoc;
use crate::embed::Embedding;
use crate::Result;

/// A search result with similarity score
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// The matched document
    pub doc: MatchDoc,
    /// Similarity score (higher is more similar)
    /// For cosine similarity: -1.0 to 1.0
    pub score: f32,
}

impl PartialOrd for SearchResult {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SearchResult {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        if self.score > other.score {
            std::cmp::Ordering::Greater
        } else if self.score < other.score {
            std::cmp::Ordering::Less
        } else {
            std::cmp::Ordering::Equal
        }
    }
}

impl PartialEq for SearchResult {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == std::cmp::Ordering::Equal
    }
}

impl Eq for SearchResult {}

/// A document paired with its embedding, as held by a store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredDoc {
    pub doc: MatchDoc,
    pub embedding: Embedding,
}

/// Trait for vector storage backends
pub trait VectorStore: Send + Sync {
    /// Insert documents with their embeddings
    ///
    /// Upserts by document id: an id seen before replaces the stored item.
    ///
    /// # Arguments
    /// * `docs` - The documents to store
    /// * `embeddings` - Corresponding embeddings (must be same length)
    fn insert(&mut self, docs: &[MatchDoc], embeddings: &[Embedding]) -> Result<()>;

    /// Search for similar documents
    ///
    /// # Arguments
    /// * `query_embedding` - The query vector
    /// * `k` - Number of results to return
    ///
    /// # Returns
    /// Top-k results sorted by similarity (highest first)
    fn search(&self, query_embedding: &Embedding, k: usize) -> Result<Vec<SearchResult>>;

    /// Every stored document in insertion order, for metadata filtering.
    ///
    /// This is an unbounded full scan; there is no secondary index on team
    /// names.
    fn all(&self) -> Vec<MatchDoc>;

    /// Get total number of stored documents
    fn len(&self) -> usize;

    /// Check if store is empty
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clear all stored data
    fn clear(&mut self);
}

mod disk;
mod memory;

pub use disk::*;
pub use memory::*;
