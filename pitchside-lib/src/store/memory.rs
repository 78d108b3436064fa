use std::collections::{BinaryHeap, HashMap};

use crate::doc::MatchDoc;
use crate::embed::Embedding;
use crate::store::{SearchResult, StoredDoc, VectorStore};
use crate::{Error, Result};

/// In-memory vector store.
///
/// Uses brute-force cosine similarity search. Suitable for small datasets
/// (< 10k documents) - a season of matches is far below that.
pub struct MemoryStore {
    rows: Vec<StoredDoc>,
    index_by_id: HashMap<String, usize>,
}

impl MemoryStore {
    /// Create a new empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rows: Vec::new(),
            index_by_id: HashMap::new(),
        }
    }

    /// The stored rows in insertion order.
    #[must_use]
    pub fn rows(&self) -> &[StoredDoc] {
        &self.rows
    }

    pub(crate) fn push_row(&mut self, row: StoredDoc) {
        match self.index_by_id.get(&row.doc.id) {
            Some(&i) => self.rows[i] = row,
            None => {
                self.index_by_id.insert(row.doc.id.clone(), self.rows.len());
                self.rows.push(row);
            }
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl VectorStore for MemoryStore {
    fn insert(&mut self, docs: &[MatchDoc], embeddings: &[Embedding]) -> Result<()> {
        if docs.len() != embeddings.len() {
            return Err(Error::Store(format!(
                "{} docs but {} embeddings",
                docs.len(),
                embeddings.len()
            )));
        }

        for (doc, embedding) in docs.iter().zip(embeddings) {
            self.push_row(StoredDoc {
                doc: doc.clone(),
                embedding: embedding.clone(),
            });
        }
        Ok(())
    }

    fn search(&self, query: &Embedding, k: usize) -> Result<Vec<SearchResult>> {
        let mut results = BinaryHeap::with_capacity(self.rows.len());

        for row in &self.rows {
            results.push(SearchResult {
                doc: row.doc.clone(),
                score: cosine_similarity(query, &row.embedding),
            });
        }

        Ok(results
            .into_sorted_vec()
            .into_iter()
            .rev()
            .take(k)
            .collect())
    }

    fn all(&self) -> Vec<MatchDoc> {
        self.rows.iter().map(|row| row.doc.clone()).collect()
    }

    fn len(&self) -> usize {
        self.rows.len()
    }

    fn clear(&mut self) {
        self.rows.clear();
        self.index_by_id.clear();
    }
}

/// Compute cosine similarity between two vectors.
///
/// Returns a value in [-1, 1] where 1 means identical direction.
fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    debug_assert_eq!(a.len(), b.len(), "vectors must have same length");

    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot / (norm_a * norm_b)
}
