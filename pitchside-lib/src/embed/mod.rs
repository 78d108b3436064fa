//! Text embedding
//!
//! Queries and documents go through the same model but not the same path:
//! retrieval-tuned models want an instruction prefix on the query side and
//! raw text on the document side. The [`Embedder`] trait keeps that split
//! explicit so callers never have to know which prompt recipe the concrete
//! model uses.
//!
//! The production implementation is [`MxbaiEmbedder`]
//! (mixedbread-ai/mxbai-embed-large-v1, run in-process through fastembed's
//! ONNX runtime). Tests swap in deterministic stubs through the same trait.

use crate::Result;

/// A vector embedding - fixed size array of floats
pub type Embedding = Vec<f32>;

/// Trait for text embedding models
pub trait Embedder: Send + Sync {
    /// Embed document texts for indexing, batched
    fn embed_documents(&mut self, texts: &[&str]) -> Result<Vec<Embedding>>;

    /// Embed a single query for searching, applying the model's query
    /// prompt recipe
    fn embed_query(&mut self, text: &str) -> Result<Embedding>;

    /// Returns the embedding dimension
    fn dimension(&self) -> usize;

    /// Returns the model name/identifier
    fn model_name(&self) -> &str;
}

mod mxbai;
pub use mxbai::*;
