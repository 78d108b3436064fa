use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};

use crate::embed::{Embedder, Embedding};
use crate::{Error, Result};

const MODEL_NAME: &str = "mixedbread-ai/mxbai-embed-large-v1";
const DIMENSION: usize = 1024;

/// Retrieval instruction prepended to queries, per the mxbai prompt recipe.
/// Document texts are embedded as-is, with no prefix.
const QUERY_PREFIX: &str = "Represent this sentence for searching relevant passages:";

/// Inference batch size. Match summaries are a dozen short lines each, so
/// one season fits in very few batches.
const BATCH_SIZE: usize = 64;

/// Embedder backed by mixedbread-ai/mxbai-embed-large-v1.
///
/// Runs in-process via fastembed (ONNX). The model weighs ~700MB and is
/// downloaded on first use; inputs are truncated at 512 tokens.
pub struct MxbaiEmbedder {
    model: TextEmbedding,
}

impl MxbaiEmbedder {
    /// Load the model, downloading it on first use.
    pub fn new() -> Result<Self> {
        let opts = InitOptions::new(EmbeddingModel::MxbaiEmbedLargeV1)
            .with_show_download_progress(true);

        let model = TextEmbedding::try_new(opts)
            .map_err(|e| Error::Embedding(format!("failed to load {MODEL_NAME}: {e}")))?;

        Ok(Self { model })
    }

    /// Run one batch through the model and check the output shape.
    ///
    /// fastembed reports model failures per batch, not per text; a vector of
    /// the wrong width here means the wrong model files are on disk.
    fn embed_batch(&mut self, texts: Vec<String>) -> Result<Vec<Embedding>> {
        let expected = texts.len();
        let embeddings = self
            .model
            .embed(texts, Some(BATCH_SIZE))
            .map_err(|e| Error::Embedding(e.to_string()))?;

        if embeddings.len() != expected {
            return Err(Error::Embedding(format!(
                "expected {expected} embeddings, model returned {}",
                embeddings.len()
            )));
        }
        if let Some(bad) = embeddings.iter().find(|e| e.len() != DIMENSION) {
            return Err(Error::Embedding(format!(
                "model returned {}-dimensional vector, expected {DIMENSION}",
                bad.len()
            )));
        }

        Ok(embeddings)
    }
}

impl Embedder for MxbaiEmbedder {
    fn model_name(&self) -> &str {
        MODEL_NAME
    }

    fn dimension(&self) -> usize {
        DIMENSION
    }

    fn embed_documents(&mut self, texts: &[&str]) -> Result<Vec<Embedding>> {
        let owned: Vec<String> = texts.iter().map(|t| (*t).to_string()).collect();
        self.embed_batch(owned)
    }

    fn embed_query(&mut self, text: &str) -> Result<Embedding> {
        let prompt = format!("{QUERY_PREFIX} {text}");
        let mut embeddings = self.embed_batch(vec![prompt])?;
        embeddings
            .pop()
            .ok_or_else(|| Error::Embedding("model returned no embedding for query".to_string()))
    }
}
