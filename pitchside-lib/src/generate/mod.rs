//! Grounded answer generation
//!
//! The retrieved documents are folded into a fixed two-slot prompt template
//! and sent to a generation backend in a single call. No streaming, no
//! multi-turn memory, no retry: one question, one prompt, one answer.

use async_trait::async_trait;

use crate::doc::MatchDoc;
use crate::Result;

/// Prompt template with two slots: the retrieved match texts and the
/// question.
const ANSWER_TEMPLATE: &str = "\
You are an expert analyst for IPL cricket based on 2024 season data.

Here are some relevant match details from IPL 2024:
{matches}

Based on this data, answer the question or provide your prediction for IPL 2025:

Question: {question}
";

/// Render the answer prompt for a question over its retrieved documents.
///
/// Document texts are joined with blank lines, in retrieval order.
#[must_use]
pub fn build_prompt(docs: &[MatchDoc], question: &str) -> String {
    let matches = docs
        .iter()
        .map(|d| d.content.as_str())
        .collect::<Vec<_>>()
        .join("\n\n");

    ANSWER_TEMPLATE
        .replace("{matches}", &matches)
        .replace("{question}", question)
}

/// Trait for answer generation backends
#[async_trait]
pub trait Generator: Send + Sync {
    /// Generate a completion for the rendered prompt
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Returns the model name/identifier
    fn model_name(&self) -> &str;
}

mod ollama;
pub use ollama::*;
