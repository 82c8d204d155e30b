//! Embedding types

use serde::{Deserialize, Serialize};

/// Token usage for an embedding call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbeddingUsage {
    /// Tokens consumed by the call
    pub tokens: u64,
}

/// Result of a batch embedding call.
///
/// Vector order matches the input value order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingResponse {
    /// One embedding vector per input value, in input order
    pub embeddings: Vec<Vec<f32>>,
    /// Usage, omitted when the provider did not report it
    pub usage: Option<EmbeddingUsage>,
}
