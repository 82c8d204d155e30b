//! Zhipu embedding model

use serde_json::json;
use tracing::debug;

use super::provider::ZhipuConfig;
use super::settings::ZhipuEmbeddingSettings;
use super::types::ZhipuEmbeddingResponse;
use super::utils::map_error_body;
use crate::error::LlmError;
use crate::types::{EmbeddingResponse, EmbeddingUsage};

/// Default per-call batch limit of the embeddings endpoint
pub const MAX_EMBEDDINGS_PER_CALL: usize = 64;

/// Embedding model bound to one model ID
#[derive(Debug, Clone)]
pub struct ZhipuEmbeddingModel {
    model_id: String,
    settings: ZhipuEmbeddingSettings,
    config: ZhipuConfig,
}

impl ZhipuEmbeddingModel {
    pub(crate) fn new(
        model_id: String,
        settings: ZhipuEmbeddingSettings,
        config: ZhipuConfig,
    ) -> Self {
        Self {
            model_id,
            settings,
            config,
        }
    }

    pub fn model_id(&self) -> &str {
        &self.model_id
    }

    /// Maximum batch size accepted by a single call, settings override or
    /// the documented default
    pub fn max_embeddings_per_call(&self) -> usize {
        self.settings
            .max_embeddings_per_call
            .unwrap_or(MAX_EMBEDDINGS_PER_CALL)
    }

    /// Embeds a batch of texts, one vector per input in input order.
    ///
    /// The batch limit is checked before any network traffic.
    pub async fn embed(&self, values: Vec<String>) -> Result<EmbeddingResponse, LlmError> {
        if values.len() > self.max_embeddings_per_call() {
            return Err(LlmError::TooManyEmbeddingValues {
                max: self.max_embeddings_per_call(),
                requested: values.len(),
            });
        }

        let count = values.len();
        let mut body = json!({
            "model": self.model_id,
            "input": values,
        });
        if let Some(dimensions) = self.settings.dimensions {
            body["dimension"] = json!(dimensions);
        }

        debug!(model = %self.model_id, count, "sending embedding request");

        let response = self
            .config
            .http_client
            .post(self.config.url("/embeddings"))
            .headers(self.config.headers()?)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(map_error_body(status.as_u16(), &text));
        }

        let parsed: ZhipuEmbeddingResponse = response
            .json()
            .await
            .map_err(|e| LlmError::ParseError(format!("invalid embedding response: {e}")))?;

        Ok(EmbeddingResponse {
            embeddings: parsed.data.into_iter().map(|d| d.embedding).collect(),
            usage: parsed.usage.map(|u| EmbeddingUsage {
                tokens: u.prompt_tokens,
            }),
        })
    }
}
