//! Zhipu provider entry point: configuration and model factories

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use secrecy::{ExposeSecret, SecretString};

use super::chat::ZhipuChatModel;
use super::embedding::ZhipuEmbeddingModel;
use super::image::ZhipuImageModel;
use super::settings::{ZhipuChatSettings, ZhipuEmbeddingSettings};
use crate::error::LlmError;

pub const DEFAULT_BASE_URL: &str = "https://open.bigmodel.cn/api/paas/v4";
const API_KEY_ENV_VAR: &str = "ZHIPU_API_KEY";

/// Shared connection configuration handed to every model handle
#[derive(Debug, Clone)]
pub struct ZhipuConfig {
    pub(crate) api_key: SecretString,
    pub(crate) base_url: String,
    pub(crate) custom_headers: Vec<(String, String)>,
    pub(crate) http_client: reqwest::Client,
}

impl ZhipuConfig {
    /// Absolute URL for an API path like "/chat/completions"
    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Request headers: bearer auth plus any custom headers
    pub(crate) fn headers(&self) -> Result<HeaderMap, LlmError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let auth = format!("Bearer {}", self.api_key.expose_secret());
        let mut auth = HeaderValue::from_str(&auth)
            .map_err(|e| LlmError::ConfigurationError(format!("invalid API key: {e}")))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        for (name, value) in &self.custom_headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| LlmError::ConfigurationError(format!("invalid header name: {e}")))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| LlmError::ConfigurationError(format!("invalid header value: {e}")))?;
            headers.insert(name, value);
        }

        Ok(headers)
    }

    #[cfg(test)]
    pub(crate) fn for_tests() -> Self {
        Self {
            api_key: SecretString::from("test-key"),
            base_url: DEFAULT_BASE_URL.to_string(),
            custom_headers: Vec::new(),
            http_client: reqwest::Client::new(),
        }
    }
}

/// Builder for a [`Zhipu`] provider handle.
///
/// The API key falls back to the `ZHIPU_API_KEY` environment variable.
#[derive(Debug, Default)]
pub struct ZhipuBuilder {
    api_key: Option<SecretString>,
    base_url: Option<String>,
    custom_headers: Vec<(String, String)>,
    http_client: Option<reqwest::Client>,
}

impl ZhipuBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the API key explicitly
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(SecretString::from(key.into()));
        self
    }

    /// Override the API base URL (trailing slashes are trimmed)
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Add a custom header sent with every request
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.custom_headers.push((name.into(), value.into()));
        self
    }

    /// Use a preconfigured HTTP client (connection pools, proxies, timeouts)
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    pub fn build(self) -> Result<Zhipu, LlmError> {
        let api_key = match self.api_key {
            Some(key) => key,
            None => std::env::var(API_KEY_ENV_VAR)
                .map(SecretString::from)
                .map_err(|_| {
                    LlmError::MissingApiKey(format!(
                        "no API key provided and {API_KEY_ENV_VAR} is not set"
                    ))
                })?,
        };

        let base_url = self
            .base_url
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Ok(Zhipu {
            config: ZhipuConfig {
                api_key,
                base_url,
                custom_headers: self.custom_headers,
                http_client: self.http_client.unwrap_or_default(),
            },
        })
    }
}

/// Zhipu provider handle, a factory for model-bound clients
#[derive(Debug, Clone)]
pub struct Zhipu {
    config: ZhipuConfig,
}

impl Zhipu {
    pub fn builder() -> ZhipuBuilder {
        ZhipuBuilder::new()
    }

    /// Chat model with default settings
    pub fn chat_model(&self, model_id: impl Into<String>) -> ZhipuChatModel {
        self.chat_model_with_settings(model_id, ZhipuChatSettings::default())
    }

    /// Chat model with provider-specific settings
    pub fn chat_model_with_settings(
        &self,
        model_id: impl Into<String>,
        settings: ZhipuChatSettings,
    ) -> ZhipuChatModel {
        ZhipuChatModel::new(model_id.into(), settings, self.config.clone())
    }

    /// Embedding model with default settings
    pub fn embedding_model(&self, model_id: impl Into<String>) -> ZhipuEmbeddingModel {
        self.embedding_model_with_settings(model_id, ZhipuEmbeddingSettings::default())
    }

    /// Embedding model with provider-specific settings
    pub fn embedding_model_with_settings(
        &self,
        model_id: impl Into<String>,
        settings: ZhipuEmbeddingSettings,
    ) -> ZhipuEmbeddingModel {
        ZhipuEmbeddingModel::new(model_id.into(), settings, self.config.clone())
    }

    /// Image generation model
    pub fn image_model(&self, model_id: impl Into<String>) -> ZhipuImageModel {
        ZhipuImageModel::new(model_id.into(), self.config.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_trims_trailing_slash_from_base_url() {
        let provider = Zhipu::builder()
            .api_key("k")
            .base_url("https://example.com/api/")
            .build()
            .unwrap();
        assert_eq!(
            provider.config.url("/chat/completions"),
            "https://example.com/api/chat/completions"
        );
    }

    #[test]
    fn default_base_url_is_used_when_unset() {
        let provider = Zhipu::builder().api_key("k").build().unwrap();
        assert_eq!(provider.config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn headers_carry_bearer_auth_and_custom_entries() {
        let provider = Zhipu::builder()
            .api_key("secret-key")
            .header("x-trace-id", "abc")
            .build()
            .unwrap();
        let headers = provider.config.headers().unwrap();
        assert_eq!(headers[AUTHORIZATION], "Bearer secret-key");
        assert_eq!(headers["x-trace-id"], "abc");
    }
}
