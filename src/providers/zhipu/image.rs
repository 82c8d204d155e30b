//! Zhipu image generation model

use serde_json::json;
use tracing::debug;

use super::provider::ZhipuConfig;
use super::types::ZhipuImageResponse;
use super::utils::map_error_body;
use crate::error::LlmError;
use crate::types::{GeneratedImage, ImageGenerationOptions, ImageResponse, Warning};

// Size constraints documented for the CogView endpoints.
const MIN_DIMENSION: u32 = 512;
const MAX_DIMENSION: u32 = 2048;
const DIMENSION_STEP: u32 = 16;
const MAX_PIXELS: u64 = 1 << 21;

/// Image model bound to one model ID
#[derive(Debug, Clone)]
pub struct ZhipuImageModel {
    model_id: String,
    config: ZhipuConfig,
}

impl ZhipuImageModel {
    pub(crate) fn new(model_id: String, config: ZhipuConfig) -> Self {
        Self { model_id, config }
    }

    pub fn model_id(&self) -> &str {
        &self.model_id
    }

    /// Generates images for a prompt.
    ///
    /// The endpoint returns URLs; each image is downloaded so the caller
    /// gets bytes as well.
    pub async fn generate(
        &self,
        prompt: &str,
        options: &ImageGenerationOptions,
    ) -> Result<ImageResponse, LlmError> {
        let mut warnings = Vec::new();
        if options.n.is_some_and(|n| n > 1) {
            warnings.push(Warning::unsupported_setting(
                "n",
                Some("only one image is generated per call"),
            ));
        }
        if options.seed.is_some() {
            warnings.push(Warning::unsupported_setting("seed", None::<String>));
        }
        if options.aspect_ratio.is_some() {
            warnings.push(Warning::unsupported_setting(
                "aspect_ratio",
                Some("use the size option instead"),
            ));
        }

        if let Some(size) = &options.size {
            validate_size(size)?;
        }

        let mut body = json!({
            "model": self.model_id,
            "prompt": prompt,
        });
        if let Some(size) = &options.size {
            body["size"] = json!(size);
        }
        if let Some(user_id) = &options.user_id {
            body["user_id"] = json!(user_id);
        }

        debug!(model = %self.model_id, "sending image generation request");

        let response = self
            .config
            .http_client
            .post(self.config.url("/images/generations"))
            .headers(self.config.headers()?)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(map_error_body(status.as_u16(), &text));
        }

        let parsed: ZhipuImageResponse = response
            .json()
            .await
            .map_err(|e| LlmError::ParseError(format!("invalid image response: {e}")))?;

        let mut images = Vec::with_capacity(parsed.data.len());
        for item in parsed.data {
            let bytes = self
                .config
                .http_client
                .get(&item.url)
                .send()
                .await?
                .error_for_status()
                .map_err(|e| LlmError::HttpError(format!("image download failed: {e}")))?
                .bytes()
                .await?;
            images.push(GeneratedImage {
                url: item.url,
                data: bytes.to_vec(),
            });
        }

        Ok(ImageResponse {
            images,
            model: self.model_id.clone(),
            timestamp: parsed
                .created
                .and_then(|secs| chrono::DateTime::from_timestamp(secs, 0))
                .unwrap_or_else(chrono::Utc::now),
            warnings,
        })
    }
}

/// Validates a "WIDTHxHEIGHT" size string against the endpoint's rules:
/// each dimension in 512..=2048 and divisible by 16, total pixels at most
/// 2^21.
fn validate_size(size: &str) -> Result<(), LlmError> {
    let (w, h) = size
        .split_once('x')
        .ok_or_else(|| LlmError::InvalidParameter(format!("invalid image size '{size}'")))?;
    let width: u32 = w
        .parse()
        .map_err(|_| LlmError::InvalidParameter(format!("invalid image width '{w}'")))?;
    let height: u32 = h
        .parse()
        .map_err(|_| LlmError::InvalidParameter(format!("invalid image height '{h}'")))?;

    for dim in [width, height] {
        if !(MIN_DIMENSION..=MAX_DIMENSION).contains(&dim) {
            return Err(LlmError::InvalidParameter(format!(
                "image dimension {dim} is outside {MIN_DIMENSION}..={MAX_DIMENSION}"
            )));
        }
        if dim % DIMENSION_STEP != 0 {
            return Err(LlmError::InvalidParameter(format!(
                "image dimension {dim} is not divisible by {DIMENSION_STEP}"
            )));
        }
    }
    if u64::from(width) * u64::from(height) > MAX_PIXELS {
        return Err(LlmError::InvalidParameter(format!(
            "image size {size} exceeds the {MAX_PIXELS} pixel limit"
        )));
    }
    Ok(())
}
