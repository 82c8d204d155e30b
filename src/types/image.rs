//! Image generation types

use serde::{Deserialize, Serialize};

use super::Warning;

/// A generated image: the hosted URL plus the downloaded bytes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedImage {
    /// URL where the provider hosts the image
    pub url: String,
    /// Downloaded image bytes
    #[serde(skip)]
    pub data: Vec<u8>,
}

/// Result of an image generation call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageResponse {
    /// Generated images
    pub images: Vec<GeneratedImage>,
    /// Model that produced the images
    pub model: String,
    /// Response timestamp
    pub timestamp: chrono::DateTime<chrono::Utc>,
    /// Non-fatal issues encountered while building the request
    pub warnings: Vec<Warning>,
}

/// Options for an image generation call
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImageGenerationOptions {
    /// Output size as "WIDTHxHEIGHT". Both sides must be within 512-2048 px,
    /// divisible by 16, with a total area of at most 2^21 pixels.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    /// Number of images requested (unsupported; warned and dropped)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub n: Option<u32>,
    /// Random seed (unsupported; warned and dropped)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Aspect ratio (unsupported; warned and dropped, use `size` instead)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aspect_ratio: Option<String>,
    /// End-user identifier forwarded to the provider
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}
