//! Zhipu model settings and model-id helpers

use serde::{Deserialize, Serialize};

/// Known model identifiers, see <https://bigmodel.cn/dev/howuse/model>
pub mod models {
    // Language models
    pub const GLM_4_PLUS: &str = "glm-4-plus";
    pub const GLM_4_AIR: &str = "glm-4-air";
    pub const GLM_4_AIRX: &str = "glm-4-airx";
    pub const GLM_4_LONG: &str = "glm-4-long";
    pub const GLM_4_FLASH: &str = "glm-4-flash";
    pub const GLM_4_FLASHX: &str = "glm-4-flashx";

    // Vision models
    pub const GLM_4V_PLUS: &str = "glm-4v-plus";
    pub const GLM_4V: &str = "glm-4v";
    pub const GLM_4V_FLASH: &str = "glm-4v-flash";

    // Reasoning models
    pub const GLM_Z1_AIR: &str = "glm-z1-air";
    pub const GLM_Z1_AIRX: &str = "glm-z1-airx";
    pub const GLM_Z1_FLASH: &str = "glm-z1-flash";

    // Embedding models
    pub const EMBEDDING_2: &str = "embedding-2";
    pub const EMBEDDING_3: &str = "embedding-3";

    // Image models
    pub const GLM_IMAGE: &str = "glm-image";
    pub const COGVIEW_3_FLASH: &str = "cogview-3-flash";
    pub const COGVIEW_4: &str = "cogview-4";
}

/// True for vision-capable (multimodal) chat models
pub fn is_vision_model(model_id: &str) -> bool {
    model_id.contains("4v") || model_id.contains("4.1v")
}

/// True for reasoning models that emit thinking content
pub fn is_reasoning_model(model_id: &str) -> bool {
    model_id.contains("z1") || model_id.contains("zero")
}

/// Thinking mode configuration for GLM-4.5+ models
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZhipuThinkingConfig {
    /// "enabled" for deep reasoning before responding, "disabled" otherwise
    #[serde(rename = "type")]
    pub mode: ZhipuThinkingMode,
    /// When true, reasoning from previous turns is not retained in context
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clear_thinking: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZhipuThinkingMode {
    Enabled,
    Disabled,
}

/// Provider-specific chat settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ZhipuChatSettings {
    /// Unique ID of the end user; 6-128 characters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// Unique request ID; the platform generates one when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    /// When false, the temperature/top_p sampling strategy is disabled
    #[serde(skip_serializing_if = "Option::is_none")]
    pub do_sample: Option<bool>,
    /// Thinking mode for GLM-4.5+ models
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thinking: Option<ZhipuThinkingConfig>,
}

/// Provider-specific embedding settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ZhipuEmbeddingSettings {
    /// Override the embedding dimension, defaults to 2048.
    /// 256, 512, 1024 or 2048 are recommended for embedding-3.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<u32>,
    /// Override the per-call batch maximum, defaults to the documented 64
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_embeddings_per_call: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vision_models_are_detected_by_id() {
        assert!(is_vision_model("glm-4v-plus"));
        assert!(is_vision_model("glm-4v-flash"));
        assert!(is_vision_model("glm-4.1v-thinking-flash"));
        assert!(!is_vision_model("glm-4-plus"));
    }

    #[test]
    fn reasoning_models_are_detected_by_id() {
        assert!(is_reasoning_model("glm-z1-air"));
        assert!(!is_reasoning_model("glm-4-flash"));
    }

    #[test]
    fn thinking_config_serializes_with_type_tag() {
        let cfg = ZhipuThinkingConfig {
            mode: ZhipuThinkingMode::Enabled,
            clear_thinking: None,
        };
        assert_eq!(
            serde_json::to_value(&cfg).unwrap(),
            serde_json::json!({ "type": "enabled" })
        );
    }
}
