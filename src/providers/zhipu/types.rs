//! Zhipu wire types
//!
//! Limited versions of the API schemas, focused on what the implementation
//! needs; fields the provider may omit or null are `Option` so that nullish
//! values deserialize to an explicit absent state instead of failing.

use serde::{Deserialize, Serialize};

/// Outbound message in Zhipu chat format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum ZhipuMessage {
    System {
        content: String,
    },
    User {
        content: ZhipuUserContent,
    },
    Assistant {
        content: String,
        /// Marks a trailing assistant turn as a continuation prefix
        #[serde(skip_serializing_if = "Option::is_none")]
        prefix: Option<bool>,
        #[serde(skip_serializing_if = "Option::is_none")]
        tool_calls: Option<Vec<ZhipuToolCall>>,
    },
    Tool {
        content: String,
        tool_call_id: String,
    },
}

/// User message content: plain string or typed parts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ZhipuUserContent {
    Text(String),
    Parts(Vec<ZhipuUserContentPart>),
}

/// One typed content part of a user message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ZhipuUserContentPart {
    Text { text: String },
    ImageUrl { image_url: ZhipuMediaUrl },
    VideoUrl { video_url: ZhipuMediaUrl },
}

/// URL wrapper used by image/video parts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZhipuMediaUrl {
    pub url: String,
}

/// Tool call in an assistant message or a non-stream response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZhipuToolCall {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub function: ZhipuFunctionCall,
}

/// Function name plus JSON-encoded arguments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZhipuFunctionCall {
    pub name: String,
    pub arguments: String,
}

/// Non-stream chat completion response
#[derive(Debug, Clone, Deserialize)]
pub struct ZhipuChatResponse {
    pub id: Option<String>,
    pub created: Option<i64>,
    pub model: Option<String>,
    #[serde(default)]
    pub choices: Vec<ZhipuResponseChoice>,
    pub usage: Option<ZhipuUsage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ZhipuResponseChoice {
    pub message: ZhipuResponseMessage,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ZhipuResponseMessage {
    pub content: Option<String>,
    pub tool_calls: Option<Vec<ZhipuToolCall>>,
}

/// Usage block shared by responses and trailing stream chunks
#[derive(Debug, Clone, Deserialize)]
pub struct ZhipuUsage {
    pub prompt_tokens: Option<u64>,
    pub completion_tokens: Option<u64>,
}

/// One streaming chunk
#[derive(Debug, Clone, Deserialize)]
pub struct ZhipuChatChunk {
    pub id: Option<String>,
    pub created: Option<i64>,
    pub model: Option<String>,
    #[serde(default)]
    pub choices: Vec<ZhipuChunkChoice>,
    pub usage: Option<ZhipuUsage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ZhipuChunkChoice {
    pub delta: Option<ZhipuChunkDelta>,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ZhipuChunkDelta {
    pub content: Option<String>,
    pub tool_calls: Option<Vec<ZhipuToolCallDelta>>,
}

/// Tool-call fragment within a chunk delta.
///
/// The index is required: without it the fragment cannot be keyed to an
/// accumulator entry, so its absence fails chunk parsing.
#[derive(Debug, Clone, Deserialize)]
pub struct ZhipuToolCallDelta {
    pub index: u32,
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub function: Option<ZhipuFunctionCallDelta>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ZhipuFunctionCallDelta {
    pub name: Option<String>,
    pub arguments: Option<String>,
}

/// Error body: `{"error": {"message": ..., "code": ...}}`
#[derive(Debug, Clone, Deserialize)]
pub struct ZhipuErrorResponse {
    pub error: ZhipuErrorDetail,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ZhipuErrorDetail {
    pub message: String,
    /// String or number depending on the endpoint
    pub code: Option<serde_json::Value>,
}

/// Embedding response
#[derive(Debug, Clone, Deserialize)]
pub struct ZhipuEmbeddingResponse {
    #[serde(default)]
    pub data: Vec<ZhipuEmbeddingData>,
    pub usage: Option<ZhipuEmbeddingUsage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ZhipuEmbeddingData {
    pub embedding: Vec<f32>,
    pub index: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ZhipuEmbeddingUsage {
    pub prompt_tokens: u64,
    pub total_tokens: Option<u64>,
}

/// Image generation response
#[derive(Debug, Clone, Deserialize)]
pub struct ZhipuImageResponse {
    pub created: Option<i64>,
    #[serde(default)]
    pub data: Vec<ZhipuImageData>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ZhipuImageData {
    pub url: String,
}
