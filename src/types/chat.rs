//! Chat message types
//!
//! A conversation is an ordered sequence of messages; each message carries a
//! role and a sequence of typed content parts. The roles and part types form
//! closed sets: anything outside them is a programming error on the caller
//! side, not a runtime condition.

use serde::{Deserialize, Serialize};

/// Message role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
    Tool,
}

/// One message in a conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Role of the message author
    pub role: MessageRole,
    /// Ordered content parts
    pub content: Vec<ContentPart>,
}

impl ChatMessage {
    /// Creates a system message with plain text content
    pub fn system(text: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: vec![ContentPart::text(text)],
        }
    }

    /// Creates a user message with plain text content
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: vec![ContentPart::text(text)],
        }
    }

    /// Creates an assistant message with plain text content
    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: vec![ContentPart::text(text)],
        }
    }

    /// Creates a message with explicit parts
    pub fn with_parts(role: MessageRole, content: Vec<ContentPart>) -> Self {
        Self { role, content }
    }

    /// Creates a tool message carrying one tool result
    pub fn tool_result(
        tool_call_id: impl Into<String>,
        tool_name: impl Into<String>,
        output: ToolResultOutput,
    ) -> Self {
        Self {
            role: MessageRole::Tool,
            content: vec![ContentPart::ToolResult {
                tool_call_id: tool_call_id.into(),
                tool_name: tool_name.into(),
                output,
            }],
        }
    }
}

/// Media data source - URL, base64 string, or raw bytes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MediaSource {
    /// URL (http, https, data URLs, etc.)
    Url { url: String },
    /// Base64-encoded data (sent verbatim)
    Base64 { data: String },
    /// Raw binary data (base64-encoded into a `data:` URI when converted)
    #[serde(skip)]
    Binary { data: Vec<u8> },
}

impl MediaSource {
    /// Create from URL string
    pub fn url(url: impl Into<String>) -> Self {
        Self::Url { url: url.into() }
    }

    /// Create from a base64 string
    pub fn base64(data: impl Into<String>) -> Self {
        Self::Base64 { data: data.into() }
    }

    /// Create from raw bytes
    pub fn binary(data: Vec<u8>) -> Self {
        Self::Binary { data }
    }
}

/// Typed fragment of a message's content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ContentPart {
    /// Text content
    Text { text: String },

    /// File content (images, video, documents) with an IANA media type
    File {
        #[serde(flatten)]
        source: MediaSource,
        media_type: String,
    },

    /// Tool call request emitted by the assistant
    #[serde(rename = "tool-call")]
    ToolCall {
        #[serde(rename = "toolCallId")]
        tool_call_id: String,
        #[serde(rename = "toolName")]
        tool_name: String,
        /// Structured call input (JSON-serialized on the wire)
        #[serde(rename = "input")]
        arguments: serde_json::Value,
    },

    /// Result of a previous tool call
    #[serde(rename = "tool-result")]
    ToolResult {
        #[serde(rename = "toolCallId")]
        tool_call_id: String,
        #[serde(rename = "toolName")]
        tool_name: String,
        output: ToolResultOutput,
    },

    /// Reasoning/thinking content (no Zhipu wire representation; dropped on
    /// conversion)
    Reasoning { text: String },
}

impl ContentPart {
    /// Create a text part
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    /// Create an image part from a URL
    pub fn image_url(url: impl Into<String>) -> Self {
        Self::File {
            source: MediaSource::url(url),
            media_type: "image/jpeg".to_string(),
        }
    }

    /// Create an image part from raw bytes
    pub fn image_bytes(data: Vec<u8>, media_type: impl Into<String>) -> Self {
        Self::File {
            source: MediaSource::binary(data),
            media_type: media_type.into(),
        }
    }

    /// Create a tool call part
    pub fn tool_call(
        tool_call_id: impl Into<String>,
        tool_name: impl Into<String>,
        arguments: serde_json::Value,
    ) -> Self {
        Self::ToolCall {
            tool_call_id: tool_call_id.into(),
            tool_name: tool_name.into(),
            arguments,
        }
    }
}

/// Tool result output - supports multiple formats
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ToolResultOutput {
    /// Plain text output
    Text { value: String },
    /// Structured JSON output
    Json { value: serde_json::Value },
    /// Error message in plain text
    ErrorText { value: String },
    /// Structured error information
    ErrorJson { value: serde_json::Value },
    /// Multi-part content output
    Content { value: serde_json::Value },
}

impl ToolResultOutput {
    /// Plain text result
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text {
            value: value.into(),
        }
    }

    /// JSON result
    pub fn json(value: serde_json::Value) -> Self {
        Self::Json { value }
    }

    /// Text error result
    pub fn error_text(value: impl Into<String>) -> Self {
        Self::ErrorText {
            value: value.into(),
        }
    }
}

/// Response format requested from the model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ResponseFormat {
    /// Free-form text (default)
    Text,
    /// JSON object output, with an optional schema hint
    Json {
        #[serde(skip_serializing_if = "Option::is_none")]
        schema: Option<serde_json::Value>,
    },
}

/// Standardized sampling/generation parameters
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommonParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_k: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_sequences: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency_penalty: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub presence_penalty: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<ResponseFormat>,
}

/// A chat request: conversation, tool declarations and sampling parameters
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<crate::types::Tool>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_choice: Option<crate::types::ToolChoice>,
    #[serde(default)]
    pub params: CommonParams,
}

impl ChatRequest {
    /// Create a request from messages with default parameters
    pub fn new(messages: Vec<ChatMessage>) -> Self {
        Self {
            messages,
            ..Default::default()
        }
    }

    /// Attach tool declarations
    pub fn with_tools(mut self, tools: Vec<crate::types::Tool>) -> Self {
        self.tools = Some(tools);
        self
    }

    /// Set the tool-choice policy
    pub fn with_tool_choice(mut self, choice: crate::types::ToolChoice) -> Self {
        self.tool_choice = Some(choice);
        self
    }

    /// Set sampling parameters
    pub fn with_params(mut self, params: CommonParams) -> Self {
        self.params = params;
        self
    }
}

impl Default for ChatMessage {
    fn default() -> Self {
        Self {
            role: MessageRole::User,
            content: Vec::new(),
        }
    }
}
