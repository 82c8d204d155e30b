//! Response types: finish reasons, usage, metadata and the result envelope

use serde::{Deserialize, Serialize};

use super::Warning;

/// Reason why the model stopped generating tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    /// Model generated a stop sequence or completed naturally
    Stop,
    /// Model reached the maximum number of tokens
    Length,
    /// Model triggered tool calls
    ToolCalls,
    /// Content was filtered due to safety/policy violations
    ContentFilter,
    /// An error occurred during generation
    Error,
    /// The provider did not report a reason, or it was not recognized
    Unknown,
}

/// Token usage reported by the provider.
///
/// Counts are `f64` with NaN as the "unknown" sentinel so that downstream
/// consumers get a numeric signal rather than a separate optionality channel.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Input tokens consumed
    pub prompt_tokens: f64,
    /// Output tokens generated
    pub completion_tokens: f64,
}

impl TokenUsage {
    /// Usage with both fields unknown
    pub fn unknown() -> Self {
        Self {
            prompt_tokens: f64::NAN,
            completion_tokens: f64::NAN,
        }
    }

    /// Usage from reported counts
    pub fn new(prompt_tokens: f64, completion_tokens: f64) -> Self {
        Self {
            prompt_tokens,
            completion_tokens,
        }
    }

    /// True when both counts were reported
    pub fn is_known(&self) -> bool {
        !self.prompt_tokens.is_nan() && !self.completion_tokens.is_nan()
    }
}

impl Default for TokenUsage {
    fn default() -> Self {
        Self::unknown()
    }
}

/// Response metadata (id, model, creation time)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponseMetadata {
    /// Response ID assigned by the provider
    pub id: Option<String>,
    /// Model that produced the response
    pub model: Option<String>,
    /// Creation time
    pub timestamp: Option<chrono::DateTime<chrono::Utc>>,
}

/// A completed tool call extracted from a response.
///
/// `arguments` is the raw JSON string from the wire; it is never pre-parsed
/// so the caller controls parsing failures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    /// Tool call ID (used to correlate the eventual result)
    pub tool_call_id: String,
    /// Name of the invoked tool
    pub tool_name: String,
    /// Raw JSON-encoded arguments
    pub arguments: String,
}

/// Result of a non-streaming chat generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    /// Generated text, omitted when empty or absent
    pub text: Option<String>,
    /// Tool calls requested by the model
    pub tool_calls: Option<Vec<ToolCall>>,
    /// Why generation stopped
    pub finish_reason: FinishReason,
    /// Token usage (NaN fields when not reported)
    pub usage: TokenUsage,
    /// Response metadata
    pub metadata: ResponseMetadata,
    /// Non-fatal issues encountered while building the request
    pub warnings: Vec<Warning>,
    /// Copy of the raw outbound request body, for diagnostics
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_body: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_usage_is_nan() {
        let usage = TokenUsage::unknown();
        assert!(usage.prompt_tokens.is_nan());
        assert!(usage.completion_tokens.is_nan());
        assert!(!usage.is_known());
    }

    #[test]
    fn reported_usage_is_known() {
        assert!(TokenUsage::new(10.0, 5.0).is_known());
        assert!(!TokenUsage::new(10.0, f64::NAN).is_known());
    }
}
