//! Streaming event types for real-time responses

use std::pin::Pin;

use futures::Stream;
use serde::{Deserialize, Serialize};

use crate::error::LlmError;
use crate::types::{FinishReason, ResponseMetadata, TokenUsage, Warning};

/// Chat streaming event.
///
/// Events arrive in order as a lazy, forward-only sequence. Exactly one
/// `Finish` terminates every stream, always last, carrying a best-effort
/// usage snapshot even after errors.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ChatStreamEvent {
    /// One-time response metadata, emitted on the first parsed chunk
    ResponseMetadata {
        #[serde(flatten)]
        metadata: ResponseMetadata,
    },

    /// Incremental text content
    TextDelta { delta: String },

    /// Incremental tool-call argument text for one in-progress call
    ToolCallDelta {
        tool_call_id: String,
        tool_name: String,
        args_text_delta: String,
    },

    /// A tool call whose argument string is complete
    ToolCall {
        tool_call_id: String,
        tool_name: String,
        /// Raw JSON-encoded arguments, never pre-parsed
        args: String,
    },

    /// Error observed mid-stream; the stream continues and still finishes
    Error { error: String },

    /// Terminal event: finish reason plus best-effort usage snapshot
    Finish {
        finish_reason: FinishReason,
        usage: TokenUsage,
    },
}

/// A stream of chat events
pub type ChatStream = Pin<Box<dyn Stream<Item = Result<ChatStreamEvent, LlmError>> + Send>>;

/// Return value of a streaming chat call
pub struct ChatStreamResponse {
    /// The event stream
    pub stream: ChatStream,
    /// Non-fatal issues encountered while building the request
    pub warnings: Vec<Warning>,
    /// Copy of the raw outbound request body, for diagnostics
    pub request_body: String,
}

impl std::fmt::Debug for ChatStreamResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatStreamResponse")
            .field("warnings", &self.warnings)
            .field("request_body", &self.request_body)
            .finish_non_exhaustive()
    }
}
