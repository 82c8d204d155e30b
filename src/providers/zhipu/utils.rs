//! Small mapping helpers shared by the chat and streaming paths

use chrono::{DateTime, Utc};

use super::types::ZhipuErrorResponse;
use crate::error::LlmError;
use crate::types::{FinishReason, ResponseMetadata};

/// Maps a provider finish reason string to the generic enum.
///
/// "sensitive" is Zhipu's content moderation verdict; "network_error" is an
/// upstream generation failure surfaced in-band.
pub fn map_finish_reason(reason: Option<&str>) -> FinishReason {
    match reason {
        Some("stop") => FinishReason::Stop,
        Some("length") => FinishReason::Length,
        Some("tool_calls") => FinishReason::ToolCalls,
        Some("sensitive") => FinishReason::ContentFilter,
        Some("network_error") => FinishReason::Error,
        _ => FinishReason::Unknown,
    }
}

/// Builds response metadata from the common id/model/created triple
pub fn response_metadata(
    id: Option<String>,
    model: Option<String>,
    created: Option<i64>,
) -> ResponseMetadata {
    ResponseMetadata {
        id,
        model,
        timestamp: created.and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0)),
    }
}

/// True when the accumulated text is a complete JSON document.
///
/// Used to decide whether a streamed tool call's arguments have finished
/// arriving, since the provider never signals per-call completion.
pub fn is_parsable_json(text: &str) -> bool {
    serde_json::from_str::<serde_json::Value>(text).is_ok()
}

/// Converts a non-2xx response body into an error.
///
/// Bodies follow `{"error": {"message": ..., "code": ...}}`; anything else
/// falls back to the raw body text.
pub fn map_error_body(status: u16, body: &str) -> LlmError {
    match serde_json::from_str::<ZhipuErrorResponse>(body) {
        Ok(parsed) => LlmError::api_error(status, parsed.error.message),
        Err(_) => LlmError::api_error(status, body.trim()),
    }
}
