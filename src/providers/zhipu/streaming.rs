//! Zhipu streaming chunk aggregation
//!
//! The provider streams tool-call arguments as raw text fragments, never
//! signals per-call completion, and may omit the `[DONE]` sentinel. The
//! converter therefore keeps per-index accumulators and decides a call is
//! complete the moment its buffered argument text parses as JSON; the flush
//! hook emits the single terminal `Finish` event.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tracing::warn;

use super::types::{ZhipuChatChunk, ZhipuToolCallDelta};
use super::utils::{is_parsable_json, map_finish_reason, response_metadata};
use crate::error::LlmError;
use crate::streaming::{ChatStreamEvent, SseEventConverter};
use crate::types::{FinishReason, TokenUsage};

/// In-progress tool call keyed by its chunk index
#[derive(Debug, Default)]
struct ToolCallAccumulator {
    id: String,
    name: String,
    arguments: String,
    /// Set once the terminal `ToolCall` event for this index was emitted
    has_finished: bool,
}

/// Mutable state threaded through the whole stream
#[derive(Debug)]
struct StreamState {
    finish_reason: FinishReason,
    usage: TokenUsage,
    is_first_chunk: bool,
    tool_calls: HashMap<u32, ToolCallAccumulator>,
    /// Guards the exactly-one-Finish invariant
    finished: bool,
}

impl Default for StreamState {
    fn default() -> Self {
        Self {
            finish_reason: FinishReason::Unknown,
            usage: TokenUsage::unknown(),
            is_first_chunk: true,
            tool_calls: HashMap::new(),
            finished: false,
        }
    }
}

/// Converts Zhipu SSE chunks into chat stream events
#[derive(Clone, Default)]
pub struct ZhipuEventConverter {
    state: Arc<Mutex<StreamState>>,
}

impl ZhipuEventConverter {
    pub fn new() -> Self {
        Self::default()
    }

    fn convert_chunk(&self, data: &str) -> Vec<Result<ChatStreamEvent, LlmError>> {
        let mut state = match self.state.lock() {
            Ok(state) => state,
            Err(_) => {
                return vec![Err(LlmError::InternalError(
                    "stream state mutex poisoned".to_string(),
                ))];
            }
        };

        let chunk: ZhipuChatChunk = match serde_json::from_str(data) {
            Ok(chunk) => chunk,
            Err(e) => {
                // A chunk that fails to parse poisons the whole generation:
                // the stream keeps going but will finish as an error.
                state.finish_reason = FinishReason::Error;
                return vec![Ok(ChatStreamEvent::Error {
                    error: format!("failed to parse stream chunk: {e}"),
                })];
            }
        };

        let mut events = Vec::new();

        if state.is_first_chunk {
            state.is_first_chunk = false;
            events.push(Ok(ChatStreamEvent::ResponseMetadata {
                metadata: response_metadata(chunk.id, chunk.model, chunk.created),
            }));
        }

        // Usage is last-write-wins; the provider repeats it on late chunks.
        if let Some(usage) = chunk.usage {
            state.usage = TokenUsage::new(
                usage.prompt_tokens.map_or(f64::NAN, |t| t as f64),
                usage.completion_tokens.map_or(f64::NAN, |t| t as f64),
            );
        }

        let Some(choice) = chunk.choices.into_iter().next() else {
            return events;
        };

        if let Some(reason) = choice.finish_reason.as_deref() {
            // "network_error" surfaces as an in-band error event and leaves
            // the stored finish reason untouched.
            if reason == "network_error" {
                warn!("provider reported a mid-stream network error");
                events.push(Ok(ChatStreamEvent::Error {
                    error: "network_error".to_string(),
                }));
                return events;
            }
            state.finish_reason = map_finish_reason(Some(reason));
        }

        let Some(delta) = choice.delta else {
            return events;
        };

        if let Some(content) = delta.content {
            events.push(Ok(ChatStreamEvent::TextDelta { delta: content }));
        }

        for tc in delta.tool_calls.unwrap_or_default() {
            events.extend(Self::accumulate_tool_call(&mut state, tc));
        }

        events
    }

    /// Folds one tool-call fragment into its accumulator, emitting a
    /// `ToolCallDelta` for new argument text and a terminal `ToolCall` once
    /// the buffered arguments become parseable JSON.
    fn accumulate_tool_call(
        state: &mut StreamState,
        tc: ZhipuToolCallDelta,
    ) -> Vec<Result<ChatStreamEvent, LlmError>> {
        let mut events = Vec::new();

        if let Some(entry) = state.tool_calls.get_mut(&tc.index) {
            if entry.has_finished {
                return events;
            }

            // The fragment delta is forwarded even when empty or absent so
            // consumers see every chunk that touched this call.
            let fragment = tc
                .function
                .and_then(|f| f.arguments)
                .unwrap_or_default();
            entry.arguments.push_str(&fragment);
            events.push(Ok(ChatStreamEvent::ToolCallDelta {
                tool_call_id: entry.id.clone(),
                tool_name: entry.name.clone(),
                args_text_delta: fragment,
            }));

            if is_parsable_json(&entry.arguments) {
                entry.has_finished = true;
                events.push(Ok(ChatStreamEvent::ToolCall {
                    tool_call_id: entry.id.clone(),
                    tool_name: entry.name.clone(),
                    args: entry.arguments.clone(),
                }));
            }
            return events;
        }

        // First fragment for this index must carry the call envelope.
        let valid = tc.kind.as_deref() == Some("function")
            && tc.id.is_some()
            && tc.function.as_ref().is_some_and(|f| f.name.is_some());
        if !valid {
            events.push(Err(LlmError::ParseError(
                "expected 'id', 'type' and 'function.name' on the first tool call fragment"
                    .to_string(),
            )));
            return events;
        }

        let id = tc.id.unwrap_or_default();
        let function = tc.function.unwrap_or(super::types::ZhipuFunctionCallDelta {
            name: None,
            arguments: None,
        });
        let name = function.name.unwrap_or_default();
        let arguments = function.arguments.unwrap_or_default();

        if !arguments.is_empty() {
            events.push(Ok(ChatStreamEvent::ToolCallDelta {
                tool_call_id: id.clone(),
                tool_name: name.clone(),
                args_text_delta: arguments.clone(),
            }));
        }

        let has_finished = is_parsable_json(&arguments);
        if has_finished {
            events.push(Ok(ChatStreamEvent::ToolCall {
                tool_call_id: id.clone(),
                tool_name: name.clone(),
                args: arguments.clone(),
            }));
        }

        state.tool_calls.insert(
            tc.index,
            ToolCallAccumulator {
                id,
                name,
                arguments,
                has_finished,
            },
        );

        events
    }
}

impl SseEventConverter for ZhipuEventConverter {
    fn convert_event(&self, event: eventsource_stream::Event) -> Vec<Result<ChatStreamEvent, LlmError>> {
        self.convert_chunk(&event.data)
    }

    fn handle_stream_end(&self) -> Option<Result<ChatStreamEvent, LlmError>> {
        let mut state = match self.state.lock() {
            Ok(state) => state,
            Err(_) => {
                return Some(Err(LlmError::InternalError(
                    "stream state mutex poisoned".to_string(),
                )));
            }
        };
        if state.finished {
            return None;
        }
        state.finished = true;
        Some(Ok(ChatStreamEvent::Finish {
            finish_reason: state.finish_reason,
            usage: state.usage,
        }))
    }
}
