//! SSE streaming plumbing
//!
//! Turns an HTTP event-stream response into a [`ChatStream`]. Chunks arrive
//! as `data: <json>` records terminated by a literal `data: [DONE]` sentinel.
//! Conversion of each chunk is a synchronous, in-order transform; the
//! converter's `handle_stream_end` runs exactly once after the last chunk
//! (or after upstream closure), which is how the terminating `Finish` event
//! is guaranteed even when the server never sends `[DONE]`.

use eventsource_stream::{Event, Eventsource};
use futures_util::StreamExt;

use super::events::{ChatStream, ChatStreamEvent};
use crate::error::LlmError;

/// Converts SSE events into chat stream events.
///
/// `convert_event` is called once per `data:` payload, in arrival order.
/// `handle_stream_end` is the flush hook: it must return `Some` exactly once
/// per stream and `None` on any further call.
pub trait SseEventConverter: Send + Sync {
    /// Convert one SSE event into zero or more stream events
    fn convert_event(&self, event: Event) -> Vec<Result<ChatStreamEvent, LlmError>>;

    /// Produce the terminal event once the stream is exhausted
    fn handle_stream_end(&self) -> Option<Result<ChatStreamEvent, LlmError>>;
}

/// Factory for SSE-backed chat streams
pub struct StreamFactory;

impl StreamFactory {
    /// Wire a successful event-stream HTTP response through a converter.
    ///
    /// Empty keep-alive payloads are skipped. The `[DONE]` sentinel stops
    /// consumption; the flush hook then emits the terminal event. If the
    /// transport closes without a sentinel, the flush hook still runs.
    pub fn from_response<C>(response: reqwest::Response, converter: C) -> ChatStream
    where
        C: SseEventConverter + 'static,
    {
        let stream = async_stream::stream! {
            let mut events = response.bytes_stream().eventsource();

            while let Some(item) = events.next().await {
                match item {
                    Ok(event) => {
                        let data = event.data.trim();
                        if data.is_empty() {
                            continue;
                        }
                        if data == "[DONE]" {
                            break;
                        }
                        for ev in converter.convert_event(event) {
                            yield ev;
                        }
                    }
                    Err(e) => {
                        yield Err(LlmError::StreamError(format!("SSE parsing error: {e}")));
                    }
                }
            }

            if let Some(end) = converter.handle_stream_end() {
                yield end;
            }
        };

        Box::pin(stream)
    }
}
