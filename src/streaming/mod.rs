//! Streaming: event types and SSE plumbing
//!
//! [`events`] defines the chat stream event vocabulary; [`factory`] turns an
//! HTTP event-stream response into a [`ChatStream`] via a per-provider
//! converter.

pub mod events;
pub mod factory;

pub use events::{ChatStream, ChatStreamEvent, ChatStreamResponse};
pub use factory::{SseEventConverter, StreamFactory};
