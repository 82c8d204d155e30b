//! # zhipu-ai
//!
//! Async client for the Zhipu AI (GLM) open platform: chat completions with
//! tool calling and streaming, text embeddings and image generation.
//!
//! ```no_run
//! use zhipu_ai::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), LlmError> {
//!     let provider = Zhipu::builder().build()?; // reads ZHIPU_API_KEY
//!     let model = provider.chat_model("glm-4-plus");
//!
//!     let response = model
//!         .generate(ChatRequest::new(vec![ChatMessage::user("Hello!")]))
//!         .await?;
//!     println!("{}", response.text.unwrap_or_default());
//!     Ok(())
//! }
//! ```

#![deny(unsafe_code)]

pub mod error;
pub mod providers;
pub mod streaming;
pub mod types;

pub use error::LlmError;
pub use providers::zhipu::{Zhipu, ZhipuBuilder};

/// Commonly used types, importable in one line
pub mod prelude {
    pub use crate::error::LlmError;
    pub use crate::providers::zhipu::{
        Zhipu, ZhipuBuilder, ZhipuChatModel, ZhipuChatSettings, ZhipuEmbeddingModel,
        ZhipuEmbeddingSettings, ZhipuImageModel,
    };
    pub use crate::streaming::{ChatStream, ChatStreamEvent, ChatStreamResponse};
    pub use crate::types::{
        ChatMessage, ChatRequest, ChatResponse, CommonParams, ContentPart, EmbeddingResponse,
        FinishReason, ImageGenerationOptions, ImageResponse, MediaSource, MessageRole,
        ResponseFormat, ResponseMetadata, TokenUsage, Tool, ToolCall, ToolChoice,
        ToolResultOutput, Warning,
    };
}
