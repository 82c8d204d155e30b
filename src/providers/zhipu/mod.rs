//! Zhipu AI (GLM) provider
//!
//! Maps the generic chat/embedding/image surface onto the Zhipu open
//! platform API at `open.bigmodel.cn`. Entry point is [`Zhipu::builder`].

mod chat;
mod convert;
mod embedding;
mod image;
mod provider;
pub mod settings;
mod streaming;
mod tools;
mod types;
mod utils;

pub use chat::ZhipuChatModel;
pub use embedding::{MAX_EMBEDDINGS_PER_CALL, ZhipuEmbeddingModel};
pub use image::ZhipuImageModel;
pub use provider::{DEFAULT_BASE_URL, Zhipu, ZhipuBuilder};
pub use settings::{
    ZhipuChatSettings, ZhipuEmbeddingSettings, ZhipuThinkingConfig, ZhipuThinkingMode,
};
