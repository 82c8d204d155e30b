//! Core types shared across the library

mod chat;
mod embedding;
mod image;
mod response;
mod tools;

pub use chat::*;
pub use embedding::*;
pub use image::*;
pub use response::*;
pub use tools::*;
