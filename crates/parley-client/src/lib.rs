//! Chat client for a locally hosted inference server

mod client;
mod config;
mod error;
pub mod extract;
mod request;

pub use client::{ChatClient, CHAT_PATH, NO_REPLY_PLACEHOLDER};
pub use config::ClientConfig;
pub use error::ConfigError;
pub use extract::{preview, MarkerExtractor, ResponseExtractor};
pub use request::{ChatRequest, Message, Role};
