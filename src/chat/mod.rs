//! Stateful chat with an LLM: the conversation transcript and the
//! request/response turn protocol built on top of it.
mod core;
mod models;

pub use self::core::{Chat, ChatBuilder, ChatError, PERSONA};
pub use models::Transcript;
