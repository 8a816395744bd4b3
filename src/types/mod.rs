//! # Types Module
//!
//! Message shapes shared across the crate.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`MessageRole`] | system / user / assistant |
//! | [`PromptMessage`] | A turn authored in place for a session (no id yet) |
//! | [`ChatMessage`] | A persisted or draft turn owned by one session |
//! | [`RenderedMessage`] | Fully substituted output handed to a provider |
//!
//! ## Example
//!
//! ```rust
//! use ai_copilot_core::types::{ChatMessage, PromptMessage};
//!
//! let msg = ChatMessage::new("session-1", PromptMessage::user("hello"));
//! assert_eq!(msg.to_rendered().content, "hello");
//! ```

pub mod message;

pub use message::{
    attachment_from_file, ChatMessage, MessageRole, PromptMessage, RenderedMessage,
};
