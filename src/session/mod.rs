//! # Session Module
//!
//! Chat sessions bound to a named prompt.
//!
//! A session alternates between having staged messages and having none:
//! messages are staged on a [`ChatSession`] handle (`push`, or
//! `push_by_message_id` for drafts made with [`SessionStore::create_message`]),
//! rendered together with the prompt by `finish`, and committed by `save`.
//!
//! ## Example
//!
//! ```rust
//! use ai_copilot_core::prompt::PromptStore;
//! use ai_copilot_core::session::{CreateSessionOptions, SessionStore};
//! use ai_copilot_core::template::{MessageTemplate, Params};
//! use ai_copilot_core::types::PromptMessage;
//!
//! # #[tokio::main]
//! # async fn main() -> ai_copilot_core::Result<()> {
//! let prompts = PromptStore::in_memory();
//! prompts
//!     .set("chat", "gpt-4o", vec![MessageTemplate::system("You are a helpful assistant.")])
//!     .await?;
//!
//! let sessions = SessionStore::in_memory(prompts);
//! let id = sessions
//!     .create(CreateSessionOptions::new("user-1", "workspace-1", "doc-1", "chat"))
//!     .await?;
//!
//! let mut session = sessions.get(&id).await?.expect("just created");
//! session.push(PromptMessage::user("hello"));
//! assert_eq!(session.finish(&Params::new()).len(), 2);
//! session.save().await?;
//! # Ok(())
//! # }
//! ```

mod chat;
mod config;
mod store;

pub use chat::{ChatSession, MessageRef};
pub use config::{ChatSessionConfig, CreateMessage, CreateSessionOptions, SessionFilter};
pub use store::SessionStore;
