//! # ai-copilot-core
//!
//! Prompt and session orchestration for AI copilot features.
//!
//! ## Overview
//!
//! This crate is the deterministic core behind a copilot: it renders stored
//! prompt templates into model messages, stages and commits chat turns, and
//! picks which registered AI backend serves a requested capability. Network
//! calls, persistence engines, authentication and quota accounting sit behind
//! the traits it consumes.
//!
//! ## Key Features
//!
//! - **Templates**: `{{key}}` substitution and `{{#list}}...{{/list}}` blocks with
//!   declared default candidates; rendering never fails
//! - **Prompts**: [`prompt::PromptStore`] CRUD over named definitions, yielding
//!   render-capable [`prompt::Prompt`] handles
//! - **Sessions**: [`session::ChatSession`] handles with a handle-local stash and
//!   all-or-nothing commits
//! - **Routing**: [`provider::ProviderRouter`] with ordered, model-aware rules
//! - **Config**: [`config::CopilotConfig`] seeds prompts and routing rules from YAML
//!
//! ## Quick Start
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
//!     .set(
//!         "translate",
//!         "gpt-4o",
//!         vec![MessageTemplate::system("translate to {{dst}}")
//!             .with_binding("dst", ["chs", "jpn", "kor"])],
//!     )
//!     .await?;
//!
//! let sessions = SessionStore::in_memory(prompts);
//! let id = sessions
//!     .create(CreateSessionOptions::new("user", "workspace", "doc", "translate"))
//!     .await?;
//!
//! let mut session = sessions.get(&id).await?.expect("session exists");
//! session.push(PromptMessage::user("hello world"));
//! let messages = session.finish(&Params::new().with("dst", "jpn"));
//! assert_eq!(messages[0].content, "translate to jpn");
//! assert_eq!(messages[1].content, "hello world");
//! session.save().await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`template`] | Template parsing and total rendering |
//! | [`prompt`] | Prompt definitions, handles and store |
//! | [`session`] | Chat session handles and store |
//! | [`provider`] | Capabilities, providers and the router |
//! | [`storage`] | Repository traits and in-memory implementations |
//! | [`types`] | Message types |
//! | [`config`] | Startup configuration |

pub mod config;
pub mod prompt;
pub mod provider;
pub mod session;
pub mod storage;
pub mod template;
pub mod types;

// Re-export main types for convenience
pub use config::CopilotConfig;
pub use prompt::{Prompt, PromptDefinition, PromptStore};
pub use provider::{Capability, CopilotProvider, ProviderRouter, ProviderType};
pub use session::{ChatSession, SessionStore};
pub use template::{MessageTemplate, Params};
pub use types::{ChatMessage, MessageRole, PromptMessage, RenderedMessage};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::{Error, ErrorContext};
