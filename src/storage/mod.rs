//! # Storage Module
//!
//! Repository seams consumed by [`PromptStore`](crate::prompt::PromptStore) and
//! [`SessionStore`](crate::session::SessionStore). The storage schema behind
//! them is the implementor's concern; the in-memory implementations here back
//! tests and single-process deployments.
//!
//! Repository errors propagate to callers unchanged. Nothing in this crate retries.

mod memory;

pub use memory::{MemoryPromptRepository, MemorySessionRepository};

use crate::prompt::PromptDefinition;
use crate::session::{ChatSessionConfig, SessionFilter};
use crate::template::MessageTemplate;
use crate::types::ChatMessage;
use crate::Result;
use async_trait::async_trait;

#[async_trait]
pub trait PromptRepository: Send + Sync {
    async fn get(&self, name: &str) -> Result<Option<PromptDefinition>>;
    /// Insert or replace the definition stored under `definition.name`.
    async fn set(&self, definition: PromptDefinition) -> Result<()>;
    /// Replace the message list only. Returns `false` when `name` is unknown.
    async fn update(&self, name: &str, messages: Vec<MessageTemplate>) -> Result<bool>;
    /// Returns whether a definition was removed.
    async fn delete(&self, name: &str) -> Result<bool>;
    async fn list(&self) -> Result<Vec<PromptDefinition>>;
    fn name(&self) -> &'static str;
}

#[async_trait]
pub trait SessionRepository: Send + Sync {
    async fn get_config(&self, session_id: &str) -> Result<Option<ChatSessionConfig>>;
    /// Fails if a config with the same session id already exists.
    async fn create_config(&self, config: ChatSessionConfig) -> Result<()>;
    async fn list_configs(&self, filter: &SessionFilter) -> Result<Vec<ChatSessionConfig>>;
    /// Committed history in commit order.
    async fn get_history(&self, session_id: &str) -> Result<Vec<ChatMessage>>;
    /// Append all messages or none. Fails without committing anything when an
    /// id is already in the session's history or repeats within the batch.
    /// Committed drafts are retired from the draft table.
    async fn append_history(&self, session_id: &str, messages: &[ChatMessage]) -> Result<()>;
    async fn save_draft(&self, message: ChatMessage) -> Result<()>;
    async fn get_draft(&self, message_id: &str) -> Result<Option<ChatMessage>>;
    /// Discard a draft that will never be attached. Returns whether one was removed.
    async fn delete_draft(&self, message_id: &str) -> Result<bool>;
    fn name(&self) -> &'static str;
}
