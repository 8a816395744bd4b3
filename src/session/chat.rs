//! Runtime chat session handle.

use super::config::ChatSessionConfig;
use crate::prompt::Prompt;
use crate::storage::SessionRepository;
use crate::template::Params;
use crate::types::{ChatMessage, MessageRole, PromptMessage, RenderedMessage};
use crate::{Error, ErrorContext, Result};
use std::sync::Arc;
use tracing::{debug, warn};

/// A message to attach by id, or one already resolved by the caller.
#[derive(Debug, Clone)]
pub enum MessageRef {
    Id(String),
    Message(ChatMessage),
}

impl From<&str> for MessageRef {
    fn from(id: &str) -> Self {
        MessageRef::Id(id.to_string())
    }
}

impl From<String> for MessageRef {
    fn from(id: String) -> Self {
        MessageRef::Id(id)
    }
}

impl From<ChatMessage> for MessageRef {
    fn from(message: ChatMessage) -> Self {
        MessageRef::Message(message)
    }
}

/// One loaded view of a session: config, bound prompt, committed history and a
/// handle-local stash.
///
/// Handles never share the stash. Two handles for the same session only see
/// each other's messages after a `save` and a fresh `SessionStore::get`.
pub struct ChatSession {
    config: ChatSessionConfig,
    prompt: Prompt,
    history: Vec<ChatMessage>,
    stash: Vec<ChatMessage>,
    repository: Arc<dyn SessionRepository>,
}

impl ChatSession {
    pub(crate) fn new(
        config: ChatSessionConfig,
        prompt: Prompt,
        history: Vec<ChatMessage>,
        repository: Arc<dyn SessionRepository>,
    ) -> Self {
        Self {
            config,
            prompt,
            history,
            stash: Vec::new(),
            repository,
        }
    }

    pub fn session_id(&self) -> &str {
        &self.config.session_id
    }

    pub fn config(&self) -> &ChatSessionConfig {
        &self.config
    }

    /// The model snapshotted at creation, not the bound prompt's current one.
    pub fn model(&self) -> &str {
        &self.config.model
    }

    pub fn prompt(&self) -> &Prompt {
        &self.prompt
    }

    pub fn history(&self) -> &[ChatMessage] {
        &self.history
    }

    pub fn stash_messages(&self) -> &[ChatMessage] {
        &self.stash
    }

    pub fn latest_user_message(&self) -> Option<&ChatMessage> {
        self.history
            .iter()
            .chain(self.stash.iter())
            .rev()
            .find(|m| m.role == MessageRole::User)
    }

    /// Stage a message authored in place for this session.
    pub fn push(&mut self, message: PromptMessage) {
        let message = ChatMessage::new(self.config.session_id.clone(), message);
        self.stash.push(message);
    }

    /// Stage a draft message, checking that it belongs to this session.
    pub async fn push_by_message_id(&mut self, message: impl Into<MessageRef>) -> Result<()> {
        let message = match message.into() {
            MessageRef::Message(message) => message,
            MessageRef::Id(id) => self
                .repository
                .get_draft(&id)
                .await?
                .ok_or_else(|| Error::not_found("message", id))?,
        };

        if message.session_id != self.config.session_id {
            warn!(
                message_id = %message.id,
                session_id = %self.config.session_id,
                owner = %message.session_id,
                "rejected cross-session message attach"
            );
            return Err(Error::Ownership {
                message_id: message.id,
                session_id: self.config.session_id.clone(),
                owner: message.session_id,
            });
        }

        if self
            .history
            .iter()
            .chain(self.stash.iter())
            .any(|m| m.id == message.id)
        {
            return Err(Error::validation_with_context(
                "message is already attached to this session",
                ErrorContext::new()
                    .with_field_path("message_id")
                    .with_details(message.id)
                    .with_source("chat_session"),
            ));
        }

        self.stash.push(message);
        Ok(())
    }

    /// Rendered prompt templates followed by history and stash, taken literally.
    /// Blank messages are dropped. Nothing is mutated.
    pub fn finish(&self, params: &Params) -> Vec<RenderedMessage> {
        self.prompt
            .render(params)
            .into_iter()
            .chain(
                self.history
                    .iter()
                    .chain(self.stash.iter())
                    .map(ChatMessage::to_rendered),
            )
            .filter(|m| !m.is_blank())
            .collect()
    }

    /// Commit the stash to durable history. All staged messages commit
    /// together; on failure the stash is left as it was.
    pub async fn save(&mut self) -> Result<()> {
        if self.stash.is_empty() {
            return Ok(());
        }
        self.repository
            .append_history(&self.config.session_id, &self.stash)
            .await?;
        debug!(
            session_id = %self.config.session_id,
            committed = self.stash.len(),
            "committed staged messages"
        );
        self.history.append(&mut self.stash);
        Ok(())
    }
}

impl std::fmt::Debug for ChatSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatSession")
            .field("config", &self.config)
            .field("prompt", &self.prompt.name())
            .field("history", &self.history.len())
            .field("stash", &self.stash.len())
            .field("repository", &self.repository.name())
            .finish()
    }
}
