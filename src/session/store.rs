//! Session configuration and history glue.

use super::chat::ChatSession;
use super::config::{ChatSessionConfig, CreateMessage, CreateSessionOptions, SessionFilter};
use crate::prompt::PromptStore;
use crate::storage::{MemorySessionRepository, SessionRepository};
use crate::types::ChatMessage;
use crate::{Error, Result};
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

#[derive(Clone)]
pub struct SessionStore {
    prompts: PromptStore,
    repository: Arc<dyn SessionRepository>,
}

impl SessionStore {
    pub fn new(prompts: PromptStore, repository: Arc<dyn SessionRepository>) -> Self {
        Self {
            prompts,
            repository,
        }
    }

    pub fn in_memory(prompts: PromptStore) -> Self {
        Self::new(prompts, Arc::new(MemorySessionRepository::new()))
    }

    pub fn prompts(&self) -> &PromptStore {
        &self.prompts
    }

    /// Create a session bound to an existing prompt and return its id.
    pub async fn create(&self, options: CreateSessionOptions) -> Result<String> {
        let prompt = self
            .prompts
            .get(&options.prompt_name)
            .await?
            .ok_or_else(|| Error::not_found("prompt", options.prompt_name.clone()))?;

        let config = ChatSessionConfig {
            session_id: Uuid::new_v4().to_string(),
            doc_id: options.doc_id,
            workspace_id: options.workspace_id,
            user_id: options.user_id,
            prompt_name: options.prompt_name,
            model: prompt.model().to_string(),
            created_at: Utc::now(),
        };
        let session_id = config.session_id.clone();

        self.repository.create_config(config).await?;
        info!(
            session_id = %session_id,
            prompt = prompt.name(),
            model = prompt.model(),
            "created chat session"
        );
        Ok(session_id)
    }

    /// Load a fresh, independent handle. `None` when the session is unknown or
    /// its prompt no longer exists.
    pub async fn get(&self, session_id: &str) -> Result<Option<ChatSession>> {
        let Some(config) = self.repository.get_config(session_id).await? else {
            return Ok(None);
        };
        let Some(prompt) = self.prompts.get(&config.prompt_name).await? else {
            warn!(
                session_id,
                prompt = %config.prompt_name,
                "session prompt no longer exists"
            );
            return Ok(None);
        };
        let history = self.repository.get_history(session_id).await?;
        Ok(Some(ChatSession::new(
            config,
            prompt,
            history,
            Arc::clone(&self.repository),
        )))
    }

    /// Allocate a detached draft. The session is not checked here; ownership is
    /// enforced when the draft is attached.
    pub async fn create_message(&self, input: CreateMessage) -> Result<ChatMessage> {
        let message = ChatMessage {
            id: Uuid::new_v4().to_string(),
            session_id: input.session_id,
            role: input.role,
            content: input.content,
            attachments: input.attachments,
            created_at: Utc::now(),
        };
        self.repository.save_draft(message.clone()).await?;
        Ok(message)
    }

    /// Discard a draft that was never attached. Committed messages are not
    /// drafts and are unaffected. Idempotent.
    pub async fn delete_message(&self, message_id: &str) -> Result<()> {
        if self.repository.delete_draft(message_id).await? {
            debug!(message_id, "discarded draft message");
        }
        Ok(())
    }

    pub async fn list(&self, filter: &SessionFilter) -> Result<Vec<ChatSessionConfig>> {
        self.repository.list_configs(filter).await
    }
}
