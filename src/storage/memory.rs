//! In-memory repository implementations.

use super::{PromptRepository, SessionRepository};
use crate::prompt::PromptDefinition;
use crate::session::{ChatSessionConfig, SessionFilter};
use crate::template::MessageTemplate;
use crate::types::ChatMessage;
use crate::{Error, ErrorContext, Result};
use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap, HashSet};
use tokio::sync::RwLock;

#[derive(Default)]
pub struct MemoryPromptRepository {
    prompts: RwLock<BTreeMap<String, PromptDefinition>>,
}

impl MemoryPromptRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PromptRepository for MemoryPromptRepository {
    async fn get(&self, name: &str) -> Result<Option<PromptDefinition>> {
        Ok(self.prompts.read().await.get(name).cloned())
    }

    async fn set(&self, definition: PromptDefinition) -> Result<()> {
        self.prompts
            .write()
            .await
            .insert(definition.name.clone(), definition);
        Ok(())
    }

    async fn update(&self, name: &str, messages: Vec<MessageTemplate>) -> Result<bool> {
        match self.prompts.write().await.get_mut(name) {
            Some(definition) => {
                definition.messages = messages;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, name: &str) -> Result<bool> {
        Ok(self.prompts.write().await.remove(name).is_some())
    }

    async fn list(&self) -> Result<Vec<PromptDefinition>> {
        Ok(self.prompts.read().await.values().cloned().collect())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}

#[derive(Default)]
struct SessionTables {
    configs: HashMap<String, ChatSessionConfig>,
    history: HashMap<String, Vec<ChatMessage>>,
    drafts: HashMap<String, ChatMessage>,
}

/// All tables sit behind one lock so a commit is observed whole or not at all.
#[derive(Default)]
pub struct MemorySessionRepository {
    tables: RwLock<SessionTables>,
}

impl MemorySessionRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionRepository for MemorySessionRepository {
    async fn get_config(&self, session_id: &str) -> Result<Option<ChatSessionConfig>> {
        Ok(self.tables.read().await.configs.get(session_id).cloned())
    }

    async fn create_config(&self, config: ChatSessionConfig) -> Result<()> {
        let mut tables = self.tables.write().await;
        if tables.configs.contains_key(&config.session_id) {
            return Err(Error::storage_with_context(
                "session id already exists",
                ErrorContext::new()
                    .with_field_path("session_id")
                    .with_details(config.session_id.clone())
                    .with_source("memory_session_repository"),
            ));
        }
        tables.configs.insert(config.session_id.clone(), config);
        Ok(())
    }

    async fn list_configs(&self, filter: &SessionFilter) -> Result<Vec<ChatSessionConfig>> {
        let tables = self.tables.read().await;
        let mut configs: Vec<ChatSessionConfig> = tables
            .configs
            .values()
            .filter(|c| filter.matches(c))
            .cloned()
            .collect();
        configs.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.session_id.cmp(&b.session_id))
        });
        Ok(configs)
    }

    async fn get_history(&self, session_id: &str) -> Result<Vec<ChatMessage>> {
        Ok(self
            .tables
            .read()
            .await
            .history
            .get(session_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn append_history(&self, session_id: &str, messages: &[ChatMessage]) -> Result<()> {
        let mut tables = self.tables.write().await;
        if !tables.configs.contains_key(session_id) {
            return Err(Error::not_found("session", session_id));
        }

        let committed = tables.history.get(session_id).map(Vec::as_slice).unwrap_or(&[]);
        let mut incoming: HashSet<&str> = HashSet::with_capacity(messages.len());
        for message in messages {
            let repeated = !incoming.insert(message.id.as_str())
                || committed.iter().any(|m| m.id == message.id);
            if repeated {
                return Err(Error::validation_with_context(
                    "message is already committed to this session",
                    ErrorContext::new()
                        .with_field_path("message_id")
                        .with_details(message.id.clone())
                        .with_source("memory_session_repository"),
                ));
            }
        }

        for message in messages {
            tables.drafts.remove(&message.id);
        }
        tables
            .history
            .entry(session_id.to_string())
            .or_default()
            .extend_from_slice(messages);
        Ok(())
    }

    async fn save_draft(&self, message: ChatMessage) -> Result<()> {
        self.tables
            .write()
            .await
            .drafts
            .insert(message.id.clone(), message);
        Ok(())
    }

    async fn get_draft(&self, message_id: &str) -> Result<Option<ChatMessage>> {
        Ok(self.tables.read().await.drafts.get(message_id).cloned())
    }

    async fn delete_draft(&self, message_id: &str) -> Result<bool> {
        Ok(self.tables.write().await.drafts.remove(message_id).is_some())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
