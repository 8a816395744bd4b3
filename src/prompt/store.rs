//! Named prompt CRUD.

use super::definition::{PromptDefinition, PromptSummary};
use super::handle::Prompt;
use crate::storage::{MemoryPromptRepository, PromptRepository};
use crate::template::MessageTemplate;
use crate::{Error, ErrorContext, Result};
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Clone)]
pub struct PromptStore {
    repository: Arc<dyn PromptRepository>,
}

impl PromptStore {
    pub fn new(repository: Arc<dyn PromptRepository>) -> Self {
        Self { repository }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryPromptRepository::new()))
    }

    /// Create the prompt, or replace it wholesale (model and messages).
    pub async fn set(
        &self,
        name: impl Into<String>,
        model: impl Into<String>,
        messages: Vec<MessageTemplate>,
    ) -> Result<()> {
        let definition = PromptDefinition::new(name, model, messages);
        if definition.name.trim().is_empty() {
            return Err(Error::validation_with_context(
                "prompt name must not be empty",
                ErrorContext::new()
                    .with_field_path("name")
                    .with_source("prompt_store"),
            ));
        }
        debug!(
            prompt = %definition.name,
            model = %definition.model,
            messages = definition.messages.len(),
            backend = self.repository.name(),
            "upserting prompt"
        );
        self.repository.set(definition).await
    }

    pub async fn get(&self, name: &str) -> Result<Option<Prompt>> {
        Ok(self.repository.get(name).await?.map(Prompt::new))
    }

    /// Replace the messages of an existing prompt, keeping its model.
    pub async fn update(&self, name: &str, messages: Vec<MessageTemplate>) -> Result<()> {
        if self.repository.update(name, messages).await? {
            debug!(prompt = name, "updated prompt messages");
            Ok(())
        } else {
            Err(Error::not_found("prompt", name))
        }
    }

    /// Idempotent.
    pub async fn delete(&self, name: &str) -> Result<()> {
        if self.repository.delete(name).await? {
            info!(prompt = name, "deleted prompt");
        }
        Ok(())
    }

    pub async fn list(&self) -> Result<Vec<PromptSummary>> {
        let mut summaries: Vec<PromptSummary> = self
            .repository
            .list()
            .await?
            .iter()
            .map(PromptDefinition::summary)
            .collect();
        summaries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(summaries)
    }

    /// Upsert a batch of definitions, typically from [`CopilotConfig`](crate::config::CopilotConfig).
    pub async fn seed(&self, prompts: &[PromptDefinition]) -> Result<usize> {
        for definition in prompts {
            self.set(
                definition.name.clone(),
                definition.model.clone(),
                definition.messages.clone(),
            )
            .await?;
        }
        info!(count = prompts.len(), "seeded prompts");
        Ok(prompts.len())
    }
}
