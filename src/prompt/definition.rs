use crate::template::MessageTemplate;
use serde::{Deserialize, Serialize};

/// A named, stored prompt. `name` is unique across a store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptDefinition {
    pub name: String,
    /// Opaque model identifier, snapshotted into sessions at creation time.
    pub model: String,
    pub messages: Vec<MessageTemplate>,
}

impl PromptDefinition {
    pub fn new(name: impl Into<String>, model: impl Into<String>, messages: Vec<MessageTemplate>) -> Self {
        Self {
            name: name.into(),
            model: model.into(),
            messages,
        }
    }

    pub fn summary(&self) -> PromptSummary {
        PromptSummary {
            name: self.name.clone(),
            model: self.model.clone(),
            message_count: self.messages.len(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptSummary {
    pub name: String,
    pub model: String,
    pub message_count: usize,
}
