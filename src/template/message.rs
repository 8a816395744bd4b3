use crate::types::MessageRole;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Placeholder key -> ordered candidate values. The first candidate is the default.
pub type PlaceholderBindings = BTreeMap<String, Vec<String>>;

/// A stored message pattern. Immutable once it is part of a prompt definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageTemplate {
    pub role: MessageRole,
    /// Raw template text with `{{key}}` and `{{#key}}...{{/key}}` tags.
    pub content: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub bindings: PlaceholderBindings,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<String>,
}

impl MessageTemplate {
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            bindings: BTreeMap::new(),
            attachments: Vec::new(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(MessageRole::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageRole::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(MessageRole::Assistant, content)
    }

    pub fn with_binding<I, S>(mut self, key: impl Into<String>, candidates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.bindings
            .insert(key.into(), candidates.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_attachments(mut self, attachments: Vec<String>) -> Self {
        self.attachments = attachments;
        self
    }
}
