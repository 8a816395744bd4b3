use crate::types::MessageRole;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Persisted session configuration. `session_id` never changes after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatSessionConfig {
    pub session_id: String,
    pub doc_id: String,
    pub workspace_id: String,
    pub user_id: String,
    pub prompt_name: String,
    /// Snapshot of the prompt's model when the session was created.
    pub model: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateSessionOptions {
    pub doc_id: String,
    pub workspace_id: String,
    pub user_id: String,
    pub prompt_name: String,
}

impl CreateSessionOptions {
    pub fn new(
        user_id: impl Into<String>,
        workspace_id: impl Into<String>,
        doc_id: impl Into<String>,
        prompt_name: impl Into<String>,
    ) -> Self {
        Self {
            doc_id: doc_id.into(),
            workspace_id: workspace_id.into(),
            user_id: user_id.into(),
            prompt_name: prompt_name.into(),
        }
    }
}

/// Selects the sessions of one user, optionally narrowed to a workspace and doc.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionFilter {
    pub user_id: String,
    pub workspace_id: Option<String>,
    pub doc_id: Option<String>,
}

impl SessionFilter {
    pub fn for_user(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            ..Default::default()
        }
    }

    pub fn in_workspace(mut self, workspace_id: impl Into<String>) -> Self {
        self.workspace_id = Some(workspace_id.into());
        self
    }

    pub fn in_doc(mut self, doc_id: impl Into<String>) -> Self {
        self.doc_id = Some(doc_id.into());
        self
    }

    pub fn matches(&self, config: &ChatSessionConfig) -> bool {
        config.user_id == self.user_id
            && self
                .workspace_id
                .as_ref()
                .map_or(true, |w| *w == config.workspace_id)
            && self.doc_id.as_ref().map_or(true, |d| *d == config.doc_id)
    }
}

/// Input for a detached draft message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateMessage {
    pub session_id: String,
    #[serde(default = "default_role")]
    pub role: MessageRole,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub attachments: Option<Vec<String>>,
}

fn default_role() -> MessageRole {
    MessageRole::User
}

impl CreateMessage {
    pub fn new(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            role: default_role(),
            content: None,
            attachments: None,
        }
    }

    pub fn with_role(mut self, role: MessageRole) -> Self {
        self.role = role;
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn with_attachments(mut self, attachments: Vec<String>) -> Self {
        self.attachments = Some(attachments);
        self
    }
}
