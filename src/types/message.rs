//! Chat message shapes shared by prompts and sessions.

use base64::Engine as _;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Message role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

impl MessageRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageRole::System => "system",
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
        }
    }
}

impl std::fmt::Display for MessageRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A message authored in place for a session, before it gets an id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptMessage {
    pub role: MessageRole,
    pub content: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl PromptMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self::with_role(MessageRole::User, text)
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self::with_role(MessageRole::Assistant, text)
    }

    pub fn with_role(role: MessageRole, text: impl Into<String>) -> Self {
        Self {
            role,
            content: text.into(),
            attachments: Vec::new(),
            created_at: Utc::now(),
        }
    }

    pub fn with_attachments(mut self, attachments: Vec<String>) -> Self {
        self.attachments = attachments;
        self
    }
}

/// A chat turn owned by exactly one session.
///
/// Drafts created through the session store exist detached until they are
/// attached to the stash of the session named by `session_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub session_id: String,
    pub role: MessageRole,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachments: Option<Vec<String>>,
    pub created_at: DateTime<Utc>,
}

impl ChatMessage {
    pub fn new(session_id: impl Into<String>, message: PromptMessage) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            session_id: session_id.into(),
            role: message.role,
            content: Some(message.content),
            attachments: if message.attachments.is_empty() {
                None
            } else {
                Some(message.attachments)
            },
            created_at: message.created_at,
        }
    }

    /// Convert to a rendered message, taking content literally.
    pub fn to_rendered(&self) -> RenderedMessage {
        RenderedMessage {
            role: self.role,
            content: self.content.clone().unwrap_or_default(),
            params_used: BTreeMap::new(),
            attachments: self.attachments.clone().unwrap_or_default(),
        }
    }
}

/// Output of rendering, ready to hand to a provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedMessage {
    pub role: MessageRole,
    pub content: String,
    /// Scalar placeholders resolved while rendering, supplied or defaulted.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub params_used: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<String>,
}

impl RenderedMessage {
    /// Empty content without attachments carries nothing for the model.
    pub fn is_blank(&self) -> bool {
        self.content.is_empty() && self.attachments.is_empty()
    }
}

/// Read a local file into a `data:` URI attachment.
pub fn attachment_from_file(path: impl AsRef<Path>) -> crate::Result<String> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)?;
    let media_type = guess_media_type(path).unwrap_or("application/octet-stream");
    let data = base64::engine::general_purpose::STANDARD.encode(bytes);
    Ok(format!("data:{};base64,{}", media_type, data))
}

fn guess_media_type(path: &Path) -> Option<&'static str> {
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("")
        .to_lowercase();
    let mt = match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "webp" => "image/webp",
        "gif" => "image/gif",
        "mp3" => "audio/mpeg",
        "wav" => "audio/wav",
        "pdf" => "application/pdf",
        "txt" | "md" => "text/plain",
        _ => return None,
    };
    Some(mt)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_serializes_lowercase() {
        let json = serde_json::to_string(&MessageRole::Assistant).unwrap();
        assert_eq!(json, "\"assistant\"");
        let role: MessageRole = serde_json::from_str("\"system\"").unwrap();
        assert_eq!(role, MessageRole::System);
    }

    #[test]
    fn test_chat_message_keeps_owner_and_attachments() {
        let msg = ChatMessage::new(
            "session-1",
            PromptMessage::user("look").with_attachments(vec!["https://x/y.png".into()]),
        );
        assert_eq!(msg.session_id, "session-1");
        assert_eq!(msg.attachments.as_deref(), Some(&["https://x/y.png".to_string()][..]));

        let rendered = msg.to_rendered();
        assert_eq!(rendered.content, "look");
        assert!(rendered.params_used.is_empty());
        assert!(!rendered.is_blank());
    }

    #[test]
    fn test_blank_detection() {
        let msg = ChatMessage::new("s", PromptMessage::assistant(""));
        assert!(msg.to_rendered().is_blank());
    }

    #[test]
    fn test_attachment_from_file() {
        let path = std::env::temp_dir().join(format!("attachment-{}.txt", uuid::Uuid::new_v4()));
        std::fs::write(&path, b"hi").unwrap();
        let uri = attachment_from_file(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(uri, "data:text/plain;base64,aGk=");
    }
}
