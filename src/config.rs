//! Startup configuration: seed prompts and routing rules.
//!
//! ```yaml
//! prompts:
//!   - name: translate
//!     model: gpt-4o
//!     messages:
//!       - role: system
//!         content: "translate {{src}} to {{dst}}: {{content}}"
//!         bindings:
//!           src: [eng]
//!           dst: [chs, jpn, kor]
//! routing:
//!   - capability: text-to-image
//!     models: [dall-e-3]
//!     provider: openai
//! ```

use crate::prompt::{PromptDefinition, PromptStore};
use crate::provider::{ProviderRouter, RoutingRule};
use crate::{Error, ErrorContext, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use tracing::info;

/// Environment variable holding the config file path.
pub const CONFIG_PATH_ENV: &str = "COPILOT_CONFIG_PATH";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CopilotConfig {
    #[serde(default)]
    pub prompts: Vec<PromptDefinition>,
    #[serde(default)]
    pub routing: Vec<RoutingRule>,
}

impl CopilotConfig {
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        serde_yaml::from_str::<CopilotConfig>(content).map_err(|e| {
            let msg = e.to_string();
            // Structural mismatches are the caller's data, not the YAML syntax.
            let looks_structural = msg.contains("missing field")
                || msg.contains("unknown field")
                || msg.contains("unknown variant")
                || msg.contains("invalid type")
                || msg.contains("invalid value");

            let context = ErrorContext::new().with_source("copilot_config");
            if looks_structural {
                Error::validation_with_context(format!("Invalid config structure: {}", msg), context)
            } else {
                Error::configuration_with_context(format!("Invalid YAML: {}", msg), context)
            }
        })
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// `.json` files are read as JSON, everything else as YAML.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::configuration_with_context(
                format!("Failed to read config: {}", e),
                ErrorContext::new()
                    .with_field_path(path.display().to_string())
                    .with_source("copilot_config"),
            )
        })?;
        let is_json = path
            .extension()
            .and_then(|s| s.to_str())
            .map_or(false, |ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json_str(&content)
        } else {
            Self::from_yaml_str(&content)
        }
    }

    /// Load from `COPILOT_CONFIG_PATH`. `Ok(None)` when the variable is unset.
    pub fn discover() -> Result<Option<Self>> {
        match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) if !path.trim().is_empty() => Self::from_path(path.trim()).map(Some),
            _ => Ok(None),
        }
    }

    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for (i, prompt) in self.prompts.iter().enumerate() {
            let field = |name: &str| format!("prompts[{}].{}", i, name);
            if prompt.name.trim().is_empty() {
                return Err(Error::validation_with_context(
                    "prompt name must not be empty",
                    ErrorContext::new().with_field_path(field("name")),
                ));
            }
            if !seen.insert(prompt.name.as_str()) {
                return Err(Error::validation_with_context(
                    format!("duplicate prompt name '{}'", prompt.name),
                    ErrorContext::new().with_field_path(field("name")),
                ));
            }
            if prompt.model.trim().is_empty() {
                return Err(Error::validation_with_context(
                    "prompt model must not be empty",
                    ErrorContext::new().with_field_path(field("model")),
                ));
            }
            if prompt.messages.is_empty() {
                return Err(Error::validation_with_context(
                    format!("prompt '{}' has no messages", prompt.name),
                    ErrorContext::new().with_field_path(field("messages")),
                ));
            }
        }
        Ok(())
    }

    /// Validate, seed the prompts and install the routing rules.
    pub async fn apply(&self, prompts: &PromptStore, router: &ProviderRouter) -> Result<()> {
        self.validate()?;
        prompts.seed(&self.prompts).await?;
        router.add_rules(self.routing.iter().cloned());
        info!(
            prompts = self.prompts.len(),
            rules = self.routing.len(),
            "applied copilot config"
        );
        Ok(())
    }
}
