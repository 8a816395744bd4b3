use super::capability::Capability;
use serde::{Deserialize, Serialize};

/// Provider identifier. Open-ended: unknown ids become [`ProviderType::Custom`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ProviderType {
    OpenAI,
    Fal,
    Gemini,
    Perplexity,
    Anthropic,
    /// Arbitrary provider id, including test and mock backends.
    Custom(String),
}

impl ProviderType {
    pub fn id(&self) -> &str {
        match self {
            ProviderType::OpenAI => "openai",
            ProviderType::Fal => "fal",
            ProviderType::Gemini => "gemini",
            ProviderType::Perplexity => "perplexity",
            ProviderType::Anthropic => "anthropic",
            ProviderType::Custom(s) => s.as_str(),
        }
    }

    pub fn custom(id: impl Into<String>) -> Self {
        ProviderType::from(id.into())
    }
}

impl From<String> for ProviderType {
    fn from(id: String) -> Self {
        match id.as_str() {
            "openai" => ProviderType::OpenAI,
            "fal" => ProviderType::Fal,
            "gemini" => ProviderType::Gemini,
            "perplexity" => ProviderType::Perplexity,
            "anthropic" => ProviderType::Anthropic,
            _ => ProviderType::Custom(id),
        }
    }
}

impl From<&str> for ProviderType {
    fn from(id: &str) -> Self {
        ProviderType::from(id.to_string())
    }
}

impl From<ProviderType> for String {
    fn from(provider: ProviderType) -> Self {
        provider.id().to_string()
    }
}

impl std::fmt::Display for ProviderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

/// A capability a provider serves, unconditionally or only for some models.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilityScope {
    pub capability: Capability,
    /// Empty means every model.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub models: Vec<String>,
}

impl CapabilityScope {
    pub fn any_model(capability: Capability) -> Self {
        Self {
            capability,
            models: Vec::new(),
        }
    }

    pub fn for_models<I, S>(capability: Capability, models: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            capability,
            models: models.into_iter().map(Into::into).collect(),
        }
    }
}

/// An AI backend as seen by the router. Generating content is out of the
/// router's hands; it only hands back a reference to the chosen provider.
pub trait CopilotProvider: Send + Sync {
    fn provider_type(&self) -> ProviderType;

    fn capabilities(&self) -> Vec<CapabilityScope>;

    fn supports(&self, capability: Capability, model: Option<&str>) -> bool {
        self.capabilities().iter().any(|scope| {
            scope.capability == capability
                && (scope.models.is_empty()
                    || model.map_or(false, |m| scope.models.iter().any(|s| s == m)))
        })
    }
}
