//! Render-capable prompt handle.

use super::definition::PromptDefinition;
use crate::template::{CompiledTemplate, MessageTemplate, Params, PlaceholderBindings};
use crate::types::RenderedMessage;

/// A prompt definition with its templates compiled.
///
/// Handles are values: rendering never touches the store the prompt came from.
#[derive(Debug, Clone)]
pub struct Prompt {
    name: String,
    model: String,
    templates: Vec<CompiledTemplate>,
    param_keys: Vec<String>,
    params: PlaceholderBindings,
}

impl Prompt {
    pub fn new(definition: PromptDefinition) -> Self {
        let templates: Vec<CompiledTemplate> = definition
            .messages
            .into_iter()
            .map(CompiledTemplate::compile)
            .collect();

        let mut param_keys: Vec<String> = Vec::new();
        let mut params = PlaceholderBindings::new();
        for template in &templates {
            for key in template.keys() {
                if !param_keys.contains(&key) {
                    param_keys.push(key);
                }
            }
            // first declaration wins
            for (key, candidates) in &template.template().bindings {
                params
                    .entry(key.clone())
                    .or_insert_with(|| candidates.clone());
            }
        }

        Self {
            name: definition.name,
            model: definition.model,
            templates,
            param_keys,
            params,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn templates(&self) -> impl Iterator<Item = &MessageTemplate> {
        self.templates.iter().map(CompiledTemplate::template)
    }

    /// Distinct placeholder keys across all templates, first-seen order.
    pub fn param_keys(&self) -> &[String] {
        &self.param_keys
    }

    /// Declared candidates per key.
    pub fn params(&self) -> &PlaceholderBindings {
        &self.params
    }

    /// Every template rendered in order, blank results included.
    pub fn render(&self, params: &Params) -> Vec<RenderedMessage> {
        self.templates.iter().map(|t| t.render(params)).collect()
    }

    /// Rendered templates with blank messages (no content, no attachments) dropped.
    pub fn finish(&self, params: &Params) -> Vec<RenderedMessage> {
        self.render(params)
            .into_iter()
            .filter(|m| !m.is_blank())
            .collect()
    }

    pub fn to_definition(&self) -> PromptDefinition {
        PromptDefinition {
            name: self.name.clone(),
            model: self.model.clone(),
            messages: self.templates().cloned().collect(),
        }
    }
}

impl From<PromptDefinition> for Prompt {
    fn from(definition: PromptDefinition) -> Self {
        Self::new(definition)
    }
}
