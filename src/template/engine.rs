//! Total rendering of message templates.

use super::message::{MessageTemplate, PlaceholderBindings};
use super::params::Params;
use super::parser::{self, Node, ELEMENT_KEY};
use crate::types::RenderedMessage;
use std::collections::BTreeMap;
use tracing::warn;

/// A message template with its tags parsed once.
#[derive(Debug, Clone)]
pub struct CompiledTemplate {
    template: MessageTemplate,
    nodes: Vec<Node>,
}

impl CompiledTemplate {
    pub fn compile(template: MessageTemplate) -> Self {
        let nodes = parser::parse(&template.content);
        Self { template, nodes }
    }

    pub fn template(&self) -> &MessageTemplate {
        &self.template
    }

    /// Placeholder keys in first-seen order, list keys included, `.` excluded.
    pub fn keys(&self) -> Vec<String> {
        let mut keys = Vec::new();
        parser::collect_keys(&self.nodes, &mut keys);
        keys
    }

    pub fn render(&self, params: &Params) -> RenderedMessage {
        let mut resolver = Resolver {
            params,
            bindings: &self.template.bindings,
            used: BTreeMap::new(),
        };
        let mut content = String::with_capacity(self.template.content.len());
        render_nodes(&self.nodes, &mut resolver, None, &mut content);

        RenderedMessage {
            role: self.template.role,
            content,
            params_used: resolver.used,
            attachments: self.template.attachments.clone(),
        }
    }
}

/// Render one template against a parameter set. Never fails.
pub fn render(template: &MessageTemplate, params: &Params) -> RenderedMessage {
    CompiledTemplate::compile(template.clone()).render(params)
}

struct Resolver<'a> {
    params: &'a Params,
    bindings: &'a PlaceholderBindings,
    used: BTreeMap<String, String>,
}

impl Resolver<'_> {
    fn resolve(&mut self, key: &str) -> String {
        if let Some(value) = self.used.get(key) {
            return value.clone();
        }

        let candidates = self.bindings.get(key).filter(|c| !c.is_empty());
        let value = match (self.params.scalar(key), candidates) {
            (Some(supplied), Some(candidates)) if candidates.contains(&supplied) => supplied,
            (Some(supplied), Some(candidates)) => {
                warn!(
                    key,
                    supplied = %supplied,
                    fallback = %candidates[0],
                    "supplied value is not a declared candidate, using default"
                );
                candidates[0].clone()
            }
            (Some(supplied), None) => supplied,
            (None, Some(candidates)) => candidates[0].clone(),
            (None, None) => return String::new(),
        };

        self.used.insert(key.to_string(), value.clone());
        value
    }
}

fn render_nodes(nodes: &[Node], resolver: &mut Resolver<'_>, element: Option<&str>, out: &mut String) {
    for node in nodes {
        match node {
            Node::Text(text) => out.push_str(text),
            Node::Var(key) if key == ELEMENT_KEY => match element {
                Some(value) => out.push_str(value),
                None => out.push_str(&resolver.resolve(key)),
            },
            Node::Var(key) => out.push_str(&resolver.resolve(key)),
            Node::Section { key, body } => {
                let Some(items) = resolver.params.list(key) else {
                    continue;
                };
                for item in &items {
                    render_nodes(body, resolver, Some(item), out);
                }
            }
        }
    }
}
