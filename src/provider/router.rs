//! Capability-based provider selection.
//!
//! The router owns a copy-on-write table of registered providers and an
//! ordered rule list. Reads take a snapshot and never block registration.

use super::base::{CopilotProvider, ProviderType};
use super::capability::Capability;
use arc_swap::ArcSwap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

/// Maps a capability, optionally narrowed to models, to a provider type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutingRule {
    pub capability: Capability,
    /// Exact model ids this rule is scoped to.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub models: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_prefix: Option<String>,
    pub provider: ProviderType,
}

impl RoutingRule {
    pub fn new(capability: Capability, provider: impl Into<ProviderType>) -> Self {
        Self {
            capability,
            models: Vec::new(),
            model_prefix: None,
            provider: provider.into(),
        }
    }

    pub fn for_model(mut self, model: impl Into<String>) -> Self {
        self.models.push(model.into());
        self
    }

    pub fn with_model_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.model_prefix = Some(prefix.into());
        self
    }

    /// Scoped rules only match when the caller names a model.
    pub fn is_scoped(&self) -> bool {
        !self.models.is_empty() || self.model_prefix.is_some()
    }

    pub fn matches_model(&self, model: &str) -> bool {
        self.models.iter().any(|m| m == model)
            || self
                .model_prefix
                .as_deref()
                .map_or(false, |p| model.starts_with(p))
    }
}

#[derive(Clone, Default)]
struct RouteTable {
    providers: HashMap<ProviderType, Arc<dyn CopilotProvider>>,
    /// Explicit rules, consulted before derived ones.
    overrides: Vec<RoutingRule>,
    /// Rules derived from provider declarations, in registration order.
    derived: Vec<RoutingRule>,
}

impl RouteTable {
    fn live_rules(&self, capability: Capability) -> impl Iterator<Item = &RoutingRule> {
        self.overrides
            .iter()
            .chain(self.derived.iter())
            .filter(move |r| r.capability == capability && self.providers.contains_key(&r.provider))
    }

    fn select(&self, capability: Capability, model: Option<&str>) -> Option<&RoutingRule> {
        if let Some(model) = model {
            if let Some(rule) = self
                .live_rules(capability)
                .find(|r| r.is_scoped() && r.matches_model(model))
            {
                return Some(rule);
            }
        }
        self.live_rules(capability).find(|r| !r.is_scoped())
    }
}

fn derive_rules(provider: &dyn CopilotProvider) -> Vec<RoutingRule> {
    let provider_type = provider.provider_type();
    provider
        .capabilities()
        .into_iter()
        .map(|scope| RoutingRule {
            capability: scope.capability,
            models: scope.models,
            model_prefix: None,
            provider: provider_type.clone(),
        })
        .collect()
}

pub struct ProviderRouter {
    table: ArcSwap<RouteTable>,
}

impl ProviderRouter {
    pub fn new() -> Self {
        Self {
            table: ArcSwap::from_pointee(RouteTable::default()),
        }
    }

    /// Insert or replace the provider registered under its type. A replaced
    /// provider's derived rules keep their position in the rule order.
    pub fn register_provider(&self, provider: Arc<dyn CopilotProvider>) {
        let provider_type = provider.provider_type();
        let rules = derive_rules(provider.as_ref());
        info!(
            provider = %provider_type,
            capabilities = rules.len(),
            "registering provider"
        );

        self.table.rcu(|current| {
            let mut next = RouteTable::clone(current);
            let slot = next
                .derived
                .iter()
                .position(|r| r.provider == provider_type)
                .unwrap_or(next.derived.len());
            next.derived.retain(|r| r.provider != provider_type);
            let slot = slot.min(next.derived.len());
            next.derived.splice(slot..slot, rules.iter().cloned());
            next.providers
                .insert(provider_type.clone(), Arc::clone(&provider));
            next
        });
    }

    pub fn unregister_provider(&self, provider_type: &ProviderType) -> Option<Arc<dyn CopilotProvider>> {
        let mut removed = None;
        self.table.rcu(|current| {
            let mut next = RouteTable::clone(current);
            // rcu may retry; keep what the committed attempt removed
            removed = next.providers.remove(provider_type);
            next.derived.retain(|r| &r.provider != provider_type);
            next
        });
        removed
    }

    /// Append an explicit rule. Explicit rules win over rules derived from
    /// provider declarations.
    pub fn add_rule(&self, rule: RoutingRule) {
        self.add_rules([rule]);
    }

    pub fn add_rules(&self, rules: impl IntoIterator<Item = RoutingRule>) {
        let rules: Vec<RoutingRule> = rules.into_iter().collect();
        self.table.rcu(|current| {
            let mut next = RouteTable::clone(current);
            next.overrides.extend(rules.iter().cloned());
            next
        });
    }

    /// Select the provider type for a capability.
    ///
    /// With a model, a rule scoped to that model wins over any unscoped rule.
    /// Otherwise the first unscoped rule for the capability wins.
    pub fn select(&self, capability: Capability, model: Option<&str>) -> Option<ProviderType> {
        let table = self.table.load();
        let selected = table.select(capability, model).map(|r| r.provider.clone());
        debug!(
            capability = %capability,
            model = model.unwrap_or("-"),
            provider = selected.as_ref().map(ProviderType::id).unwrap_or("-"),
            "provider selection"
        );
        selected
    }

    pub fn get_provider_by_capability(
        &self,
        capability: Capability,
        model: Option<&str>,
    ) -> Option<Arc<dyn CopilotProvider>> {
        let table = self.table.load();
        let rule = table.select(capability, model)?;
        table.providers.get(&rule.provider).cloned()
    }

    pub fn provider(&self, provider_type: &ProviderType) -> Option<Arc<dyn CopilotProvider>> {
        self.table.load().providers.get(provider_type).cloned()
    }

    /// Registered provider types able to serve a capability, in rule order.
    pub fn providers_for(&self, capability: Capability) -> Vec<ProviderType> {
        let table = self.table.load();
        let mut types: Vec<ProviderType> = Vec::new();
        for rule in table.live_rules(capability) {
            if !types.contains(&rule.provider) {
                types.push(rule.provider.clone());
            }
        }
        types
    }

    /// Every rule in evaluation order.
    pub fn rules(&self) -> Vec<RoutingRule> {
        let table = self.table.load();
        table
            .overrides
            .iter()
            .chain(table.derived.iter())
            .cloned()
            .collect()
    }
}

impl Default for ProviderRouter {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ProviderRouter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let table = self.table.load();
        let mut providers: Vec<&str> = table.providers.keys().map(ProviderType::id).collect();
        providers.sort_unstable();
        f.debug_struct("ProviderRouter")
            .field("providers", &providers)
            .field("overrides", &table.overrides.len())
            .field("derived", &table.derived.len())
            .finish()
    }
}

static GLOBAL_ROUTER: once_cell::sync::Lazy<ProviderRouter> =
    once_cell::sync::Lazy::new(ProviderRouter::new);

/// Process-wide router for hosts that cannot pass an owned one around.
pub fn global_router() -> &'static ProviderRouter {
    &GLOBAL_ROUTER
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::CapabilityScope;

    struct Static {
        ty: ProviderType,
        scopes: Vec<CapabilityScope>,
    }

    impl CopilotProvider for Static {
        fn provider_type(&self) -> ProviderType {
            self.ty.clone()
        }

        fn capabilities(&self) -> Vec<CapabilityScope> {
            self.scopes.clone()
        }
    }

    fn provider(ty: impl Into<ProviderType>, scopes: Vec<CapabilityScope>) -> Arc<dyn CopilotProvider> {
        Arc::new(Static {
            ty: ty.into(),
            scopes,
        })
    }

    #[test]
    fn test_rules_for_unregistered_providers_never_match() {
        let router = ProviderRouter::new();
        router.add_rule(RoutingRule::new(Capability::TextToText, "openai"));
        assert!(router.select(Capability::TextToText, None).is_none());

        router.register_provider(provider(
            "openai",
            vec![CapabilityScope::any_model(Capability::TextToEmbedding)],
        ));
        assert_eq!(
            router.select(Capability::TextToText, None),
            Some(ProviderType::OpenAI)
        );
    }

    #[test]
    fn test_scoped_only_rule_needs_model() {
        let router = ProviderRouter::new();
        router.register_provider(provider(
            "test",
            vec![CapabilityScope::for_models(Capability::TextToText, ["test"])],
        ));
        assert!(router.select(Capability::TextToText, None).is_none());
        assert!(router.select(Capability::TextToText, Some("other")).is_none());
        assert_eq!(
            router.select(Capability::TextToText, Some("test")),
            Some(ProviderType::custom("test"))
        );
    }

    #[test]
    fn test_reregistration_keeps_rule_position() {
        let router = ProviderRouter::new();
        router.register_provider(provider(
            "a",
            vec![CapabilityScope::any_model(Capability::TextToText)],
        ));
        router.register_provider(provider(
            "b",
            vec![CapabilityScope::any_model(Capability::TextToText)],
        ));
        router.register_provider(provider(
            "a",
            vec![
                CapabilityScope::any_model(Capability::TextToText),
                CapabilityScope::any_model(Capability::ImageToText),
            ],
        ));

        assert_eq!(
            router.select(Capability::TextToText, None),
            Some(ProviderType::custom("a"))
        );
        assert_eq!(router.rules().len(), 3);
        assert_eq!(
            router.providers_for(Capability::TextToText),
            vec![ProviderType::custom("a"), ProviderType::custom("b")]
        );
    }

    #[test]
    fn test_unregister() {
        let router = ProviderRouter::new();
        router.register_provider(provider(
            "fal",
            vec![CapabilityScope::any_model(Capability::TextToImage)],
        ));
        assert!(router.unregister_provider(&ProviderType::Fal).is_some());
        assert!(router.unregister_provider(&ProviderType::Fal).is_none());
        assert!(router.select(Capability::TextToImage, None).is_none());
        assert!(router.rules().is_empty());
    }

    #[test]
    fn test_unregister_returns_current_provider() {
        let router = ProviderRouter::new();
        router.register_provider(provider(
            "fal",
            vec![CapabilityScope::any_model(Capability::TextToImage)],
        ));
        router.register_provider(provider(
            "fal",
            vec![
                CapabilityScope::any_model(Capability::TextToImage),
                CapabilityScope::any_model(Capability::ImageToImage),
            ],
        ));

        let removed = router.unregister_provider(&ProviderType::Fal).unwrap();
        assert_eq!(removed.capabilities().len(), 2);
        assert!(router.provider(&ProviderType::Fal).is_none());
    }

    #[test]
    fn test_concurrent_register_and_unregister() {
        let router = Arc::new(ProviderRouter::new());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let router = Arc::clone(&router);
                std::thread::spawn(move || {
                    let scopes = vec![CapabilityScope::any_model(Capability::TextToText); i + 1];
                    router.register_provider(provider("openai", scopes));
                    router
                        .unregister_provider(&ProviderType::OpenAI)
                        .map(|p| p.capabilities().len())
                })
            })
            .collect();

        let mut removed = 0;
        for handle in handles {
            if let Some(len) = handle.join().unwrap() {
                assert!((1..=8).contains(&len));
                removed += 1;
            }
        }
        assert!(removed >= 1);
        assert!(router.provider(&ProviderType::OpenAI).is_none());
        assert!(router.rules().is_empty());
    }

    #[test]
    fn test_model_prefix_rule() {
        let router = ProviderRouter::new();
        router.register_provider(provider(
            "gemini",
            vec![CapabilityScope::for_models(Capability::TextToText, ["gemini-2.5-pro"])],
        ));
        router.add_rule(RoutingRule::new(Capability::TextToText, "gemini").with_model_prefix("gemini-"));
        assert_eq!(
            router.select(Capability::TextToText, Some("gemini-2.0-flash")),
            Some(ProviderType::Gemini)
        );
    }
}
