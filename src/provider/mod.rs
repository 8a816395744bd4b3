//! # Provider Module
//!
//! Capability-based selection among registered AI backends. Pure logic: no
//! network calls, no provider SDKs. The router yields a reference to the chosen
//! provider and the caller invokes it.
//!
//! ## Key Components
//!
//! | Component | Description |
//! |-----------|-------------|
//! | [`Capability`] | text-to-text, text-to-embedding, text-to-image, image-to-image, image-to-text |
//! | [`ProviderType`] | Provider id, open to custom and test types |
//! | [`CopilotProvider`] | Declares the `(capability, models)` scopes a backend serves |
//! | [`RoutingRule`] | Ordered `(capability, model pattern) -> provider type` rule |
//! | [`ProviderRouter`] | Owned rule table with copy-on-write registration |
//!
//! ## Example
//!
//! ```rust
//! use ai_copilot_core::provider::{
//!     Capability, CapabilityScope, CopilotProvider, ProviderRouter, ProviderType, RoutingRule,
//! };
//! use std::sync::Arc;
//!
//! struct Fal;
//! impl CopilotProvider for Fal {
//!     fn provider_type(&self) -> ProviderType { ProviderType::Fal }
//!     fn capabilities(&self) -> Vec<CapabilityScope> {
//!         vec![CapabilityScope::any_model(Capability::TextToImage)]
//!     }
//! }
//!
//! struct OpenAi;
//! impl CopilotProvider for OpenAi {
//!     fn provider_type(&self) -> ProviderType { ProviderType::OpenAI }
//!     fn capabilities(&self) -> Vec<CapabilityScope> {
//!         vec![CapabilityScope::any_model(Capability::TextToText)]
//!     }
//! }
//!
//! let router = ProviderRouter::new();
//! router.register_provider(Arc::new(Fal));
//! router.register_provider(Arc::new(OpenAi));
//! router.add_rule(RoutingRule::new(Capability::TextToImage, ProviderType::OpenAI).for_model("dall-e-3"));
//!
//! assert_eq!(router.select(Capability::TextToImage, None), Some(ProviderType::Fal));
//! assert_eq!(router.select(Capability::TextToImage, Some("dall-e-3")), Some(ProviderType::OpenAI));
//! ```

mod base;
mod capability;
mod router;

pub use base::{CapabilityScope, CopilotProvider, ProviderType};
pub use capability::Capability;
pub use router::{global_router, ProviderRouter, RoutingRule};
