//! # Prompt Module
//!
//! Named prompt definitions and the render-capable [`Prompt`] handle.
//!
//! | Component | Description |
//! |-----------|-------------|
//! | [`PromptDefinition`] | Stored name, model and ordered message templates |
//! | [`Prompt`] | Compiled handle exposing `param_keys`, `params` and `finish` |
//! | [`PromptStore`] | CRUD over a [`PromptRepository`](crate::storage::PromptRepository) |
//!
//! ## Example
//!
//! ```rust
//! use ai_copilot_core::prompt::PromptStore;
//! use ai_copilot_core::template::{MessageTemplate, Params};
//!
//! # #[tokio::main]
//! # async fn main() -> ai_copilot_core::Result<()> {
//! let store = PromptStore::in_memory();
//! store
//!     .set("summary", "gpt-4o", vec![MessageTemplate::user("Summarize: {{content}}")])
//!     .await?;
//!
//! let prompt = store.get("summary").await?.expect("just stored");
//! let messages = prompt.finish(&Params::new().with("content", "a long text"));
//! assert_eq!(messages[0].content, "Summarize: a long text");
//! # Ok(())
//! # }
//! ```

mod definition;
mod handle;
mod store;

pub use definition::{PromptDefinition, PromptSummary};
pub use handle::Prompt;
pub use store::PromptStore;
