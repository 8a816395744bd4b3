//! # Template Module
//!
//! Renders stored message templates into concrete model messages.
//!
//! ## Syntax
//!
//! | Tag | Meaning |
//! |-----|---------|
//! | `{{key}}` | Scalar substitution |
//! | `{{#key}}...{{/key}}` | Repeat the body once per element of the array `key` |
//! | `{{.}}` | Current element inside a block |
//!
//! Rendering is total: unresolved keys become their first declared candidate
//! or the empty string, and unsupported syntax expands to nothing.
//!
//! ## Example
//!
//! ```rust
//! use ai_copilot_core::template::{render, MessageTemplate, Params};
//!
//! let template = MessageTemplate::system("translate {{src}} to {{dst}}: {{content}}")
//!     .with_binding("src", ["eng"])
//!     .with_binding("dst", ["chs", "jpn", "kor"]);
//!
//! let rendered = render(&template, &Params::new().with("content", "hello"));
//! assert_eq!(rendered.content, "translate eng to chs: hello");
//! ```

mod engine;
mod message;
mod params;
mod parser;

pub use engine::{render, CompiledTemplate};
pub use message::{MessageTemplate, PlaceholderBindings};
pub use params::Params;
