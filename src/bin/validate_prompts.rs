//! Standalone binary to validate a copilot config file.
//! Renders every prompt with its default parameters and checks the routing table.
//!
//! Usage: `validate_prompts [path]` (falls back to `COPILOT_CONFIG_PATH`).

use ai_copilot_core::config::{CopilotConfig, CONFIG_PATH_ENV};
use ai_copilot_core::{Params, Prompt};
use anyhow::Context;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var(CONFIG_PATH_ENV).ok())
        .with_context(|| format!("pass a config path or set {}", CONFIG_PATH_ENV))?;

    println!("Using config: {}", path);
    let config = CopilotConfig::from_path(&path)
        .with_context(|| format!("failed to load {}", path))?;

    let mut errors = Vec::new();

    println!("\n=== Validating Config ===");
    if let Err(e) = config.validate() {
        errors.push(format!("  config: {}", e));
    }

    println!("\n=== Rendering Prompts ===");
    for definition in &config.prompts {
        print!("Rendering {}... ", definition.name);
        let prompt = Prompt::new(definition.clone());
        let rendered = prompt.finish(&Params::new());
        if rendered.is_empty() {
            println!("❌");
            errors.push(format!(
                "  {}: renders to no messages with default parameters",
                definition.name
            ));
        } else {
            println!(
                "✅ ({} message(s), params: [{}])",
                rendered.len(),
                prompt.param_keys().join(", ")
            );
        }
    }

    println!("\n=== Routing Rules ===");
    for (i, rule) in config.routing.iter().enumerate() {
        let scope = if rule.is_scoped() {
            let mut parts = rule.models.clone();
            if let Some(prefix) = &rule.model_prefix {
                parts.push(format!("{}*", prefix));
            }
            parts.join(", ")
        } else {
            "*".to_string()
        };
        println!("  #{} {} [{}] -> {}", i, rule.capability, scope, rule.provider);
    }

    println!("\n=== Summary ===");
    if errors.is_empty() {
        println!("✅ Config is valid!");
        Ok(())
    } else {
        println!("❌ Found {} validation error(s):\n", errors.len());
        for err in &errors {
            println!("{}", err);
        }
        std::process::exit(1);
    }
}
