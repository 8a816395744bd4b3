//! Benchmarks for template rendering performance
//!
//! This benchmark measures:
//! - Single template render (parse + substitute)
//! - Compiled prompt finish with list blocks of growing size
//! - Session finish over a long committed history

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use ai_copilot_core::prompt::{Prompt, PromptDefinition};
use ai_copilot_core::session::{CreateSessionOptions, SessionStore};
use ai_copilot_core::template::{render, MessageTemplate, Params};
use ai_copilot_core::types::PromptMessage;
use ai_copilot_core::PromptStore;
use serde_json::json;

fn translate_template() -> MessageTemplate {
    MessageTemplate::system("translate {{src}} to {{dst}}: {{content}}")
        .with_binding("src", ["eng"])
        .with_binding("dst", ["chs", "jpn", "kor"])
}

fn list_prompt() -> Prompt {
    Prompt::new(PromptDefinition::new(
        "summarize-links",
        "gpt-4o",
        vec![
            MessageTemplate::system("You summarize {{kind}} for {{audience}}.")
                .with_binding("kind", ["articles", "papers"])
                .with_binding("audience", ["engineers"]),
            MessageTemplate::user("Sources:\n{{#links}}- {{.}}\n{{/links}}Focus: {{focus}}"),
        ],
    ))
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("template_render");
    let template = translate_template();
    let params = Params::new()
        .with("src", "eng")
        .with("dst", "jpn")
        .with("content", "hello world");

    group.bench_function("scalar_render", |b| {
        b.iter(|| render(black_box(&template), black_box(&params)))
    });
    group.bench_function("scalar_render_defaults", |b| {
        b.iter(|| render(black_box(&template), black_box(&Params::new())))
    });
    group.finish();
}

fn bench_prompt_finish(c: &mut Criterion) {
    let mut group = c.benchmark_group("prompt_finish");
    let prompt = list_prompt();

    for size in [1usize, 16, 256] {
        let links: Vec<String> = (0..size).map(|i| format!("https://example.com/{}", i)).collect();
        let params = Params::new().with("links", json!(links)).with("focus", "risks");
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("list_block", size), &params, |b, params| {
            b.iter(|| prompt.finish(black_box(params)))
        });
    }
    group.finish();
}

fn bench_session_finish(c: &mut Criterion) {
    let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
    let session = runtime.block_on(async {
        let prompts = PromptStore::in_memory();
        prompts
            .set("chat", "gpt-4o", vec![MessageTemplate::system("You are {{persona}}.")])
            .await
            .expect("set prompt");
        let sessions = SessionStore::in_memory(prompts);
        let id = sessions
            .create(CreateSessionOptions::new("u", "w", "d", "chat"))
            .await
            .expect("create session");
        let mut session = sessions.get(&id).await.expect("load").expect("exists");
        for i in 0..200 {
            session.push(PromptMessage::user(format!("question {}", i)));
            session.push(PromptMessage::assistant(format!("answer {}", i)));
        }
        session.save().await.expect("save");
        session
    });

    let params = Params::new().with("persona", "concise");
    c.bench_function("session_finish_400_turns", |b| {
        b.iter(|| session.finish(black_box(&params)))
    });
}

criterion_group!(benches, bench_render, bench_prompt_finish, bench_session_finish);
criterion_main!(benches);
