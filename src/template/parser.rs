//! Tag scanning for the `{{key}}` / `{{#key}}...{{/key}}` mini-language.
//!
//! Parsing never fails. Text that does not form a tag stays literal, tags the
//! language does not support expand to nothing, and unbalanced block tags are
//! dropped while their bodies stay in place.

use once_cell::sync::Lazy;
use regex::Regex;

static TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{\{\s*([#/^!>&=]?)\s*([^{}]*?)\s*\}\}").expect("tag pattern is a valid regex")
});

/// Key bound to the current element inside a list block.
pub const ELEMENT_KEY: &str = ".";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Text(String),
    Var(String),
    Section { key: String, body: Vec<Node> },
}

struct Frame {
    key: String,
    nodes: Vec<Node>,
}

pub fn parse(source: &str) -> Vec<Node> {
    let mut stack = vec![Frame {
        key: String::new(),
        nodes: Vec::new(),
    }];
    let mut last = 0;

    for caps in TAG.captures_iter(source) {
        let Some(whole) = caps.get(0) else { continue };
        push_text(&mut stack, &source[last..whole.start()]);
        last = whole.end();

        let sigil = caps.get(1).map_or("", |m| m.as_str());
        let key = caps.get(2).map_or("", |m| m.as_str()).trim();

        match sigil {
            "" if !key.is_empty() => top(&mut stack).push(Node::Var(key.to_string())),
            "#" if !key.is_empty() => stack.push(Frame {
                key: key.to_string(),
                nodes: Vec::new(),
            }),
            "/" => close(&mut stack, key),
            // ^ ! > & = and empty tags
            _ => {}
        }
    }
    push_text(&mut stack, &source[last..]);

    while stack.len() > 1 {
        splice_unclosed(&mut stack);
    }
    stack.pop().map(|f| f.nodes).unwrap_or_default()
}

fn top(stack: &mut [Frame]) -> &mut Vec<Node> {
    // the root frame is never popped while scanning
    &mut stack[stack.len() - 1].nodes
}

fn push_text(stack: &mut [Frame], text: &str) {
    if text.is_empty() {
        return;
    }
    let nodes = top(stack);
    if let Some(Node::Text(prev)) = nodes.last_mut() {
        prev.push_str(text);
    } else {
        nodes.push(Node::Text(text.to_string()));
    }
}

fn close(stack: &mut Vec<Frame>, key: &str) {
    let Some(pos) = stack.iter().skip(1).rposition(|f| f.key == key).map(|p| p + 1) else {
        return;
    };
    while stack.len() - 1 > pos {
        splice_unclosed(stack);
    }
    if let Some(frame) = stack.pop() {
        top(stack).push(Node::Section {
            key: frame.key,
            body: frame.nodes,
        });
    }
}

fn splice_unclosed(stack: &mut Vec<Frame>) {
    let Some(frame) = stack.pop() else { return };
    for node in frame.nodes {
        match node {
            Node::Text(text) => push_text(stack, &text),
            other => top(stack).push(other),
        }
    }
}

/// Distinct keys referenced by the nodes, in first-seen order.
pub fn collect_keys(nodes: &[Node], keys: &mut Vec<String>) {
    for node in nodes {
        match node {
            Node::Text(_) => {}
            Node::Var(key) => push_key(keys, key),
            Node::Section { key, body } => {
                push_key(keys, key);
                collect_keys(body, keys);
            }
        }
    }
}

fn push_key(keys: &mut Vec<String>, key: &str) {
    if key != ELEMENT_KEY && !keys.iter().any(|k| k == key) {
        keys.push(key.to_string());
    }
}
