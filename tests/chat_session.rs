//! Session lifecycle: creation, staging, commits and handle isolation.

use ai_copilot_core::prompt::PromptStore;
use ai_copilot_core::session::{CreateMessage, CreateSessionOptions, SessionFilter, SessionStore};
use ai_copilot_core::template::{MessageTemplate, Params};
use ai_copilot_core::types::PromptMessage;
use ai_copilot_core::{Error, MessageRole};

async fn setup() -> SessionStore {
    let prompts = PromptStore::in_memory();
    prompts
        .set(
            "chat",
            "gpt-4o",
            vec![MessageTemplate::system("You are {{persona}}.").with_binding("persona", ["helpful"])],
        )
        .await
        .unwrap();
    SessionStore::in_memory(prompts)
}

async fn new_session(store: &SessionStore, doc: &str) -> String {
    store
        .create(CreateSessionOptions::new("user", "ws", doc, "chat"))
        .await
        .unwrap()
}

#[tokio::test]
async fn test_create_snapshots_model() {
    let store = setup().await;
    let id = new_session(&store, "doc").await;

    store
        .prompts()
        .set("chat", "gpt-4o-mini", vec![MessageTemplate::system("changed")])
        .await
        .unwrap();

    let session = store.get(&id).await.unwrap().unwrap();
    assert_eq!(session.model(), "gpt-4o");
    assert_eq!(session.prompt().model(), "gpt-4o-mini");
    assert_eq!(session.finish(&Params::new())[0].content, "changed");
}

#[tokio::test]
async fn test_session_ids_are_unique() {
    let store = setup().await;
    let a = new_session(&store, "doc").await;
    let b = new_session(&store, "doc").await;
    assert_ne!(a, b);
}

#[tokio::test]
async fn test_saved_messages_visible_in_order_after_reload() {
    let store = setup().await;
    let id = new_session(&store, "doc").await;

    let mut session = store.get(&id).await.unwrap().unwrap();
    for i in 0..5 {
        session.push(PromptMessage::user(format!("q{}", i)));
    }
    session.save().await.unwrap();
    assert!(session.stash_messages().is_empty());

    let reloaded = store.get(&id).await.unwrap().unwrap();
    let out = reloaded.finish(&Params::new());
    let contents: Vec<&str> = out.iter().map(|m| m.content.as_str()).collect();
    assert_eq!(contents, vec!["You are helpful.", "q0", "q1", "q2", "q3", "q4"]);
}

#[tokio::test]
async fn test_unsaved_stash_is_not_shared() {
    let store = setup().await;
    let id = new_session(&store, "doc").await;

    let mut first = store.get(&id).await.unwrap().unwrap();
    let second = store.get(&id).await.unwrap().unwrap();
    first.push(PromptMessage::user("draft"));

    assert_eq!(first.finish(&Params::new()).len(), 2);
    assert_eq!(second.finish(&Params::new()).len(), 1);

    first.save().await.unwrap();
    // an existing handle does not refresh; a new one does
    assert_eq!(second.finish(&Params::new()).len(), 1);
    assert_eq!(store.get(&id).await.unwrap().unwrap().history().len(), 1);
}

#[tokio::test]
async fn test_blank_messages_are_dropped_in_order() {
    let store = setup().await;
    let id = new_session(&store, "doc").await;
    let mut session = store.get(&id).await.unwrap().unwrap();

    session.push(PromptMessage::user("a"));
    session.push(PromptMessage::assistant(""));
    session.push(PromptMessage::user("b"));
    session.push(PromptMessage::assistant(" "));
    session.push(PromptMessage::user(""));
    session.push(PromptMessage::user("c"));

    // only exactly-empty content is dropped
    let contents: Vec<String> = session
        .finish(&Params::new())
        .into_iter()
        .skip(1)
        .map(|m| m.content)
        .collect();
    assert_eq!(contents, vec!["a", "b", " ", "c"]);
}

#[tokio::test]
async fn test_attachment_only_message_is_kept() {
    let store = setup().await;
    let id = new_session(&store, "doc").await;
    let mut session = store.get(&id).await.unwrap().unwrap();

    session.push(PromptMessage::user("").with_attachments(vec!["https://img/1.png".into()]));
    let out = session.finish(&Params::new());
    assert_eq!(out.len(), 2);
    assert_eq!(out[1].attachments, vec!["https://img/1.png"]);
}

#[tokio::test]
async fn test_push_by_message_id_rules() {
    let store = setup().await;
    let s1 = new_session(&store, "doc-1").await;
    let s2 = new_session(&store, "doc-2").await;

    let foreign = store
        .create_message(CreateMessage::new(&s2).with_content("not yours"))
        .await
        .unwrap();
    let own = store
        .create_message(
            CreateMessage::new(&s1)
                .with_role(MessageRole::Assistant)
                .with_content("mine"),
        )
        .await
        .unwrap();

    let mut session = store.get(&s1).await.unwrap().unwrap();

    let err = session.push_by_message_id(foreign.id.as_str()).await.unwrap_err();
    assert!(matches!(err, Error::Ownership { .. }));
    assert!(session.stash_messages().is_empty());

    let err = session.push_by_message_id("no-such-message").await.unwrap_err();
    assert!(err.is_not_found());

    session.push_by_message_id(own.id.as_str()).await.unwrap();
    assert!(session.push_by_message_id(own.id.as_str()).await.is_err());
    assert_eq!(session.stash_messages().len(), 1);
    assert_eq!(session.stash_messages()[0].role, MessageRole::Assistant);

    session.save().await.unwrap();
    let reloaded = store.get(&s1).await.unwrap().unwrap();
    assert_eq!(reloaded.history().len(), 1);
    assert_eq!(reloaded.history()[0].id, own.id);
}

#[tokio::test]
async fn test_list_sessions_by_filter() {
    let store = setup().await;
    new_session(&store, "doc-1").await;
    new_session(&store, "doc-2").await;
    store
        .create(CreateSessionOptions::new("other", "ws", "doc-1", "chat"))
        .await
        .unwrap();

    assert_eq!(store.list(&SessionFilter::for_user("user")).await.unwrap().len(), 2);
    assert_eq!(
        store
            .list(&SessionFilter::for_user("user").in_workspace("ws").in_doc("doc-1"))
            .await
            .unwrap()
            .len(),
        1
    );
    assert!(store
        .list(&SessionFilter::for_user("user").in_workspace("elsewhere"))
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_draft_commits_once_across_handles() {
    let store = setup().await;
    let id = new_session(&store, "doc").await;
    let draft = store
        .create_message(CreateMessage::new(&id).with_content("only once"))
        .await
        .unwrap();

    let mut a = store.get(&id).await.unwrap().unwrap();
    let mut b = store.get(&id).await.unwrap().unwrap();
    a.push_by_message_id(draft.id.as_str()).await.unwrap();
    b.push_by_message_id(draft.id.as_str()).await.unwrap();
    b.push(PromptMessage::user("follow-up"));

    a.save().await.unwrap();
    let err = b.save().await.unwrap_err();
    assert!(matches!(err, Error::Validation { .. }));
    // nothing from the rejected batch is committed and the stash survives
    assert_eq!(b.stash_messages().len(), 2);

    let history = store.get(&id).await.unwrap().unwrap().history().to_vec();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].id, draft.id);
}

#[tokio::test]
async fn test_delete_unattached_draft() {
    let store = setup().await;
    let id = new_session(&store, "doc").await;
    let draft = store
        .create_message(CreateMessage::new(&id).with_content("abandoned"))
        .await
        .unwrap();

    store.delete_message(&draft.id).await.unwrap();
    store.delete_message(&draft.id).await.unwrap();

    let mut session = store.get(&id).await.unwrap().unwrap();
    let err = session.push_by_message_id(draft.id.as_str()).await.unwrap_err();
    assert!(err.is_not_found());
}
