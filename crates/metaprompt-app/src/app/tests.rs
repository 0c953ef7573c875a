use metaprompt_ai::AiError;

use super::*;
use crate::strings::EN;
use crate::test_support::{fixture, open_keys};

#[tokio::test]
async fn submit_without_key_asks_for_one() {
    let mut f = fixture(None);
    assert_eq!(f.app.submit("hello").await, SubmitOutcome::NeedsCredential);
    assert!(f.app.conversation().messages().is_empty());
    assert_eq!(f.factory.connect_count(), 0);
}

#[tokio::test]
async fn blank_input_is_ignored() {
    let mut f = fixture(Some("AIzaKey"));
    assert_eq!(f.app.submit("   ").await, SubmitOutcome::Ignored);
    assert!(f.app.conversation().messages().is_empty());
}

#[tokio::test]
async fn submit_appends_user_and_model_messages() {
    let mut f = fixture(Some("AIzaKey"));
    f.factory.client.push_reply("Here is your prompt.");

    let SubmitOutcome::Replied { reply, error } = f.app.submit("write a haiku").await else {
        panic!("expected a reply");
    };
    assert_eq!(reply.content(), "Here is your prompt.");
    assert_eq!(error, None);

    let messages = f.app.conversation().messages();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].role(), metaprompt_common::Role::User);
    assert_eq!(messages[0].content(), "write a haiku");
    assert_eq!(messages[1].role(), metaprompt_common::Role::Model);
}

#[tokio::test]
async fn empty_reply_uses_fallback() {
    let mut f = fixture(Some("AIzaKey"));
    f.factory.client.push_reply("  \n");
    let SubmitOutcome::Replied { reply, error } = f.app.submit("hello").await else {
        panic!("expected a reply");
    };
    assert_eq!(reply.content(), EN.fallback_reply);
    assert_eq!(error, None);
}

#[tokio::test]
async fn rejected_key_shows_key_error() {
    let mut f = fixture(Some("AIzaBad"));
    f.factory.client.push_error(AiError::Http {
        status: 400,
        body: r#"{"error":{"status":"INVALID_ARGUMENT","message":"API key not valid."}}"#.into(),
    });

    let SubmitOutcome::Replied { reply, error } = f.app.submit("hello").await else {
        panic!("expected a reply");
    };
    assert_eq!(error, Some(ErrorKind::CredentialInvalid));
    assert_eq!(reply.content(), EN.error_key_invalid);
}

#[tokio::test]
async fn transient_failure_shows_generic_error_and_keeps_session() {
    let mut f = fixture(Some("AIzaKey"));
    f.factory.client.push_error(AiError::Timeout);

    let SubmitOutcome::Replied { reply, error } = f.app.submit("hello").await else {
        panic!("expected a reply");
    };
    assert_eq!(error, Some(ErrorKind::TransientFailure));
    assert_eq!(reply.content(), EN.error_generic);

    f.app.submit("again").await;
    assert_eq!(f.factory.connect_count(), 1);
}

#[tokio::test]
async fn attachment_is_embedded_once() {
    let mut f = fixture(Some("AIzaKey"));
    let path = f.dir.path().join("brief.md");
    std::fs::write(&path, "Audience: students").unwrap();

    let name = f.app.attach(&path).unwrap().name().to_string();
    assert_eq!(name, "brief.md");

    f.app.submit("make a study prompt").await;
    f.app.submit("shorter please").await;

    let prompts = f.factory.client.prompts();
    assert_eq!(prompts.len(), 2);
    assert!(prompts[0].contains("Audience: students"));
    assert!(prompts[0].contains("brief.md"));
    assert_eq!(prompts[1], "shorter please");

    let shown = f.app.conversation().messages()[0].content();
    assert!(shown.contains("brief.md"));
    assert!(!shown.contains("Audience: students"));
}

#[tokio::test]
async fn rejected_attachment_is_not_staged() {
    let mut f = fixture(Some("AIzaKey"));
    let path = f.dir.path().join("photo.jpg");
    std::fs::write(&path, [0xffu8, 0xd8]).unwrap();

    assert!(f.app.attach(&path).is_err());
    assert!(f.app.conversation().attachment().is_none());
    assert!(!f.app.detach());
}

#[test]
fn set_key_persists_and_blank_is_ignored() {
    let mut f = fixture(None);
    assert!(!f.app.set_key("   ").unwrap());
    assert!(!f.app.has_credential());

    assert!(f.app.set_key("  AIzaSyPersisted  ").unwrap());
    let reopened = open_keys(&f.storage);
    assert_eq!(reopened.get().map(|c| c.expose()), Some("AIzaSyPersisted"));

    f.app.clear_key().unwrap();
    assert!(!f.app.has_credential());
    assert!(open_keys(&f.storage).get().is_none());
}

#[tokio::test]
async fn key_change_starts_new_session() {
    let mut f = fixture(Some("AIzaFirst"));
    f.app.submit("one").await;
    f.app.set_key("AIzaSecond").unwrap();
    assert_eq!(f.app.client.state(), SessionState::NoSession);

    f.app.submit("two").await;
    assert_eq!(f.factory.connect_count(), 2);
}

#[tokio::test]
async fn reset_clears_transcript_and_session() {
    let mut f = fixture(Some("AIzaKey"));
    f.app.submit("hello").await;
    assert!(f.app.status_line().starts_with("session active"));

    f.app.reset();
    assert!(f.app.conversation().messages().is_empty());
    assert!(f.app.status_line().starts_with("no session"));
    assert!(f.app.has_credential());
}

#[tokio::test]
async fn test_connection_leaves_session_alone() {
    let mut f = fixture(None);
    assert!(!f.app.test_connection().await);

    f.app.set_key("AIzaKey").unwrap();
    assert!(f.app.test_connection().await);
    assert_eq!(f.app.client.state(), SessionState::NoSession);
    assert_eq!(f.app.conversation().messages().len(), 0);
}

#[test]
fn key_status_masks_value() {
    let f = fixture(Some("AIzaSyABCDEFGHx9Qk"));
    let status = f.app.key_status();
    assert!(status.contains("(local)"));
    assert!(!status.contains("ABCDEFGH"));

    let empty = fixture(None);
    assert_eq!(empty.app.key_status(), EN.key_none);
}
