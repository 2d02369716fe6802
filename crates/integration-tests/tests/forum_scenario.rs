//! The forum walked end to end against each record store.
//!
//! Two mutations of the same collection racing each other lose one write.
//! That is a known limitation of whole-collection rewrites and is not
//! exercised here.

mod common;

use std::sync::Arc;

use domains::{DomainError, RecordStore};
use services::{ForumService, Session};
use storage_adapters::{JsonFileStore, MemoryStore};
use tempfile::TempDir;

use common::{chess_seed, open_forum};

async fn register_post_and_comment(forum: &ForumService) -> anyhow::Result<()> {
    let mut session = Session::new();

    let alice = forum.register("alice", "pw1").await?;
    let logged_in = forum.login(&mut session, "alice", "pw1").await?;
    assert_eq!(logged_in, alice);
    assert_eq!(session.current_user(), Some(&alice));

    let post = forum
        .create_post(alice.id, 1, "Hi", "Hello world", vec!["chat".into()])
        .await?;
    assert_eq!(post.game_id, 1);
    assert_eq!(post.tags, vec!["chat".to_string()]);

    let posts = forum.list_posts().await?;
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].title, "Hi");

    let comment = forum.add_comment(post.id, alice.id, "Nice").await?;
    assert_eq!(comment.post_id, post.id);

    let comments = forum.list_comments_for_post(post.id).await?;
    assert_eq!(comments, vec![comment]);
    Ok(())
}

#[tokio::test]
async fn test_scenario_on_memory_store() -> anyhow::Result<()> {
    let forum = open_forum(Arc::new(MemoryStore::new()), &chess_seed()).await;
    register_post_and_comment(&forum).await
}

#[tokio::test]
async fn test_scenario_on_file_store() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let store = Arc::new(JsonFileStore::open(dir.path()).await?);
    let forum = open_forum(store, &chess_seed()).await;
    register_post_and_comment(&forum).await
}

#[tokio::test]
async fn test_duplicate_registration_keeps_first_password() -> anyhow::Result<()> {
    let forum = open_forum(Arc::new(MemoryStore::new()), &chess_seed()).await;
    forum.register("a", "x").await?;

    let err = forum.register("a", "y").await.unwrap_err();
    assert!(matches!(err, DomainError::Conflict(ref msg) if msg == "username taken"));

    let mut session = Session::new();
    assert!(forum.login(&mut session, "a", "x").await.is_ok());
    assert!(matches!(
        forum.login(&mut session, "a", "y").await,
        Err(DomainError::Unauthorized(_))
    ));
    Ok(())
}

#[tokio::test]
async fn test_posts_list_last_created_first() -> anyhow::Result<()> {
    let forum = open_forum(Arc::new(MemoryStore::new()), &chess_seed()).await;
    for n in 0..5 {
        forum
            .create_post(0, 1, &format!("post {n}"), "body", vec![])
            .await?;
    }

    let titles: Vec<String> = forum
        .list_posts()
        .await?
        .into_iter()
        .map(|p| p.title)
        .collect();
    assert_eq!(titles, ["post 4", "post 3", "post 2", "post 1", "post 0"]);
    Ok(())
}

#[tokio::test]
async fn test_comments_are_newest_first_and_scoped_to_post() -> anyhow::Result<()> {
    let forum = open_forum(Arc::new(MemoryStore::new()), &chess_seed()).await;
    let first = forum.create_post(0, 1, "first", "a", vec![]).await?;
    let second = forum.create_post(0, 1, "second", "b", vec![]).await?;

    forum.add_comment(first.id, 0, "one").await?;
    forum.add_comment(second.id, 0, "elsewhere").await?;
    forum.add_comment(first.id, 0, "two").await?;

    let contents: Vec<String> = forum
        .list_comments_for_post(first.id)
        .await?
        .into_iter()
        .map(|c| c.content)
        .collect();
    assert_eq!(contents, ["two", "one"]);
    Ok(())
}

#[tokio::test]
async fn test_unknown_user_is_a_placeholder() -> anyhow::Result<()> {
    let forum = open_forum(Arc::new(MemoryStore::new()), &chess_seed()).await;
    let user = forum.get_user(424242).await?;
    assert!(user.is_unknown());
    assert_eq!(user.username, "unknown user");
    Ok(())
}

#[tokio::test]
async fn test_session_survives_reopen() -> anyhow::Result<()> {
    let store: Arc<dyn RecordStore> = Arc::new(MemoryStore::new());
    let forum = open_forum(store.clone(), &chess_seed()).await;
    forum.register("alice", "pw1").await?;

    let mut session = Session::new();
    forum.login(&mut session, "alice", "pw1").await?;
    forum.persist_session(&session).await?;

    let reopened = open_forum(store, &chess_seed()).await;
    let restored = reopened.restore_session().await?;
    assert_eq!(
        restored.current_user().map(|u| u.username.as_str()),
        Some("alice")
    );

    reopened.logout(&mut session);
    reopened.persist_session(&session).await?;
    assert!(!reopened.restore_session().await?.is_authenticated());
    Ok(())
}
