//! End-to-end container flows over HTTP with a file-backed session.

mod common;

use common::{api_for, post_json, user_json};
use plaza::adapters::FileSessionStore;
use plaza::models::{FeedMode, NewUser};
use plaza::state::{FeedState, PostsState, ProfileState, SessionState};
use serde_json::json;
use std::sync::Arc;
use tempfile::TempDir;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_register_post_and_see_it_in_own_feed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/users/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_json("carol")))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/posts/"))
        .and(body_json(json!({"author_username": "carol", "content": "hi", "tags": ["intro"]})))
        .respond_with(ResponseTemplate::new(200).set_body_json(post_json("p1", "carol", "hi")))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/users/carol/feed"))
        .and(query_param("mode", "self"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([post_json("p1", "carol", "hi")])))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let session_path = dir.path().join("session.json");
    let api = api_for(&server);
    let mut session = SessionState::new(Arc::new(FileSessionStore::at(&session_path)));
    let mut posts = PostsState::new();
    let mut feed = FeedState::new();

    let user = session
        .register(&api, &NewUser::new("carol", "carol@example.com"))
        .await
        .unwrap();
    assert_eq!(user.username, "carol");
    assert!(session_path.exists());

    posts
        .create_post(&api, "carol", "  hi  ", " intro, ")
        .await
        .unwrap();
    feed.clear_feed();
    assert!(feed.fetch_feed(&api, "carol", FeedMode::Own, 20).await);

    assert!(feed.posts().iter().any(|p| p.content == "hi"));
    assert!(!feed.has_more());

    let mut restored = SessionState::new(Arc::new(FileSessionStore::at(&session_path)));
    assert!(restored.restore_session());
    assert_eq!(restored.username(), Some("carol"));
}

#[tokio::test]
async fn test_corrupt_session_file_is_discarded() {
    let dir = TempDir::new().unwrap();
    let session_path = dir.path().join("session.json");
    std::fs::write(&session_path, "{not json").unwrap();

    let mut session = SessionState::new(Arc::new(FileSessionStore::at(&session_path)));

    assert!(!session.restore_session());
    assert!(!session.is_authenticated());
    assert!(!session_path.exists());
}

#[tokio::test]
async fn test_login_unknown_user_keeps_signed_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/by-username/nobody"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"detail": "User not found"})))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let session_path = dir.path().join("session.json");
    let api = api_for(&server);
    let mut session = SessionState::new(Arc::new(FileSessionStore::at(&session_path)));

    assert!(session.login(&api, "nobody").await.is_err());

    assert!(!session.is_authenticated());
    assert_eq!(session.error().unwrap().message, "User not found");
    assert!(!session_path.exists());
}

#[tokio::test]
async fn test_profile_load_derives_following() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/by-username/bob"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_json("bob")))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/users/bob/feed"))
        .and(query_param("mode", "self"))
        .and(query_param("limit", "50"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([post_json("p2", "bob", "yo")])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/users/bob/following"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([user_json("dan")])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/users/alice/following"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([user_json("bob")])))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/users/alice/follow/bob"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "Unfollowed"})))
        .mount(&server)
        .await;

    let api = api_for(&server);
    let mut profile = ProfileState::new();
    profile.load_profile(&api, Some("alice"), "bob").await;

    assert_eq!(profile.profile_user().unwrap().username, "bob");
    assert_eq!(profile.user_posts()[0].content, "yo");
    assert_eq!(profile.following()[0].username, "dan");
    assert!(profile.is_following());
    assert!(profile.error().is_none());

    assert!(profile.unfollow_user(&api, "alice", "bob").await);
    assert!(!profile.is_following());
}
