//! Post authoring and likes.

use std::collections::HashMap;

use super::{ErrorNotice, KeyedRequests, RequestTicket, RequestTracker};
use crate::api::ApiClient;
use crate::error::{ApiError, ApiResult};
use crate::models::{NewPost, Post, PostLikes};

/// Post-authoring container.
///
/// Creating a post does not touch the feed; the caller clears it.
#[derive(Debug, Clone, Default)]
pub struct PostsState {
    last_created_post: Option<Post>,
    error: Option<ErrorNotice>,
    create: RequestTracker,
    /// Confirmed like state per post id
    likes: HashMap<String, PostLikes>,
    like_requests: KeyedRequests,
    likes_error: Option<ErrorNotice>,
}

impl PostsState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_created_post(&self) -> Option<&Post> {
        self.last_created_post.as_ref()
    }

    pub fn is_creating(&self) -> bool {
        self.create.is_in_flight()
    }

    pub fn error(&self) -> Option<&ErrorNotice> {
        self.error.as_ref()
    }

    pub fn likes_error(&self) -> Option<&ErrorNotice> {
        self.likes_error.as_ref()
    }

    pub fn clear_error(&mut self) {
        self.error = None;
        self.likes_error = None;
    }

    /// Validate the form and begin creating the post.
    ///
    /// Blank content (after trimming) is refused without a request.
    pub fn begin_create(
        &mut self,
        author: &str,
        content: &str,
        tags_text: &str,
    ) -> ApiResult<(RequestTicket, NewPost)> {
        if author.trim().is_empty() {
            return Err(self.reject(ApiError::validation("author", "Sign in to post")));
        }
        if content.trim().is_empty() {
            return Err(self.reject(ApiError::validation(
                "content",
                "Post content cannot be empty",
            )));
        }
        self.error = None;
        let post = NewPost::from_input(author, content, tags_text);
        Ok((self.create.begin(), post))
    }

    pub fn apply_create(&mut self, ticket: RequestTicket, result: ApiResult<Post>) -> bool {
        if !self.create.settle(ticket) {
            return false;
        }
        match result {
            Ok(post) => {
                tracing::info!("Created post {}", post.id);
                self.last_created_post = Some(post);
            }
            Err(err) => self.error = Some(ErrorNotice::from_api(&err)),
        }
        true
    }

    /// Create a post from raw form input.
    pub async fn create_post(
        &mut self,
        api: &ApiClient,
        author: &str,
        content: &str,
        tags_text: &str,
    ) -> ApiResult<Post> {
        let (ticket, post) = self.begin_create(author, content, tags_text)?;
        let result = api.create_post(&post).await;
        self.apply_create(ticket, result.clone());
        result
    }

    /// Confirmed likes of `post_id`, if fetched.
    pub fn likes(&self, post_id: &str) -> Option<&PostLikes> {
        self.likes.get(post_id)
    }

    /// Best known like count: confirmed if available, else the post's own.
    pub fn likes_count(&self, post: &Post) -> u64 {
        self.likes
            .get(&post.id)
            .map(|l| l.likes_count)
            .or(post.likes_count)
            .unwrap_or(0)
    }

    pub fn is_liked_by(&self, post_id: &str, username: &str) -> bool {
        self.likes
            .get(post_id)
            .map(|l| l.liked_by(username))
            .unwrap_or(false)
    }

    pub fn is_like_pending(&self, post_id: &str) -> bool {
        self.like_requests.is_in_flight(post_id)
    }

    /// Begin a like, unlike or likes fetch on `post_id`.
    pub fn begin_likes(&mut self, post_id: &str) -> RequestTicket {
        self.likes_error = None;
        self.like_requests.begin(post_id)
    }

    pub fn apply_likes(
        &mut self,
        post_id: &str,
        ticket: RequestTicket,
        result: ApiResult<PostLikes>,
    ) -> bool {
        if !self.like_requests.settle(post_id, ticket) {
            return false;
        }
        match result {
            Ok(mut likes) => {
                if likes.post_id.is_empty() {
                    likes.post_id = post_id.to_string();
                }
                self.likes.insert(post_id.to_string(), likes);
            }
            Err(err) => self.likes_error = Some(ErrorNotice::from_api(&err)),
        }
        true
    }

    /// Forget confirmed likes of posts no longer shown.
    pub fn retain_likes(&mut self, keep: impl Fn(&str) -> bool) {
        self.likes.retain(|post_id, _| keep(post_id));
    }

    /// Drop every cached like state and outstanding like request.
    pub fn clear_likes(&mut self) {
        self.likes.clear();
        self.like_requests.clear();
        self.likes_error = None;
    }

    pub async fn like_post(&mut self, api: &ApiClient, post_id: &str, username: &str) -> bool {
        let ticket = self.begin_likes(post_id);
        let result = api.like_post(post_id, username).await;
        self.apply_likes(post_id, ticket, result)
    }

    pub async fn unlike_post(&mut self, api: &ApiClient, post_id: &str, username: &str) -> bool {
        let ticket = self.begin_likes(post_id);
        let result = api.unlike_post(post_id, username).await;
        self.apply_likes(post_id, ticket, result)
    }

    pub async fn fetch_likes(&mut self, api: &ApiClient, post_id: &str) -> bool {
        let ticket = self.begin_likes(post_id);
        let result = api.get_likes(post_id).await;
        self.apply_likes(post_id, ticket, result)
    }

    fn reject(&mut self, err: ApiError) -> ApiError {
        self.error = Some(ErrorNotice::from_api(&err));
        err
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{MockHttpClient, MockResponse};
    use serde_json::json;
    use std::sync::Arc;

    fn setup() -> (MockHttpClient, ApiClient) {
        let mock = MockHttpClient::new();
        let api = ApiClient::new(Arc::new(mock.clone()), "http://api.test");
        (mock, api)
    }

    #[tokio::test]
    async fn test_blank_content_sends_nothing() {
        let (mock, api) = setup();
        let mut posts = PostsState::new();

        let result = posts.create_post(&api, "carol", "   \n ", "rust").await;

        assert!(matches!(result, Err(ApiError::Validation { .. })));
        assert_eq!(posts.error().unwrap().message, "Post content cannot be empty");
        assert!(mock.get_requests().is_empty());
    }

    #[tokio::test]
    async fn test_create_post_parses_tags() {
        let (mock, api) = setup();
        mock.set_default_response(MockResponse::json(
            201,
            json!({"id": "p9", "author_username": "carol", "content": "hi", "tags": ["rust", "tui"]}),
        ));
        let mut posts = PostsState::new();

        let post = posts.create_post(&api, "carol", " hi ", " rust, ,tui ").await.unwrap();

        assert_eq!(post.id, "p9");
        assert_eq!(posts.last_created_post().unwrap().id, "p9");
        assert_eq!(
            mock.get_requests()[0].json_body().unwrap()["tags"],
            json!(["rust", "tui"])
        );
    }

    #[tokio::test]
    async fn test_create_failure_sets_error() {
        let (mock, api) = setup();
        mock.set_default_response(MockResponse::json(422, json!({"detail": [{"msg": "too long"}]})));
        let mut posts = PostsState::new();

        assert!(posts.create_post(&api, "carol", "hi", "").await.is_err());

        assert_eq!(posts.error().unwrap().message, "too long");
        assert!(posts.last_created_post().is_none());
        assert!(!posts.is_creating());
    }

    #[tokio::test]
    async fn test_like_confirmed_then_applied() {
        let (mock, api) = setup();
        mock.set_default_response(MockResponse::json(
            200,
            json!({"post_id": "p1", "likes_count": 4, "users": ["bob"]}),
        ));
        let mut posts = PostsState::new();

        assert!(posts.like_post(&api, "p1", "bob").await);

        assert!(posts.is_liked_by("p1", "bob"));
        assert_eq!(posts.likes("p1").unwrap().likes_count, 4);
    }

    #[tokio::test]
    async fn test_unlike_failure_keeps_counts() {
        let (mock, api) = setup();
        mock.set_default_response(MockResponse::json(
            200,
            json!({"post_id": "p1", "likes_count": 1, "users": ["bob"]}),
        ));
        let mut posts = PostsState::new();
        posts.fetch_likes(&api, "p1").await;

        mock.set_default_response(MockResponse::unreachable());
        posts.unlike_post(&api, "p1", "bob").await;

        assert_eq!(posts.likes("p1").unwrap().likes_count, 1);
        assert!(posts.likes_error().unwrap().is_network());
    }

    #[test]
    fn test_likes_count_falls_back_to_post() {
        let posts = PostsState::new();
        let post = Post {
            id: "p1".to_string(),
            author_username: "a".to_string(),
            content: "x".to_string(),
            tags: None,
            created_at: None,
            likes_count: Some(7),
        };
        assert_eq!(posts.likes_count(&post), 7);
    }

    #[test]
    fn test_stale_like_discarded() {
        let mut posts = PostsState::new();
        let first = posts.begin_likes("p1");
        let second = posts.begin_likes("p1");
        let likes = |n| PostLikes {
            post_id: "p1".to_string(),
            likes_count: n,
            users: vec![],
        };

        assert!(posts.apply_likes("p1", second, Ok(likes(2))));
        assert!(!posts.apply_likes("p1", first, Ok(likes(1))));
        assert_eq!(posts.likes("p1").unwrap().likes_count, 2);
    }

    #[tokio::test]
    async fn test_settled_likes_are_not_tracked() {
        let (mock, api) = setup();
        mock.set_default_response(MockResponse::json(
            200,
            json!({"post_id": "p1", "likes_count": 1, "users": ["bob"]}),
        ));
        let mut posts = PostsState::new();
        posts.like_post(&api, "p1", "bob").await;
        posts.fetch_likes(&api, "p2").await;

        assert_eq!(posts.like_requests.pending(), 0);

        posts.retain_likes(|id| id == "p2");
        assert!(posts.likes("p1").is_none());
        assert!(posts.likes("p2").is_some());

        posts.clear_likes();
        assert!(posts.likes("p2").is_none());
    }
}
