//! Profile page of one user.
//!
//! Every result is tagged with the username it was requested for. Results
//! for anyone other than the current target are dropped, so switching
//! profiles never shows the previous user's data.

use super::social::FollowAction;
use super::{ErrorNotice, RequestTicket, RequestTracker};
use crate::api::ApiClient;
use crate::error::ApiResult;
use crate::models::{FeedMode, Post, User};

pub const PROFILE_POSTS_LIMIT: usize = 50;

#[derive(Debug, Clone, Default)]
pub struct ProfileState {
    target: Option<String>,
    profile_user: Option<User>,
    user_posts: Vec<Post>,
    /// Accounts the profiled user follows
    following: Vec<User>,
    /// Whether the viewer follows the profiled user
    is_following: bool,
    error: Option<ErrorNotice>,
    user_request: RequestTracker,
    posts_request: RequestTracker,
    following_request: RequestTracker,
    viewer_request: RequestTracker,
    follow_request: RequestTracker,
}

/// Tickets for the fetches issued by [`ProfileState::begin_load`].
#[derive(Debug, Clone, Copy)]
pub struct ProfileTickets {
    pub user: RequestTicket,
    pub posts: RequestTicket,
    pub following: RequestTicket,
    /// Absent when viewing one's own profile
    pub viewer_following: Option<RequestTicket>,
}

impl ProfileState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }

    pub fn profile_user(&self) -> Option<&User> {
        self.profile_user.as_ref()
    }

    pub fn user_posts(&self) -> &[Post] {
        &self.user_posts
    }

    pub fn following(&self) -> &[User] {
        &self.following
    }

    pub fn is_following(&self) -> bool {
        self.is_following
    }

    pub fn error(&self) -> Option<&ErrorNotice> {
        self.error.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        [
            &self.user_request,
            &self.posts_request,
            &self.following_request,
            &self.follow_request,
        ]
        .iter()
        .any(|r| r.is_in_flight())
    }

    pub fn is_follow_pending(&self) -> bool {
        self.follow_request.is_in_flight()
    }

    /// Reset every field and invalidate in-flight fetches.
    pub fn clear_profile(&mut self) {
        self.target = None;
        self.profile_user = None;
        self.user_posts.clear();
        self.following.clear();
        self.is_following = false;
        self.error = None;
        for tracker in [
            &mut self.user_request,
            &mut self.posts_request,
            &mut self.following_request,
            &mut self.viewer_request,
            &mut self.follow_request,
        ] {
            tracker.invalidate();
        }
    }

    /// Clear and point the container at `username`.
    pub fn set_target(&mut self, username: &str) {
        self.clear_profile();
        self.target = Some(username.to_string());
    }

    fn is_target(&self, username: &str) -> bool {
        self.target.as_deref() == Some(username)
    }

    /// Clear, then begin every fetch of `target`'s profile.
    pub fn begin_load(&mut self, viewer: Option<&str>, target: &str) -> ProfileTickets {
        self.set_target(target);
        ProfileTickets {
            user: self.begin_user(),
            posts: self.begin_posts(),
            following: self.begin_following(),
            viewer_following: viewer
                .filter(|viewer| *viewer != target)
                .map(|_| self.begin_viewer_following()),
        }
    }

    pub fn begin_user(&mut self) -> RequestTicket {
        self.error = None;
        self.user_request.begin()
    }

    pub fn apply_user(&mut self, ticket: RequestTicket, username: &str, result: ApiResult<User>) -> bool {
        if !self.is_target(username) || !self.user_request.settle(ticket) {
            return false;
        }
        match result {
            Ok(user) => self.profile_user = Some(user),
            Err(err) => self.error = Some(ErrorNotice::with_fallback(&err, "User not found")),
        }
        true
    }

    pub fn begin_posts(&mut self) -> RequestTicket {
        self.posts_request.begin()
    }

    pub fn apply_posts(
        &mut self,
        ticket: RequestTicket,
        username: &str,
        result: ApiResult<Vec<Post>>,
    ) -> bool {
        if !self.is_target(username) || !self.posts_request.settle(ticket) {
            return false;
        }
        match result {
            Ok(posts) => self.user_posts = posts,
            Err(err) => self.error = Some(ErrorNotice::from_api(&err)),
        }
        true
    }

    pub fn begin_following(&mut self) -> RequestTicket {
        self.following_request.begin()
    }

    pub fn apply_following(
        &mut self,
        ticket: RequestTicket,
        username: &str,
        result: ApiResult<Vec<User>>,
    ) -> bool {
        if !self.is_target(username) || !self.following_request.settle(ticket) {
            return false;
        }
        match result {
            Ok(following) => self.following = following,
            Err(err) => self.error = Some(ErrorNotice::from_api(&err)),
        }
        true
    }

    pub fn begin_viewer_following(&mut self) -> RequestTicket {
        self.viewer_request.begin()
    }

    /// Derive `is_following` from the viewer's following list.
    pub fn apply_viewer_following(
        &mut self,
        ticket: RequestTicket,
        target: &str,
        result: ApiResult<Vec<User>>,
    ) -> bool {
        if !self.is_target(target) || !self.viewer_request.settle(ticket) {
            return false;
        }
        match result {
            Ok(followed) => self.is_following = followed.iter().any(|u| u.username == target),
            Err(err) => tracing::warn!("Could not load viewer's following list: {}", err),
        }
        true
    }

    pub fn begin_follow(&mut self) -> RequestTicket {
        self.error = None;
        self.follow_request.begin()
    }

    /// Apply a confirmed follow or unfollow of `target` by the viewer.
    pub fn apply_follow(
        &mut self,
        ticket: RequestTicket,
        target: &str,
        action: FollowAction,
        result: ApiResult<()>,
    ) -> bool {
        if !self.is_target(target) || !self.follow_request.settle(ticket) {
            return false;
        }
        match (result, action) {
            (Ok(()), FollowAction::Follow) => self.is_following = true,
            (Ok(()), FollowAction::Unfollow) => {
                self.is_following = false;
                self.following.retain(|u| u.username != target);
            }
            (Err(err), _) => self.error = Some(ErrorNotice::from_api(&err)),
        }
        true
    }

    pub async fn fetch_user_profile(&mut self, api: &ApiClient, username: &str) -> bool {
        let ticket = self.begin_user();
        let result = api.get_user(username).await;
        self.apply_user(ticket, username, result)
    }

    /// The user's own posts (feed mode `self`, up to 50).
    pub async fn fetch_user_posts(&mut self, api: &ApiClient, username: &str) -> bool {
        let ticket = self.begin_posts();
        let result = api
            .get_feed(username, FeedMode::Own, PROFILE_POSTS_LIMIT)
            .await;
        self.apply_posts(ticket, username, result)
    }

    pub async fn fetch_following(&mut self, api: &ApiClient, username: &str) -> bool {
        let ticket = self.begin_following();
        let result = api.get_following(username).await;
        self.apply_following(ticket, username, result)
    }

    pub async fn follow_user(&mut self, api: &ApiClient, viewer: &str, target: &str) -> bool {
        let ticket = self.begin_follow();
        let result = api.follow(viewer, target).await;
        self.apply_follow(ticket, target, FollowAction::Follow, result)
    }

    pub async fn unfollow_user(&mut self, api: &ApiClient, viewer: &str, target: &str) -> bool {
        let ticket = self.begin_follow();
        let result = api.unfollow(viewer, target).await;
        self.apply_follow(ticket, target, FollowAction::Unfollow, result)
    }

    /// Clear, then load `target`'s profile with all fetches concurrent.
    pub async fn load_profile(&mut self, api: &ApiClient, viewer: Option<&str>, target: &str) {
        let tickets = self.begin_load(viewer, target);
        let viewer_following = async {
            match viewer.filter(|_| tickets.viewer_following.is_some()) {
                Some(viewer) => Some(api.get_following(viewer).await),
                None => None,
            }
        };
        let (user, posts, following, viewer_following) = futures::join!(
            api.get_user(target),
            api.get_feed(target, FeedMode::Own, PROFILE_POSTS_LIMIT),
            api.get_following(target),
            viewer_following,
        );
        self.apply_user(tickets.user, target, user);
        self.apply_posts(tickets.posts, target, posts);
        self.apply_following(tickets.following, target, following);
        if let (Some(ticket), Some(result)) = (tickets.viewer_following, viewer_following) {
            self.apply_viewer_following(ticket, target, result);
        }
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

    fn user(username: &str) -> User {
        User {
            id: format!("id-{}", username),
            username: username.to_string(),
            email: format!("{}@x.io", username),
            name: None,
            bio: None,
            created_at: None,
        }
    }

    fn mock_profile(mock: &MockHttpClient, username: &str, follows: &[&str]) {
        let base = "http://api.test";
        mock.set_response(
            &format!("{}/users/by-username/{}", base, username),
            MockResponse::json(200, serde_json::to_value(user(username)).unwrap()),
        );
        mock.set_response(
            &format!("{}/users/{}/feed", base, username),
            MockResponse::json(
                200,
                json!([{"id": "p1", "author_username": username, "content": "hi"}]),
            ),
        );
        let following: Vec<User> = follows.iter().map(|u| user(u)).collect();
        mock.set_response(
            &format!("{}/users/{}/following", base, username),
            MockResponse::json(200, serde_json::to_value(following).unwrap()),
        );
    }

    #[tokio::test]
    async fn test_load_profile_derives_is_following() {
        let (mock, api) = setup();
        mock_profile(&mock, "bob", &["carol"]);
        mock_profile(&mock, "alice", &["bob"]);
        let mut profile = ProfileState::new();

        profile.load_profile(&api, Some("alice"), "bob").await;

        assert_eq!(profile.profile_user().unwrap().username, "bob");
        assert_eq!(profile.user_posts().len(), 1);
        assert_eq!(profile.following()[0].username, "carol");
        assert!(profile.is_following());
        assert!(!profile.is_loading());
        assert!(mock
            .get_requests()
            .iter()
            .any(|r| r.url == "http://api.test/users/bob/feed?mode=self&limit=50"));
    }

    #[tokio::test]
    async fn test_own_profile_skips_viewer_lookup() {
        let (mock, api) = setup();
        mock_profile(&mock, "alice", &["bob"]);
        let mut profile = ProfileState::new();

        profile.load_profile(&api, Some("alice"), "alice").await;

        assert!(!profile.is_following());
        let following_calls = mock
            .get_requests()
            .iter()
            .filter(|r| r.url.ends_with("/following"))
            .count();
        assert_eq!(following_calls, 1);
    }

    #[test]
    fn test_result_for_previous_target_dropped() {
        let mut profile = ProfileState::new();
        let alice = profile.begin_load(None, "alice");
        profile.clear_profile();
        let bob = profile.begin_load(None, "bob");

        assert!(!profile.apply_user(alice.user, "alice", Ok(user("alice"))));
        assert!(profile.profile_user().is_none());
        assert!(profile.apply_user(bob.user, "bob", Ok(user("bob"))));
        assert_eq!(profile.profile_user().unwrap().username, "bob");
    }

    #[test]
    fn test_tag_mismatch_dropped_even_with_current_ticket() {
        let mut profile = ProfileState::new();
        let tickets = profile.begin_load(None, "bob");

        assert!(!profile.apply_posts(tickets.posts, "alice", Ok(vec![])));
        assert!(profile.is_loading());
    }

    #[test]
    fn test_clear_profile_resets_fields() {
        let mut profile = ProfileState::new();
        let tickets = profile.begin_load(Some("alice"), "bob");
        profile.apply_following(tickets.following, "bob", Ok(vec![user("carol")]));
        profile.apply_viewer_following(
            tickets.viewer_following.unwrap(),
            "bob",
            Ok(vec![user("bob")]),
        );
        assert!(profile.is_following());

        profile.clear_profile();

        assert!(profile.target().is_none());
        assert!(profile.following().is_empty());
        assert!(!profile.is_following());
        assert!(!profile.is_loading());
    }

    #[tokio::test]
    async fn test_follow_then_unfollow() {
        let (mock, api) = setup();
        mock.set_response(
            "http://api.test/users/alice/follow/bob",
            MockResponse::json(200, json!({})),
        );
        let mut profile = ProfileState::new();
        profile.set_target("bob");
        profile.following = vec![user("bob"), user("carol")];

        profile.follow_user(&api, "alice", "bob").await;
        assert!(profile.is_following());

        profile.unfollow_user(&api, "alice", "bob").await;
        assert!(!profile.is_following());
        assert_eq!(profile.following().len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_profile_error() {
        let (mock, api) = setup();
        mock.set_default_response(MockResponse::json(404, json!({})));
        let mut profile = ProfileState::new();
        profile.set_target("zed");

        profile.fetch_user_profile(&api, "zed").await;

        assert_eq!(profile.error().unwrap().message, "User not found");
    }
}
