//! Follow suggestions and the user directory.

use super::{ErrorNotice, KeyedRequests, RequestTicket, RequestTracker};
use crate::api::ApiClient;
use crate::error::ApiResult;
use crate::models::{Suggestion, User};

pub const DEFAULT_SUGGESTION_LIMIT: usize = 10;

/// Whether a follow-graph request adds or removes an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowAction {
    Follow,
    Unfollow,
}

/// Social-graph container.
///
/// Follow state changes only after the server confirms.
#[derive(Debug, Clone, Default)]
pub struct SocialState {
    suggestions: Vec<Suggestion>,
    users: Vec<User>,
    error: Option<ErrorNotice>,
    suggestions_request: RequestTracker,
    users_request: RequestTracker,
    /// Keyed by target username
    follow_requests: KeyedRequests,
}

impl SocialState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn suggestions(&self) -> &[Suggestion] {
        &self.suggestions
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn error(&self) -> Option<&ErrorNotice> {
        self.error.as_ref()
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn is_loading(&self) -> bool {
        self.suggestions_request.is_in_flight() || self.users_request.is_in_flight()
    }

    pub fn is_follow_pending(&self, target: &str) -> bool {
        self.follow_requests.is_in_flight(target)
    }

    pub fn begin_suggestions(&mut self) -> RequestTicket {
        self.error = None;
        self.suggestions_request.begin()
    }

    pub fn apply_suggestions(
        &mut self,
        ticket: RequestTicket,
        result: ApiResult<Vec<Suggestion>>,
    ) -> bool {
        if !self.suggestions_request.settle(ticket) {
            return false;
        }
        match result {
            Ok(suggestions) => self.suggestions = suggestions,
            Err(err) => self.error = Some(ErrorNotice::from_api(&err)),
        }
        true
    }

    pub async fn fetch_suggestions(&mut self, api: &ApiClient, username: &str, limit: usize) -> bool {
        let ticket = self.begin_suggestions();
        let result = api.get_suggestions(username, limit).await;
        self.apply_suggestions(ticket, result)
    }

    pub fn begin_users(&mut self) -> RequestTicket {
        self.error = None;
        self.users_request.begin()
    }

    pub fn apply_users(&mut self, ticket: RequestTicket, result: ApiResult<Vec<User>>) -> bool {
        if !self.users_request.settle(ticket) {
            return false;
        }
        match result {
            Ok(users) => self.users = users,
            Err(err) => self.error = Some(ErrorNotice::from_api(&err)),
        }
        true
    }

    pub async fn fetch_users(&mut self, api: &ApiClient) -> bool {
        let ticket = self.begin_users();
        let result = api.list_users().await;
        self.apply_users(ticket, result)
    }

    pub fn begin_follow(&mut self, target: &str) -> RequestTicket {
        self.error = None;
        self.follow_requests.begin(target)
    }

    /// Apply a confirmed (or failed) follow change on `target`.
    ///
    /// A confirmed follow removes `target` from the suggestions.
    pub fn apply_follow(
        &mut self,
        target: &str,
        action: FollowAction,
        ticket: RequestTicket,
        result: ApiResult<()>,
    ) -> bool {
        if !self.follow_requests.settle(target, ticket) {
            return false;
        }
        match result {
            Ok(()) => {
                if action == FollowAction::Follow {
                    self.suggestions.retain(|s| s.username != target);
                }
            }
            Err(err) => self.error = Some(ErrorNotice::from_api(&err)),
        }
        true
    }

    pub async fn follow_user(&mut self, api: &ApiClient, username: &str, target: &str) -> bool {
        let ticket = self.begin_follow(target);
        let result = api.follow(username, target).await;
        self.apply_follow(target, FollowAction::Follow, ticket, result)
    }

    pub async fn unfollow_user(&mut self, api: &ApiClient, username: &str, target: &str) -> bool {
        let ticket = self.begin_follow(target);
        let result = api.unfollow(username, target).await;
        self.apply_follow(target, FollowAction::Unfollow, ticket, result)
    }
}
