//! Home feed.

use super::{ErrorNotice, RequestTicket, RequestTracker};
use crate::api::ApiClient;
use crate::config::DEFAULT_FEED_PAGE_SIZE;
use crate::error::ApiResult;
use crate::models::{FeedMode, Post};

/// Feed container.
#[derive(Debug, Clone, Default)]
pub struct FeedState {
    posts: Vec<Post>,
    mode: FeedMode,
    /// True when the last page came back full. A heuristic: the server
    /// does not say whether more posts exist.
    has_more: bool,
    error: Option<ErrorNotice>,
    request: RequestTracker,
    /// Limit of the request in flight
    pending_limit: usize,
}

impl FeedState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn mode(&self) -> FeedMode {
        self.mode
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn is_loading(&self) -> bool {
        self.request.is_in_flight()
    }

    pub fn error(&self) -> Option<&ErrorNotice> {
        self.error.as_ref()
    }

    /// Switch mode: drops the list and error and invalidates in-flight
    /// fetches.
    pub fn set_mode(&mut self, mode: FeedMode) {
        self.mode = mode;
        self.clear_feed();
    }

    /// Empty the feed, e.g. after the user posts something.
    pub fn clear_feed(&mut self) {
        self.posts.clear();
        self.has_more = false;
        self.error = None;
        self.request.invalidate();
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// Begin fetching a page in `mode`.
    ///
    /// Asking for a mode other than the current one switches to it first.
    pub fn begin_fetch(&mut self, mode: FeedMode, limit: usize) -> RequestTicket {
        if mode != self.mode {
            self.set_mode(mode);
        }
        self.error = None;
        self.pending_limit = limit;
        self.request.begin()
    }

    /// Apply a fetched page.
    ///
    /// Success replaces the list; failure keeps it and records the error.
    pub fn apply_fetch(&mut self, ticket: RequestTicket, result: ApiResult<Vec<Post>>) -> bool {
        if !self.request.settle(ticket) {
            return false;
        }
        match result {
            Ok(posts) => {
                self.has_more = posts.len() >= self.pending_limit;
                self.posts = posts;
            }
            Err(err) => {
                tracing::warn!("Feed fetch failed: {}", err);
                self.error = Some(ErrorNotice::from_api(&err));
            }
        }
        true
    }

    /// Fetch a page of `username`'s feed.
    pub async fn fetch_feed(
        &mut self,
        api: &ApiClient,
        username: &str,
        mode: FeedMode,
        limit: usize,
    ) -> bool {
        let ticket = self.begin_fetch(mode, limit);
        let result = api.get_feed(username, mode, limit).await;
        self.apply_fetch(ticket, result)
    }

    /// Fetch the default-sized page in the current mode.
    pub async fn refresh(&mut self, api: &ApiClient, username: &str) -> bool {
        let mode = self.mode;
        self.fetch_feed(api, username, mode, DEFAULT_FEED_PAGE_SIZE)
            .await
    }
}
