//! Most-liked posts.

use super::{ErrorNotice, RequestTicket, RequestTracker};
use crate::api::ApiClient;
use crate::error::ApiResult;
use crate::models::Post;

pub const DEFAULT_TRENDING_LIMIT: usize = 10;

#[derive(Debug, Clone, Default)]
pub struct TrendingState {
    posts: Vec<Post>,
    error: Option<ErrorNotice>,
    request: RequestTracker,
}

impl TrendingState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Posts ranked by the server, most liked first.
    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn error(&self) -> Option<&ErrorNotice> {
        self.error.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.request.is_in_flight()
    }

    pub fn begin_fetch(&mut self) -> RequestTicket {
        self.error = None;
        self.request.begin()
    }

    /// Replace the ranking; failure keeps the old one.
    pub fn apply_fetch(&mut self, ticket: RequestTicket, result: ApiResult<Vec<Post>>) -> bool {
        if !self.request.settle(ticket) {
            return false;
        }
        match result {
            Ok(posts) => self.posts = posts,
            Err(err) => self.error = Some(ErrorNotice::from_api(&err)),
        }
        true
    }

    pub async fn fetch_trending(&mut self, api: &ApiClient, limit: usize) -> bool {
        let ticket = self.begin_fetch();
        let result = api.get_trending(limit).await;
        self.apply_fetch(ticket, result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{MockHttpClient, MockResponse};
    use serde_json::json;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_failure_keeps_ranking() {
        let mock = MockHttpClient::new();
        let api = ApiClient::new(Arc::new(mock.clone()), "http://api.test");
        mock.set_default_response(MockResponse::json(
            200,
            json!([
                {"id": "p2", "author_username": "bob", "content": "b", "likes_count": 9},
                {"id": "p1", "author_username": "amy", "content": "a", "likes_count": 3}
            ]),
        ));
        let mut trending = TrendingState::new();
        trending.fetch_trending(&api, DEFAULT_TRENDING_LIMIT).await;
        assert_eq!(trending.posts()[0].id, "p2");

        mock.set_default_response(MockResponse::json(503, json!({})));
        trending.fetch_trending(&api, DEFAULT_TRENDING_LIMIT).await;

        assert_eq!(trending.posts().len(), 2);
        assert_eq!(
            trending.error().unwrap().message,
            "Error 503: Service Unavailable"
        );
    }
}
