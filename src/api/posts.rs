//! Posts, feed, likes and trending.

use serde::Serialize;

use super::{segment, ApiClient};
use crate::error::ApiResult;
use crate::models::{FeedMode, NewPost, Post, PostLikes};

#[derive(Serialize)]
struct LikeRequest<'a> {
    username: &'a str,
}

impl ApiClient {
    /// `POST /posts/`
    pub async fn create_post(&self, post: &NewPost) -> ApiResult<Post> {
        self.post_json("/posts/", post).await
    }

    /// `GET /users/{username}/feed?mode=&limit=`
    pub async fn get_feed(&self, username: &str, mode: FeedMode, limit: usize) -> ApiResult<Vec<Post>> {
        self.get_json(&format!(
            "/users/{}/feed?mode={}&limit={}",
            segment(username),
            mode.as_str(),
            limit
        ))
        .await
    }

    /// `POST /posts/{id}/like`
    pub async fn like_post(&self, post_id: &str, username: &str) -> ApiResult<PostLikes> {
        self.post_json(&like_path(post_id), &LikeRequest { username })
            .await
    }

    /// `DELETE /posts/{id}/like`
    pub async fn unlike_post(&self, post_id: &str, username: &str) -> ApiResult<PostLikes> {
        self.delete_json(&like_path(post_id), Some(&LikeRequest { username }))
            .await
    }

    /// `GET /posts/{id}/likes`
    pub async fn get_likes(&self, post_id: &str) -> ApiResult<PostLikes> {
        self.get_json(&format!("/posts/{}/likes", segment(post_id)))
            .await
    }

    /// `GET /trending/posts?limit=`
    pub async fn get_trending(&self, limit: usize) -> ApiResult<Vec<Post>> {
        self.get_json(&format!("/trending/posts?limit={}", limit))
            .await
    }
}

fn like_path(post_id: &str) -> String {
    format!("/posts/{}/like", segment(post_id))
}
