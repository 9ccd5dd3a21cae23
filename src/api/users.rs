//! `/users` endpoints: accounts and the follow graph.

use super::{segment, ApiClient};
use crate::error::ApiResult;
use crate::models::{NewUser, Suggestion, User};

impl ApiClient {
    /// `POST /users/`
    pub async fn create_user(&self, user: &NewUser) -> ApiResult<User> {
        self.post_json("/users/", user).await
    }

    /// `GET /users/by-username/{username}`
    pub async fn get_user(&self, username: &str) -> ApiResult<User> {
        self.get_json(&format!("/users/by-username/{}", segment(username)))
            .await
    }

    /// `GET /users/`
    pub async fn list_users(&self) -> ApiResult<Vec<User>> {
        self.get_json("/users/").await
    }

    /// `POST /users/{username}/follow/{target}`
    pub async fn follow(&self, username: &str, target: &str) -> ApiResult<()> {
        let _: serde_json::Value = self
            .post_json(&follow_path(username, target), &serde_json::Value::Null)
            .await?;
        Ok(())
    }

    /// `DELETE /users/{username}/follow/{target}`
    pub async fn unfollow(&self, username: &str, target: &str) -> ApiResult<()> {
        let _: serde_json::Value = self
            .delete_json::<(), _>(&follow_path(username, target), None)
            .await?;
        Ok(())
    }

    /// `GET /users/{username}/following`
    pub async fn get_following(&self, username: &str) -> ApiResult<Vec<User>> {
        self.get_json(&format!("/users/{}/following", segment(username)))
            .await
    }

    /// `GET /users/{username}/suggestions?limit=`
    pub async fn get_suggestions(&self, username: &str, limit: usize) -> ApiResult<Vec<Suggestion>> {
        self.get_json(&format!(
            "/users/{}/suggestions?limit={}",
            segment(username),
            limit
        ))
        .await
    }
}

fn follow_path(username: &str, target: &str) -> String {
    format!("/users/{}/follow/{}", segment(username), segment(target))
}
