//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use plaza::api::ApiClient;
use plaza::config::ClientConfig;
use serde_json::{json, Value};
use std::time::Duration;
use wiremock::MockServer;

/// Production gateway pointed at `server`.
pub fn api_for(server: &MockServer) -> ApiClient {
    let config = ClientConfig::default()
        .with_api_url(server.uri())
        .with_timeout(Duration::from_secs(5));
    ApiClient::from_config(&config).expect("gateway")
}

pub fn user_json(username: &str) -> Value {
    json!({
        "id": format!("id-{}", username),
        "username": username,
        "email": format!("{}@example.com", username),
        "created_at": "2024-05-10T12:00:00"
    })
}

pub fn post_json(id: &str, author: &str, content: &str) -> Value {
    json!({
        "id": id,
        "author_username": author,
        "content": content,
        "created_at": "2024-05-10T12:00:00Z",
        "likes_count": 0
    })
}
