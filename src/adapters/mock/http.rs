//! Mock HTTP client for testing.
//!
//! Returns configured responses per URL (optionally per method) and records
//! every request so tests can assert on what was, or was not, sent.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::traits::{Headers, HttpClient, HttpError, Response};

/// A recorded HTTP request for verification in tests.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// HTTP method (GET, POST or DELETE)
    pub method: String,
    /// Request URL
    pub url: String,
    /// Request headers
    pub headers: Headers,
    /// Request body, when one was sent
    pub body: Option<String>,
}

impl RecordedRequest {
    /// Parse the recorded body as JSON.
    pub fn json_body(&self) -> Option<serde_json::Value> {
        self.body
            .as_deref()
            .and_then(|body| serde_json::from_str(body).ok())
    }
}

/// Configuration for a mock response.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Return a response (any status)
    Success(Response),
    /// Fail at the transport level
    Error(HttpError),
}

impl MockResponse {
    /// A response with the given status and JSON body.
    pub fn json(status: u16, value: serde_json::Value) -> Self {
        MockResponse::Success(Response::json_body(status, &value))
    }

    /// A connection failure.
    pub fn unreachable() -> Self {
        MockResponse::Error(HttpError::ConnectionFailed(
            "connection refused".to_string(),
        ))
    }
}

/// Mock HTTP client for testing.
///
/// Lookup order for a request is: exact `METHOD url`, exact `url`, the
/// longest configured prefix (method-specific before method-agnostic), then
/// the default response.
///
/// # Example
///
/// ```ignore
/// use plaza::adapters::mock::{MockHttpClient, MockResponse};
///
/// let client = MockHttpClient::new();
/// client.set_response(
///     "http://api.test/users/by-username/alice",
///     MockResponse::json(200, serde_json::json!({"username": "alice"})),
/// );
/// ```
#[derive(Debug, Clone)]
pub struct MockHttpClient {
    /// Configured responses keyed by URL or `METHOD url`
    responses: Arc<Mutex<HashMap<String, MockResponse>>>,
    /// Default response when no specific match
    default_response: Arc<Mutex<Option<MockResponse>>>,
    /// Recorded requests for verification
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockHttpClient {
    /// Create a new mock HTTP client.
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(HashMap::new())),
            default_response: Arc::new(Mutex::new(None)),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Set a response for a URL, regardless of method.
    pub fn set_response(&self, url: &str, response: MockResponse) {
        let mut responses = self.responses.lock().unwrap();
        responses.insert(url.to_string(), response);
    }

    /// Set a response for a specific method and URL.
    pub fn set_method_response(&self, method: &str, url: &str, response: MockResponse) {
        let mut responses = self.responses.lock().unwrap();
        responses.insert(Self::method_key(method, url), response);
    }

    /// Set a default response for URLs without specific matches.
    pub fn set_default_response(&self, response: MockResponse) {
        let mut default = self.default_response.lock().unwrap();
        *default = Some(response);
    }

    /// Get all recorded requests.
    pub fn get_requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Clear all recorded requests.
    pub fn clear_requests(&self) {
        self.requests.lock().unwrap().clear();
    }

    /// Clear all configured responses.
    pub fn clear_responses(&self) {
        self.responses.lock().unwrap().clear();
    }

    fn method_key(method: &str, url: &str) -> String {
        format!("{} {}", method.to_uppercase(), url)
    }

    fn record_request(&self, method: &str, url: &str, headers: &Headers, body: Option<String>) {
        let mut requests = self.requests.lock().unwrap();
        requests.push(RecordedRequest {
            method: method.to_string(),
            url: url.to_string(),
            headers: headers.clone(),
            body,
        });
    }

    fn get_response(&self, method: &str, url: &str) -> Option<MockResponse> {
        let responses = self.responses.lock().unwrap();
        let keyed = Self::method_key(method, url);

        if let Some(response) = responses.get(&keyed).or_else(|| responses.get(url)) {
            return Some(response.clone());
        }

        let best_prefix = responses
            .iter()
            .filter(|(pattern, _)| keyed.starts_with(pattern.as_str()) || url.starts_with(pattern.as_str()))
            .max_by_key(|(pattern, _)| {
                // Compare on URL length so "GET http://x/a" and "http://x/a" rank by path
                let url_part = pattern.split_once(' ').map(|(_, u)| u).unwrap_or(pattern);
                (url_part.len(), pattern.contains(' '))
            })
            .map(|(_, response)| response.clone());
        if best_prefix.is_some() {
            return best_prefix;
        }

        self.default_response.lock().unwrap().clone()
    }

    fn respond(&self, method: &str, url: &str) -> Result<Response, HttpError> {
        match self.get_response(method, url) {
            Some(MockResponse::Success(response)) => Ok(response),
            Some(MockResponse::Error(err)) => Err(err),
            None => Err(HttpError::Other(format!(
                "No mock response for {} {}",
                method, url
            ))),
        }
    }
}

impl Default for MockHttpClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn get(&self, url: &str, headers: &Headers) -> Result<Response, HttpError> {
        self.record_request("GET", url, headers, None);
        self.respond("GET", url)
    }

    async fn post(&self, url: &str, body: &str, headers: &Headers) -> Result<Response, HttpError> {
        self.record_request("POST", url, headers, Some(body.to_string()));
        self.respond("POST", url)
    }

    async fn delete(
        &self,
        url: &str,
        body: Option<&str>,
        headers: &Headers,
    ) -> Result<Response, HttpError> {
        self.record_request("DELETE", url, headers, body.map(str::to_string));
        self.respond("DELETE", url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    #[tokio::test]
    async fn test_get_with_response() {
        let client = MockHttpClient::new();
        client.set_response(
            "http://api.test/users/",
            MockResponse::Success(Response::new(200, Bytes::from("[]"))),
        );

        let response = client
            .get("http://api.test/users/", &Headers::new())
            .await
            .unwrap();

        assert_eq!(response.status, 200);
        let requests = client.get_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, "GET");
        assert_eq!(requests[0].url, "http://api.test/users/");
    }

    #[tokio::test]
    async fn test_method_specific_response_wins() {
        let client = MockHttpClient::new();
        let url = "http://api.test/users/alice/follow/bob";
        client.set_method_response("POST", url, MockResponse::json(200, serde_json::json!({})));
        client.set_method_response(
            "DELETE",
            url,
            MockResponse::json(404, serde_json::json!({"detail": "not following"})),
        );

        let posted = client.post(url, "", &Headers::new()).await.unwrap();
        let deleted = client.delete(url, None, &Headers::new()).await.unwrap();

        assert_eq!(posted.status, 200);
        assert_eq!(deleted.status, 404);
    }

    #[tokio::test]
    async fn test_longest_prefix_match() {
        let client = MockHttpClient::new();
        client.set_response("http://api.test/users/alice", MockResponse::json(200, serde_json::json!("short")));
        client.set_response(
            "http://api.test/users/alice/feed",
            MockResponse::json(200, serde_json::json!("long")),
        );

        let response = client
            .get("http://api.test/users/alice/feed?mode=all&limit=20", &Headers::new())
            .await
            .unwrap();

        assert_eq!(response.json::<String>().unwrap(), "long");
    }

    #[tokio::test]
    async fn test_transport_error() {
        let client = MockHttpClient::new();
        client.set_response("http://api.test/", MockResponse::unreachable());

        let result = client.get("http://api.test/trending/posts", &Headers::new()).await;

        assert!(matches!(result, Err(HttpError::ConnectionFailed(_))));
    }

    #[tokio::test]
    async fn test_no_response_configured() {
        let client = MockHttpClient::new();
        let result = client.get("http://api.test/missing", &Headers::new()).await;
        assert!(matches!(result, Err(HttpError::Other(_))));
    }

    #[tokio::test]
    async fn test_default_response() {
        let client = MockHttpClient::new();
        client.set_default_response(MockResponse::json(404, serde_json::json!({"detail": "nope"})));

        let response = client
            .get("http://api.test/anything", &Headers::new())
            .await
            .unwrap();

        assert_eq!(response.status, 404);
    }

    #[tokio::test]
    async fn test_body_recorded() {
        let client = MockHttpClient::new();
        client.set_default_response(MockResponse::json(200, serde_json::json!({})));

        client
            .post("http://api.test/posts/", r#"{"content":"hi"}"#, &Headers::new())
            .await
            .unwrap();

        let requests = client.get_requests();
        assert_eq!(requests[0].json_body().unwrap()["content"], "hi");
    }

    #[tokio::test]
    async fn test_clone_shares_recordings() {
        let client = MockHttpClient::new();
        client.set_default_response(MockResponse::json(200, serde_json::json!([])));
        let cloned = client.clone();

        cloned.get("http://api.test/users/", &Headers::new()).await.unwrap();

        assert_eq!(client.get_requests().len(), 1);
        client.clear_requests();
        assert!(cloned.get_requests().is_empty());
    }
}
