//! HTTP gateway to the REST API.
//!
//! [`ApiClient`] is the single configured client every container goes
//! through. It owns the base URL and default headers, encodes and decodes
//! JSON, and maps every failure into [`ApiError`]. Endpoint methods live in
//! the submodules, grouped by resource.

mod dm;
mod observability;
mod posts;
mod users;

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

use crate::adapters::ReqwestHttpClient;
use crate::config::ClientConfig;
use crate::error::{ApiError, ApiResult};
use crate::traits::{Headers, HttpClient, Response};

/// Gateway to the REST API.
///
/// Cheap to clone; clones share the transport.
///
/// # Example
///
/// ```ignore
/// use plaza::api::ApiClient;
/// use plaza::config::ClientConfig;
///
/// let api = ApiClient::from_config(&ClientConfig::from_env())?;
/// let user = api.get_user("alice").await?;
/// ```
#[derive(Clone)]
pub struct ApiClient {
    http: Arc<dyn HttpClient>,
    base_url: String,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Create a gateway over an existing transport.
    pub fn new(http: Arc<dyn HttpClient>, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Create the production gateway: reqwest with the configured timeout.
    pub fn from_config(config: &ClientConfig) -> ApiResult<Self> {
        let http = ReqwestHttpClient::with_timeout(config.timeout)?;
        Ok(Self::new(Arc::new(http), config.api_url.clone()))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for an already-encoded path.
    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn default_headers() -> Headers {
        let mut headers = Headers::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        headers.insert("Accept".to_string(), "application/json".to_string());
        headers
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let url = self.url(path);
        tracing::debug!("GET {}", url);
        let result = self.http.get(&url, &Self::default_headers()).await;
        Self::decode("GET", &url, result)
    }

    pub(crate) async fn post_json<B, T>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(path);
        let body = serde_json::to_string(body).map_err(|e| ApiError::Transport {
            message: format!("Failed to encode request: {}", e),
        })?;
        tracing::debug!("POST {}", url);
        let result = self.http.post(&url, &body, &Self::default_headers()).await;
        Self::decode("POST", &url, result)
    }

    pub(crate) async fn delete_json<B, T>(&self, path: &str, body: Option<&B>) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(path);
        let body = body
            .map(serde_json::to_string)
            .transpose()
            .map_err(|e| ApiError::Transport {
                message: format!("Failed to encode request: {}", e),
            })?;
        tracing::debug!("DELETE {}", url);
        let result = self
            .http
            .delete(&url, body.as_deref(), &Self::default_headers())
            .await;
        Self::decode("DELETE", &url, result)
    }

    /// Map a transport result into the error taxonomy and decode the body.
    fn decode<T: DeserializeOwned>(
        method: &str,
        url: &str,
        result: Result<Response, crate::traits::HttpError>,
    ) -> ApiResult<T> {
        let response = match result {
            Ok(response) => response,
            Err(err) => {
                let err = ApiError::from(err);
                if err.is_network() {
                    tracing::error!("{} {} unreachable: {}", method, url, err);
                } else {
                    tracing::error!("{} {} failed: {}", method, url, err);
                }
                return Err(err);
            }
        };

        if !response.is_success() {
            let err = ApiError::from_response(&response);
            tracing::warn!("{} {} rejected: {} ({})", method, url, err, err.user_message());
            return Err(err);
        }

        // Some endpoints answer 2xx with an empty body; decode that as `null`.
        let body: &[u8] = if response.body.iter().all(u8::is_ascii_whitespace) {
            b"null"
        } else {
            &response.body
        };
        serde_json::from_slice(body).map_err(|e| {
            tracing::warn!("{} {} returned undecodable body: {}", method, url, e);
            ApiError::from(e)
        })
    }
}

/// Percent-encode one path segment.
pub(crate) fn segment(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}
