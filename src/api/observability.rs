//! Read-only cluster metrics.

use super::ApiClient;
use crate::error::ApiResult;
use crate::models::{ClusterHealth, ClusterSlots, ObservabilityMode};

impl ApiClient {
    /// `GET /observability/cluster/health`
    pub async fn cluster_health(&self) -> ApiResult<ClusterHealth> {
        self.get_json("/observability/cluster/health").await
    }

    /// `GET /observability/cluster/slots`
    pub async fn cluster_slots(&self) -> ApiResult<ClusterSlots> {
        self.get_json("/observability/cluster/slots").await
    }

    /// `GET /observability/mode`
    pub async fn observability_mode(&self) -> ApiResult<ObservabilityMode> {
        self.get_json("/observability/mode").await
    }
}

#[cfg(test)]
mod tests {
    use crate::adapters::{MockHttpClient, MockResponse};
    use crate::api::ApiClient;
    use serde_json::json;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_mode() {
        let mock = MockHttpClient::new();
        let api = ApiClient::new(Arc::new(mock.clone()), "http://api.test");
        mock.set_default_response(MockResponse::json(
            200,
            json!({"mode": "mock", "description": "simulated"}),
        ));

        let mode = api.observability_mode().await.unwrap();

        assert!(mode.is_mock());
        assert_eq!(mock.get_requests()[0].url, "http://api.test/observability/mode");
    }
}
