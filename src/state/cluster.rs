//! Cache-cluster dashboard.

use chrono::{DateTime, Utc};
use std::time::{Duration, Instant};

use super::{ErrorNotice, RequestTicket, RequestTracker};
use crate::api::ApiClient;
use crate::error::ApiResult;
use crate::models::{ClusterHealth, ClusterSlots, ObservabilityMode};

pub const AUTO_REFRESH_INTERVAL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Default)]
pub struct ClusterState {
    health: Option<ClusterHealth>,
    slots: Option<ClusterSlots>,
    mode: Option<ObservabilityMode>,
    error: Option<ErrorNotice>,
    last_updated: Option<DateTime<Utc>>,
    auto_refresh: bool,
    last_refresh: Option<Instant>,
    cluster_request: RequestTracker,
    mode_request: RequestTracker,
}

impl ClusterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn health(&self) -> Option<&ClusterHealth> {
        self.health.as_ref()
    }

    pub fn slots(&self) -> Option<&ClusterSlots> {
        self.slots.as_ref()
    }

    pub fn mode(&self) -> Option<&ObservabilityMode> {
        self.mode.as_ref()
    }

    pub fn error(&self) -> Option<&ErrorNotice> {
        self.error.as_ref()
    }

    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.last_updated
    }

    pub fn is_loading(&self) -> bool {
        self.cluster_request.is_in_flight()
    }

    pub fn auto_refresh(&self) -> bool {
        self.auto_refresh
    }

    pub fn toggle_auto_refresh(&mut self) -> bool {
        self.auto_refresh = !self.auto_refresh;
        self.auto_refresh
    }

    /// Whether an automatic refresh should start at `now`.
    pub fn refresh_due(&self, now: Instant) -> bool {
        if !self.auto_refresh || self.cluster_request.is_in_flight() {
            return false;
        }
        match self.last_refresh {
            Some(last) => now.duration_since(last) >= AUTO_REFRESH_INTERVAL,
            None => true,
        }
    }

    pub fn begin_cluster(&mut self) -> RequestTicket {
        self.last_refresh = Some(Instant::now());
        self.cluster_request.begin()
    }

    /// Apply health and slots, fetched one after the other.
    pub fn apply_cluster(
        &mut self,
        ticket: RequestTicket,
        result: ApiResult<(ClusterHealth, ClusterSlots)>,
    ) -> bool {
        if !self.cluster_request.settle(ticket) {
            return false;
        }
        match result {
            Ok((health, slots)) => {
                self.health = Some(health);
                self.slots = Some(slots);
                self.error = None;
                self.last_updated = Some(Utc::now());
            }
            Err(err) => self.error = Some(ErrorNotice::from_api(&err)),
        }
        true
    }

    pub fn begin_mode(&mut self) -> RequestTicket {
        self.mode_request.begin()
    }

    pub fn apply_mode(&mut self, ticket: RequestTicket, result: ApiResult<ObservabilityMode>) -> bool {
        if !self.mode_request.settle(ticket) {
            return false;
        }
        match result {
            Ok(mode) => self.mode = Some(mode),
            Err(err) => tracing::warn!("Could not load observability mode: {}", err),
        }
        true
    }

    /// Health, then slots; either failing fails the whole fetch.
    pub async fn load(api: &ApiClient) -> ApiResult<(ClusterHealth, ClusterSlots)> {
        let health = api.cluster_health().await?;
        let slots = api.cluster_slots().await?;
        Ok((health, slots))
    }

    pub async fn fetch_cluster(&mut self, api: &ApiClient) -> bool {
        let ticket = self.begin_cluster();
        let result = Self::load(api).await;
        self.apply_cluster(ticket, result)
    }

    pub async fn fetch_mode(&mut self, api: &ApiClient) -> bool {
        let ticket = self.begin_mode();
        let result = api.observability_mode().await;
        self.apply_mode(ticket, result)
    }
}
