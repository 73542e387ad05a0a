//! Upstream health probe.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use mockall::automock;
use tracing::warn;

use crate::client::ApiClient;

/// How long we wait for the backend health endpoint.
pub const HEALTH_TIMEOUT: Duration = Duration::from_secs(3);

/// Upstream availability as seen from the health probe.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Upstream {
    /// The backend answered, or we could not tell. Unreachable backends
    /// count as available so a flaky probe never takes the site down.
    #[default]
    Available,
    /// The backend answered 503; it is deliberately down.
    Maintenance,
}

impl Upstream {
    #[must_use]
    pub fn is_maintenance(self) -> bool {
        matches!(self, Self::Maintenance)
    }
}

#[derive(Debug, Clone)]
pub struct HttpHealthService {
    client: Arc<ApiClient>,
}

impl HttpHealthService {
    #[must_use]
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HealthService for HttpHealthService {
    async fn check(&self) -> Upstream {
        match self.client.get_status("health", HEALTH_TIMEOUT).await {
            Ok(503) => Upstream::Maintenance,
            Ok(_) => Upstream::Available,
            Err(error) => {
                warn!("health probe failed, assuming available: {error}");
                Upstream::Available
            }
        }
    }
}

/// Probes the backend's `/health/` endpoint.
#[automock]
#[async_trait]
pub trait HealthService: Send + Sync {
    /// Check upstream availability. Fails open: only an explicit 503 is
    /// treated as maintenance.
    async fn check(&self) -> Upstream;
}
