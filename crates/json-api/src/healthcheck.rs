//! BoltPromo JSON API Healthcheck Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{extensions::*, state::State};

/// Healthcheck response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Whether the upstream backend reported maintenance mode
    pub upstream_maintenance: bool,
}

/// Healthcheck handler
///
/// Reports this service's status and whether the upstream backend is in
/// maintenance. An unreachable upstream counts as available.
#[endpoint(tags("health"), summary = "Health check endpoint")]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<HealthResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let upstream = state.app.health.check().await;

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        upstream_maintenance: upstream.is_maintenance(),
    }))
}

#[cfg(test)]
mod tests {
    use boltpromo_app::domain::{MockHealthService, Upstream};
    use salvo::{
        prelude::*,
        test::{ResponseExt, TestClient},
    };
    use testresult::TestResult;

    use crate::test_helpers::Mocks;

    use super::*;

    #[tokio::test]
    async fn test_healthcheck_reports_ok() -> TestResult {
        let mut health = MockHealthService::new();
        health
            .expect_check()
            .once()
            .return_once(|| Upstream::Available);

        let mut mocks = Mocks::new();
        mocks.health = health;

        let service = mocks.into_service(Router::with_path("healthcheck").get(handler));

        let response: HealthResponse = TestClient::get("http://example.com/healthcheck")
            .send(&service)
            .await
            .take_json()
            .await?;

        assert_eq!(response.status, "ok");
        assert!(!response.upstream_maintenance);

        Ok(())
    }

    #[tokio::test]
    async fn test_healthcheck_surfaces_maintenance() -> TestResult {
        let mut health = MockHealthService::new();
        health
            .expect_check()
            .once()
            .return_once(|| Upstream::Maintenance);

        let mut mocks = Mocks::new();
        mocks.health = health;

        let service = mocks.into_service(Router::with_path("healthcheck").get(handler));

        let response: HealthResponse = TestClient::get("http://example.com/healthcheck")
            .send(&service)
            .await
            .take_json()
            .await?;

        assert!(response.upstream_maintenance);

        Ok(())
    }
}
