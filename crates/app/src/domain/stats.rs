//! Site-wide statistics service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use serde_json::Value;
use tracing::warn;

use crate::{
    client::{ApiClient, QueryParams},
    records::GlobalStats,
};

#[derive(Debug, Clone)]
pub struct HttpStatsService {
    client: Arc<ApiClient>,
}

impl HttpStatsService {
    #[must_use]
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Derive counters from the list endpoints' envelope counts when the
    /// dedicated stats endpoint is down. Each branch degrades to zero on
    /// its own failure.
    async fn counted_fallback(&self) -> GlobalStats {
        let count_of = |endpoint: &'static str| async move {
            let mut params = QueryParams::new();
            params.push_num("page_size", 1);

            match self.client.get_json(endpoint, &params).await {
                Ok(body) => envelope_count(&body),
                Err(error) => {
                    warn!("stats fallback count for {endpoint} failed: {error}");
                    0
                }
            }
        };

        let (stores, promocodes, categories) = tokio::join!(
            count_of("stores"),
            count_of("promocodes"),
            count_of("categories"),
        );

        GlobalStats {
            total_stores: stores,
            total_promocodes: promocodes,
            total_categories: categories,
            active_stores: stores,
            active_promocodes: promocodes,
            active_categories: categories,
        }
    }
}

fn envelope_count(body: &Value) -> u64 {
    body.get("count").and_then(Value::as_u64).unwrap_or(0)
}

#[async_trait]
impl StatsService for HttpStatsService {
    async fn global_stats(&self) -> GlobalStats {
        match self.client.get("stats/global", &QueryParams::new()).await {
            Ok(stats) => stats,
            Err(error) => {
                warn!("failed to fetch global stats, deriving from list counts: {error}");
                self.counted_fallback().await
            }
        }
    }
}

/// Aggregate counters shown on the home and catalog pages.
#[automock]
#[async_trait]
pub trait StatsService: Send + Sync {
    /// Site-wide totals; falls back to envelope counts, then zeros.
    async fn global_stats(&self) -> GlobalStats;
}
