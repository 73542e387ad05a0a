//! Stores service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use tracing::warn;

use crate::{
    client::{ApiClient, QueryParams, store_sort_ordering},
    records::{Paginated, Store, StoreStats},
};

/// Listing filters for the store catalog.
#[derive(Debug, Clone, Default)]
pub struct StoreQuery {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    pub search: Option<String>,
    pub category: Option<String>,
    pub sort: Option<String>,
    pub active_only: bool,
}

#[derive(Debug, Clone)]
pub struct HttpStoresService {
    client: Arc<ApiClient>,
}

impl HttpStoresService {
    #[must_use]
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl StoresService for HttpStoresService {
    async fn list_stores(&self, query: StoreQuery) -> Paginated<Store> {
        let mut params = QueryParams::new();
        params.push_opt("search", query.search.as_deref());
        params.push_opt("category", query.category.as_deref());
        params.push("ordering", store_sort_ordering(query.sort.as_deref()));
        if query.active_only {
            params.push_opt_bool("is_active", Some(true));
        }
        params.push_opt_num("page", query.page);
        params.push_opt_num("page_size", query.page_size);

        match self.client.get("stores", &params).await {
            Ok(stores) => stores,
            Err(error) => {
                warn!("failed to list stores: {error}");
                Paginated::default()
            }
        }
    }

    async fn get_store(&self, slug: &str) -> Option<Store> {
        let slug = slug.trim().to_lowercase();

        match self
            .client
            .get(&format!("stores/{slug}"), &QueryParams::new())
            .await
        {
            Ok(store) => Some(store),
            Err(error) if error.is_not_found() => None,
            Err(error) => {
                warn!("failed to fetch store {slug}: {error}");
                None
            }
        }
    }

    async fn store_stats(&self, slug: &str) -> Option<StoreStats> {
        let slug = slug.trim().to_lowercase();

        match self
            .client
            .get(&format!("stores/{slug}/stats"), &QueryParams::new())
            .await
        {
            Ok(stats) => Some(stats),
            Err(error) if error.is_not_found() => None,
            Err(error) => {
                warn!("failed to fetch stats for store {slug}: {error}");
                None
            }
        }
    }

    async fn related_stores(&self, slug: &str, limit: u32) -> Vec<Store> {
        let slug = slug.trim().to_lowercase();

        let mut params = QueryParams::new();
        params.push_opt_bool("is_active", Some(true));
        params.push("ordering", "-rating");
        params.push_num("page_size", limit.saturating_add(1).min(100));

        let page: Paginated<Store> = match self.client.get("stores", &params).await {
            Ok(page) => page,
            Err(error) => {
                warn!("failed to fetch related stores for {slug}: {error}");
                return Vec::new();
            }
        };

        page.results
            .into_iter()
            .filter(|store| store.slug != slug)
            .take(limit as usize)
            .collect()
    }
}

/// Store catalog lookups.
#[automock]
#[async_trait]
pub trait StoresService: Send + Sync {
    /// List stores with the given filters, empty on upstream failure.
    async fn list_stores(&self, query: StoreQuery) -> Paginated<Store>;

    /// Fetch a single store by slug; `None` when unknown or unavailable.
    async fn get_store(&self, slug: &str) -> Option<Store>;

    /// Per-store aggregate counters for the store page header.
    async fn store_stats(&self, slug: &str) -> Option<StoreStats>;

    /// Top-rated active stores other than `slug`, at most `limit`.
    async fn related_stores(&self, slug: &str, limit: u32) -> Vec<Store>;
}
