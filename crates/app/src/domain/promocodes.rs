//! Promocodes service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use tracing::{debug, warn};

use crate::{
    client::{ApiClient, QueryParams},
    records::{Paginated, Promocode, RawPromocode},
};

/// Listing filters for promocode queries.
#[derive(Debug, Clone, Default)]
pub struct PromoQuery {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    pub search: Option<String>,
    pub ordering: Option<String>,
    pub offer_type: Option<String>,
    pub store: Option<String>,
    pub category: Option<String>,
    pub is_hot: Option<bool>,
    pub is_recommended: Option<bool>,
}

impl PromoQuery {
    #[must_use]
    pub(crate) fn to_params(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params.push_opt("search", self.search.as_deref());
        params.push_opt("ordering", self.ordering.as_deref());
        params.push_opt("offer_type", self.offer_type.as_deref());
        params.push_opt("store", self.store.as_deref());
        params.push_opt("category", self.category.as_deref());
        params.push_opt_bool("is_hot", self.is_hot);
        params.push_opt_bool("is_recommended", self.is_recommended);
        params.push_opt_num("page", self.page);
        params.push_opt_num("page_size", self.page_size);
        params
    }
}

#[derive(Debug, Clone)]
pub struct HttpPromocodesService {
    client: Arc<ApiClient>,
}

impl HttpPromocodesService {
    #[must_use]
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    async fn fetch_page(&self, query: &PromoQuery) -> Option<Paginated<Promocode>> {
        let page: Paginated<RawPromocode> = self
            .client
            .get("promocodes", &query.to_params())
            .await
            .map_err(|error| warn!("failed to list promocodes: {error}"))
            .ok()?;

        Some(page.map(Promocode::from))
    }
}

#[async_trait]
impl PromocodesService for HttpPromocodesService {
    async fn list_promocodes(&self, query: PromoQuery) -> Paginated<Promocode> {
        self.fetch_page(&query).await.unwrap_or_default()
    }

    async fn get_promocode(&self, id: i64) -> Option<Promocode> {
        match self
            .client
            .get::<RawPromocode>(&format!("promocodes/{id}"), &QueryParams::new())
            .await
        {
            Ok(raw) => Some(Promocode::from(raw)),
            Err(error) if error.is_not_found() => None,
            Err(error) => {
                warn!("failed to fetch promocode {id}: {error}");
                None
            }
        }
    }

    async fn related_promocodes(
        &self,
        id: i64,
        store: Option<String>,
        category: Option<String>,
        limit: u32,
    ) -> Vec<Promocode> {
        let mut related: Vec<Promocode> = Vec::new();

        // Fill from the same store first, then the same category, then
        // whatever is popular, excluding the promocode itself throughout.
        let mut sources: Vec<PromoQuery> = Vec::new();

        if let Some(store) = store {
            sources.push(PromoQuery {
                store: Some(store),
                page_size: Some(limit.saturating_add(1)),
                ..PromoQuery::default()
            });
        }

        if let Some(category) = category {
            sources.push(PromoQuery {
                category: Some(category),
                page_size: Some(limit.saturating_add(1)),
                ..PromoQuery::default()
            });
        }

        sources.push(PromoQuery {
            ordering: Some("-views_count".to_owned()),
            page_size: Some(limit.saturating_add(1)),
            ..PromoQuery::default()
        });

        for query in sources {
            if related.len() >= limit as usize {
                break;
            }

            let Some(page) = self.fetch_page(&query).await else {
                continue;
            };

            for promo in page.results {
                if promo.id == id || related.iter().any(|existing| existing.id == promo.id) {
                    continue;
                }

                related.push(promo);

                if related.len() >= limit as usize {
                    break;
                }
            }
        }

        related
    }

    async fn increment_views(&self, id: i64) {
        if let Err(error) = self
            .client
            .post_empty(&format!("promocodes/{id}/increment_views"))
            .await
        {
            debug!("failed to increment views for promocode {id}: {error}");
        }
    }
}

/// Promocode lookups and the view counter.
#[automock]
#[async_trait]
pub trait PromocodesService: Send + Sync {
    /// List promocodes with the given filters, empty on upstream failure.
    async fn list_promocodes(&self, query: PromoQuery) -> Paginated<Promocode>;

    /// Fetch a single promocode by id; `None` when unknown or unavailable.
    async fn get_promocode(&self, id: i64) -> Option<Promocode>;

    /// Promocodes to show alongside `id`: same store first, then same
    /// category, topped up with popular ones.
    async fn related_promocodes(
        &self,
        id: i64,
        store: Option<String>,
        category: Option<String>,
        limit: u32,
    ) -> Vec<Promocode>;

    /// Bump the view counter; fire-and-forget, failures are logged only.
    async fn increment_views(&self, id: i64);
}
