//! Categories service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use tracing::warn;

use crate::{
    client::{ApiClient, QueryParams},
    domain::promocodes::PromoQuery,
    records::{Category, Paginated, Promocode, RawPromocode},
};

#[derive(Debug, Clone)]
pub struct HttpCategoriesService {
    client: Arc<ApiClient>,
}

impl HttpCategoriesService {
    #[must_use]
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CategoriesService for HttpCategoriesService {
    async fn list_categories(&self) -> Vec<Category> {
        let mut params = QueryParams::new();
        params.push_num("page_size", 100);

        match self.client.get::<Paginated<Category>>("categories", &params).await {
            Ok(page) => page.results,
            Err(error) => {
                warn!("failed to list categories: {error}");
                Vec::new()
            }
        }
    }

    async fn get_category(&self, slug: &str) -> Option<Category> {
        let slug = slug.trim().to_lowercase();

        match self
            .client
            .get(&format!("categories/{slug}"), &QueryParams::new())
            .await
        {
            Ok(category) => Some(category),
            Err(error) if error.is_not_found() => None,
            Err(error) => {
                warn!("failed to fetch category {slug}: {error}");
                None
            }
        }
    }

    async fn category_promocodes(&self, slug: &str, query: PromoQuery) -> Paginated<Promocode> {
        let slug = slug.trim().to_lowercase();

        match self
            .client
            .get::<Paginated<RawPromocode>>(
                &format!("categories/{slug}/promocodes"),
                &query.to_params(),
            )
            .await
        {
            Ok(page) => page.map(Promocode::from),
            Err(error) if error.is_not_found() => Paginated::default(),
            Err(error) => {
                warn!("failed to fetch promocodes for category {slug}: {error}");
                Paginated::default()
            }
        }
    }
}

/// Category listings and the per-category promocode feed.
#[automock]
#[async_trait]
pub trait CategoriesService: Send + Sync {
    /// All categories in one page, empty on upstream failure.
    async fn list_categories(&self) -> Vec<Category>;

    /// Fetch a single category by slug; `None` when unknown or unavailable.
    async fn get_category(&self, slug: &str) -> Option<Category>;

    /// Promocodes for one category via the nested route; an unknown slug
    /// degrades to an empty page rather than an error.
    async fn category_promocodes(&self, slug: &str, query: PromoQuery) -> Paginated<Promocode>;
}
