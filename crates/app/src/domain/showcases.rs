//! Showcases service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use tracing::warn;

use crate::{
    client::{ApiClient, QueryParams},
    domain::promocodes::PromoQuery,
    records::{Paginated, Promocode, RawPromocode, Showcase},
};

#[derive(Debug, Clone)]
pub struct HttpShowcasesService {
    client: Arc<ApiClient>,
}

impl HttpShowcasesService {
    #[must_use]
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ShowcasesService for HttpShowcasesService {
    async fn list_showcases(&self, page: Option<u32>, page_size: Option<u32>) -> Paginated<Showcase> {
        let mut params = QueryParams::new();
        params.push_opt_num("page", page);
        params.push_opt_num("page_size", page_size);

        match self.client.get("showcases", &params).await {
            Ok(showcases) => showcases,
            Err(error) => {
                warn!("failed to list showcases: {error}");
                Paginated::default()
            }
        }
    }

    async fn get_showcase(&self, slug: &str) -> Option<Showcase> {
        let slug = slug.trim().to_lowercase();

        match self
            .client
            .get(&format!("showcases/{slug}"), &QueryParams::new())
            .await
        {
            Ok(showcase) => Some(showcase),
            Err(error) if error.is_not_found() => None,
            Err(error) => {
                warn!("failed to fetch showcase {slug}: {error}");
                None
            }
        }
    }

    async fn showcase_promos(&self, slug: &str, query: PromoQuery) -> Paginated<Promocode> {
        let slug = slug.trim().to_lowercase();

        match self
            .client
            .get::<Paginated<RawPromocode>>(
                &format!("showcases/{slug}/promocodes"),
                &query.to_params(),
            )
            .await
        {
            Ok(page) => page.map(Promocode::from),
            Err(error) if error.is_not_found() => Paginated::default(),
            Err(error) => {
                warn!("failed to fetch promocodes for showcase {slug}: {error}");
                Paginated::default()
            }
        }
    }
}

/// Curated showcase collections.
#[automock]
#[async_trait]
pub trait ShowcasesService: Send + Sync {
    /// List showcases, empty on upstream failure.
    async fn list_showcases(&self, page: Option<u32>, page_size: Option<u32>)
    -> Paginated<Showcase>;

    /// Fetch a single showcase by slug; `None` when unknown or unavailable.
    async fn get_showcase(&self, slug: &str) -> Option<Showcase>;

    /// Promocodes belonging to one showcase.
    async fn showcase_promos(&self, slug: &str, query: PromoQuery) -> Paginated<Promocode>;
}
