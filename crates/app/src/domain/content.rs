//! Editorial content: banners, partners, and static pages.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use tracing::warn;

use crate::{
    client::{ApiClient, QueryParams},
    records::{Banner, Page, Paginated, Partner},
};

#[derive(Debug, Clone)]
pub struct HttpContentService {
    client: Arc<ApiClient>,
}

impl HttpContentService {
    #[must_use]
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ContentService for HttpContentService {
    async fn banners(&self) -> Vec<Banner> {
        let page: Paginated<Banner> = match self.client.get("banners", &QueryParams::new()).await {
            Ok(page) => page,
            Err(error) => {
                warn!("failed to list banners: {error}");
                return Vec::new();
            }
        };

        let mut banners: Vec<Banner> = page
            .results
            .into_iter()
            .filter(|banner| banner.is_active)
            .collect();
        banners.sort_by_key(|banner| banner.order);
        banners
    }

    async fn partners(&self) -> Vec<Partner> {
        let page: Paginated<Partner> = match self.client.get("partners", &QueryParams::new()).await
        {
            Ok(page) => page,
            Err(error) => {
                warn!("failed to list partners: {error}");
                return Vec::new();
            }
        };

        let mut partners: Vec<Partner> = page
            .results
            .into_iter()
            .filter(|partner| partner.is_active)
            .collect();
        partners.sort_by_key(|partner| partner.order);
        partners
    }

    async fn get_page(&self, slug: &str) -> Option<Page> {
        let slug = slug.trim().to_lowercase();

        match self
            .client
            .get(&format!("pages/{slug}"), &QueryParams::new())
            .await
        {
            Ok(page) => Some(page),
            Err(error) if error.is_not_found() => None,
            Err(error) => {
                warn!("failed to fetch page {slug}: {error}");
                None
            }
        }
    }
}

/// Home-page banners, partner logos, and legal/FAQ copy.
#[automock]
#[async_trait]
pub trait ContentService: Send + Sync {
    /// Active banners in display order, empty on upstream failure.
    async fn banners(&self) -> Vec<Banner>;

    /// Active partners in display order, empty on upstream failure.
    async fn partners(&self) -> Vec<Partner>;

    /// Fetch a static content page by slug.
    async fn get_page(&self, slug: &str) -> Option<Page>;
}
