//! App Context

use std::sync::Arc;

use crate::{
    client::{ApiClient, ApiConfig},
    domain::{
        CategoriesService, ContactService, ContentService, HealthService, HttpCategoriesService,
        HttpContactService, HttpContentService, HttpHealthService, HttpPromocodesService,
        HttpSearchService, HttpShowcasesService, HttpStatsService, HttpStoresService,
        PromocodesService, SearchService, ShowcasesService, StatsService, StoresService,
    },
};

/// One service handle per upstream resource, shared across handlers.
#[derive(Clone)]
pub struct AppContext {
    pub stores: Arc<dyn StoresService>,
    pub categories: Arc<dyn CategoriesService>,
    pub promocodes: Arc<dyn PromocodesService>,
    pub showcases: Arc<dyn ShowcasesService>,
    pub content: Arc<dyn ContentService>,
    pub search: Arc<dyn SearchService>,
    pub stats: Arc<dyn StatsService>,
    pub contact: Arc<dyn ContactService>,
    pub health: Arc<dyn HealthService>,
}

impl AppContext {
    /// Build the context over one shared HTTP client for the given backend.
    #[must_use]
    pub fn from_api_url(url: &str) -> Self {
        let client = Arc::new(ApiClient::new(ApiConfig {
            base_url: url.to_owned(),
        }));

        Self::from_client(client)
    }

    /// Build the context from an existing client.
    #[must_use]
    pub fn from_client(client: Arc<ApiClient>) -> Self {
        Self {
            stores: Arc::new(HttpStoresService::new(Arc::clone(&client))),
            categories: Arc::new(HttpCategoriesService::new(Arc::clone(&client))),
            promocodes: Arc::new(HttpPromocodesService::new(Arc::clone(&client))),
            showcases: Arc::new(HttpShowcasesService::new(Arc::clone(&client))),
            content: Arc::new(HttpContentService::new(Arc::clone(&client))),
            search: Arc::new(HttpSearchService::new(Arc::clone(&client))),
            stats: Arc::new(HttpStatsService::new(Arc::clone(&client))),
            contact: Arc::new(HttpContactService::new(Arc::clone(&client))),
            health: Arc::new(HttpHealthService::new(client)),
        }
    }
}
