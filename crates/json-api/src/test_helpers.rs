//! Test helpers.

use std::sync::Arc;

use salvo::{affix_state::inject, prelude::*};

use boltpromo_app::{
    context::AppContext,
    domain::{
        MockCategoriesService, MockContactService, MockContentService, MockHealthService,
        MockPromocodesService, MockSearchService, MockShowcasesService, MockStatsService,
        MockStoresService,
    },
};

use crate::{config::site::SiteConfig, state::State};

pub(crate) fn test_site() -> SiteConfig {
    SiteConfig {
        site_url: "https://boltpromo.test".to_owned(),
        site_name: "BoltPromo".to_owned(),
    }
}

/// One mock per service; unexpected calls panic, so each test only relaxes
/// the services its handler is supposed to touch.
pub(crate) struct Mocks {
    pub stores: MockStoresService,
    pub categories: MockCategoriesService,
    pub promocodes: MockPromocodesService,
    pub showcases: MockShowcasesService,
    pub content: MockContentService,
    pub search: MockSearchService,
    pub stats: MockStatsService,
    pub contact: MockContactService,
    pub health: MockHealthService,
}

impl Mocks {
    pub(crate) fn new() -> Self {
        Self {
            stores: MockStoresService::new(),
            categories: MockCategoriesService::new(),
            promocodes: MockPromocodesService::new(),
            showcases: MockShowcasesService::new(),
            content: MockContentService::new(),
            search: MockSearchService::new(),
            stats: MockStatsService::new(),
            contact: MockContactService::new(),
            health: MockHealthService::new(),
        }
    }

    pub(crate) fn into_state(self) -> Arc<State> {
        let app = AppContext {
            stores: Arc::new(self.stores),
            categories: Arc::new(self.categories),
            promocodes: Arc::new(self.promocodes),
            showcases: Arc::new(self.showcases),
            content: Arc::new(self.content),
            search: Arc::new(self.search),
            stats: Arc::new(self.stats),
            contact: Arc::new(self.contact),
            health: Arc::new(self.health),
        };

        State::shared(app, test_site())
    }

    pub(crate) fn into_service(self, route: Router) -> Service {
        Service::new(Router::new().hoop(inject(self.into_state())).push(route))
    }
}
