//! State

use std::sync::Arc;

use boltpromo_app::context::AppContext;

use crate::config::site::SiteConfig;

#[derive(Clone)]
pub(crate) struct State {
    pub(crate) app: AppContext,
    pub(crate) site: SiteConfig,
}

impl State {
    #[must_use]
    pub(crate) fn new(app: AppContext, site: SiteConfig) -> Self {
        Self { app, site }
    }

    #[must_use]
    pub(crate) fn shared(app: AppContext, site: SiteConfig) -> Arc<Self> {
        Arc::new(Self::new(app, site))
    }
}
