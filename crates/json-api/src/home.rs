//! Home Page Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use boltpromo_app::domain::PromoQuery;

use crate::{
    extensions::*,
    seo,
    state::State,
    views::{BannerView, PartnerView, PromoView, ShowcaseView, StatsView},
};

/// How many hot promocodes the home page shows.
const HOME_HOT_COUNT: u32 = 12;

/// How many showcases the home page shows.
const HOME_SHOWCASE_COUNT: u32 = 6;

/// Home page payload
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct HomeResponse {
    /// Active hero banners, in display order
    pub banners: Vec<BannerView>,
    /// Featured showcases
    pub showcases: Vec<ShowcaseView>,
    /// Hot promocodes for the front grid
    pub hot_promocodes: Vec<PromoView>,
    /// Site-wide counters
    pub stats: StatsView,
    /// Partner logos
    pub partners: Vec<PartnerView>,
    /// JSON-LD payloads for the page head
    pub json_ld: Vec<Value>,
}

/// Home Page Handler
///
/// Aggregates every home-page section in one response. Each section is
/// fetched in parallel and degrades to empty on its own upstream failure.
#[endpoint(tags("pages"), summary = "Home page")]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<HomeResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let app = &state.app;

    let hot_query = PromoQuery {
        is_hot: Some(true),
        ordering: Some("-created_at".to_owned()),
        page_size: Some(HOME_HOT_COUNT),
        ..PromoQuery::default()
    };

    let (banners, showcases, hot, stats, partners) = tokio::join!(
        app.content.banners(),
        app.showcases.list_showcases(Some(1), Some(HOME_SHOWCASE_COUNT)),
        app.promocodes.list_promocodes(hot_query),
        app.stats.global_stats(),
        app.content.partners(),
    );

    let hot_promocodes: Vec<PromoView> = hot.results.into_iter().map(Into::into).collect();

    let json_ld = vec![
        seo::organization(&state.site),
        seo::promo_item_list(&state.site, &hot_promocodes),
    ];

    Ok(Json(HomeResponse {
        banners: banners.into_iter().map(Into::into).collect(),
        showcases: showcases.results.into_iter().map(Into::into).collect(),
        hot_promocodes,
        stats: stats.into(),
        partners: partners.into_iter().map(Into::into).collect(),
        json_ld,
    }))
}

#[cfg(test)]
mod tests {
    use boltpromo_app::{
        domain::{
            MockContentService, MockPromocodesService, MockShowcasesService, MockStatsService,
        },
        records::{Banner, GlobalStats, Paginated, Promocode, Showcase},
    };
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::test_helpers::Mocks;

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        mocks.into_service(Router::new().get(handler))
    }

    fn happy_mocks() -> Mocks {
        let mut mocks = Mocks::new();

        let mut content = MockContentService::new();
        content.expect_banners().once().return_once(|| {
            vec![Banner {
                id: 1,
                title: "Mega sale".to_owned(),
                is_active: true,
                ..Banner::default()
            }]
        });
        content.expect_partners().once().return_once(Vec::new);

        let mut showcases = MockShowcasesService::new();
        showcases
            .expect_list_showcases()
            .once()
            .return_once(|_, _| Paginated {
                count: 1,
                results: vec![Showcase {
                    id: 7,
                    slug: "black-friday".to_owned(),
                    title: "Black Friday".to_owned(),
                    ..Showcase::default()
                }],
                ..Paginated::default()
            });

        let mut promocodes = MockPromocodesService::new();
        promocodes
            .expect_list_promocodes()
            .once()
            .withf(|query| query.is_hot == Some(true))
            .return_once(|_| Paginated {
                count: 1,
                results: vec![Promocode {
                    id: 42,
                    title: "10% off".to_owned(),
                    is_hot: true,
                    ..Promocode::default()
                }],
                ..Paginated::default()
            });

        let mut stats = MockStatsService::new();
        stats
            .expect_global_stats()
            .once()
            .return_once(|| GlobalStats {
                total_stores: 5,
                ..GlobalStats::default()
            });

        mocks.content = content;
        mocks.showcases = showcases;
        mocks.promocodes = promocodes;
        mocks.stats = stats;
        mocks
    }

    #[tokio::test]
    async fn test_home_aggregates_all_sections() -> TestResult {
        let response: HomeResponse = TestClient::get("http://example.com/")
            .send(&make_service(happy_mocks()))
            .await
            .take_json()
            .await?;

        assert_eq!(response.banners.len(), 1);
        assert_eq!(response.showcases.len(), 1);
        assert_eq!(response.hot_promocodes.len(), 1);
        assert_eq!(response.stats.total_stores, 5);
        assert_eq!(response.json_ld.len(), 2, "organization plus item list");

        Ok(())
    }

    #[tokio::test]
    async fn test_home_degrades_per_section() -> TestResult {
        let mut mocks = Mocks::new();

        let mut content = MockContentService::new();
        content.expect_banners().once().return_once(Vec::new);
        content.expect_partners().once().return_once(Vec::new);

        let mut showcases = MockShowcasesService::new();
        showcases
            .expect_list_showcases()
            .once()
            .return_once(|_, _| Paginated::default());

        let mut promocodes = MockPromocodesService::new();
        promocodes
            .expect_list_promocodes()
            .once()
            .return_once(|_| Paginated::default());

        let mut stats = MockStatsService::new();
        stats
            .expect_global_stats()
            .once()
            .return_once(GlobalStats::default);

        mocks.content = content;
        mocks.showcases = showcases;
        mocks.promocodes = promocodes;
        mocks.stats = stats;

        let res = TestClient::get("http://example.com/")
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }
}
