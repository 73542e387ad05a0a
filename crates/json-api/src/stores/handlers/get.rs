//! Store Detail Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{PathParam, QueryParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use boltpromo_app::{domain::PromoQuery, pagination::PageInfo};

use crate::{
    extensions::*,
    seo,
    state::State,
    views::{PageInfoView, PromoView, StoreStatsView, StoreView},
};

/// Promocodes per page on the store detail page.
const STORE_PAGE_SIZE: u32 = 12;

/// How many related stores the sidebar shows.
const RELATED_STORES: u32 = 4;

/// Store detail payload
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct StoreDetailResponse {
    /// The store itself
    pub store: StoreView,
    /// One page of the store's promocodes
    pub promocodes: Vec<PromoView>,
    /// Pagination block for the promocodes
    pub page_info: PageInfoView,
    /// Per-store counters, when the backend exposes them
    pub stats: Option<StoreStatsView>,
    /// Other stores to suggest
    pub related_stores: Vec<StoreView>,
    /// JSON-LD payloads for the page head
    pub json_ld: Vec<Value>,
}

/// Store Detail Handler
///
/// Returns the store, one page of its promocodes, its counters and related
/// stores. Responds 404 when the slug is unknown; every other section
/// degrades independently.
#[endpoint(tags("stores"), summary = "Store detail")]
pub(crate) async fn handler(
    slug: PathParam<String>,
    page: QueryParam<u32, false>,
    depot: &mut Depot,
) -> Result<Json<StoreDetailResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let slug = slug.into_inner();
    let page_number = page.into_inner().unwrap_or(1).max(1);

    let store = state.app.stores.get_store(&slug).await.or_404("store")?;

    let promo_query = PromoQuery {
        store: Some(slug.clone()),
        page: Some(page_number),
        page_size: Some(STORE_PAGE_SIZE),
        ..PromoQuery::default()
    };

    let (promos, stats, related) = tokio::join!(
        state.app.promocodes.list_promocodes(promo_query),
        state.app.stores.store_stats(&slug),
        state.app.stores.related_stores(&slug, RELATED_STORES),
    );

    let page_info = PageInfo::from_upstream(
        promos.count,
        page_number,
        STORE_PAGE_SIZE,
        promos.next.as_deref(),
        promos.previous.as_deref(),
    );

    let json_ld = vec![seo::breadcrumbs(
        &state.site,
        &[
            ("Home", "/"),
            ("Stores", "/stores"),
            (&store.name, &format!("/stores/{slug}")),
        ],
    )];

    Ok(Json(StoreDetailResponse {
        store: store.into(),
        promocodes: promos.results.into_iter().map(Into::into).collect(),
        page_info: page_info.into(),
        stats: stats.map(Into::into),
        related_stores: related.into_iter().map(Into::into).collect(),
        json_ld,
    }))
}

#[cfg(test)]
mod tests {
    use boltpromo_app::{
        domain::{MockPromocodesService, MockStoresService},
        records::{Paginated, Store, StoreStats},
    };
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::test_helpers::Mocks;

    use super::*;

    fn make_service(stores: MockStoresService, promocodes: MockPromocodesService) -> Service {
        let mut mocks = Mocks::new();
        mocks.stores = stores;
        mocks.promocodes = promocodes;

        mocks.into_service(Router::with_path("stores/{slug}").get(handler))
    }

    #[tokio::test]
    async fn test_get_unknown_slug_returns_404() -> TestResult {
        let mut stores = MockStoresService::new();

        stores
            .expect_get_store()
            .once()
            .withf(|slug| slug == "nope")
            .return_once(|_| None);

        let res = TestClient::get("http://example.com/stores/nope")
            .send(&make_service(stores, MockPromocodesService::new()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn test_get_assembles_all_sections() -> TestResult {
        let mut stores = MockStoresService::new();

        stores
            .expect_get_store()
            .once()
            .withf(|slug| slug == "zara")
            .return_once(|_| {
                Some(Store {
                    id: 3,
                    name: "Zara".to_owned(),
                    slug: "zara".to_owned(),
                    ..Store::default()
                })
            });

        stores
            .expect_store_stats()
            .once()
            .return_once(|_| Some(StoreStats {
                promocodes_count: 9,
                ..StoreStats::default()
            }));

        stores
            .expect_related_stores()
            .once()
            .withf(|slug, limit| slug == "zara" && *limit == RELATED_STORES)
            .return_once(|_, _| vec![Store::default()]);

        let mut promocodes = MockPromocodesService::new();
        promocodes
            .expect_list_promocodes()
            .once()
            .withf(|query| query.store.as_deref() == Some("zara"))
            .return_once(|_| Paginated::default());

        let response: StoreDetailResponse = TestClient::get("http://example.com/stores/zara")
            .send(&make_service(stores, promocodes))
            .await
            .take_json()
            .await?;

        assert_eq!(response.store.slug, "zara");
        assert_eq!(response.stats.map(|s| s.promocodes_count), Some(9));
        assert_eq!(response.related_stores.len(), 1);
        assert_eq!(response.json_ld.len(), 1, "breadcrumb trail");

        Ok(())
    }
}
