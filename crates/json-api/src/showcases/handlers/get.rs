//! Showcase Detail Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{PathParam, QueryParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};

use boltpromo_app::{domain::PromoQuery, pagination::PageInfo};

use crate::{
    extensions::*,
    state::State,
    views::{PageInfoView, PromoView, ShowcaseView},
};

/// Promocodes per page on a showcase page.
const SHOWCASE_PAGE_SIZE: u32 = 12;

/// Showcase detail payload
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ShowcaseDetailResponse {
    /// The showcase itself
    pub showcase: ShowcaseView,
    /// One page of the showcase's promocodes
    pub promocodes: Vec<PromoView>,
    /// Pagination block for the promocodes
    pub page_info: PageInfoView,
}

/// Showcase Detail Handler
///
/// Returns the showcase and one page of its promocodes; 404 when the slug
/// is unknown.
#[endpoint(tags("showcases"), summary = "Showcase detail")]
pub(crate) async fn handler(
    slug: PathParam<String>,
    page: QueryParam<u32, false>,
    depot: &mut Depot,
) -> Result<Json<ShowcaseDetailResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let slug = slug.into_inner();
    let page_number = page.into_inner().unwrap_or(1).max(1);

    let promo_query = PromoQuery {
        page: Some(page_number),
        page_size: Some(SHOWCASE_PAGE_SIZE),
        ..PromoQuery::default()
    };

    let (showcase, promos) = tokio::join!(
        state.app.showcases.get_showcase(&slug),
        state.app.showcases.showcase_promos(&slug, promo_query),
    );

    let showcase = showcase.or_404("showcase")?;

    let page_info = PageInfo::from_upstream(
        promos.count,
        page_number,
        SHOWCASE_PAGE_SIZE,
        promos.next.as_deref(),
        promos.previous.as_deref(),
    );

    Ok(Json(ShowcaseDetailResponse {
        showcase: showcase.into(),
        promocodes: promos.results.into_iter().map(Into::into).collect(),
        page_info: page_info.into(),
    }))
}

#[cfg(test)]
mod tests {
    use boltpromo_app::{
        domain::MockShowcasesService,
        records::{Paginated, Promocode, Showcase},
    };
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::test_helpers::Mocks;

    use super::*;

    fn make_service(showcases: MockShowcasesService) -> Service {
        let mut mocks = Mocks::new();
        mocks.showcases = showcases;
        mocks.into_service(Router::with_path("showcases/{slug}").get(handler))
    }

    #[tokio::test]
    async fn test_get_unknown_slug_returns_404() -> TestResult {
        let mut showcases = MockShowcasesService::new();

        showcases
            .expect_get_showcase()
            .once()
            .return_once(|_| None);

        showcases
            .expect_showcase_promos()
            .once()
            .return_once(|_, _| Paginated::default());

        let res = TestClient::get("http://example.com/showcases/nope")
            .send(&make_service(showcases))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn test_get_returns_showcase_and_promos() -> TestResult {
        let mut showcases = MockShowcasesService::new();

        showcases
            .expect_get_showcase()
            .once()
            .withf(|slug| slug == "black-friday")
            .return_once(|_| {
                Some(Showcase {
                    id: 1,
                    slug: "black-friday".to_owned(),
                    title: "Black Friday".to_owned(),
                    ..Showcase::default()
                })
            });

        showcases
            .expect_showcase_promos()
            .once()
            .withf(|slug, query| slug == "black-friday" && query.page == Some(1))
            .return_once(|_, _| Paginated {
                count: 2,
                results: vec![Promocode::default(), Promocode::default()],
                ..Paginated::default()
            });

        let response: ShowcaseDetailResponse =
            TestClient::get("http://example.com/showcases/black-friday")
                .send(&make_service(showcases))
                .await
                .take_json()
                .await?;

        assert_eq!(response.showcase.slug, "black-friday");
        assert_eq!(response.promocodes.len(), 2);

        Ok(())
    }
}
