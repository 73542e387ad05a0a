//! Showcase Catalog Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use boltpromo_app::pagination::PageInfo;

use crate::{
    extensions::*,
    state::State,
    views::{PageInfoView, ShowcaseView},
};

/// Showcase cards per page.
const SHOWCASES_PAGE_SIZE: u32 = 12;

/// Showcase catalog payload
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ShowcasesResponse {
    /// One page of showcase cards
    pub showcases: Vec<ShowcaseView>,
    /// Pagination block
    pub page_info: PageInfoView,
}

/// Showcase Catalog Handler
///
/// Returns one page of showcases.
#[endpoint(tags("showcases"), summary = "Showcase catalog")]
pub(crate) async fn handler(
    page: QueryParam<u32, false>,
    depot: &mut Depot,
) -> Result<Json<ShowcasesResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let page_number = page.into_inner().unwrap_or(1).max(1);

    let showcases = state
        .app
        .showcases
        .list_showcases(Some(page_number), Some(SHOWCASES_PAGE_SIZE))
        .await;

    let page_info = PageInfo::from_upstream(
        showcases.count,
        page_number,
        SHOWCASES_PAGE_SIZE,
        showcases.next.as_deref(),
        showcases.previous.as_deref(),
    );

    Ok(Json(ShowcasesResponse {
        showcases: showcases.results.into_iter().map(Into::into).collect(),
        page_info: page_info.into(),
    }))
}

#[cfg(test)]
mod tests {
    use boltpromo_app::{
        domain::MockShowcasesService,
        records::{Paginated, Showcase},
    };
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::test_helpers::Mocks;

    use super::*;

    #[tokio::test]
    async fn test_index_lists_showcases() -> TestResult {
        let mut showcases = MockShowcasesService::new();

        showcases
            .expect_list_showcases()
            .once()
            .withf(|page, page_size| {
                *page == Some(3) && *page_size == Some(SHOWCASES_PAGE_SIZE)
            })
            .return_once(|_, _| Paginated {
                count: 40,
                previous: Some("http://backend/api/v1/showcases/?page=2".to_owned()),
                results: vec![Showcase::default()],
                ..Paginated::default()
            });

        let mut mocks = Mocks::new();
        mocks.showcases = showcases;
        let service = mocks.into_service(Router::with_path("showcases").get(handler));

        let response: ShowcasesResponse = TestClient::get("http://example.com/showcases?page=3")
            .send(&service)
            .await
            .take_json()
            .await?;

        assert_eq!(response.showcases.len(), 1);
        assert_eq!(response.page_info.total_pages, 4);
        assert!(response.page_info.has_previous);

        Ok(())
    }
}
