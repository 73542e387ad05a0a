//! Category Detail Handler

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
    views::{CategoryView, PageInfoView, PromoView},
};

/// Promocodes per page on the category page.
const CATEGORY_PAGE_SIZE: u32 = 18;

fn promo_ordering(sort: Option<&str>) -> &'static str {
    match sort {
        Some("popular") => "-views_count",
        Some("expiring") => "expires_at",
        _ => "-created_at",
    }
}

/// Category detail payload
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CategoryDetailResponse {
    /// The category itself
    pub category: CategoryView,
    /// One page of the category's promocodes
    pub promocodes: Vec<PromoView>,
    /// Pagination block for the promocodes
    pub page_info: PageInfoView,
    /// JSON-LD payloads for the page head
    pub json_ld: Vec<Value>,
}

/// Category Detail Handler
///
/// Returns the category and one page of its promocodes. Responds 404 when
/// the slug is unknown; a failing promocode feed degrades to an empty page.
#[endpoint(tags("categories"), summary = "Category detail")]
pub(crate) async fn handler(
    slug: PathParam<String>,
    sort: QueryParam<String, false>,
    page: QueryParam<u32, false>,
    search: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<CategoryDetailResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let slug = slug.into_inner();
    let page_number = page.into_inner().unwrap_or(1).max(1);

    let promo_query = PromoQuery {
        page: Some(page_number),
        page_size: Some(CATEGORY_PAGE_SIZE),
        search: search.into_inner(),
        ordering: Some(promo_ordering(sort.into_inner().as_deref()).to_owned()),
        ..PromoQuery::default()
    };

    let (category, promos) = tokio::join!(
        state.app.categories.get_category(&slug),
        state.app.categories.category_promocodes(&slug, promo_query),
    );

    let category = category.or_404("category")?;

    let page_info = PageInfo::from_upstream(
        promos.count,
        page_number,
        CATEGORY_PAGE_SIZE,
        promos.next.as_deref(),
        promos.previous.as_deref(),
    );

    let json_ld = vec![seo::breadcrumbs(
        &state.site,
        &[
            ("Home", "/"),
            ("Categories", "/categories"),
            (&category.name, &format!("/categories/{slug}")),
        ],
    )];

    Ok(Json(CategoryDetailResponse {
        category: category.into(),
        promocodes: promos.results.into_iter().map(Into::into).collect(),
        page_info: page_info.into(),
        json_ld,
    }))
}

#[cfg(test)]
mod tests {
    use boltpromo_app::{
        domain::MockCategoriesService,
        records::{Category, Paginated, Promocode},
    };
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::test_helpers::Mocks;

    use super::*;

    fn make_service(categories: MockCategoriesService) -> Service {
        let mut mocks = Mocks::new();
        mocks.categories = categories;

        mocks.into_service(Router::with_path("categories/{slug}").get(handler))
    }

    #[tokio::test]
    async fn test_get_unknown_slug_returns_404() -> TestResult {
        let mut categories = MockCategoriesService::new();

        categories
            .expect_get_category()
            .once()
            .withf(|slug| slug == "nope")
            .return_once(|_| None);

        categories
            .expect_category_promocodes()
            .once()
            .return_once(|_, _| Paginated::default());

        let res = TestClient::get("http://example.com/categories/nope")
            .send(&make_service(categories))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn test_get_maps_sort_to_ordering() -> TestResult {
        let mut categories = MockCategoriesService::new();

        categories
            .expect_get_category()
            .once()
            .return_once(|_| {
                Some(Category {
                    id: 1,
                    name: "Food".to_owned(),
                    slug: "food".to_owned(),
                    ..Category::default()
                })
            });

        categories
            .expect_category_promocodes()
            .once()
            .withf(|slug, query| {
                slug == "food" && query.ordering.as_deref() == Some("-views_count")
            })
            .return_once(|_, _| Paginated {
                count: 1,
                results: vec![Promocode::default()],
                ..Paginated::default()
            });

        let response: CategoryDetailResponse =
            TestClient::get("http://example.com/categories/food?sort=popular")
                .send(&make_service(categories))
                .await
                .take_json()
                .await?;

        assert_eq!(response.category.slug, "food");
        assert_eq!(response.promocodes.len(), 1);

        Ok(())
    }
}
