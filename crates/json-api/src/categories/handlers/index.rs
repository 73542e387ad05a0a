//! Category Catalog Handler
//!
//! The backend's category list is small, so the whole list is fetched in
//! one call and searching, sorting and pagination all happen here.

use std::cmp::Ordering;
use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use boltpromo_app::{pagination::paginate, records::Category};

use crate::{
    extensions::*,
    state::State,
    views::{CategoryView, PageInfoView},
};

/// Category cards per page.
const CATEGORIES_PAGE_SIZE: u32 = 18;

/// Active categories rank higher in the popularity sort.
const ACTIVE_BOOST: f64 = 1.2;

/// Category catalog payload
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CategoriesResponse {
    /// One page of category cards
    pub categories: Vec<CategoryView>,
    /// Pagination block
    pub page_info: PageInfoView,
}

fn matches_search(category: &Category, needle: &str) -> bool {
    if category.name.to_lowercase().contains(needle) {
        return true;
    }

    category
        .description
        .as_deref()
        .is_some_and(|description| description.to_lowercase().contains(needle))
}

fn popularity(category: &Category) -> f64 {
    let count = f64::from(category.promocodes_count.unwrap_or(0));

    if category.is_active.unwrap_or(false) {
        count * ACTIVE_BOOST
    } else {
        count
    }
}

fn sort_categories(categories: &mut [Category], sort: &str) {
    match sort {
        "name-asc" => categories.sort_by(|a, b| a.name.cmp(&b.name)),
        "name-desc" => categories.sort_by(|a, b| b.name.cmp(&a.name)),
        "promo-count-asc" => {
            categories.sort_by_key(|category| category.promocodes_count.unwrap_or(0));
        }
        "promo-count-desc" => {
            categories.sort_by_key(|category| category.promocodes_count.unwrap_or(0));
            categories.reverse();
        }
        "newest" => categories.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        "oldest" => categories.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
        // "popular" and anything unrecognized.
        _ => categories.sort_by(|a, b| {
            popularity(b)
                .partial_cmp(&popularity(a))
                .unwrap_or(Ordering::Equal)
        }),
    }
}

/// Category Catalog Handler
///
/// Returns one page of categories after in-memory search and sort.
#[endpoint(tags("categories"), summary = "Category catalog")]
pub(crate) async fn handler(
    search: QueryParam<String, false>,
    sort: QueryParam<String, false>,
    page: QueryParam<u32, false>,
    depot: &mut Depot,
) -> Result<Json<CategoriesResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let mut categories = state.app.categories.list_categories().await;

    if let Some(needle) = search.into_inner() {
        let needle = needle.trim().to_lowercase();

        if !needle.is_empty() {
            categories.retain(|category| matches_search(category, &needle));
        }
    }

    sort_categories(&mut categories, sort.into_inner().as_deref().unwrap_or("popular"));

    let (page_items, info) = paginate(
        categories,
        page.into_inner().unwrap_or(1),
        CATEGORIES_PAGE_SIZE,
    );

    Ok(Json(CategoriesResponse {
        categories: page_items.into_iter().map(Into::into).collect(),
        page_info: info.into(),
    }))
}

#[cfg(test)]
mod tests {
    use boltpromo_app::domain::MockCategoriesService;
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::test_helpers::Mocks;

    use super::*;

    fn make_category(id: i64, name: &str, count: u32, active: bool) -> Category {
        Category {
            id,
            name: name.to_owned(),
            slug: name.to_lowercase(),
            promocodes_count: Some(count),
            is_active: Some(active),
            ..Category::default()
        }
    }

    fn make_service(categories: Vec<Category>) -> Service {
        let mut mock = MockCategoriesService::new();
        mock.expect_list_categories()
            .once()
            .return_once(move || categories);

        let mut mocks = Mocks::new();
        mocks.categories = mock;

        mocks.into_service(Router::with_path("categories").get(handler))
    }

    #[tokio::test]
    async fn test_popular_sort_boosts_active_categories() -> TestResult {
        // Inactive with 100 promos scores 100; active with 90 scores 108.
        let response: CategoriesResponse = TestClient::get("http://example.com/categories")
            .send(&make_service(vec![
                make_category(1, "Dormant", 100, false),
                make_category(2, "Lively", 90, true),
            ]))
            .await
            .take_json()
            .await?;

        let names: Vec<&str> = response
            .categories
            .iter()
            .map(|category| category.name.as_str())
            .collect();

        assert_eq!(names, vec!["Lively", "Dormant"]);

        Ok(())
    }

    #[tokio::test]
    async fn test_search_filters_by_name_and_description() -> TestResult {
        let mut food = make_category(1, "Food", 10, true);
        food.description = Some("Groceries and restaurants".to_owned());

        let response: CategoriesResponse =
            TestClient::get("http://example.com/categories?search=grocer")
                .send(&make_service(vec![
                    food,
                    make_category(2, "Travel", 20, true),
                ]))
                .await
                .take_json()
                .await?;

        assert_eq!(response.categories.len(), 1);
        assert_eq!(
            response.categories.first().map(|c| c.name.as_str()),
            Some("Food")
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_pagination_over_thirty_items() -> TestResult {
        let categories = (0..30)
            .map(|i| make_category(i, &format!("Category {i:02}"), 1, true))
            .collect();

        let response: CategoriesResponse =
            TestClient::get("http://example.com/categories?page=2&sort=name-asc")
                .send(&make_service(categories))
                .await
                .take_json()
                .await?;

        assert_eq!(response.categories.len(), 12, "30 items, 18 on page one");
        assert_eq!(response.page_info.total_pages, 2);
        assert!(response.page_info.has_previous);
        assert!(!response.page_info.has_next);

        Ok(())
    }
}
