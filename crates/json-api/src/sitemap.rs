//! Sitemap Handler
//!
//! Emits `sitemap.xml` from the fixed page routes plus the store, category
//! and showcase catalogs. Dynamic sections come from the same services as
//! the pages, so if a catalog fetch fails the sitemap quietly degrades to
//! whatever did resolve.

use std::fmt::Write;
use std::sync::Arc;

use salvo::{prelude::*, writing::Text};

use boltpromo_app::domain::StoreQuery;

use crate::{extensions::*, state::State};

/// Most store URLs the sitemap will carry.
const MAX_STORE_URLS: usize = 1000;

/// Catalog pages are walked in batches of this size.
const BATCH_SIZE: u32 = 100;

/// Fixed page routes with change frequency and priority.
const STATIC_ROUTES: &[(&str, &str, &str)] = &[
    ("/", "daily", "1.0"),
    ("/stores", "daily", "0.9"),
    ("/categories", "weekly", "0.8"),
    ("/hot", "hourly", "0.9"),
    ("/showcases", "weekly", "0.7"),
    ("/search", "weekly", "0.5"),
    ("/contact", "monthly", "0.3"),
];

struct SitemapUrl {
    loc: String,
    changefreq: &'static str,
    priority: &'static str,
}

fn escape_xml(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('\'', "&apos;")
        .replace('"', "&quot;")
}

fn render(urls: &[SitemapUrl]) -> String {
    let mut xml = String::from(concat!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n",
        "<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    ));

    for url in urls {
        // String's fmt::Write never fails.
        let _ = write!(
            xml,
            "  <url>\n    <loc>{}</loc>\n    <changefreq>{}</changefreq>\n    <priority>{}</priority>\n  </url>\n",
            escape_xml(&url.loc),
            url.changefreq,
            url.priority,
        );
    }

    xml.push_str("</urlset>\n");
    xml
}

async fn store_urls(state: &State) -> Vec<SitemapUrl> {
    let mut urls = Vec::new();
    let mut page = 1u32;

    while urls.len() < MAX_STORE_URLS {
        let batch = state
            .app
            .stores
            .list_stores(StoreQuery {
                page: Some(page),
                page_size: Some(BATCH_SIZE),
                active_only: true,
                ..StoreQuery::default()
            })
            .await;

        if batch.results.is_empty() {
            break;
        }

        let has_next = batch.next.is_some();

        for store in batch.results {
            if urls.len() >= MAX_STORE_URLS {
                break;
            }

            urls.push(SitemapUrl {
                loc: state.site.absolute(&format!("/stores/{}", store.slug)),
                changefreq: "daily",
                priority: "0.7",
            });
        }

        if !has_next {
            break;
        }

        page += 1;
    }

    urls
}

/// Sitemap Handler
///
/// Serves `sitemap.xml`.
#[handler]
pub(crate) async fn handler(depot: &mut Depot, res: &mut Response) -> Result<(), StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let mut urls: Vec<SitemapUrl> = STATIC_ROUTES
        .iter()
        .map(|&(path, changefreq, priority)| SitemapUrl {
            loc: state.site.absolute(path),
            changefreq,
            priority,
        })
        .collect();

    let (stores, categories, showcases) = tokio::join!(
        store_urls(state),
        state.app.categories.list_categories(),
        state.app.showcases.list_showcases(Some(1), Some(BATCH_SIZE)),
    );

    urls.extend(stores);

    urls.extend(categories.into_iter().map(|category| SitemapUrl {
        loc: state.site.absolute(&format!("/categories/{}", category.slug)),
        changefreq: "weekly",
        priority: "0.6",
    }));

    urls.extend(showcases.results.into_iter().map(|showcase| SitemapUrl {
        loc: state.site.absolute(&format!("/showcases/{}", showcase.slug)),
        changefreq: "weekly",
        priority: "0.6",
    }));

    res.render(Text::Xml(render(&urls)));

    Ok(())
}

#[cfg(test)]
mod tests {
    use boltpromo_app::{
        domain::{MockCategoriesService, MockShowcasesService, MockStoresService},
        records::{Category, Paginated, Store},
    };
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::test_helpers::Mocks;

    use super::*;

    fn empty_catalog_mocks() -> Mocks {
        let mut mocks = Mocks::new();

        let mut stores = MockStoresService::new();
        stores
            .expect_list_stores()
            .once()
            .return_once(|_| Paginated::default());

        let mut categories = MockCategoriesService::new();
        categories.expect_list_categories().once().return_once(Vec::new);

        let mut showcases = MockShowcasesService::new();
        showcases
            .expect_list_showcases()
            .once()
            .return_once(|_, _| Paginated::default());

        mocks.stores = stores;
        mocks.categories = categories;
        mocks.showcases = showcases;
        mocks
    }

    fn make_service(mocks: Mocks) -> salvo::Service {
        mocks.into_service(Router::with_path("sitemap.xml").get(handler))
    }

    #[tokio::test]
    async fn test_sitemap_degrades_to_static_routes() -> TestResult {
        let body = TestClient::get("http://example.com/sitemap.xml")
            .send(&make_service(empty_catalog_mocks()))
            .await
            .take_string()
            .await?;

        assert!(body.contains("<loc>https://boltpromo.test/</loc>"));
        assert!(body.contains("<loc>https://boltpromo.test/hot</loc>"));
        assert!(!body.contains("/stores/"), "no dynamic store entries");

        Ok(())
    }

    #[tokio::test]
    async fn test_sitemap_includes_catalog_entries() -> TestResult {
        let mut mocks = Mocks::new();

        let mut stores = MockStoresService::new();
        stores.expect_list_stores().once().return_once(|_| Paginated {
            count: 1,
            results: vec![Store {
                id: 1,
                name: "Zara".to_owned(),
                slug: "zara".to_owned(),
                ..Store::default()
            }],
            ..Paginated::default()
        });

        let mut categories = MockCategoriesService::new();
        categories.expect_list_categories().once().return_once(|| {
            vec![Category {
                id: 2,
                name: "Food".to_owned(),
                slug: "food".to_owned(),
                ..Category::default()
            }]
        });

        let mut showcases = MockShowcasesService::new();
        showcases
            .expect_list_showcases()
            .once()
            .return_once(|_, _| Paginated::default());

        mocks.stores = stores;
        mocks.categories = categories;
        mocks.showcases = showcases;

        let body = TestClient::get("http://example.com/sitemap.xml")
            .send(&make_service(mocks))
            .await
            .take_string()
            .await?;

        assert!(body.contains("<loc>https://boltpromo.test/stores/zara</loc>"));
        assert!(body.contains("<loc>https://boltpromo.test/categories/food</loc>"));

        Ok(())
    }

    #[test]
    fn escape_xml_handles_ampersands() {
        assert_eq!(escape_xml("a&b"), "a&amp;b");
    }
}
