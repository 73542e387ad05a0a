//! Static Content Page Handler
//!
//! Serves the backend-managed copy pages (privacy policy, terms, FAQ) by
//! slug.

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use boltpromo_app::records::Page;

use crate::{extensions::*, seo, state::State};

/// Content page payload
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PageResponse {
    /// Page title
    pub title: String,
    /// Page slug
    pub slug: String,
    /// Page body, HTML as delivered by the backend
    pub content: String,
    /// Open Graph fields for the page
    pub open_graph: Value,
    /// `BreadcrumbList` JSON-LD
    pub json_ld: Vec<Value>,
}

impl PageResponse {
    fn build(page: Page, state: &State) -> Self {
        let path = format!("/pages/{}", page.slug);
        let open_graph = seo::open_graph(&state.site, &page.title, &page.title, &path);
        let json_ld = vec![seo::breadcrumbs(
            &state.site,
            &[("Home", "/"), (&page.title, &path)],
        )];

        Self {
            title: page.title,
            slug: page.slug,
            content: page.content,
            open_graph,
            json_ld,
        }
    }
}

/// Static Content Page Handler
///
/// Returns a published content page by slug; 404 when the slug is unknown
/// or the page is unpublished.
#[endpoint(tags("pages"), summary = "Content page by slug")]
pub(crate) async fn handler(
    slug: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<PageResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let page = state
        .app
        .content
        .get_page(&slug.into_inner())
        .await
        .filter(|page| page.is_published)
        .or_404("page")?;

    Ok(Json(PageResponse::build(page, state)))
}
