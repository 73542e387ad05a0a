//! Store Catalog Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use boltpromo_app::{domain::StoreQuery, pagination::PageInfo};

use crate::{
    extensions::*,
    state::State,
    views::{PageInfoView, StatsView, StoreView},
};

/// Default number of store cards per catalog page.
const CATALOG_PAGE_SIZE: u32 = 12;

/// Store catalog payload
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct StoresResponse {
    /// Site-wide counters for the header cards
    pub stats: StatsView,
    /// One page of store cards
    pub stores: Vec<StoreView>,
    /// Pagination block
    pub page_info: PageInfoView,
}

/// Store Catalog Handler
///
/// Returns one page of the store catalog plus the header counters. The
/// counters and the page are fetched in parallel.
#[endpoint(tags("stores"), summary = "Store catalog")]
pub(crate) async fn handler(
    search: QueryParam<String, false>,
    sort: QueryParam<String, false>,
    page: QueryParam<u32, false>,
    limit: QueryParam<u32, false>,
    depot: &mut Depot,
) -> Result<Json<StoresResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let page_number = page.into_inner().unwrap_or(1).max(1);
    let per_page = limit.into_inner().unwrap_or(CATALOG_PAGE_SIZE).clamp(1, 100);

    let query = StoreQuery {
        page: Some(page_number),
        page_size: Some(per_page),
        search: search.into_inner(),
        sort: sort.into_inner(),
        active_only: true,
        ..StoreQuery::default()
    };

    let (stats, stores) = tokio::join!(
        state.app.stats.global_stats(),
        state.app.stores.list_stores(query),
    );

    let page_info = PageInfo::from_upstream(
        stores.count,
        page_number,
        per_page,
        stores.next.as_deref(),
        stores.previous.as_deref(),
    );

    Ok(Json(StoresResponse {
        stats: stats.into(),
        stores: stores.results.into_iter().map(Into::into).collect(),
        page_info: page_info.into(),
    }))
}
