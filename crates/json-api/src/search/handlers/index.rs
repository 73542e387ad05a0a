//! Search Page Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use boltpromo_app::domain::SearchKind;

use crate::{
    extensions::*,
    state::State,
    views::{CategoryView, PromoView, StoreView},
};

/// Search page payload
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SearchResponse {
    /// The query as searched
    pub query: String,
    /// Matching promocodes
    pub promocodes: Vec<PromoView>,
    /// Matching stores
    pub stores: Vec<StoreView>,
    /// Matching categories
    pub categories: Vec<CategoryView>,
    /// Total matches across all kinds
    pub total: u64,
}

/// Search Page Handler
///
/// Returns grouped results for a query. The `type` parameter narrows the
/// result to one kind; anything else returns all kinds, capped per kind.
/// Submitted queries are remembered for the recent-searches list.
#[endpoint(tags("search"), summary = "Search")]
pub(crate) async fn handler(
    q: QueryParam<String, false>,
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<SearchResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let query = q.into_inner().unwrap_or_default();
    // `type` is a keyword; salvo's endpoint macro cannot extract a
    // `r#type` argument, so read the raw query parameter instead.
    let kind = SearchKind::parse(req.query::<String>("type").as_deref());

    state.app.search.record_query(&query);

    let results = state.app.search.search_all(&query, kind).await;
    let total = results.total() as u64;

    Ok(Json(SearchResponse {
        query,
        promocodes: results.promocodes.into_iter().map(Into::into).collect(),
        stores: results.stores.into_iter().map(Into::into).collect(),
        categories: results.categories.into_iter().map(Into::into).collect(),
        total,
    }))
}
