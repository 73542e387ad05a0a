//! Search Suggestions Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{extensions::*, state::State, views::SuggestionView};

/// Default dropdown size.
const DEFAULT_LIMIT: usize = 8;

/// Largest dropdown a client may ask for.
const MAX_LIMIT: usize = 20;

/// Suggestions payload
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SuggestionsResponse {
    /// Ranked suggestions for the dropdown
    pub suggestions: Vec<SuggestionView>,
    /// Recent or popular queries, shown when the box is empty
    pub recent: Vec<String>,
}

/// Search Suggestions Handler
///
/// Returns ranked suggestions for the search box. Queries shorter than two
/// characters return no suggestions, only the recent/popular list.
#[endpoint(tags("search"), summary = "Search suggestions")]
pub(crate) async fn handler(
    q: QueryParam<String, false>,
    limit: QueryParam<usize, false>,
    depot: &mut Depot,
) -> Result<Json<SuggestionsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let query = q.into_inner().unwrap_or_default();
    let limit = limit.into_inner().unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);

    let suggestions = state.app.search.suggestions(&query, limit).await;
    let recent = state.app.search.recent_queries();

    Ok(Json(SuggestionsResponse {
        suggestions: suggestions.into_iter().map(Into::into).collect(),
        recent,
    }))
}
