//! Promocode Detail Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{extensions::*, seo, state::State, views::PromoView};

/// How many related promocodes the detail page shows.
const RELATED_PROMOS: u32 = 6;

/// Promocode detail payload
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PromoDetailResponse {
    /// The promocode itself
    pub promocode: PromoView,
    /// Promocodes to show below the fold
    pub related: Vec<PromoView>,
    /// JSON-LD payloads for the page head
    pub json_ld: Vec<Value>,
}

/// Promocode Detail Handler
///
/// Returns the promocode and related offers; 404 when the id is unknown.
/// Viewing bumps the backend's view counter without blocking the response.
#[endpoint(tags("promocodes"), summary = "Promocode detail")]
pub(crate) async fn handler(
    id: PathParam<i64>,
    depot: &mut Depot,
) -> Result<Json<PromoDetailResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let id = id.into_inner();

    let promo = state.app.promocodes.get_promocode(id).await.or_404("promocode")?;

    {
        let app = state.app.clone();

        tokio::spawn(async move {
            app.promocodes.increment_views(id).await;
        });
    }

    let store_slug = promo.store.as_ref().map(|store| store.slug.clone());
    let category_slug = promo.category.as_ref().map(|category| category.slug.clone());

    let related = state
        .app
        .promocodes
        .related_promocodes(id, store_slug, category_slug, RELATED_PROMOS)
        .await;

    let json_ld = vec![seo::breadcrumbs(
        &state.site,
        &[
            ("Home", "/"),
            (&promo.title, &format!("/promo/{id}")),
        ],
    )];

    Ok(Json(PromoDetailResponse {
        promocode: promo.into(),
        related: related.into_iter().map(Into::into).collect(),
        json_ld,
    }))
}
