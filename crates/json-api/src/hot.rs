//! Hot Deals Handler
//!
//! The backend has no urgency filter, so this page overfetches the newest
//! promocodes and classifies, filters and sorts them here.

use std::cmp::Reverse;
use std::sync::Arc;

use jiff::Timestamp;
use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use boltpromo_app::{
    domain::PromoQuery,
    pagination::paginate,
    records::{Promocode, Urgency},
};

use crate::{
    extensions::*,
    state::State,
    views::{PageInfoView, PromoView},
};

/// Deals per page.
const HOT_PAGE_SIZE: u32 = 18;

/// Overfetch factor: filtering happens after the fetch, so one page's worth
/// would come up short.
const OVERFETCH: u32 = 3;

/// Hot deals payload
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct HotResponse {
    /// One page of hot deals
    pub promocodes: Vec<PromoView>,
    /// Pagination block
    pub page_info: PageInfoView,
    /// Counts for the filter chips
    pub summary: HotSummary,
}

/// Counts of the filtered set, by urgency.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
pub(crate) struct HotSummary {
    /// Deals that passed the current filter
    pub total: u64,
    /// Deals expiring within 6 hours
    pub critical: u64,
    /// Deals expiring within 24 hours
    pub urgent: u64,
}

fn passes_filter(promo: &Promocode, filter: &str, now: Timestamp) -> bool {
    match filter {
        "hot" => promo.is_hot,
        "critical" => promo.urgency(now) == Urgency::Critical,
        "urgent" => promo.urgency(now) == Urgency::Urgent,
        // "all": anything hot or on a deadline.
        _ => promo.is_hot || promo.is_expiring_soon(now),
    }
}

/// Best-effort numeric magnitude of the discount, for the discount sort.
fn discount_magnitude(promo: &Promocode) -> u32 {
    let text = promo.discount_text.as_deref().unwrap_or("");

    let digits: String = text.chars().filter(char::is_ascii_digit).collect();

    digits.parse().unwrap_or(0)
}

fn sort_deals(deals: &mut [Promocode], sort: &str, now: Timestamp) {
    match sort {
        "newest" => deals.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        "popular" => deals.sort_by_key(|promo| Reverse(promo.views_count)),
        "discount" => deals.sort_by_key(|promo| Reverse(discount_magnitude(promo))),
        // "urgency": most urgent first, hot before not, newest breaks ties.
        _ => deals.sort_by(|a, b| {
            b.urgency(now)
                .cmp(&a.urgency(now))
                .then(b.is_hot.cmp(&a.is_hot))
                .then(b.created_at.cmp(&a.created_at))
        }),
    }
}

/// Hot Deals Handler
///
/// Returns one page of hot or expiring promocodes with urgency counts.
#[endpoint(tags("pages"), summary = "Hot deals")]
pub(crate) async fn handler(
    urgency: QueryParam<String, false>,
    sort: QueryParam<String, false>,
    page: QueryParam<u32, false>,
    depot: &mut Depot,
) -> Result<Json<HotResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let now = Timestamp::now();

    let query = PromoQuery {
        ordering: Some("-created_at".to_owned()),
        page_size: Some(HOT_PAGE_SIZE * OVERFETCH),
        ..PromoQuery::default()
    };

    let fetched = state.app.promocodes.list_promocodes(query).await;

    let filter = urgency.into_inner().unwrap_or_else(|| "all".to_owned());

    let mut deals: Vec<Promocode> = fetched
        .results
        .into_iter()
        .filter(|promo| passes_filter(promo, &filter, now))
        .collect();

    let summary = HotSummary {
        total: deals.len() as u64,
        critical: deals
            .iter()
            .filter(|promo| promo.urgency(now) == Urgency::Critical)
            .count() as u64,
        urgent: deals
            .iter()
            .filter(|promo| promo.urgency(now) == Urgency::Urgent)
            .count() as u64,
    };

    sort_deals(
        &mut deals,
        sort.into_inner().as_deref().unwrap_or("urgency"),
        now,
    );

    let (page_items, info) = paginate(deals, page.into_inner().unwrap_or(1), HOT_PAGE_SIZE);

    Ok(Json(HotResponse {
        promocodes: page_items
            .into_iter()
            .map(|promo| PromoView::with_now(promo, now))
            .collect(),
        page_info: info.into(),
        summary,
    }))
}
