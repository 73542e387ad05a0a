//! View models shared across page handlers.
//!
//! Each mirrors an upstream record but renders timestamps as RFC 3339
//! strings and bakes in the display-side derivations (urgency, expiring
//! soon) so clients never re-implement them.

use jiff::Timestamp;
use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

use boltpromo_app::{
    pagination::PageInfo,
    records::{
        Banner, Category, GlobalStats, Partner, Promocode, Showcase, Store, StoreStats,
    },
    search::Suggestion,
};

/// Pagination block attached to list responses.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
pub(crate) struct PageInfoView {
    pub current_page: u32,
    pub total_pages: u32,
    pub total_items: u64,
    pub items_per_page: u32,
    pub has_next: bool,
    pub has_previous: bool,
}

impl From<PageInfo> for PageInfoView {
    fn from(info: PageInfo) -> Self {
        Self {
            current_page: info.current_page,
            total_pages: info.total_pages,
            total_items: info.total_items,
            items_per_page: info.items_per_page,
            has_next: info.has_next,
            has_previous: info.has_previous,
        }
    }
}

/// A store card or detail header.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub(crate) struct StoreView {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub logo: Option<String>,
    pub url: Option<String>,
    pub is_active: bool,
    pub rating: Option<f64>,
    pub promocodes_count: u32,
    pub categories: Vec<CategoryView>,
}

impl From<Store> for StoreView {
    fn from(store: Store) -> Self {
        Self {
            id: store.id,
            name: store.name,
            slug: store.slug,
            description: store.description,
            logo: store.logo,
            url: store.url,
            is_active: store.is_active.unwrap_or(true),
            rating: store.rating,
            promocodes_count: store.promocodes_count.unwrap_or(0),
            categories: store.categories.into_iter().map(Into::into).collect(),
        }
    }
}

/// A category card.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub(crate) struct CategoryView {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub promocodes_count: u32,
    pub is_active: bool,
}

impl From<Category> for CategoryView {
    fn from(category: Category) -> Self {
        Self {
            id: category.id,
            name: category.name,
            slug: category.slug,
            description: category.description,
            icon: category.icon,
            promocodes_count: category.promocodes_count.unwrap_or(0),
            is_active: category.is_active.unwrap_or(true),
        }
    }
}

/// A promocode card or detail body.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub(crate) struct PromoView {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub code: Option<String>,
    pub discount_text: Option<String>,
    pub is_hot: bool,
    pub has_promocode: bool,
    pub is_recommended: bool,
    pub views_count: u64,
    pub action_url: Option<String>,
    pub offer_type: String,
    pub offer_type_display: String,
    pub long_description: Option<String>,
    pub steps: Option<String>,
    pub fine_print: Option<String>,
    pub disclaimer: Option<String>,
    pub expires_at: Option<String>,
    pub urgency: String,
    pub is_expiring_soon: bool,
    pub store: Option<StoreView>,
    pub category: Option<CategoryView>,
    pub created_at: Option<String>,
}

impl PromoView {
    /// Build the view, deriving urgency fields against `now`.
    pub(crate) fn with_now(promo: Promocode, now: Timestamp) -> Self {
        let urgency = promo.urgency(now);
        let is_expiring_soon = promo.is_expiring_soon(now);

        Self {
            id: promo.id,
            title: promo.title,
            description: promo.description,
            code: promo.code,
            discount_text: promo.discount_text,
            is_hot: promo.is_hot,
            has_promocode: promo.has_promocode,
            is_recommended: promo.is_recommended,
            views_count: promo.views_count,
            action_url: promo.action_url,
            offer_type: promo.offer_type.as_str().to_owned(),
            offer_type_display: promo.offer_type_display,
            long_description: promo.long_description,
            steps: promo.steps,
            fine_print: promo.fine_print,
            disclaimer: promo.disclaimer,
            expires_at: promo.expires_at.as_ref().map(ToString::to_string),
            urgency: urgency.as_str().to_owned(),
            is_expiring_soon,
            store: promo.store.map(Into::into),
            category: promo.category.map(Into::into),
            created_at: promo.created_at.as_ref().map(ToString::to_string),
        }
    }
}

impl From<Promocode> for PromoView {
    fn from(promo: Promocode) -> Self {
        Self::with_now(promo, Timestamp::now())
    }
}

/// A hero banner slide.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub(crate) struct BannerView {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub subtitle: Option<String>,
    pub image: Option<String>,
    pub link: Option<String>,
    pub cta_text: Option<String>,
}

impl From<Banner> for BannerView {
    fn from(banner: Banner) -> Self {
        Self {
            id: banner.id,
            title: banner.title,
            description: banner.description,
            subtitle: banner.subtitle,
            image: banner.image,
            link: banner.link,
            cta_text: banner.cta_text,
        }
    }
}

/// A partner logo entry.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub(crate) struct PartnerView {
    pub id: i64,
    pub name: String,
    pub logo: Option<String>,
    pub url: Option<String>,
}

impl From<Partner> for PartnerView {
    fn from(partner: Partner) -> Self {
        Self {
            id: partner.id,
            name: partner.name,
            logo: partner.logo,
            url: partner.url,
        }
    }
}

/// A showcase card.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub(crate) struct ShowcaseView {
    pub id: i64,
    pub slug: String,
    pub title: String,
    pub description: Option<String>,
    pub banner: Option<String>,
    pub promos_count: u32,
}

impl From<Showcase> for ShowcaseView {
    fn from(showcase: Showcase) -> Self {
        Self {
            id: showcase.id,
            slug: showcase.slug,
            title: showcase.title,
            description: showcase.description,
            banner: showcase.banner,
            promos_count: showcase.promos_count,
        }
    }
}

/// Site-wide counters.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
pub(crate) struct StatsView {
    pub total_stores: u64,
    pub total_promocodes: u64,
    pub total_categories: u64,
    pub active_stores: u64,
    pub active_promocodes: u64,
    pub active_categories: u64,
}

impl From<GlobalStats> for StatsView {
    fn from(stats: GlobalStats) -> Self {
        Self {
            total_stores: stats.total_stores,
            total_promocodes: stats.total_promocodes,
            total_categories: stats.total_categories,
            active_stores: stats.active_stores,
            active_promocodes: stats.active_promocodes,
            active_categories: stats.active_categories,
        }
    }
}

/// Per-store counters.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
pub(crate) struct StoreStatsView {
    pub promocodes_count: u64,
    pub total_views: u64,
    pub active_promocodes: u64,
    pub hot_promocodes: u64,
}

impl From<StoreStats> for StoreStatsView {
    fn from(stats: StoreStats) -> Self {
        Self {
            promocodes_count: stats.promocodes_count,
            total_views: stats.total_views,
            active_promocodes: stats.active_promocodes,
            hot_promocodes: stats.hot_promocodes,
        }
    }
}

/// A search-box suggestion.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub(crate) struct SuggestionView {
    pub id: String,
    pub kind: String,
    pub title: String,
    pub subtitle: Option<String>,
    pub href: String,
    pub is_hot: bool,
    pub relevance: u8,
}

impl From<Suggestion> for SuggestionView {
    fn from(suggestion: Suggestion) -> Self {
        let kind = match suggestion.kind {
            boltpromo_app::search::SuggestionKind::Promocode => "promocode",
            boltpromo_app::search::SuggestionKind::Store => "store",
            boltpromo_app::search::SuggestionKind::Category => "category",
        };

        Self {
            id: suggestion.id,
            kind: kind.to_owned(),
            title: suggestion.title,
            subtitle: suggestion.subtitle,
            href: suggestion.href,
            is_hot: suggestion.is_hot,
            relevance: suggestion.relevance,
        }
    }
}
