//! Read-only mirrors of the backend entities.
//!
//! Nothing here has a lifecycle on our side: records are fetched, rendered
//! and discarded. Optional backend fields default to `None`/empty on decode
//! so a partially-filled record never fails a whole page.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

mod promocode;

pub use promocode::{
    OfferType, Promocode, RawPromocode, Urgency, is_expiring_soon, urgency_level,
};

/// Django-REST-framework paginated envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paginated<T> {
    /// Total number of items across all pages.
    #[serde(default)]
    pub count: u64,
    /// URL of the next page, when there is one.
    #[serde(default)]
    pub next: Option<String>,
    /// URL of the previous page, when there is one.
    #[serde(default)]
    pub previous: Option<String>,
    /// Items on this page.
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
}

impl<T> Default for Paginated<T> {
    fn default() -> Self {
        Self {
            count: 0,
            next: None,
            previous: None,
            results: Vec::new(),
        }
    }
}

impl<T> Paginated<T> {
    /// Map the page items, keeping the envelope intact.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Paginated<U> {
        Paginated {
            count: self.count,
            next: self.next,
            previous: self.previous,
            results: self.results.into_iter().map(f).collect(),
        }
    }
}

/// A merchant whose promo codes we aggregate.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Store {
    pub id: i64,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub promocodes_count: Option<u32>,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub total_views: Option<u64>,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
    #[serde(default)]
    pub updated_at: Option<Timestamp>,
    #[serde(default)]
    pub meta_title: Option<String>,
    #[serde(default)]
    pub meta_description: Option<String>,
}

/// A thematic grouping of promo codes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub promocodes_count: Option<u32>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
    #[serde(default)]
    pub updated_at: Option<Timestamp>,
    #[serde(default)]
    pub meta_title: Option<String>,
    #[serde(default)]
    pub meta_description: Option<String>,
}

/// Rotating hero banner.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Banner {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub cta_text: Option<String>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub order: i32,
}

/// Partner logo shown in the footer carousel.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Partner {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub order: i32,
    #[serde(default)]
    pub is_active: bool,
}

/// Curated, backend-defined collection of promo codes under a themed banner.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Showcase {
    pub id: i64,
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub banner: Option<String>,
    #[serde(default)]
    pub promos_count: u32,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
    #[serde(default)]
    pub updated_at: Option<Timestamp>,
}

/// Static content page (privacy policy, terms, FAQ copy).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Page {
    pub id: i64,
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub is_published: bool,
}

/// Site-wide counters shown on the home and catalog pages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalStats {
    #[serde(default)]
    pub total_stores: u64,
    #[serde(default)]
    pub total_promocodes: u64,
    #[serde(default)]
    pub total_categories: u64,
    #[serde(default)]
    pub active_stores: u64,
    #[serde(default)]
    pub active_promocodes: u64,
    #[serde(default)]
    pub active_categories: u64,
}

/// Per-store counters for the store detail page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreStats {
    #[serde(default)]
    pub promocodes_count: u64,
    #[serde(default)]
    pub total_views: u64,
    #[serde(default)]
    pub active_promocodes: u64,
    #[serde(default)]
    pub hot_promocodes: u64,
}
