//! Promocode record, normalization and urgency classification.
//!
//! The backend grew several generations of field names (`valid_until` vs
//! `expires_at`, half a dozen outbound-link aliases). `RawPromocode` accepts
//! them all; `Promocode` is the single shape the rest of the code sees.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::{Category, Store};

/// Kind of offer a promocode represents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OfferType {
    /// A code to paste at checkout.
    #[default]
    Coupon,
    /// A deal that needs no code.
    Deal,
    /// A financial product offer.
    Financial,
    /// A cashback offer.
    Cashback,
}

impl OfferType {
    /// The wire name of this offer type.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Coupon => "coupon",
            Self::Deal => "deal",
            Self::Financial => "financial",
            Self::Cashback => "cashback",
        }
    }
}

/// How close a promocode is to expiring.
///
/// Variants are ordered least to most urgent, so `Ord` gives the sort rank
/// directly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    /// No deadline pressure (also: expired, or no expiry at all).
    #[default]
    Normal,
    /// Expires within 7 days.
    Soon,
    /// Expires within 24 hours.
    Urgent,
    /// Expires within 6 hours.
    Critical,
}

impl Urgency {
    /// The wire name of this urgency level.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Soon => "soon",
            Self::Urgent => "urgent",
            Self::Critical => "critical",
        }
    }

    /// Parse the query-string form (`critical`, `urgent`, ...).
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "critical" => Some(Self::Critical),
            "urgent" => Some(Self::Urgent),
            "soon" => Some(Self::Soon),
            "normal" => Some(Self::Normal),
            _ => None,
        }
    }
}

/// Classify `expires_at` relative to `now`.
#[must_use]
pub fn urgency_level(expires_at: Option<Timestamp>, now: Timestamp) -> Urgency {
    let Some(expires_at) = expires_at else {
        return Urgency::Normal;
    };

    let seconds = expires_at.as_second() - now.as_second();

    if seconds < 0 {
        return Urgency::Normal;
    }

    if seconds <= 6 * 3600 {
        Urgency::Critical
    } else if seconds <= 24 * 3600 {
        Urgency::Urgent
    } else if seconds <= 168 * 3600 {
        Urgency::Soon
    } else {
        Urgency::Normal
    }
}

/// Whether the expiry falls within the next 7 days (and is still ahead).
#[must_use]
pub fn is_expiring_soon(expires_at: Option<Timestamp>, now: Timestamp) -> bool {
    let Some(expires_at) = expires_at else {
        return false;
    };

    let seconds = expires_at.as_second() - now.as_second();

    if seconds <= 0 {
        return false;
    }

    // ceil(seconds / day): a partial day still counts as a day left.
    let days = (seconds + 86_399) / 86_400;

    days <= 7
}

/// A discount code or deal record, normalized for display.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Promocode {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub discount_text: Option<String>,
    #[serde(default)]
    pub is_hot: bool,
    #[serde(default)]
    pub has_promocode: bool,
    #[serde(default)]
    pub is_recommended: bool,
    #[serde(default)]
    pub views_count: u64,
    #[serde(default)]
    pub action_url: Option<String>,
    #[serde(default)]
    pub offer_type: OfferType,
    #[serde(default)]
    pub offer_type_display: String,
    #[serde(default)]
    pub long_description: Option<String>,
    #[serde(default)]
    pub steps: Option<String>,
    #[serde(default)]
    pub fine_print: Option<String>,
    #[serde(default)]
    pub disclaimer: Option<String>,
    #[serde(default)]
    pub expires_at: Option<Timestamp>,
    #[serde(default)]
    pub store: Option<Store>,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
}

impl Promocode {
    /// Classify this promocode's expiry relative to `now`.
    #[must_use]
    pub fn urgency(&self, now: Timestamp) -> Urgency {
        urgency_level(self.expires_at, now)
    }

    /// Whether this promocode expires within the next 7 days.
    #[must_use]
    pub fn is_expiring_soon(&self, now: Timestamp) -> bool {
        is_expiring_soon(self.expires_at, now)
    }
}

/// Promocode exactly as the backend sends it, aliases and all.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPromocode {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub discount_text: Option<String>,
    #[serde(default)]
    pub discount_label: Option<String>,
    #[serde(default)]
    pub discount_value: Option<i64>,
    #[serde(default)]
    pub is_hot: bool,
    #[serde(default)]
    pub has_promocode: Option<bool>,
    #[serde(default)]
    pub is_recommended: bool,
    #[serde(default)]
    pub views_count: Option<u64>,
    #[serde(default)]
    pub views: Option<u64>,
    #[serde(default)]
    pub external_link: Option<String>,
    #[serde(default)]
    pub affiliate_url: Option<String>,
    #[serde(default)]
    pub partner_url: Option<String>,
    #[serde(default)]
    pub cta_url: Option<String>,
    #[serde(default)]
    pub action_url: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub offer_type: Option<OfferType>,
    #[serde(default)]
    pub offer_type_display: Option<String>,
    #[serde(default)]
    pub long_description: Option<String>,
    #[serde(default)]
    pub steps: Option<String>,
    #[serde(default)]
    pub fine_print: Option<String>,
    #[serde(default)]
    pub disclaimer: Option<String>,
    #[serde(default)]
    pub valid_until: Option<Timestamp>,
    #[serde(default)]
    pub expires_at: Option<Timestamp>,
    #[serde(default)]
    pub store: Option<Store>,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
    #[serde(default)]
    pub updated_at: Option<Timestamp>,
}

impl From<RawPromocode> for Promocode {
    fn from(raw: RawPromocode) -> Self {
        let offer_type = raw.offer_type.unwrap_or_default();

        let discount_text = raw
            .discount_text
            .or(raw.discount_label)
            .or_else(|| raw.discount_value.map(|value| format!("{value}%")));

        let action_url = raw
            .external_link
            .or(raw.affiliate_url)
            .or(raw.partner_url)
            .or(raw.cta_url)
            .or(raw.action_url)
            .or(raw.link)
            .or(raw.url);

        let has_promocode = raw
            .has_promocode
            .unwrap_or(raw.code.is_some() && offer_type == OfferType::Coupon);

        let category = raw
            .category
            .or_else(|| raw.categories.into_iter().next());

        Self {
            id: raw.id,
            title: raw.title.unwrap_or_else(|| "Untitled offer".to_owned()),
            description: raw.description.or(raw.subtitle),
            code: raw.code,
            discount_text,
            is_hot: raw.is_hot,
            has_promocode,
            is_recommended: raw.is_recommended,
            views_count: raw.views_count.or(raw.views).unwrap_or(0),
            action_url,
            offer_type,
            offer_type_display: raw
                .offer_type_display
                .unwrap_or_else(|| "Promo code".to_owned()),
            long_description: raw.long_description,
            steps: raw.steps,
            fine_print: raw.fine_print,
            disclaimer: raw.disclaimer,
            expires_at: raw.valid_until.or(raw.expires_at),
            store: raw.store,
            category,
            created_at: raw.created_at.or(raw.updated_at),
        }
    }
}
