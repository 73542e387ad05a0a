//! Search relevance scoring and suggestion ranking.

use serde::{Deserialize, Serialize};

use crate::records::{Category, Promocode, Store};

mod history;

pub use history::{SearchHistory, popular_queries};

/// Minimum score a suggestion needs on the primary search path.
pub const SUGGESTION_THRESHOLD: u8 = 30;

/// Minimum score on the degraded fallback path, which has noisier input.
pub const FALLBACK_THRESHOLD: u8 = 20;

/// Score `text` against `query` on a 0–100 scale.
///
/// Tiers: exact match 100, prefix 90, whole-word 80, substring 70, partial
/// word overlap 20–60 proportional to the fraction of query words matched,
/// otherwise 0. Comparison is case-insensitive and whitespace-trimmed.
#[must_use]
pub fn relevance(text: &str, query: &str) -> u8 {
    let text = normalize(text);
    let query = normalize(query);

    if text.is_empty() || query.is_empty() {
        return 0;
    }

    if text == query {
        return 100;
    }

    if text.starts_with(&query) {
        return 90;
    }

    let words: Vec<&str> = text.split_whitespace().collect();

    if words.contains(&query.as_str()) {
        return 80;
    }

    if text.contains(&query) {
        return 70;
    }

    let query_words: Vec<&str> = query.split_whitespace().collect();
    let matched = query_words
        .iter()
        .filter(|query_word| {
            // Very short query words match everything; skip them.
            query_word.chars().count() >= 2
                && words.iter().any(|word| {
                    word.contains(*query_word) || query_word.contains(word)
                })
        })
        .count();

    if matched == 0 || query_words.is_empty() {
        return 0;
    }

    // matched/total * 60, rounded half-up, floored at 20. Never exceeds 60,
    // so the u8 conversion cannot fail.
    let total = query_words.len();
    let scaled = (matched * 60 + total / 2) / total;

    u8::try_from(scaled.max(20)).unwrap_or(60)
}

fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// What a suggestion points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionKind {
    Promocode,
    Store,
    Category,
}

/// A ranked search suggestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub id: String,
    pub kind: SuggestionKind,
    pub title: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    pub href: String,
    #[serde(default)]
    pub is_hot: bool,
    pub relevance: u8,
}

/// Scoring knobs for the two suggestion call sites.
#[derive(Debug, Clone, Copy)]
pub struct SuggestionOptions {
    /// Scores strictly below this are discarded.
    pub threshold: u8,
    /// Apply the primary path's kind bonuses (+5 categories, +10 hot,
    /// +15 recommended promocodes).
    pub boosted: bool,
}

impl SuggestionOptions {
    /// Options for the primary, search-endpoint-backed path.
    #[must_use]
    pub fn primary() -> Self {
        Self {
            threshold: SUGGESTION_THRESHOLD,
            boosted: true,
        }
    }

    /// Options for the fallback fan-out path.
    #[must_use]
    pub fn fallback() -> Self {
        Self {
            threshold: FALLBACK_THRESHOLD,
            boosted: false,
        }
    }
}

/// Build a suggestion for a category, when it clears the threshold.
#[must_use]
pub fn suggest_category(
    category: &Category,
    query: &str,
    options: SuggestionOptions,
) -> Option<Suggestion> {
    let score = relevance(&category.name, query).max(
        category
            .description
            .as_deref()
            .map_or(0, |description| relevance(description, query)),
    );

    if score < options.threshold {
        return None;
    }

    let bonus = if options.boosted { 5 } else { 0 };

    Some(Suggestion {
        id: format!("category-{}", category.id),
        kind: SuggestionKind::Category,
        title: category.name.clone(),
        subtitle: category.description.clone().or_else(|| {
            Some(format!(
                "{} promo codes",
                category.promocodes_count.unwrap_or(0)
            ))
        }),
        href: format!("/categories/{}", category.slug),
        is_hot: false,
        relevance: score.saturating_add(bonus),
    })
}

/// Build a suggestion for a store, when it clears the threshold.
#[must_use]
pub fn suggest_store(store: &Store, query: &str, options: SuggestionOptions) -> Option<Suggestion> {
    let score = relevance(&store.name, query).max(
        store
            .description
            .as_deref()
            .map_or(0, |description| relevance(description, query)),
    );

    if score < options.threshold {
        return None;
    }

    Some(Suggestion {
        id: format!("store-{}", store.id),
        kind: SuggestionKind::Store,
        title: store.name.clone(),
        subtitle: store.description.clone().or_else(|| {
            Some(format!(
                "{} promo codes",
                store.promocodes_count.unwrap_or(0)
            ))
        }),
        href: format!("/stores/{}", store.slug),
        is_hot: false,
        relevance: score,
    })
}

/// Build a suggestion for a promocode, when it clears the threshold.
#[must_use]
pub fn suggest_promocode(
    promo: &Promocode,
    query: &str,
    options: SuggestionOptions,
) -> Option<Suggestion> {
    let store_name = promo.store.as_ref().map(|store| store.name.as_str());

    let score = relevance(&promo.title, query)
        .max(
            promo
                .description
                .as_deref()
                .map_or(0, |description| relevance(description, query)),
        )
        .max(store_name.map_or(0, |name| relevance(name, query)));

    if score < options.threshold {
        return None;
    }

    let mut bonus = 0u8;
    if options.boosted {
        if promo.is_hot {
            bonus = bonus.saturating_add(10);
        }
        if promo.is_recommended {
            bonus = bonus.saturating_add(15);
        }
    }

    let subtitle = format!(
        "{} • {}",
        store_name.unwrap_or("Store"),
        promo.discount_text.as_deref().unwrap_or("Discount")
    );

    Some(Suggestion {
        id: format!("promo-{}", promo.id),
        kind: SuggestionKind::Promocode,
        title: promo.title.clone(),
        subtitle: Some(subtitle),
        href: format!("/promo/{}", promo.id),
        is_hot: promo.is_hot,
        relevance: score.saturating_add(bonus),
    })
}

/// Sort suggestions by descending relevance and truncate to `limit`.
///
/// The sort is stable, so equally-scored suggestions keep arrival order.
#[must_use]
pub fn rank(mut suggestions: Vec<Suggestion>, limit: usize) -> Vec<Suggestion> {
    suggestions.sort_by(|a, b| b.relevance.cmp(&a.relevance));
    suggestions.truncate(limit);
    suggestions
}
