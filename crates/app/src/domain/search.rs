//! Global search service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use serde::Deserialize;
use tracing::warn;

use crate::{
    client::{ApiClient, QueryParams},
    records::{Category, Paginated, Promocode, RawPromocode, Store},
    search::{
        SearchHistory, Suggestion, SuggestionOptions, popular_queries, rank, suggest_category,
        suggest_promocode, suggest_store,
    },
};

/// Result caps per kind when searching everything at once.
const ALL_PROMOCODES_CAP: usize = 10;
const ALL_STORES_CAP: usize = 5;
const ALL_CATEGORIES_CAP: usize = 5;

/// Which kinds of results a search should return.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SearchKind {
    #[default]
    All,
    Promocodes,
    Stores,
    Categories,
}

impl SearchKind {
    /// Parse the `type` query parameter; anything unrecognized means all.
    #[must_use]
    pub fn parse(kind: Option<&str>) -> Self {
        match kind {
            Some("promocodes") => Self::Promocodes,
            Some("stores") => Self::Stores,
            Some("categories") => Self::Categories,
            _ => Self::All,
        }
    }
}

/// Grouped results for the search page.
#[derive(Debug, Clone, Default)]
pub struct SearchResults {
    pub promocodes: Vec<Promocode>,
    pub stores: Vec<Store>,
    pub categories: Vec<Category>,
}

impl SearchResults {
    #[must_use]
    pub fn total(&self) -> usize {
        self.promocodes.len() + self.stores.len() + self.categories.len()
    }
}

/// Payload of the backend's global `/search/` endpoint.
#[derive(Debug, Default, Deserialize)]
struct SearchEnvelope {
    #[serde(default)]
    promocodes: Vec<RawPromocode>,
    #[serde(default)]
    stores: Vec<Store>,
    #[serde(default)]
    categories: Vec<Category>,
}

#[derive(Debug)]
pub struct HttpSearchService {
    client: Arc<ApiClient>,
    history: SearchHistory,
}

impl HttpSearchService {
    #[must_use]
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self {
            client,
            history: SearchHistory::new(),
        }
    }

    async fn global_search(&self, query: &str) -> Option<SearchEnvelope> {
        let mut params = QueryParams::new();
        params.push("q", query);

        self.client
            .get("search", &params)
            .await
            .map_err(|error| warn!("global search failed, falling back to list endpoints: {error}"))
            .ok()
    }

    /// Fan out to the three list endpoints when `/search/` is unavailable.
    async fn fallback_search(&self, query: &str) -> SearchEnvelope {
        let promocodes = async {
            let mut params = QueryParams::new();
            params.push("search", query);
            params.push_num("page_size", ALL_PROMOCODES_CAP as u32);
            self.client
                .get::<Paginated<RawPromocode>>("promocodes", &params)
                .await
        };

        let stores = async {
            let mut params = QueryParams::new();
            params.push("search", query);
            params.push_num("page_size", ALL_STORES_CAP as u32);
            self.client.get::<Paginated<Store>>("stores", &params).await
        };

        let categories = async {
            let mut params = QueryParams::new();
            params.push("search", query);
            params.push_num("page_size", ALL_CATEGORIES_CAP as u32);
            self.client
                .get::<Paginated<Category>>("categories", &params)
                .await
        };

        let (promocodes, stores, categories) = tokio::join!(promocodes, stores, categories);

        SearchEnvelope {
            promocodes: promocodes
                .map_err(|error| warn!("promocode search fallback failed: {error}"))
                .map(|page| page.results)
                .unwrap_or_default(),
            stores: stores
                .map_err(|error| warn!("store search fallback failed: {error}"))
                .map(|page| page.results)
                .unwrap_or_default(),
            categories: categories
                .map_err(|error| warn!("category search fallback failed: {error}"))
                .map(|page| page.results)
                .unwrap_or_default(),
        }
    }

    fn build_suggestions(
        envelope: SearchEnvelope,
        query: &str,
        options: SuggestionOptions,
        limit: usize,
    ) -> Vec<Suggestion> {
        let mut suggestions: Vec<Suggestion> = Vec::new();

        suggestions.extend(
            envelope
                .promocodes
                .into_iter()
                .map(Promocode::from)
                .filter_map(|promo| suggest_promocode(&promo, query, options)),
        );
        suggestions.extend(
            envelope
                .stores
                .iter()
                .filter_map(|store| suggest_store(store, query, options)),
        );
        suggestions.extend(
            envelope
                .categories
                .iter()
                .filter_map(|category| suggest_category(category, query, options)),
        );

        rank(suggestions, limit)
    }
}

#[async_trait]
impl SearchService for HttpSearchService {
    async fn suggestions(&self, query: &str, limit: usize) -> Vec<Suggestion> {
        let query = query.trim();

        if query.chars().count() < 2 {
            return Vec::new();
        }

        if let Some(envelope) = self.global_search(query).await {
            return Self::build_suggestions(envelope, query, SuggestionOptions::primary(), limit);
        }

        let envelope = self.fallback_search(query).await;

        Self::build_suggestions(envelope, query, SuggestionOptions::fallback(), limit)
    }

    async fn search_all(&self, query: &str, kind: SearchKind) -> SearchResults {
        let query = query.trim();

        if query.chars().count() < 2 {
            return SearchResults::default();
        }

        let envelope = match self.global_search(query).await {
            Some(envelope) => envelope,
            None => self.fallback_search(query).await,
        };

        let mut results = SearchResults {
            promocodes: envelope
                .promocodes
                .into_iter()
                .map(Promocode::from)
                .collect(),
            stores: envelope.stores,
            categories: envelope.categories,
        };

        match kind {
            SearchKind::All => {
                results.promocodes.truncate(ALL_PROMOCODES_CAP);
                results.stores.truncate(ALL_STORES_CAP);
                results.categories.truncate(ALL_CATEGORIES_CAP);
            }
            SearchKind::Promocodes => {
                results.stores.clear();
                results.categories.clear();
            }
            SearchKind::Stores => {
                results.promocodes.clear();
                results.categories.clear();
            }
            SearchKind::Categories => {
                results.promocodes.clear();
                results.stores.clear();
            }
        }

        results
    }

    fn record_query(&self, query: &str) {
        self.history.record(query);
    }

    fn recent_queries(&self) -> Vec<String> {
        let recent = self.history.recent();

        if recent.is_empty() {
            popular_queries()
        } else {
            recent
        }
    }
}

/// Cross-resource search, suggestions, and the recent-query list.
#[automock]
#[async_trait]
pub trait SearchService: Send + Sync {
    /// Ranked suggestions for the search box dropdown. Queries shorter than
    /// two characters yield nothing.
    async fn suggestions(&self, query: &str, limit: usize) -> Vec<Suggestion>;

    /// Grouped results for the search page, capped per kind in `All` mode.
    async fn search_all(&self, query: &str, kind: SearchKind) -> SearchResults;

    /// Remember a submitted query.
    fn record_query(&self, query: &str);

    /// Recent queries, or the curated popular list before any history exists.
    fn recent_queries(&self) -> Vec<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_parses_known_values_and_defaults_to_all() {
        assert_eq!(SearchKind::parse(Some("stores")), SearchKind::Stores);
        assert_eq!(SearchKind::parse(Some("promocodes")), SearchKind::Promocodes);
        assert_eq!(SearchKind::parse(Some("categories")), SearchKind::Categories);
        assert_eq!(SearchKind::parse(Some("bogus")), SearchKind::All);
        assert_eq!(SearchKind::parse(None), SearchKind::All);
    }

    #[test]
    fn suggestions_from_envelope_are_ranked_and_thresholded() {
        let envelope = SearchEnvelope {
            promocodes: Vec::new(),
            stores: vec![
                Store {
                    id: 1,
                    name: "ComputerWorld".to_owned(),
                    slug: "computerworld".to_owned(),
                    ..Store::default()
                },
                Store {
                    id: 2,
                    name: "Garden Center".to_owned(),
                    slug: "garden-center".to_owned(),
                    ..Store::default()
                },
            ],
            categories: vec![Category {
                id: 3,
                name: "Computers".to_owned(),
                slug: "computers".to_owned(),
                ..Category::default()
            }],
        };

        let suggestions = HttpSearchService::build_suggestions(
            envelope,
            "comp",
            SuggestionOptions::primary(),
            10,
        );

        assert_eq!(suggestions.len(), 2);
        assert!(suggestions.iter().all(|s| s.relevance >= 90));
        assert!(
            suggestions
                .windows(2)
                .all(|pair| pair[0].relevance >= pair[1].relevance)
        );
    }
}
