//! Process-local recent-search history.

use std::collections::VecDeque;
use std::sync::Mutex;

/// How many recent queries we keep around.
const HISTORY_CAP: usize = 10;

/// Recently searched queries, newest first, deduplicated case-insensitively.
///
/// Process-local by design; restarting the service clears it.
#[derive(Debug, Default)]
pub struct SearchHistory {
    entries: Mutex<VecDeque<String>>,
}

impl SearchHistory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a query, moving it to the front if already present.
    ///
    /// Blank queries are ignored. The stored form is trimmed but keeps the
    /// caller's casing.
    pub fn record(&self, query: &str) {
        let query = query.trim();

        if query.is_empty() {
            return;
        }

        let Ok(mut entries) = self.entries.lock() else {
            return;
        };

        let lowered = query.to_lowercase();
        entries.retain(|existing| existing.to_lowercase() != lowered);
        entries.push_front(query.to_owned());
        entries.truncate(HISTORY_CAP);
    }

    /// The most recent queries, newest first.
    #[must_use]
    pub fn recent(&self) -> Vec<String> {
        self.entries
            .lock()
            .map(|entries| entries.iter().cloned().collect())
            .unwrap_or_default()
    }
}

/// Curated queries shown before the user has any history.
#[must_use]
pub fn popular_queries() -> Vec<String> {
    [
        "electronics",
        "clothing",
        "beauty",
        "food",
        "travel",
        "sport",
        "home and garden",
        "auto",
        "books",
        "games",
        "hot deals",
        "50% off",
        "free shipping",
    ]
    .into_iter()
    .map(str::to_owned)
    .collect()
}
