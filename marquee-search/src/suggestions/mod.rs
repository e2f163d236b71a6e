//! Trending search tracking.
//!
//! Every successful non-empty search bumps a per-term counter in a document
//! store, together with the poster of the first result. The home page shows
//! the terms with the highest counters.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::errors::SuggestionError;
use crate::types::MovieSummary;

pub mod appwrite;
pub mod memory;

pub use appwrite::AppwriteSuggestionStore;
pub use memory::MemorySuggestionStore;

/// Counter document for one search term.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestionRecord {
    /// Store-assigned document id
    pub id: String,
    /// Exact term the user searched for
    pub search_term: String,
    /// Number of successful searches for the term
    pub count: u64,
    /// Poster of the first result of the latest search
    pub poster_url: Option<String>,
}

/// Document store holding the search counters.
#[async_trait]
pub trait SuggestionStore: Send + Sync + std::fmt::Debug {
    /// Increments the counter keyed by `term`, creating it at 1 when absent.
    ///
    /// The stored poster is always replaced, so `None` clears it.
    ///
    /// # Errors
    /// - `SuggestionError::Store` - The store rejected or did not answer the request
    /// - `SuggestionError::Parse` - The store answered with an unreadable document
    async fn increment(
        &self,
        term: &str,
        poster_url: Option<String>,
    ) -> Result<SuggestionRecord, SuggestionError>;

    /// Returns up to `limit` records ordered by count, highest first.
    ///
    /// # Errors
    /// - `SuggestionError::Store` - The store rejected or did not answer the request
    /// - `SuggestionError::Parse` - The store answered with unreadable documents
    async fn top_by_count(&self, limit: usize) -> Result<Vec<SuggestionRecord>, SuggestionError>;
}

/// Records searches and reads trending terms.
#[derive(Debug, Clone)]
pub struct SuggestionTracker {
    store: Arc<dyn SuggestionStore>,
    poster_base_url: String,
}

impl SuggestionTracker {
    pub fn new(store: Arc<dyn SuggestionStore>, poster_base_url: impl Into<String>) -> Self {
        Self {
            store,
            poster_base_url: poster_base_url.into(),
        }
    }

    /// Tracker backed by a fresh in-memory store.
    pub fn in_memory(poster_base_url: impl Into<String>) -> Self {
        Self::new(Arc::new(MemorySuggestionStore::new()), poster_base_url)
    }

    /// Counts one successful search for `term`.
    ///
    /// `representative` is the first result; its poster becomes the thumbnail
    /// shown next to the term.
    ///
    /// # Errors
    /// - `SuggestionError::Store` - The store rejected or did not answer the request
    /// - `SuggestionError::Parse` - The store answered with an unreadable document
    #[instrument(skip(self, representative), fields(movie_id = representative.id))]
    pub async fn record_search(
        &self,
        term: &str,
        representative: &MovieSummary,
    ) -> Result<SuggestionRecord, SuggestionError> {
        let poster_url = representative.poster_url(&self.poster_base_url);
        let record = self.store.increment(term, poster_url).await?;
        debug!(count = record.count, "Recorded search");
        Ok(record)
    }

    /// Most searched terms, highest count first.
    ///
    /// # Errors
    /// - `SuggestionError::Store` - The store rejected or did not answer the request
    /// - `SuggestionError::Parse` - The store answered with unreadable documents
    pub async fn top_suggestions(
        &self,
        limit: usize,
    ) -> Result<Vec<SuggestionRecord>, SuggestionError> {
        if limit == 0 {
            return Ok(Vec::new());
        }
        let mut records = self.store.top_by_count(limit).await?;
        records.truncate(limit);
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::movie_summary;

    const POSTER_BASE: &str = "https://image.tmdb.org/t/p/w500";

    #[tokio::test]
    async fn test_record_search_inserts_then_increments() {
        let tracker = SuggestionTracker::in_memory(POSTER_BASE);

        let first = tracker
            .record_search("batman", &movie_summary(268, "Batman"))
            .await
            .unwrap();
        assert_eq!(first.count, 1);
        assert_eq!(
            first.poster_url.as_deref(),
            Some("https://image.tmdb.org/t/p/w500/poster-268.jpg")
        );

        let second = tracker
            .record_search("batman", &movie_summary(155, "The Dark Knight"))
            .await
            .unwrap();
        assert_eq!(second.id, first.id);
        assert_eq!(second.count, 2);
        assert_eq!(
            second.poster_url.as_deref(),
            Some("https://image.tmdb.org/t/p/w500/poster-155.jpg")
        );
    }

    #[tokio::test]
    async fn test_terms_are_matched_exactly() {
        let tracker = SuggestionTracker::in_memory(POSTER_BASE);
        let movie = movie_summary(1, "Alien");

        tracker.record_search("alien", &movie).await.unwrap();
        tracker.record_search("Alien", &movie).await.unwrap();

        let top = tracker.top_suggestions(10).await.unwrap();
        assert_eq!(top.len(), 2);
        assert!(top.iter().all(|r| r.count == 1));
    }

    #[tokio::test]
    async fn test_latest_search_overwrites_thumbnail() {
        let tracker = SuggestionTracker::in_memory(POSTER_BASE);

        tracker
            .record_search("dune", &movie_summary(438631, "Dune"))
            .await
            .unwrap();

        let mut posterless = movie_summary(1, "Dune: Part Three");
        posterless.poster_path = None;
        let record = tracker.record_search("dune", &posterless).await.unwrap();

        assert_eq!(record.count, 2);
        assert_eq!(record.poster_url, None);

        let record = tracker
            .record_search("dune", &movie_summary(693134, "Dune: Part Two"))
            .await
            .unwrap();
        assert_eq!(record.count, 3);
        assert!(record.poster_url.unwrap().ends_with("/poster-693134.jpg"));
    }

    #[tokio::test]
    async fn test_top_suggestions_orders_by_count_and_limits() {
        let tracker = SuggestionTracker::in_memory(POSTER_BASE);
        let movie = movie_summary(1, "Any");

        for (term, times) in [("matrix", 3), ("dune", 5), ("alien", 1), ("up", 2)] {
            for _ in 0..times {
                tracker.record_search(term, &movie).await.unwrap();
            }
        }

        let top = tracker.top_suggestions(3).await.unwrap();
        let terms: Vec<&str> = top.iter().map(|r| r.search_term.as_str()).collect();
        assert_eq!(terms, vec!["dune", "matrix", "up"]);

        assert!(tracker.top_suggestions(0).await.unwrap().is_empty());
    }
}
