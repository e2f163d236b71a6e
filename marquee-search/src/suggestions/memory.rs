//! In-memory suggestion store for development mode and tests.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;

use super::{SuggestionRecord, SuggestionStore};
use crate::errors::SuggestionError;

/// Keeps counters in a map for the lifetime of the process.
#[derive(Debug, Default)]
pub struct MemorySuggestionStore {
    records: RwLock<HashMap<String, SuggestionRecord>>,
}

impl MemorySuggestionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with `records`, keyed by their term.
    pub fn with_records(records: impl IntoIterator<Item = SuggestionRecord>) -> Self {
        let records = records
            .into_iter()
            .map(|record| (record.search_term.clone(), record))
            .collect();
        Self {
            records: RwLock::new(records),
        }
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }

    pub fn get(&self, term: &str) -> Option<SuggestionRecord> {
        self.records.read().get(term).cloned()
    }
}

#[async_trait]
impl SuggestionStore for MemorySuggestionStore {
    async fn increment(
        &self,
        term: &str,
        poster_url: Option<String>,
    ) -> Result<SuggestionRecord, SuggestionError> {
        let mut records = self.records.write();
        let record = records
            .entry(term.to_string())
            .and_modify(|record| record.count += 1)
            .or_insert_with(|| SuggestionRecord {
                id: uuid::Uuid::new_v4().to_string(),
                search_term: term.to_string(),
                count: 1,
                poster_url: None,
            });

        record.poster_url = poster_url;

        Ok(record.clone())
    }

    async fn top_by_count(&self, limit: usize) -> Result<Vec<SuggestionRecord>, SuggestionError> {
        let mut records: Vec<SuggestionRecord> = self.records.read().values().cloned().collect();

        // Ties resolve alphabetically so the listing is stable between page loads
        records.sort_by(|a, b| {
            b.count
                .cmp(&a.count)
                .then_with(|| a.search_term.cmp(&b.search_term))
        });
        records.truncate(limit);

        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_seeded_store_continues_counting() {
        let store = MemorySuggestionStore::with_records([SuggestionRecord {
            id: "doc-1".to_string(),
            search_term: "inception".to_string(),
            count: 41,
            poster_url: None,
        }]);

        let record = store
            .increment("inception", Some("https://img/p.jpg".to_string()))
            .await
            .unwrap();

        assert_eq!(record.id, "doc-1");
        assert_eq!(record.count, 42);
        assert_eq!(store.len(), 1);
        assert_eq!(
            store.get("inception").unwrap().poster_url.as_deref(),
            Some("https://img/p.jpg")
        );
    }

    #[tokio::test]
    async fn test_top_by_count_breaks_ties_by_term() {
        let store = MemorySuggestionStore::new();
        for term in ["zodiac", "alien", "memento"] {
            store.increment(term, None).await.unwrap();
        }

        let top = store.top_by_count(2).await.unwrap();
        assert_eq!(top[0].search_term, "alien");
        assert_eq!(top[1].search_term, "memento");
    }
}
