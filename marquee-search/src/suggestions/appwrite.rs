//! Appwrite document store for search counters.
//!
//! Each counter is one document in a collection with the attributes
//! `searchTerm`, `count` and `poster_url`. Increments are a read followed by a
//! create or update; two concurrent searches for the same new term can race
//! and create two documents.

use async_trait::async_trait;
use marquee_core::config::StoreConfig;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{debug, instrument};
use url::Url;

use super::{SuggestionRecord, SuggestionStore};
use crate::errors::SuggestionError;

const PROJECT_HEADER: &str = "x-appwrite-project";
const KEY_HEADER: &str = "x-appwrite-key";

/// Suggestion store backed by the Appwrite databases REST API.
#[derive(Debug, Clone)]
pub struct AppwriteSuggestionStore {
    client: reqwest::Client,
    documents_url: Url,
}

#[derive(Debug, Deserialize)]
struct DocumentList {
    #[serde(default)]
    documents: Vec<CounterDocument>,
}

#[derive(Debug, Deserialize)]
struct CounterDocument {
    #[serde(rename = "$id")]
    id: String,
    #[serde(rename = "searchTerm")]
    search_term: String,
    #[serde(default)]
    count: u64,
    #[serde(default)]
    poster_url: Option<String>,
}

impl From<CounterDocument> for SuggestionRecord {
    fn from(doc: CounterDocument) -> Self {
        Self {
            id: doc.id,
            search_term: doc.search_term,
            count: doc.count,
            poster_url: doc.poster_url,
        }
    }
}

fn equal_query(attribute: &str, value: &str) -> String {
    json!({"method": "equal", "attribute": attribute, "values": [value]}).to_string()
}

fn order_desc_query(attribute: &str) -> String {
    json!({"method": "orderDesc", "attribute": attribute}).to_string()
}

fn limit_query(limit: usize) -> String {
    json!({"method": "limit", "values": [limit]}).to_string()
}

fn store_error(action: &str, e: impl std::fmt::Display) -> SuggestionError {
    SuggestionError::Store {
        reason: format!("{action} failed: {e}"),
    }
}

impl AppwriteSuggestionStore {
    /// Creates a store from configuration.
    ///
    /// # Errors
    ///
    /// - `SuggestionError::Store` - Project, database or collection is missing,
    ///   the endpoint is not a valid URL, or the HTTP client cannot be built
    pub fn new(config: &StoreConfig) -> Result<Self, SuggestionError> {
        let (Some(project_id), Some(database_id), Some(collection_id)) = (
            config.project_id.as_deref(),
            config.database_id.as_deref(),
            config.collection_id.as_deref(),
        ) else {
            return Err(SuggestionError::Store {
                reason: "Appwrite project, database and collection must all be set".to_string(),
            });
        };

        let documents_url = Url::parse(&format!(
            "{}/databases/{database_id}/collections/{collection_id}/documents",
            config.endpoint.trim_end_matches('/')
        ))
        .map_err(|e| store_error("Endpoint parsing", e))?;

        let mut headers = HeaderMap::new();
        headers.insert(
            HeaderName::from_static(PROJECT_HEADER),
            HeaderValue::from_str(project_id).map_err(|e| store_error("Project header", e))?,
        );
        if let Some(ref key) = config.api_key {
            let mut value = HeaderValue::from_str(key).map_err(|e| store_error("Key header", e))?;
            value.set_sensitive(true);
            headers.insert(HeaderName::from_static(KEY_HEADER), value);
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| store_error("HTTP client setup", e))?;

        Ok(Self {
            client,
            documents_url,
        })
    }

    fn document_url(&self, id: &str) -> Url {
        let mut url = self.documents_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.push(id);
        }
        url
    }

    async fn list_documents(&self, queries: &[String]) -> Result<Vec<CounterDocument>, SuggestionError> {
        let mut url = self.documents_url.clone();
        {
            let mut pairs = url.query_pairs_mut();
            for query in queries {
                pairs.append_pair("queries[]", query);
            }
        }

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| store_error("Document listing", e))?;
        let list: DocumentList = Self::decode(response).await?;
        Ok(list.documents)
    }

    async fn decode<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, SuggestionError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SuggestionError::Store {
                reason: format!("Appwrite HTTP {status}: {body}"),
            });
        }
        response.json().await.map_err(|e| SuggestionError::Parse {
            reason: format!("Unexpected Appwrite document: {e}"),
        })
    }

    fn document_data(term: &str, count: u64, poster_url: Option<&str>) -> Value {
        json!({
            "searchTerm": term,
            "count": count,
            "poster_url": poster_url,
        })
    }
}

#[async_trait]
impl SuggestionStore for AppwriteSuggestionStore {
    #[instrument(skip(self, poster_url))]
    async fn increment(
        &self,
        term: &str,
        poster_url: Option<String>,
    ) -> Result<SuggestionRecord, SuggestionError> {
        let existing = self
            .list_documents(&[equal_query("searchTerm", term)])
            .await?
            .into_iter()
            .next();

        let document: CounterDocument = match existing {
            Some(doc) => {
                let data = Self::document_data(term, doc.count + 1, poster_url.as_deref());
                debug!(document_id = %doc.id, count = doc.count + 1, "Updating counter");

                let response = self
                    .client
                    .patch(self.document_url(&doc.id))
                    .json(&json!({ "data": data }))
                    .send()
                    .await
                    .map_err(|e| store_error("Document update", e))?;
                Self::decode(response).await?
            }
            None => {
                let data = Self::document_data(term, 1, poster_url.as_deref());
                debug!("Creating counter");

                let response = self
                    .client
                    .post(self.documents_url.clone())
                    .json(&json!({ "documentId": "unique()", "data": data }))
                    .send()
                    .await
                    .map_err(|e| store_error("Document creation", e))?;
                Self::decode(response).await?
            }
        };

        Ok(document.into())
    }

    #[instrument(skip(self))]
    async fn top_by_count(&self, limit: usize) -> Result<Vec<SuggestionRecord>, SuggestionError> {
        let documents = self
            .list_documents(&[order_desc_query("count"), limit_query(limit)])
            .await?;
        Ok(documents.into_iter().map(SuggestionRecord::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeAppwrite;

    fn config_for(server: &FakeAppwrite) -> StoreConfig {
        StoreConfig {
            endpoint: server.endpoint(),
            project_id: Some("marquee".to_string()),
            database_id: Some("db".to_string()),
            collection_id: Some("metrics".to_string()),
            api_key: Some("server-key".to_string()),
        }
    }

    #[test]
    fn test_incomplete_config_is_rejected() {
        let config = StoreConfig {
            project_id: Some("marquee".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            AppwriteSuggestionStore::new(&config),
            Err(SuggestionError::Store { .. })
        ));
    }

    #[test]
    fn test_query_encoding() {
        assert_eq!(
            equal_query("searchTerm", "batman"),
            r#"{"attribute":"searchTerm","method":"equal","values":["batman"]}"#
        );
        assert_eq!(limit_query(5), r#"{"method":"limit","values":[5]}"#);
    }

    #[tokio::test]
    async fn test_increment_creates_then_updates_document() {
        let server = FakeAppwrite::spawn().await;
        let store = AppwriteSuggestionStore::new(&config_for(&server)).unwrap();

        let created = store
            .increment("dune", Some("https://img/dune.jpg".to_string()))
            .await
            .unwrap();
        assert_eq!(created.count, 1);

        let updated = store.increment("dune", None).await.unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.count, 2);
        assert_eq!(updated.poster_url, None);
        assert_eq!(server.documents()[0]["poster_url"], serde_json::Value::Null);

        assert_eq!(server.documents().len(), 1);
        assert!(
            server
                .project_headers()
                .iter()
                .all(|project| project == "marquee")
        );
    }

    #[tokio::test]
    async fn test_top_by_count_uses_store_ordering() {
        let server = FakeAppwrite::spawn().await;
        let store = AppwriteSuggestionStore::new(&config_for(&server)).unwrap();

        for (term, times) in [("alien", 1), ("matrix", 3), ("dune", 2)] {
            for _ in 0..times {
                store.increment(term, None).await.unwrap();
            }
        }

        let top = store.top_by_count(2).await.unwrap();
        let terms: Vec<&str> = top.iter().map(|r| r.search_term.as_str()).collect();
        assert_eq!(terms, vec!["matrix", "dune"]);
    }

    #[tokio::test]
    async fn test_store_failure_is_reported() {
        let server = FakeAppwrite::spawn().await;
        server.set_failing(true);
        let store = AppwriteSuggestionStore::new(&config_for(&server)).unwrap();

        let err = store.increment("dune", None).await.unwrap_err();
        assert!(matches!(err, SuggestionError::Store { .. }));
    }
}
