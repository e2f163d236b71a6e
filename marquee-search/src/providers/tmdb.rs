//! TMDB metadata provider for production use.

use async_trait::async_trait;
use marquee_core::config::ApiConfig;
use reqwest::StatusCode;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

use super::{MovieCatalog, MovieQuery};
use crate::errors::CatalogError;
use crate::types::{MovieDetails, MovieSummary, VideoClip};

/// TMDB provider for real movie discovery.
///
/// Authenticates with a bearer token and maps TMDB responses onto Marquee types.
#[derive(Debug, Clone)]
pub struct TmdbProvider {
    client: reqwest::Client,
    base_url: String,
    access_token: Option<String>,
}

/// List envelope shared by search and discover endpoints.
#[derive(Debug, Deserialize)]
struct ResultPage<T> {
    results: Option<Vec<T>>,
}

/// Logical failure markers an API may set on a successful response.
#[derive(Debug, Default, Deserialize)]
struct UpstreamStatus {
    #[serde(default)]
    success: Option<bool>,
    #[serde(default)]
    status_message: Option<String>,
    #[serde(rename = "Response", default)]
    response: Option<String>,
    #[serde(rename = "Error", default)]
    error: Option<String>,
}

impl UpstreamStatus {
    fn failure_message(self) -> Option<String> {
        if self.success == Some(false) {
            return Some(
                self.status_message
                    .unwrap_or_else(|| "Request was not successful".to_string()),
            );
        }
        if self.response.as_deref() == Some("False") {
            return Some(
                self.error
                    .unwrap_or_else(|| "Failed to fetch movies".to_string()),
            );
        }
        None
    }
}

impl TmdbProvider {
    /// Create TMDB provider from API configuration.
    ///
    /// # Errors
    ///
    /// - `CatalogError::Configuration` - If the HTTP client cannot be built
    pub fn new(config: &ApiConfig) -> Result<Self, CatalogError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.request_timeout)
            .user_agent(config.user_agent)
            .build()
            .map_err(|e| CatalogError::Configuration {
                reason: format!("HTTP client setup failed: {e}"),
            })?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            access_token: config.access_token.clone(),
        })
    }

    /// GET `endpoint` and decode the body, checking logical failure markers.
    async fn get_json<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, CatalogError> {
        let url = format!("{}{endpoint}", self.base_url);

        let mut request = self.client.get(&url);
        if let Some(ref token) = self.access_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|e| CatalogError::Transport {
            endpoint: endpoint.to_string(),
            status: None,
            reason: format!("HTTP request failed: {e}"),
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Transport {
                endpoint: endpoint.to_string(),
                status: Some(status.as_u16()),
                reason: format!("TMDB HTTP {status}"),
            });
        }

        let body: serde_json::Value = response.json().await.map_err(|e| CatalogError::Parse {
            reason: format!("JSON parsing failed: {e}"),
        })?;

        let upstream = UpstreamStatus::deserialize(&body).unwrap_or_default();
        if let Some(message) = upstream.failure_message() {
            warn!(endpoint, message = %message, "TMDB reported a failed request");
            return Err(CatalogError::Upstream { message });
        }

        T::deserialize(body).map_err(|e| CatalogError::Parse {
            reason: format!("Unexpected response shape from {endpoint}: {e}"),
        })
    }
}

#[async_trait]
impl MovieCatalog for TmdbProvider {
    #[instrument(skip(self), fields(endpoint = %query.endpoint()))]
    async fn list_movies(&self, query: &MovieQuery) -> Result<Vec<MovieSummary>, CatalogError> {
        let page: ResultPage<MovieSummary> = self.get_json(&query.endpoint()).await?;
        let movies = page.results.unwrap_or_default();
        debug!(count = movies.len(), "TMDB list response");
        Ok(movies)
    }

    #[instrument(skip(self))]
    async fn movie_details(&self, id: u64) -> Result<MovieDetails, CatalogError> {
        match self.get_json::<MovieDetails>(&format!("/3/movie/{id}")).await {
            Err(CatalogError::Transport {
                status: Some(code), ..
            }) if code == StatusCode::NOT_FOUND.as_u16() => Err(CatalogError::NotFound { id }),
            other => other,
        }
    }

    #[instrument(skip(self))]
    async fn movie_videos(&self, id: u64) -> Result<Vec<VideoClip>, CatalogError> {
        let page: ResultPage<VideoClip> = self.get_json(&format!("/3/movie/{id}/videos")).await?;
        Ok(page.results.unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::testing::{FakeTmdb, sample_movies};

    fn provider_for(server: &FakeTmdb, token: Option<&str>) -> TmdbProvider {
        let config = ApiConfig {
            base_url: server.base_url(),
            access_token: token.map(str::to_string),
            request_timeout: Duration::from_secs(5),
            ..Default::default()
        };
        TmdbProvider::new(&config).unwrap()
    }

    #[tokio::test]
    async fn test_search_hits_search_endpoint_with_bearer_token() {
        let server = FakeTmdb::spawn(sample_movies()).await;
        let provider = provider_for(&server, Some("secret"));

        let movies = provider
            .list_movies(&MovieQuery::from_term("batman"))
            .await
            .unwrap();

        assert!(movies.iter().all(|m| m.title.to_lowercase().contains("batman")));
        assert!(!movies.is_empty());

        let requests = server.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].path_and_query, "/3/search/movie?query=batman");
        assert_eq!(requests[0].authorization.as_deref(), Some("Bearer secret"));
    }

    #[tokio::test]
    async fn test_empty_term_hits_discover_endpoint() {
        let server = FakeTmdb::spawn(sample_movies()).await;
        let provider = provider_for(&server, Some("secret"));

        let movies = provider.list_movies(&MovieQuery::Popular).await.unwrap();

        assert_eq!(movies.len(), sample_movies().len());
        assert_eq!(
            server.requests()[0].path_and_query,
            "/3/discover/movie?sort_by=popularity.desc"
        );
    }

    #[tokio::test]
    async fn test_missing_results_defaults_to_empty() {
        let server = FakeTmdb::spawn(sample_movies()).await;
        server.set_list_body(serde_json::json!({"page": 1}));
        let provider = provider_for(&server, Some("secret"));

        let movies = provider.list_movies(&MovieQuery::Popular).await.unwrap();
        assert!(movies.is_empty());
    }

    #[tokio::test]
    async fn test_non_success_status_is_transport_error() {
        let server = FakeTmdb::spawn(sample_movies()).await;
        let provider = provider_for(&server, None);

        // The fake rejects requests without a bearer token
        let err = provider
            .list_movies(&MovieQuery::Popular)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            CatalogError::Transport {
                status: Some(401),
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_logical_failure_flag_is_upstream_error() {
        let server = FakeTmdb::spawn(sample_movies()).await;
        server.set_list_body(serde_json::json!({
            "Response": "False",
            "Error": "Too many results."
        }));
        let provider = provider_for(&server, Some("secret"));

        let err = provider
            .list_movies(&MovieQuery::from_term("a"))
            .await
            .unwrap_err();

        match err {
            CatalogError::Upstream { message } => assert_eq!(message, "Too many results."),
            other => panic!("expected upstream error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unreachable_host_is_transport_error() {
        let config = ApiConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            access_token: Some("secret".to_string()),
            request_timeout: Duration::from_secs(2),
            ..Default::default()
        };
        let provider = TmdbProvider::new(&config).unwrap();

        let err = provider
            .list_movies(&MovieQuery::Popular)
            .await
            .unwrap_err();
        assert!(err.is_transport());
    }

    #[tokio::test]
    async fn test_details_and_videos() {
        let server = FakeTmdb::spawn(sample_movies()).await;
        let provider = provider_for(&server, Some("secret"));

        let details = provider.movie_details(155).await.unwrap();
        assert_eq!(details.title, "The Dark Knight");

        let videos = provider.movie_videos(155).await.unwrap();
        assert_eq!(videos.len(), 1);
        assert_eq!(videos[0].kind, "Trailer");

        let err = provider.movie_details(999_999).await.unwrap_err();
        assert!(matches!(err, CatalogError::NotFound { id: 999_999 }));
    }

    #[test]
    fn test_upstream_status_detection() {
        let tmdb_failure: UpstreamStatus = serde_json::from_value(serde_json::json!({
            "success": false,
            "status_code": 7,
            "status_message": "Invalid API key"
        }))
        .unwrap();
        assert_eq!(
            tmdb_failure.failure_message().as_deref(),
            Some("Invalid API key")
        );

        let ok: UpstreamStatus =
            serde_json::from_value(serde_json::json!({"page": 1, "results": []})).unwrap();
        assert!(ok.failure_message().is_none());
    }
}
