//! Mock provider implementation for testing.

use std::collections::{HashMap, HashSet};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use super::{MovieCatalog, MovieQuery};
use crate::errors::CatalogError;
use crate::types::{MovieDetails, MovieSummary, VideoClip};

/// Failure a mock list request should produce.
#[derive(Debug, Clone, PartialEq)]
pub enum MockFailure {
    /// Behaves like a refused connection
    Transport,
    /// Behaves like a 200 response with a logical failure flag
    Upstream(String),
}

impl MockFailure {
    fn to_error(&self, query: &MovieQuery) -> CatalogError {
        match self {
            MockFailure::Transport => CatalogError::Transport {
                endpoint: query.endpoint(),
                status: None,
                reason: "connection refused".to_string(),
            },
            MockFailure::Upstream(message) => CatalogError::Upstream {
                message: message.clone(),
            },
        }
    }
}

/// Scripted catalog for tests.
///
/// Unscripted list queries answer with an empty list; every list request is
/// logged so tests can assert on what was asked.
#[derive(Debug, Default)]
pub struct MockCatalog {
    lists: HashMap<MovieQuery, Vec<MovieSummary>>,
    failures: HashMap<MovieQuery, MockFailure>,
    delays: HashMap<MovieQuery, Duration>,
    details: HashMap<u64, MovieDetails>,
    videos: HashMap<u64, Vec<VideoClip>>,
    failing_videos: HashSet<u64>,
    requests: Mutex<Vec<MovieQuery>>,
}

impl MockCatalog {
    /// Creates a new mock provider for testing.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_list(mut self, query: MovieQuery, movies: Vec<MovieSummary>) -> Self {
        self.lists.insert(query, movies);
        self
    }

    pub fn with_failure(mut self, query: MovieQuery, failure: MockFailure) -> Self {
        self.failures.insert(query, failure);
        self
    }

    /// Delays the answer to `query`, to simulate a slow response.
    pub fn with_delay(mut self, query: MovieQuery, delay: Duration) -> Self {
        self.delays.insert(query, delay);
        self
    }

    pub fn with_movie(mut self, details: MovieDetails, videos: Vec<VideoClip>) -> Self {
        self.videos.insert(details.id, videos);
        self.details.insert(details.id, details);
        self
    }

    /// Makes the clip request for `id` fail with a transport error.
    pub fn with_failing_videos(mut self, id: u64) -> Self {
        self.failing_videos.insert(id);
        self
    }

    /// List queries received so far, in arrival order.
    pub fn requests(&self) -> Vec<MovieQuery> {
        self.requests.lock().clone()
    }
}

/// Builds a minimal list record for tests.
pub fn movie_summary(id: u64, title: &str) -> MovieSummary {
    MovieSummary {
        id,
        title: title.to_string(),
        poster_path: Some(format!("/poster-{id}.jpg")),
        release_date: Some("2020-01-01".to_string()),
        original_language: Some("en".to_string()),
        vote_average: Some(7.5),
    }
}

#[async_trait]
impl MovieCatalog for MockCatalog {
    async fn list_movies(&self, query: &MovieQuery) -> Result<Vec<MovieSummary>, CatalogError> {
        self.requests.lock().push(query.clone());

        if let Some(delay) = self.delays.get(query) {
            tokio::time::sleep(*delay).await;
        }

        if let Some(failure) = self.failures.get(query) {
            return Err(failure.to_error(query));
        }

        Ok(self.lists.get(query).cloned().unwrap_or_default())
    }

    async fn movie_details(&self, id: u64) -> Result<MovieDetails, CatalogError> {
        self.details
            .get(&id)
            .cloned()
            .ok_or(CatalogError::NotFound { id })
    }

    async fn movie_videos(&self, id: u64) -> Result<Vec<VideoClip>, CatalogError> {
        if self.failing_videos.contains(&id) {
            return Err(CatalogError::Transport {
                endpoint: format!("/3/movie/{id}/videos"),
                status: Some(500),
                reason: "TMDB HTTP 500 Internal Server Error".to_string(),
            });
        }
        Ok(self.videos.get(&id).cloned().unwrap_or_default())
    }
}
