//! Provider implementations for the movie catalog.

use async_trait::async_trait;

use crate::errors::CatalogError;
use crate::types::{MovieDetails, MovieSummary, VideoClip};

pub mod demo;
#[cfg(any(test, feature = "test-utils"))]
pub mod mock;
pub mod tmdb;

pub use demo::DemoProvider;
#[cfg(any(test, feature = "test-utils"))]
pub use mock::{MockCatalog, MockFailure, movie_summary};
pub use tmdb::TmdbProvider;

/// What a movie list request asks for.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MovieQuery {
    /// Most popular movies, used when the search box is empty
    Popular,
    /// Movies matching a search term
    Search(String),
}

impl MovieQuery {
    /// Builds the query for a (possibly empty) search box value.
    ///
    /// Surrounding whitespace is ignored, so a blank term lists popular movies.
    pub fn from_term(term: &str) -> Self {
        let term = term.trim();
        if term.is_empty() {
            Self::Popular
        } else {
            Self::Search(term.to_string())
        }
    }

    /// Search term, if this is a search.
    pub fn term(&self) -> Option<&str> {
        match self {
            Self::Popular => None,
            Self::Search(term) => Some(term),
        }
    }

    /// Path and query string on the metadata API.
    pub fn endpoint(&self) -> String {
        match self {
            Self::Popular => "/3/discover/movie?sort_by=popularity.desc".to_string(),
            Self::Search(term) => {
                format!("/3/search/movie?query={}", urlencoding::encode(term))
            }
        }
    }
}

/// Trait for movie metadata providers.
///
/// Implementations provide movie data through different backends
/// (TMDB, built-in demo data, mock providers for testing).
#[async_trait]
pub trait MovieCatalog: Send + Sync + std::fmt::Debug {
    /// Lists popular movies or movies matching a search term.
    ///
    /// # Errors
    /// - `CatalogError::Transport` - Network failure or non-success status
    /// - `CatalogError::Upstream` - API reported a logical failure
    /// - `CatalogError::Parse` - Response body could not be decoded
    async fn list_movies(&self, query: &MovieQuery) -> Result<Vec<MovieSummary>, CatalogError>;

    /// Fetches the full record of one movie.
    ///
    /// # Errors
    /// - `CatalogError::NotFound` - No movie with this identifier
    /// - `CatalogError::Transport` - Network failure or non-success status
    /// - `CatalogError::Parse` - Response body could not be decoded
    async fn movie_details(&self, id: u64) -> Result<MovieDetails, CatalogError>;

    /// Fetches the media clips attached to a movie.
    ///
    /// # Errors
    /// - `CatalogError::Transport` - Network failure or non-success status
    /// - `CatalogError::Parse` - Response body could not be decoded
    async fn movie_videos(&self, id: u64) -> Result<Vec<VideoClip>, CatalogError>;
}
