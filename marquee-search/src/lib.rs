//! Marquee Search - Movie discovery and search tracking
//!
//! Talks to the movie metadata API (or a built-in demo catalog), loads detail
//! pages, and counts successful searches in a document store so the most
//! popular terms can be shown as trending.

#![deny(clippy::missing_errors_doc)]
#![deny(clippy::missing_panics_doc)]
#![warn(clippy::too_many_lines)]

pub mod detail;
pub mod errors;
pub mod providers;
pub mod service;
pub mod suggestions;
#[cfg(any(test, feature = "test-utils"))]
pub mod testing;
pub mod types;

// Re-export main types
pub use detail::DetailLoader;
pub use errors::{CatalogError, DETAIL_ERROR_MESSAGE, SEARCH_ERROR_MESSAGE, SuggestionError};
pub use providers::{DemoProvider, MovieCatalog, MovieQuery, TmdbProvider};
pub use service::{MovieSearchService, SearchController, SearchOutcome, SearchReport};
pub use suggestions::{
    AppwriteSuggestionStore, MemorySuggestionStore, SuggestionRecord, SuggestionStore,
    SuggestionTracker,
};
pub use types::{MovieDetailView, MovieDetails, MovieSummary, VideoClip};

/// Convenience type alias for Results with CatalogError.
pub type Result<T> = std::result::Result<T, CatalogError>;
