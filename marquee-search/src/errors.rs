//! Error types for movie search and suggestion tracking.

use thiserror::Error;

/// Message shown to the user whenever a movie list cannot be loaded.
///
/// Transport and upstream failures are deliberately indistinguishable in the UI.
pub const SEARCH_ERROR_MESSAGE: &str = "Error fetching movies. Please try again later.";

/// Message shown when a detail page cannot be loaded.
pub const DETAIL_ERROR_MESSAGE: &str = "Something went wrong while loading this movie.";

/// Errors that can occur while talking to the movie metadata API.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Network failure or non-success HTTP status.
    #[error("Transport error for {endpoint}: {reason}")]
    Transport {
        /// Endpoint path that was requested
        endpoint: String,
        /// HTTP status, when a response was received
        status: Option<u16>,
        /// The reason for the failure
        reason: String,
    },

    /// The API answered successfully but flagged a logical failure.
    #[error("Upstream error: {message}")]
    Upstream {
        /// Message reported by the API
        message: String,
    },

    /// Failed to parse a response body.
    #[error("Parse error: {reason}")]
    Parse {
        /// The reason for the parse error
        reason: String,
    },

    /// No movie exists with the requested identifier.
    #[error("Movie {id} not found")]
    NotFound {
        /// The identifier that was looked up
        id: u64,
    },

    /// The provider could not be constructed from configuration.
    #[error("Catalog configuration error: {reason}")]
    Configuration {
        /// The reason the configuration was rejected
        reason: String,
    },
}

impl CatalogError {
    /// Returns true for failures that happened before a usable response arrived.
    pub fn is_transport(&self) -> bool {
        matches!(self, CatalogError::Transport { .. })
    }

    /// Single message surfaced to users for any list failure.
    pub fn user_message(&self) -> &'static str {
        SEARCH_ERROR_MESSAGE
    }
}

/// Errors from the suggestion document store.
///
/// These are logged and swallowed; they never reach the user.
#[derive(Debug, Error)]
pub enum SuggestionError {
    /// The store could not be reached or rejected the request.
    #[error("Suggestion store error: {reason}")]
    Store {
        /// The reason for the store failure
        reason: String,
    },

    /// The store returned a document that could not be decoded.
    #[error("Suggestion parse error: {reason}")]
    Parse {
        /// The reason for the parse error
        reason: String,
    },
}
