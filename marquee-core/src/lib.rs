//! Marquee Core - Shared building blocks for movie discovery
//!
//! This crate provides the pieces every Marquee front end needs regardless
//! of where movie data comes from: configuration, runtime mode selection,
//! request state, search input debouncing and tracing setup.

pub mod config;
pub mod debounce;
pub mod mode;
pub mod state;
pub mod tracing_setup;

// Re-export main types for convenient access
pub use config::{DEFAULT_DEBOUNCE_INTERVAL, DEFAULT_TRENDING_LIMIT, MarqueeConfig};
pub use debounce::{Debouncer, debounce_terms};
pub use mode::RuntimeMode;
pub use state::{FetchState, LatestRequest, RequestToken};

/// Core errors that can bubble up to the Marquee binaries.
#[derive(Debug, thiserror::Error)]
pub enum MarqueeError {
    #[error("Configuration error: {reason}")]
    Configuration { reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Web server error: {reason}")]
    Server { reason: String },
}

impl MarqueeError {
    /// Returns a user-friendly error message suitable for display.
    pub fn user_message(&self) -> String {
        match self {
            MarqueeError::Configuration { reason } => format!("Configuration error: {reason}"),
            MarqueeError::Io(_) => "File system error occurred".to_string(),
            MarqueeError::Server { reason } => format!("Web server error: {reason}"),
        }
    }

    /// Checks if this error is due to user input or environment setup.
    pub fn is_user_error(&self) -> bool {
        matches!(self, MarqueeError::Configuration { .. })
    }

    pub fn from_server_error(error: impl std::fmt::Display) -> Self {
        MarqueeError::Server {
            reason: error.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, MarqueeError>;
