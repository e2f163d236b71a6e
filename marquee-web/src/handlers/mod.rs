//! HTTP request handlers for partials and the JSON API

pub mod api;
pub mod htmx;

// Re-export handler functions
pub use api::{MAX_TRENDING_LIMIT, TrendingParams, api_movie, api_movies, api_trending};
pub use htmx::{htmx_movies, htmx_trending};
