//! Integration tests for Marquee
//!
//! These tests run the search, tracking and web layers together against
//! in-process fakes of TMDB and Appwrite, so every request crosses real HTTP.

#[path = "style.rs"]
mod style;

#[path = "integration/fixtures.rs"]
mod fixtures;

#[path = "integration/search_flow.rs"]
mod search_flow;

#[path = "integration/suggestion_tracking.rs"]
mod suggestion_tracking;

#[path = "integration/web_routes.rs"]
mod web_routes;
