//! Marquee Web - Movie search UI and JSON API server

#![warn(clippy::missing_errors_doc)]
#![deny(clippy::missing_panics_doc)]
#![warn(clippy::too_many_lines)]
//!
//! Server-rendered pages with HTMX partial updates. The search box debounces
//! in the browser and only settled terms reach the server.

pub mod components;
pub mod handlers;
pub mod pages;
pub mod server;
pub mod templates;

// Re-export main types
pub use server::{AppState, build_router, run_server};
