//! HTMX + Tailwind web server for Marquee
//!
//! Serves server-rendered pages, HTMX partials for the live search box and a
//! small JSON API over the same services.

use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use marquee_core::{MarqueeConfig, MarqueeError, RuntimeMode};
use marquee_search::{DetailLoader, MovieSearchService};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::handlers::{api_movie, api_movies, api_trending, htmx_movies, htmx_trending};
use crate::pages::{home_page, movie_page, not_found_page};

/// Shared state handed to every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    pub search: MovieSearchService,
    pub details: DetailLoader,
    pub config: Arc<MarqueeConfig>,
}

impl AppState {
    pub fn new(search: MovieSearchService, config: MarqueeConfig) -> Self {
        let details = DetailLoader::new(search.catalog());
        Self {
            search,
            details,
            config: Arc::new(config),
        }
    }

    pub fn poster_base(&self) -> &str {
        &self.config.api.poster_base_url
    }

    pub fn trending_limit(&self) -> usize {
        self.config.search.trending_limit
    }
}

/// Directory the `/static` route serves from.
pub fn static_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("static")
}

/// Builds the application router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Pages
        .route("/", get(home_page))
        .route("/movies/{id}", get(movie_page))
        // HTMX partial update endpoints
        .route("/htmx/movies", get(htmx_movies))
        .route("/htmx/trending", get(htmx_trending))
        // JSON API endpoints
        .route("/api/movies", get(api_movies))
        .route("/api/movies/{id}", get(api_movie))
        .route("/api/trending", get(api_trending))
        .nest_service("/static", ServeDir::new(static_dir()))
        .fallback(not_found_page)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Runs the web server until it fails.
///
/// # Errors
///
/// - `MarqueeError::Configuration` - Invalid configuration for `mode`
/// - `MarqueeError::Server` - Services could not be built or the socket could
///   not be bound
pub async fn run_server(config: MarqueeConfig, mode: RuntimeMode) -> Result<(), MarqueeError> {
    config.validate(mode.is_production())?;

    let search =
        MovieSearchService::from_config(&config, mode).map_err(MarqueeError::from_server_error)?;
    let address = config.bind_address();
    let app = build_router(AppState::new(search, config));

    let listener = tokio::net::TcpListener::bind(&address).await?;
    info!(%mode, "Marquee running on http://{address}");

    axum::serve(listener, app)
        .await
        .map_err(MarqueeError::from_server_error)
}
