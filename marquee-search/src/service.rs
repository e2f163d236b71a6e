//! Search orchestration.
//!
//! [`MovieSearchService`] turns a search box value into a movie list request,
//! maps failures to the single user-facing message and records successful
//! searches for the trending list. [`SearchController`] adds the view state
//! and discards answers that arrive after a newer search has started.

use std::sync::Arc;

use marquee_core::{FetchState, LatestRequest, MarqueeConfig, RequestToken, RuntimeMode};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, instrument, warn};

use crate::errors::CatalogError;
use crate::providers::{DemoProvider, MovieCatalog, MovieQuery, TmdbProvider};
use crate::suggestions::{
    AppwriteSuggestionStore, MemorySuggestionStore, SuggestionRecord, SuggestionStore,
    SuggestionTracker,
};
use crate::types::MovieSummary;

/// Movie list fetching plus search tracking.
#[derive(Debug, Clone)]
pub struct MovieSearchService {
    catalog: Arc<dyn MovieCatalog>,
    tracker: SuggestionTracker,
}

/// Result of a one-shot [`MovieSearchService::search`].
#[derive(Debug)]
pub struct SearchOutcome {
    pub query: MovieQuery,
    pub state: FetchState<Vec<MovieSummary>>,
    /// Background suggestion update, if one was started
    pub tracking: Option<JoinHandle<()>>,
}

impl MovieSearchService {
    pub fn new(catalog: Arc<dyn MovieCatalog>, tracker: SuggestionTracker) -> Self {
        Self { catalog, tracker }
    }

    /// Builds the service for `mode`.
    ///
    /// Production talks to TMDB and uses Appwrite for suggestions when it is
    /// configured. Development serves the built-in catalog and keeps
    /// suggestions in memory.
    ///
    /// # Errors
    ///
    /// - `CatalogError::Configuration` - The TMDB client or the Appwrite store
    ///   cannot be constructed
    pub fn from_config(config: &MarqueeConfig, mode: RuntimeMode) -> Result<Self, CatalogError> {
        let poster_base = config.api.poster_base_url.clone();

        let (catalog, store): (Arc<dyn MovieCatalog>, Arc<dyn SuggestionStore>) = match mode {
            RuntimeMode::Production => {
                let catalog: Arc<dyn MovieCatalog> = Arc::new(TmdbProvider::new(&config.api)?);
                let store: Arc<dyn SuggestionStore> = if config.store.is_configured() {
                    Arc::new(AppwriteSuggestionStore::new(&config.store).map_err(|e| {
                        CatalogError::Configuration {
                            reason: e.to_string(),
                        }
                    })?)
                } else {
                    warn!("Appwrite is not configured, trending searches are kept in memory");
                    Arc::new(MemorySuggestionStore::new())
                };
                (catalog, store)
            }
            RuntimeMode::Development => {
                let catalog: Arc<dyn MovieCatalog> = Arc::new(DemoProvider::new());
                let store: Arc<dyn SuggestionStore> = Arc::new(MemorySuggestionStore::new());
                (catalog, store)
            }
        };

        info!(%mode, "Movie search service ready");
        Ok(Self::new(catalog, SuggestionTracker::new(store, poster_base)))
    }

    pub fn catalog(&self) -> Arc<dyn MovieCatalog> {
        Arc::clone(&self.catalog)
    }

    pub fn tracker(&self) -> &SuggestionTracker {
        &self.tracker
    }

    /// Fetches the list for `query`.
    ///
    /// # Errors
    ///
    /// Returns the user-facing message for any catalog failure; the cause is
    /// logged.
    #[instrument(skip(self), fields(endpoint = %query.endpoint()))]
    pub async fn fetch_movies(&self, query: &MovieQuery) -> Result<Vec<MovieSummary>, String> {
        match self.catalog.list_movies(query).await {
            Ok(movies) => {
                info!(count = movies.len(), "Fetched movies");
                Ok(movies)
            }
            Err(e) => {
                error!(error = %e, "Error fetching movies");
                Err(e.user_message().to_string())
            }
        }
    }

    /// Records a search for the trending list on a background task.
    ///
    /// Only searches with a term and at least one result count. Store
    /// failures are logged and never reach the caller.
    pub fn record_search_in_background(
        &self,
        query: &MovieQuery,
        representative: Option<&MovieSummary>,
    ) -> Option<JoinHandle<()>> {
        let term = query.term()?.to_string();
        let representative = representative?.clone();
        let tracker = self.tracker.clone();

        Some(tokio::spawn(async move {
            if let Err(e) = tracker.record_search(&term, &representative).await {
                warn!(term = %term, error = %e, "Failed to record search");
            }
        }))
    }

    /// Runs one search from start to finish.
    pub async fn search(&self, term: &str) -> SearchOutcome {
        let query = MovieQuery::from_term(term);
        let mut state = FetchState::Loading;

        let result = self.fetch_movies(&query).await;
        let tracking = result
            .as_ref()
            .ok()
            .and_then(|movies| self.record_search_in_background(&query, movies.first()));
        state.complete(result);

        SearchOutcome {
            query,
            state,
            tracking,
        }
    }

    /// Most searched terms; empty when the store cannot be read.
    pub async fn trending_searches(&self, limit: usize) -> Vec<SuggestionRecord> {
        match self.tracker.top_suggestions(limit).await {
            Ok(records) => records,
            Err(e) => {
                warn!(error = %e, "Failed to load trending searches");
                Vec::new()
            }
        }
    }
}

/// What happened to one [`SearchController::run`] call.
#[derive(Debug)]
pub struct SearchReport {
    pub token: RequestToken,
    /// False when a newer search superseded this one
    pub applied: bool,
    /// Outcome of this run, kept even when it was not applied
    pub state: FetchState<Vec<MovieSummary>>,
    pub tracking: Option<JoinHandle<()>>,
}

/// Search view state driven by settled search terms.
///
/// Overlapping runs are allowed; only the most recently started one may
/// update the state or record a suggestion.
#[derive(Debug, Clone)]
pub struct SearchController {
    service: MovieSearchService,
    request: Arc<LatestRequest<Vec<MovieSummary>>>,
}

impl SearchController {
    pub fn new(service: MovieSearchService) -> Self {
        Self {
            service,
            request: Arc::new(LatestRequest::new()),
        }
    }

    pub fn service(&self) -> &MovieSearchService {
        &self.service
    }

    pub async fn run(&self, term: &str) -> SearchReport {
        let query = MovieQuery::from_term(term);
        let token = self.request.begin();

        let result = self.service.fetch_movies(&query).await;
        let state = FetchState::from(result.clone());

        let applied = self.request.complete(token, result);
        let tracking = if applied {
            self.service
                .record_search_in_background(&query, state.value().and_then(|m| m.first()))
        } else {
            debug!(
                generation = token.generation(),
                term = query.term().unwrap_or_default(),
                "Search superseded before it finished"
            );
            None
        };

        SearchReport {
            token,
            applied,
            state,
            tracking,
        }
    }

    pub fn state(&self) -> FetchState<Vec<MovieSummary>> {
        self.request.snapshot()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use async_trait::async_trait;

    use super::*;
    use crate::errors::{SEARCH_ERROR_MESSAGE, SuggestionError};
    use crate::providers::{MockCatalog, MockFailure, movie_summary};

    const POSTER_BASE: &str = "https://image.tmdb.org/t/p/w500";

    fn batman_results() -> Vec<MovieSummary> {
        vec![
            movie_summary(268, "Batman"),
            movie_summary(155, "The Dark Knight"),
            movie_summary(272, "Batman Begins"),
            movie_summary(414906, "The Batman"),
            movie_summary(364, "Batman Returns"),
        ]
    }

    fn service_with(
        catalog: MockCatalog,
    ) -> (MovieSearchService, Arc<MockCatalog>, Arc<MemorySuggestionStore>) {
        let catalog = Arc::new(catalog);
        let store = Arc::new(MemorySuggestionStore::new());
        let service = MovieSearchService::new(
            catalog.clone(),
            SuggestionTracker::new(store.clone(), POSTER_BASE),
        );
        (service, catalog, store)
    }

    async fn settle(tracking: Option<JoinHandle<()>>) {
        if let Some(handle) = tracking {
            handle.await.unwrap();
        }
    }

    #[derive(Debug)]
    struct UnreachableStore;

    #[async_trait]
    impl SuggestionStore for UnreachableStore {
        async fn increment(
            &self,
            _term: &str,
            _poster_url: Option<String>,
        ) -> Result<SuggestionRecord, SuggestionError> {
            Err(SuggestionError::Store {
                reason: "connection refused".to_string(),
            })
        }

        async fn top_by_count(&self, _limit: usize) -> Result<Vec<SuggestionRecord>, SuggestionError> {
            Err(SuggestionError::Store {
                reason: "connection refused".to_string(),
            })
        }
    }

    #[tokio::test]
    async fn test_batman_search_records_first_poster() {
        let (service, catalog, store) = service_with(
            MockCatalog::new().with_list(MovieQuery::from_term("batman"), batman_results()),
        );

        let outcome = service.search("batman").await;
        assert!(outcome.tracking.is_some());
        settle(outcome.tracking).await;

        assert_eq!(outcome.query.endpoint(), "/3/search/movie?query=batman");
        assert_eq!(outcome.state.value().map(Vec::len), Some(5));
        assert_eq!(catalog.requests(), vec![MovieQuery::Search("batman".to_string())]);

        let record = store.get("batman").unwrap();
        assert_eq!(record.count, 1);
        assert_eq!(
            record.poster_url.as_deref(),
            Some("https://image.tmdb.org/t/p/w500/poster-268.jpg")
        );
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_empty_term_lists_popular_without_tracking() {
        let (service, catalog, store) = service_with(
            MockCatalog::new().with_list(MovieQuery::Popular, batman_results()),
        );

        let outcome = service.search("  ").await;

        assert!(outcome.tracking.is_none());
        assert_eq!(outcome.state.value().map(Vec::len), Some(5));
        assert_eq!(catalog.requests(), vec![MovieQuery::Popular]);
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_search_without_results_is_not_tracked() {
        let (service, _catalog, store) = service_with(MockCatalog::new());

        let outcome = service.search("qwertyuiop").await;

        assert_eq!(outcome.state, FetchState::Success(Vec::new()));
        assert!(outcome.tracking.is_none());
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_failures_map_to_one_message() {
        let (service, _catalog, store) = service_with(
            MockCatalog::new()
                .with_failure(MovieQuery::from_term("batman"), MockFailure::Transport)
                .with_failure(
                    MovieQuery::from_term("a"),
                    MockFailure::Upstream("Too many results.".to_string()),
                ),
        );

        for term in ["batman", "a"] {
            let outcome = service.search(term).await;
            assert_eq!(outcome.state.error(), Some(SEARCH_ERROR_MESSAGE));
            assert!(outcome.state.value().is_none());
            assert!(outcome.tracking.is_none());
        }
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_tracking_failure_does_not_affect_results() {
        let catalog = MockCatalog::new().with_list(MovieQuery::from_term("batman"), batman_results());
        let service = MovieSearchService::new(
            Arc::new(catalog),
            SuggestionTracker::new(Arc::new(UnreachableStore), POSTER_BASE),
        );

        let outcome = service.search("batman").await;
        settle(outcome.tracking).await;

        assert_eq!(outcome.state.value().map(Vec::len), Some(5));
        assert!(service.trending_searches(5).await.is_empty());
    }

    #[tokio::test]
    async fn test_trending_searches_reflect_recorded_terms() {
        let (service, _catalog, _store) = service_with(
            MockCatalog::new()
                .with_list(MovieQuery::from_term("batman"), batman_results())
                .with_list(
                    MovieQuery::from_term("dune"),
                    vec![movie_summary(438631, "Dune")],
                ),
        );

        for term in ["dune", "batman", "dune"] {
            settle(service.search(term).await.tracking).await;
        }

        let trending = service.trending_searches(5).await;
        let terms: Vec<(&str, u64)> = trending
            .iter()
            .map(|r| (r.search_term.as_str(), r.count))
            .collect();
        assert_eq!(terms, vec![("dune", 2), ("batman", 1)]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_controller_discards_superseded_response() {
        let (service, _catalog, store) = service_with(
            MockCatalog::new()
                .with_list(MovieQuery::from_term("bat"), vec![movie_summary(1, "Bat*21")])
                .with_delay(MovieQuery::from_term("bat"), Duration::from_millis(300))
                .with_list(MovieQuery::from_term("batman"), batman_results()),
        );
        let controller = SearchController::new(service);

        let (slow, fast) = tokio::join!(controller.run("bat"), async {
            tokio::task::yield_now().await;
            controller.run("batman").await
        });

        assert!(fast.applied);
        assert!(!slow.applied);
        assert!(slow.token < fast.token);
        assert_eq!(slow.token.generation() + 1, fast.token.generation());
        assert!(slow.tracking.is_none());
        assert_eq!(slow.state.value().map(|m| m[0].title.as_str()), Some("Bat*21"));
        assert_eq!(fast.state, controller.state());
        settle(fast.tracking).await;

        assert_eq!(controller.state().value().map(Vec::len), Some(5));
        assert!(store.get("bat").is_none());
        assert_eq!(store.get("batman").unwrap().count, 1);
    }

    #[tokio::test]
    async fn test_controller_error_clears_previous_results() {
        let (service, _catalog, _store) = service_with(
            MockCatalog::new()
                .with_list(MovieQuery::from_term("batman"), batman_results())
                .with_failure(MovieQuery::from_term("dune"), MockFailure::Transport),
        );
        let controller = SearchController::new(service);

        controller.run("batman").await;
        assert!(controller.state().value().is_some());

        controller.run("dune").await;
        let state = controller.state();
        assert!(state.value().is_none());
        assert_eq!(state.error(), Some(SEARCH_ERROR_MESSAGE));
    }

    #[tokio::test]
    async fn test_development_mode_serves_demo_catalog() {
        let config = MarqueeConfig::for_testing();
        let service = MovieSearchService::from_config(&config, RuntimeMode::Development).unwrap();

        let outcome = service.search("inception").await;
        settle(outcome.tracking).await;

        assert_eq!(outcome.state.value().unwrap()[0].title, "Inception");
        assert_eq!(service.trending_searches(5).await[0].search_term, "inception");
    }
}
