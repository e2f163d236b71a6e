//! HTMX partial update handlers

use axum::extract::{Query, State};
use axum::response::Html;

use crate::components::{results_section, trending_list};
use crate::pages::SearchParams;
use crate::server::AppState;

/// Results fragment for the settled search term.
pub async fn htmx_movies(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Html<String> {
    let outcome = state.search.search(params.term()).await;
    Html(results_section(&outcome.state, state.poster_base()))
}

/// Trending searches fragment.
pub async fn htmx_trending(State(state): State<AppState>) -> Html<String> {
    let records = state.search.trending_searches(state.trending_limit()).await;
    Html(trending_list(&records))
}
