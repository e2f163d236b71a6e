//! JSON API handlers

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use marquee_core::FetchState;
use marquee_search::{CatalogError, DETAIL_ERROR_MESSAGE, MovieSummary, SuggestionRecord};
use serde::Deserialize;
use serde_json::json;
use tracing::warn;

use crate::pages::SearchParams;
use crate::server::AppState;

/// Largest `?limit=` honoured by the trending endpoint.
pub const MAX_TRENDING_LIMIT: usize = 50;

#[derive(Debug, Deserialize)]
pub struct TrendingParams {
    pub limit: Option<usize>,
}

/// Search results as a tagged fetch state.
///
/// Failures are reported in the body with status 502 so clients can show the
/// message as is.
pub async fn api_movies(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> (StatusCode, Json<FetchState<Vec<MovieSummary>>>) {
    let outcome = state.search.search(params.term()).await;
    let status = if outcome.state.error().is_some() {
        StatusCode::BAD_GATEWAY
    } else {
        StatusCode::OK
    };
    (status, Json(outcome.state))
}

pub async fn api_trending(
    State(state): State<AppState>,
    Query(params): Query<TrendingParams>,
) -> Json<Vec<SuggestionRecord>> {
    let limit = params
        .limit
        .unwrap_or_else(|| state.trending_limit())
        .min(MAX_TRENDING_LIMIT);
    Json(state.search.trending_searches(limit).await)
}

pub async fn api_movie(State(state): State<AppState>, Path(id): Path<u64>) -> Response {
    match state.details.fetch(id).await {
        Ok(view) => Json(view).into_response(),
        Err(CatalogError::NotFound { id }) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": format!("Movie {id} not found") })),
        )
            .into_response(),
        Err(e) => {
            warn!(movie_id = id, error = %e, "Failed to load movie");
            (
                StatusCode::BAD_GATEWAY,
                Json(json!({ "error": DETAIL_ERROR_MESSAGE })),
            )
                .into_response()
        }
    }
}
