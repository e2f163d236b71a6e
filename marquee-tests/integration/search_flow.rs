//! Search orchestration against the fake TMDB API.

use std::time::Duration;

use axum::http::StatusCode;
use marquee_core::FetchState;
use marquee_search::{MovieQuery, SEARCH_ERROR_MESSAGE, SearchController};
use serde_json::json;

use crate::fixtures::production_stack;

#[tokio::test]
async fn test_search_requests_encoded_term_with_bearer_token() {
    let stack = production_stack().await;

    let outcome = stack.service.search("  batman ").await;

    assert_eq!(outcome.query, MovieQuery::Search("batman".to_string()));
    let movies = outcome.state.value().expect("search should succeed");
    assert_eq!(movies.len(), 1);
    assert_eq!(movies[0].id, 268);

    let requests = stack.tmdb.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].path_and_query, "/3/search/movie?query=batman");
    assert_eq!(requests[0].authorization.as_deref(), Some("Bearer test-token"));

    outcome.tracking.expect("tracking task").await.unwrap();
}

#[tokio::test]
async fn test_multi_word_term_is_percent_encoded() {
    let stack = production_stack().await;

    let outcome = stack.service.search("the dark knight").await;

    assert_eq!(
        stack.tmdb.requests()[0].path_and_query,
        "/3/search/movie?query=the%20dark%20knight"
    );
    assert_eq!(outcome.state.value().map(Vec::len), Some(1));
}

#[tokio::test]
async fn test_empty_term_lists_popular_without_tracking() {
    let stack = production_stack().await;

    let outcome = stack.service.search("").await;

    assert_eq!(outcome.query, MovieQuery::Popular);
    assert_eq!(
        stack.tmdb.requests()[0].path_and_query,
        "/3/discover/movie?sort_by=popularity.desc"
    );
    let movies = outcome.state.value().expect("popular list");
    assert_eq!(movies[0].title, "Spider-Man: No Way Home");
    assert!(outcome.tracking.is_none());
    assert!(stack.appwrite.project_headers().is_empty());
}

#[tokio::test]
async fn test_no_matches_is_an_empty_success() {
    let stack = production_stack().await;

    let outcome = stack.service.search("zzzz").await;

    assert_eq!(outcome.state, FetchState::Success(Vec::new()));
    assert!(outcome.tracking.is_none());
}

#[tokio::test]
async fn test_http_failure_shows_generic_message() {
    let stack = production_stack().await;
    stack
        .tmdb
        .set_failure(Some(StatusCode::INTERNAL_SERVER_ERROR));

    let outcome = stack.service.search("batman").await;

    assert_eq!(outcome.state.error(), Some(SEARCH_ERROR_MESSAGE));
    assert!(outcome.tracking.is_none());
}

#[tokio::test]
async fn test_logical_failure_shows_generic_message() {
    let stack = production_stack().await;
    stack.tmdb.set_list_body(json!({
        "success": false,
        "status_code": 7,
        "status_message": "Invalid API key: You must be granted a valid key."
    }));

    let outcome = stack.service.search("batman").await;

    assert_eq!(outcome.state.error(), Some(SEARCH_ERROR_MESSAGE));
    assert!(stack.appwrite.documents().is_empty());
}

#[tokio::test]
async fn test_slow_earlier_search_cannot_overwrite_newer_results() {
    let stack = production_stack().await;
    stack
        .tmdb
        .set_search_delay("spider", Duration::from_millis(300));
    let controller = SearchController::new(stack.service.clone());

    let (stale, fresh) = tokio::join!(controller.run("spider"), async {
        tokio::time::sleep(Duration::from_millis(50)).await;
        controller.run("dune").await
    });

    assert!(!stale.applied);
    assert!(stale.tracking.is_none());
    assert!(fresh.applied);
    fresh.tracking.expect("tracking task").await.unwrap();

    let state = controller.state();
    let movies = state.value().expect("fresh results stay visible");
    assert_eq!(movies.len(), 1);
    assert_eq!(movies[0].title, "Dune");

    let documents = stack.appwrite.documents();
    assert_eq!(documents.len(), 1);
    assert_eq!(documents[0]["searchTerm"], "dune");
}
