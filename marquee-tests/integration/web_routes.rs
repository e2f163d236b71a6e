//! Web routes served over the production provider stack.

use std::time::Duration;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use marquee_search::SEARCH_ERROR_MESSAGE;
use marquee_web::{AppState, build_router};
use serde_json::Value;
use tower::ServiceExt;

use crate::fixtures::{Stack, production_stack};

fn router(stack: &Stack) -> Router {
    build_router(AppState::new(stack.service.clone(), stack.config.clone()))
}

async fn get(router: Router, uri: &str) -> (StatusCode, String) {
    let response = router
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

async fn get_json(router: Router, uri: &str) -> (StatusCode, Value) {
    let (status, body) = get(router, uri).await;
    (status, serde_json::from_str(&body).unwrap())
}

#[tokio::test]
async fn test_api_search_returns_tagged_state() {
    let stack = production_stack().await;

    let (status, json) = get_json(router(&stack), "/api/movies?q=batman").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "success");
    assert_eq!(json["data"][0]["id"], 268);
    assert_eq!(json["data"][0]["title"], "Batman");
}

#[tokio::test]
async fn test_api_search_failure_is_bad_gateway() {
    let stack = production_stack().await;
    stack.tmdb.set_failure(Some(StatusCode::SERVICE_UNAVAILABLE));

    let (status, json) = get_json(router(&stack), "/api/movies?q=batman").await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(json["status"], "error");
    assert_eq!(json["data"], SEARCH_ERROR_MESSAGE);

    let (status, html) = get(router(&stack), "/htmx/movies?q=batman").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains(SEARCH_ERROR_MESSAGE));
}

#[tokio::test]
async fn test_searches_through_web_show_up_as_trending() {
    let stack = production_stack().await;

    get(router(&stack), "/htmx/movies?q=inception").await;

    // Tracking runs in the background after the response is sent
    let mut trending = Value::Null;
    for _ in 0..50 {
        let (_, json) = get_json(router(&stack), "/api/trending").await;
        if json.as_array().is_some_and(|records| !records.is_empty()) {
            trending = json;
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }

    assert_eq!(trending[0]["search_term"], "inception");
    assert_eq!(trending[0]["count"], 1);

    let (_, html) = get(router(&stack), "/htmx/trending").await;
    assert!(html.contains("inception"));
    assert!(html.contains("/?q=inception"));
}

#[tokio::test]
async fn test_api_movie_includes_trailer() {
    let stack = production_stack().await;

    let (status, json) = get_json(router(&stack), "/api/movies/155").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["movie"]["title"], "The Dark Knight");
    assert_eq!(json["trailer"]["key"], "EXeTwQWrcwY");

    let paths: Vec<_> = stack
        .tmdb
        .requests()
        .into_iter()
        .map(|r| r.path_and_query)
        .collect();
    assert!(paths.contains(&"/3/movie/155".to_string()));
    assert!(paths.contains(&"/3/movie/155/videos".to_string()));
}

#[tokio::test]
async fn test_unknown_movie_is_not_found() {
    let stack = production_stack().await;

    let (status, json) = get_json(router(&stack), "/api/movies/1").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "Movie 1 not found");

    let (status, html) = get(router(&stack), "/movies/1").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(html.contains("Go Home"));
}

#[tokio::test]
async fn test_movie_page_embeds_trailer() {
    let stack = production_stack().await;

    let (status, html) = get(router(&stack), "/movies/155").await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("https://www.youtube.com/embed/EXeTwQWrcwY"));
    assert!(html.contains("Why So Serious?"));
    assert!(html.contains("https://www.imdb.com/title/tt0468569"));
}
