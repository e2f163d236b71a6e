//! In-process fakes of the remote APIs for tests.
//!
//! Both servers bind an ephemeral port on localhost, so providers under test
//! speak real HTTP to them.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Path, Query, RawQuery, Request, State};
use axum::http::{HeaderMap, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, patch};
use axum::{Json, Router};
use parking_lot::Mutex;
use serde_json::{Value, json};

use crate::providers::demo::{CatalogEntry, demo_catalog};

/// The demo catalog with poster paths filled in, as TMDB would return it.
pub fn sample_movies() -> Vec<CatalogEntry> {
    demo_catalog()
        .into_iter()
        .map(|mut entry| {
            entry.details.poster_path = Some(format!("/{}.jpg", entry.details.id));
            entry.details.backdrop_path = Some(format!("/{}-backdrop.jpg", entry.details.id));
            entry
        })
        .collect()
}

async fn bind(router: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind fake server");
    let addr = listener.local_addr().expect("fake server address");
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });
    addr
}

/// One request received by [`FakeTmdb`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub path_and_query: String,
    pub authorization: Option<String>,
}

#[derive(Debug, Default)]
struct TmdbState {
    movies: Vec<CatalogEntry>,
    requests: Mutex<Vec<RecordedRequest>>,
    list_body: Mutex<Option<Value>>,
    search_delays: Mutex<HashMap<String, Duration>>,
    failure: Mutex<Option<StatusCode>>,
}

/// Fake TMDB API serving a fixed catalog.
///
/// Requests without a bearer token are answered with 401.
#[derive(Debug, Clone)]
pub struct FakeTmdb {
    addr: SocketAddr,
    state: Arc<TmdbState>,
}

impl FakeTmdb {
    pub async fn spawn(movies: Vec<CatalogEntry>) -> Self {
        let state = Arc::new(TmdbState {
            movies,
            ..Default::default()
        });

        let router = Router::new()
            .route("/3/search/movie", get(tmdb_search))
            .route("/3/discover/movie", get(tmdb_discover))
            .route("/3/movie/{id}", get(tmdb_details))
            .route("/3/movie/{id}/videos", get(tmdb_videos))
            .layer(middleware::from_fn_with_state(state.clone(), tmdb_gate))
            .with_state(state.clone());

        let addr = bind(router).await;
        Self { addr, state }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().clone()
    }

    /// Replaces the body of every list response.
    pub fn set_list_body(&self, body: Value) {
        *self.state.list_body.lock() = Some(body);
    }

    /// Holds back the answer to a search for `term`.
    pub fn set_search_delay(&self, term: &str, delay: Duration) {
        self.state
            .search_delays
            .lock()
            .insert(term.to_string(), delay);
    }

    /// Answers every request with `status`.
    pub fn set_failure(&self, status: Option<StatusCode>) {
        *self.state.failure.lock() = status;
    }
}

async fn tmdb_gate(State(state): State<Arc<TmdbState>>, request: Request, next: Next) -> Response {
    let authorization = request
        .headers()
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let path_and_query = request
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_default();

    state.requests.lock().push(RecordedRequest {
        path_and_query,
        authorization: authorization.clone(),
    });

    if !authorization.is_some_and(|value| value.starts_with("Bearer ")) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"success": false, "status_code": 7, "status_message": "Invalid API key"})),
        )
            .into_response();
    }
    let failure = *state.failure.lock();
    if let Some(status) = failure {
        return status.into_response();
    }

    next.run(request).await
}

fn list_response(state: &TmdbState, entries: Vec<&CatalogEntry>) -> Json<Value> {
    if let Some(body) = state.list_body.lock().clone() {
        return Json(body);
    }
    let results: Vec<_> = entries.into_iter().map(CatalogEntry::summary).collect();
    Json(json!({
        "page": 1,
        "total_results": results.len(),
        "results": results,
    }))
}

async fn tmdb_search(
    State(state): State<Arc<TmdbState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    let term = params.get("query").cloned().unwrap_or_default();

    let delay = state.search_delays.lock().get(&term).copied();
    if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
    }

    let matches = state.movies.iter().filter(|e| e.matches(&term)).collect();
    list_response(&state, matches)
}

async fn tmdb_discover(State(state): State<Arc<TmdbState>>) -> Json<Value> {
    list_response(&state, state.movies.iter().collect())
}

fn find_entry(state: &TmdbState, id: u64) -> Option<&CatalogEntry> {
    state.movies.iter().find(|e| e.details.id == id)
}

fn tmdb_not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "success": false,
            "status_code": 34,
            "status_message": "The resource you requested could not be found."
        })),
    )
        .into_response()
}

async fn tmdb_details(State(state): State<Arc<TmdbState>>, Path(id): Path<u64>) -> Response {
    match find_entry(&state, id) {
        Some(entry) => Json(entry.details.clone()).into_response(),
        None => tmdb_not_found(),
    }
}

async fn tmdb_videos(State(state): State<Arc<TmdbState>>, Path(id): Path<u64>) -> Response {
    match find_entry(&state, id) {
        Some(entry) => Json(json!({"id": id, "results": entry.videos})).into_response(),
        None => tmdb_not_found(),
    }
}

#[derive(Debug, Default)]
struct AppwriteState {
    documents: Mutex<Vec<Value>>,
    project_headers: Mutex<Vec<String>>,
    failing: Mutex<bool>,
    next_id: Mutex<u64>,
}

/// Fake Appwrite databases API holding one collection in memory.
///
/// Understands the `equal`, `orderDesc` and `limit` queries.
#[derive(Debug, Clone)]
pub struct FakeAppwrite {
    addr: SocketAddr,
    state: Arc<AppwriteState>,
}

impl FakeAppwrite {
    pub async fn spawn() -> Self {
        let state = Arc::new(AppwriteState::default());

        let router = Router::new()
            .route(
                "/v1/databases/{database}/collections/{collection}/documents",
                get(appwrite_list).post(appwrite_create),
            )
            .route(
                "/v1/databases/{database}/collections/{collection}/documents/{id}",
                patch(appwrite_update),
            )
            .layer(middleware::from_fn_with_state(state.clone(), appwrite_gate))
            .with_state(state.clone());

        let addr = bind(router).await;
        Self { addr, state }
    }

    /// Endpoint to configure, including the `/v1` prefix.
    pub fn endpoint(&self) -> String {
        format!("http://{}/v1", self.addr)
    }

    pub fn documents(&self) -> Vec<Value> {
        self.state.documents.lock().clone()
    }

    pub fn project_headers(&self) -> Vec<String> {
        self.state.project_headers.lock().clone()
    }

    pub fn set_failing(&self, failing: bool) {
        *self.state.failing.lock() = failing;
    }
}

async fn appwrite_gate(
    State(state): State<Arc<AppwriteState>>,
    headers: HeaderMap,
    request: Request,
    next: Next,
) -> Response {
    let project = headers
        .get("x-appwrite-project")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    state.project_headers.lock().push(project);

    if *state.failing.lock() {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"message": "Server Error", "code": 500})),
        )
            .into_response();
    }
    next.run(request).await
}

fn parse_queries(raw: Option<String>) -> Vec<Value> {
    let raw = raw.unwrap_or_default();
    url::form_urlencoded::parse(raw.as_bytes())
        .filter(|(key, _)| key == "queries[]")
        .filter_map(|(_, value)| serde_json::from_str(&value).ok())
        .collect()
}

async fn appwrite_list(
    State(state): State<Arc<AppwriteState>>,
    RawQuery(raw): RawQuery,
) -> Json<Value> {
    let mut documents = state.documents.lock().clone();

    for query in parse_queries(raw) {
        let attribute = query["attribute"].as_str().unwrap_or_default().to_string();
        match query["method"].as_str() {
            Some("equal") => {
                let values = query["values"].as_array().cloned().unwrap_or_default();
                documents.retain(|doc| values.contains(&doc[attribute.as_str()]));
            }
            Some("orderDesc") => {
                documents.sort_by(|a, b| {
                    b[attribute.as_str()]
                        .as_u64()
                        .cmp(&a[attribute.as_str()].as_u64())
                });
            }
            Some("limit") => {
                let limit = query["values"][0].as_u64().unwrap_or(25) as usize;
                documents.truncate(limit);
            }
            _ => {}
        }
    }

    Json(json!({"total": documents.len(), "documents": documents}))
}

async fn appwrite_create(
    State(state): State<Arc<AppwriteState>>,
    Json(body): Json<Value>,
) -> Json<Value> {
    let id = {
        let mut next_id = state.next_id.lock();
        *next_id += 1;
        format!("doc{}", *next_id)
    };

    let mut document = body["data"].clone();
    document["$id"] = json!(id);
    state.documents.lock().push(document.clone());
    Json(document)
}

async fn appwrite_update(
    State(state): State<Arc<AppwriteState>>,
    Path((_database, _collection, id)): Path<(String, String, String)>,
    Json(body): Json<Value>,
) -> Response {
    let mut documents = state.documents.lock();
    let Some(document) = documents.iter_mut().find(|doc| doc["$id"] == json!(id)) else {
        return StatusCode::NOT_FOUND.into_response();
    };

    if let Some(fields) = body["data"].as_object() {
        for (key, value) in fields {
            document[key.as_str()] = value.clone();
        }
    }
    Json(document.clone()).into_response()
}
