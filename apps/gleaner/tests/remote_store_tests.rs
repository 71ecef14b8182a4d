//! Integration tests for the remote (PostgREST) store.
//!
//! Each test starts a small in-process PostgREST stand-in on an ephemeral
//! port and points a `RemoteStore` at it.

// Allow unwrap and panic in tests - these are standard for test code
#![allow(clippy::unwrap_used, clippy::panic)]

use axum::{
    Json, Router,
    extract::{Query, RawQuery, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
};
use axum_test::TestServer;
use gleaner::analyze::Analyzer;
use gleaner::api::{AnalyzeRequest, AppState, ErrorResponse, create_router};
use gleaner::config::Settings;
use gleaner::storage::{AnalysisStore, RemoteStore};
use gleaner::summarizer::MockSummarizer;
use gleaner_core::{GleanerError, NewAnalysis, Sentiment};
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};
use std::time::Duration;

const ANON_KEY: &str = "anon-test-key";
const CALL_TIMEOUT: Duration = Duration::from_secs(5);

// =============================================================================
// FAKE POSTGREST TABLE
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Normal,
    RejectInserts,
    EmptyInserts,
    RejectSelects,
}

#[derive(Clone)]
struct FakeTable {
    mode: Mode,
    rows: Arc<Mutex<Vec<Value>>>,
    queries: Arc<Mutex<Vec<String>>>,
}

impl FakeTable {
    fn new(mode: Mode) -> Self {
        Self {
            mode,
            rows: Arc::new(Mutex::new(Vec::new())),
            queries: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

fn authorized(headers: &HeaderMap) -> bool {
    let apikey = headers.get("apikey").and_then(|v| v.to_str().ok());
    let bearer = headers.get("authorization").and_then(|v| v.to_str().ok());
    let expected_bearer = format!("Bearer {}", ANON_KEY);
    apikey == Some(ANON_KEY) && bearer == Some(expected_bearer.as_str())
}

/// Extract the value of a `cs.{"..."}` filter.
fn contained_value(filter: &str) -> Option<String> {
    let inner = filter.strip_prefix("cs.{\"")?.strip_suffix("\"}")?;
    Some(inner.replace("\\\"", "\"").replace("\\\\", "\\"))
}

fn array_contains(row: &Value, column: &str, value: &str) -> bool {
    row[column]
        .as_array()
        .is_some_and(|items| items.iter().any(|item| item.as_str() == Some(value)))
}

async fn insert_row(
    State(table): State<FakeTable>,
    headers: HeaderMap,
    Json(mut row): Json<Value>,
) -> Response {
    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    if headers.get("prefer").and_then(|v| v.to_str().ok()) != Some("return=representation") {
        return (StatusCode::CREATED, Json(Vec::<Value>::new())).into_response();
    }
    match table.mode {
        Mode::RejectInserts => {
            return (StatusCode::INTERNAL_SERVER_ERROR, "insert disabled").into_response();
        }
        Mode::EmptyInserts => {
            return (StatusCode::CREATED, Json(Vec::<Value>::new())).into_response();
        }
        Mode::Normal | Mode::RejectSelects => {}
    }

    let mut rows = table.rows.lock().unwrap();
    let seq = rows.len() + 1;
    row["id"] = json!(format!("row-{seq}"));
    row["created_at"] = json!(seq);
    rows.push(row.clone());
    (StatusCode::CREATED, Json(vec![row])).into_response()
}

async fn select_rows(
    State(table): State<FakeTable>,
    headers: HeaderMap,
    RawQuery(raw): RawQuery,
    Query(params): Query<Vec<(String, String)>>,
) -> Response {
    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    table.queries.lock().unwrap().push(raw.unwrap_or_default());
    if table.mode == Mode::RejectSelects {
        return (StatusCode::SERVICE_UNAVAILABLE, "select disabled").into_response();
    }

    let mut rows = table.rows.lock().unwrap().clone();
    for (key, value) in &params {
        match key.as_str() {
            "topics" | "keywords" => {
                let Some(wanted) = contained_value(value) else {
                    return StatusCode::BAD_REQUEST.into_response();
                };
                rows.retain(|row| array_contains(row, key, &wanted));
            }
            "order" if value == "created_at.desc" => rows.reverse(),
            "limit" => rows.truncate(value.parse().unwrap()),
            _ => {}
        }
    }
    Json(rows).into_response()
}

/// Serve `table` on an ephemeral port and return its base URL.
async fn spawn_fake(table: FakeTable) -> String {
    let app = Router::new()
        .route("/rest/v1/analyses", get(select_rows).post(insert_row))
        .with_state(table);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

async fn fake_store(mode: Mode) -> (RemoteStore, FakeTable) {
    let table = FakeTable::new(mode);
    let url = spawn_fake(table.clone()).await;
    let store = RemoteStore::new(url, ANON_KEY, "analyses", CALL_TIMEOUT).unwrap();
    (store, table)
}

fn analysis(topics: &[&str], keywords: &[&str]) -> NewAnalysis {
    NewAnalysis {
        id: None,
        title: Some("Title".to_string()),
        summary: "Summary.".to_string(),
        topics: topics.iter().map(|t| (*t).to_string()).collect(),
        sentiment: Sentiment::Neutral,
        keywords: keywords.iter().map(|k| (*k).to_string()).collect(),
        confidence: 0.7,
        text: "Body text.".to_string(),
    }
}

// =============================================================================
// INSERT TESTS
// =============================================================================

#[tokio::test]
async fn test_insert_returns_server_row() {
    let (store, _table) = fake_store(Mode::Normal).await;

    let record = store
        .insert(&analysis(&["ai", "general", "general"], &["model"]))
        .await
        .unwrap();

    assert_eq!(record.id.as_str(), "row-1");
    assert_eq!(record.topics, vec!["ai", "general", "general"]);
    assert_eq!(record.keywords, vec!["model"]);
    assert_eq!(record.title.as_deref(), Some("Title"));
}

#[tokio::test]
async fn test_insert_error_status_is_write_failure() {
    let (store, _table) = fake_store(Mode::RejectInserts).await;

    let result = store.insert(&analysis(&["ai"], &[])).await;

    assert!(matches!(result, Err(GleanerError::StorageWriteFailed(_))));
}

#[tokio::test]
async fn test_insert_without_rows_is_write_failure() {
    let (store, _table) = fake_store(Mode::EmptyInserts).await;

    let result = store.insert(&analysis(&["ai"], &[])).await;

    assert!(matches!(result, Err(GleanerError::StorageWriteFailed(_))));
}

#[tokio::test]
async fn test_wrong_credentials_are_rejected() {
    let table = FakeTable::new(Mode::Normal);
    let url = spawn_fake(table).await;
    let store = RemoteStore::new(url, "wrong-key", "analyses", CALL_TIMEOUT).unwrap();

    let result = store.insert(&analysis(&["ai"], &[])).await;

    assert!(matches!(result, Err(GleanerError::StorageWriteFailed(_))));
}

// =============================================================================
// SEARCH TESTS
// =============================================================================

#[tokio::test]
async fn test_search_merges_topics_first_without_duplicates() {
    let (store, _table) = fake_store(Mode::Normal).await;
    // row-1: topic and keyword, row-2: keyword only, row-3: topic only
    store.insert(&analysis(&["ai"], &["ai"])).await.unwrap();
    store.insert(&analysis(&["web"], &["ai"])).await.unwrap();
    store.insert(&analysis(&["ai"], &["rust"])).await.unwrap();
    store.insert(&analysis(&["web"], &["css"])).await.unwrap();

    let results = store.search("ai").await.unwrap();

    let ids: Vec<_> = results.iter().map(|r| r.id.as_str().to_string()).collect();
    assert_eq!(ids, vec!["row-1", "row-3", "row-2"]);
}

#[tokio::test]
async fn test_search_trims_query_and_sends_containment_filters() {
    let (store, table) = fake_store(Mode::Normal).await;
    store
        .insert(&analysis(&["machine learning"], &[]))
        .await
        .unwrap();

    let results = store.search("  machine learning ").await.unwrap();

    assert_eq!(results.len(), 1);
    let queries = table.queries();
    assert_eq!(queries.len(), 2);
    assert!(queries.iter().all(|q| q.contains("select=*")));
    assert!(queries.iter().any(|q| q.contains("topics=cs.")));
    assert!(queries.iter().any(|q| q.contains("keywords=cs.")));
}

#[tokio::test]
async fn test_search_without_match_is_empty() {
    let (store, _table) = fake_store(Mode::Normal).await;
    store.insert(&analysis(&["ai"], &["model"])).await.unwrap();

    assert!(store.search("air").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_blank_search_lists_newest_first() {
    let (store, table) = fake_store(Mode::Normal).await;
    store.insert(&analysis(&["a"], &[])).await.unwrap();
    store.insert(&analysis(&["b"], &[])).await.unwrap();

    let results = store.search("   ").await.unwrap();

    let ids: Vec<_> = results.iter().map(|r| r.id.as_str().to_string()).collect();
    assert_eq!(ids, vec!["row-2", "row-1"]);
    let queries = table.queries();
    assert_eq!(queries.len(), 1);
    assert!(queries[0].contains("order=created_at.desc"));
    assert!(queries[0].contains("limit=100"));
}

#[tokio::test]
async fn test_search_error_status_is_unavailable() {
    let (store, _table) = fake_store(Mode::RejectSelects).await;

    let result = store.search("ai").await;

    assert!(matches!(result, Err(GleanerError::StorageUnavailable(_))));
}

#[tokio::test]
async fn test_unreachable_server_is_unavailable() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let store =
        RemoteStore::new(format!("http://{}", addr), ANON_KEY, "analyses", CALL_TIMEOUT).unwrap();

    let result = store.search("").await;

    assert!(matches!(result, Err(GleanerError::StorageUnavailable(_))));
}

#[tokio::test]
async fn test_silent_server_times_out_as_unavailable() {
    // Accepts connections and never writes a response.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let mut open = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            open.push(socket);
        }
    });
    let store = RemoteStore::new(
        format!("http://{}", addr),
        ANON_KEY,
        "analyses",
        Duration::from_millis(200),
    )
    .unwrap();

    let result = tokio::time::timeout(Duration::from_secs(5), store.search("ai"))
        .await
        .expect("search returns once the client deadline passes");

    assert!(matches!(result, Err(GleanerError::StorageUnavailable(_))));
}

// =============================================================================
// HTTP API OVER THE REMOTE STORE
// =============================================================================

async fn api_over(mode: Mode) -> TestServer {
    let (store, _table) = fake_store(mode).await;
    let analyzer = Analyzer::new(
        Arc::new(MockSummarizer),
        Arc::new(AnalysisStore::Remote(store)),
    );
    let settings = Settings {
        use_inmem_db: false,
        ..Settings::local()
    };
    TestServer::new(create_router(AppState::new(analyzer, settings))).unwrap()
}

#[tokio::test]
async fn test_api_analyze_then_search_remote() {
    let server = api_over(Mode::Normal).await;

    let response = server
        .post("/api/analyze")
        .json(&AnalyzeRequest::single(
            "The model helps developers. Developers love the model.",
        ))
        .await;
    response.assert_status_ok();

    let response = server
        .get("/api/search")
        .add_query_param("topic", "technology")
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["results"].as_array().unwrap().len(), 1);
    assert_eq!(body["results"][0]["id"], "row-1");
}

#[tokio::test]
async fn test_api_storage_failure_is_server_error() {
    let server = api_over(Mode::RejectInserts).await;

    let response = server
        .post("/api/analyze")
        .json(&AnalyzeRequest::single("Nothing will be stored."))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let error: ErrorResponse = response.json();
    assert!(error.detail.contains("Storage write failed"));
}
