//! HTTP server and HTML UI over the search core.
//!
//! Thin glue: handlers parse request parameters, call into
//! `kagaku-index` / `kagaku-core`, and render JSON or HTML. All state
//! is built once at startup and shared read-only behind an `Arc`;
//! nothing mutates it afterwards, so no locking is needed.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;
use tracing::info;
use tracing_subscriber::EnvFilter;

use kagaku_core::config::{expand_path, Config};
use kagaku_core::dataset::Dataset;
use kagaku_index::{Filters, SearchIndex};

mod pages;

struct AppState {
    dataset: Dataset,
    index: SearchIndex,
}

#[derive(Debug, Deserialize)]
struct SearchParams {
    #[serde(default)]
    q: String,
    source: Option<String>,
    tags: Option<String>,
    concepts: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::load()?;
    let problems_path = expand_path(config.get_or(
        "data.problems_path",
        "data/problems.json".to_string(),
    ));

    let dataset = Dataset::load(&problems_path)
        .with_context(|| format!("loading corpus from {}", problems_path.display()))?;
    let index = SearchIndex::build(&dataset);
    info!(problems = dataset.len(), "search index ready");

    let state = Arc::new(AppState { dataset, index });
    let app = Router::new()
        .route("/", get(search_page))
        .route("/api/search", get(api_search))
        .route("/api/problems/{id}", get(api_problem))
        .route("/problems/{id}", get(problem_page))
        .fallback(not_found)
        .with_state(state);

    let host = config.get_or("server.host", "127.0.0.1".to_string());
    let port: u16 = config.get_or("server.port", 8000);
    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .with_context(|| format!("invalid server address {}:{}", host, port))?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {}", addr))?;
    info!("serving on http://{}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}

async fn search_page() -> Html<String> {
    Html(pages::search_page())
}

async fn api_search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Json<serde_json::Value> {
    let filters = Filters::parse(
        params.source.as_deref(),
        params.tags.as_deref(),
        params.concepts.as_deref(),
    );
    let results = state.index.search(&state.dataset, &params.q, &filters);
    info!(query = %params.q, hits = results.len(), "search");
    Json(json!({ "query": params.q, "results": results }))
}

async fn api_problem(State(state): State<Arc<AppState>>, Path(id): Path<String>) -> Response {
    match state.dataset.get(&id) {
        Some(problem) => Json(problem).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Problem not found" })),
        )
            .into_response(),
    }
}

async fn problem_page(State(state): State<Arc<AppState>>, Path(id): Path<String>) -> Response {
    match state.dataset.get(&id) {
        Some(problem) => Html(pages::problem_page(problem)).into_response(),
        None => (StatusCode::NOT_FOUND, Html(pages::not_found_page())).into_response(),
    }
}

async fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "Not Found" })),
    )
        .into_response()
}
