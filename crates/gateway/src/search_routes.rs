//! `POST /search/add` and `GET /search/query` over the in-memory document list.

use {
    axum::{
        Json,
        extract::{Query, State},
        response::IntoResponse,
    },
    juliet_search::{DEFAULT_QUERY_LIMIT, Document},
    serde::{Deserialize, Serialize},
    tracing::debug,
};

use crate::server::AppState;

#[derive(Debug, Deserialize)]
pub struct AddDocument {
    #[serde(default)]
    pub id: Option<String>,
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct AddDocumentResponse {
    pub id: String,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: String,
    #[serde(default = "default_limit")]
    pub k: usize,
}

fn default_limit() -> usize {
    DEFAULT_QUERY_LIMIT
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub offline: Vec<Document>,
    /// Web results. No provider is wired in, so this is always empty.
    pub online: Vec<Document>,
}

pub async fn add_handler(
    State(state): State<AppState>,
    Json(doc): Json<AddDocument>,
) -> impl IntoResponse {
    let id = state.gateway.documents.add(doc.id, doc.text).await;
    Json(AddDocumentResponse { id })
}

pub async fn query_handler(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> impl IntoResponse {
    let offline = state.gateway.documents.query(&params.q, params.k).await;
    debug!(query = %params.q, k = params.k, hits = offline.len(), "search query");
    Json(SearchResponse {
        query: params.q,
        offline,
        online: Vec::new(),
    })
}
