//! HTTP request handlers

use super::error::ApiError;
use super::state::AppState;
use crate::results::SearchResponse;
use crate::search::SearchParams;
use axum::{
    extract::{RawQuery, State},
    http::HeaderMap,
    response::IntoResponse,
    Json,
};

/// Header carrying the caller's API key
pub const API_KEY_HEADER: &str = "x-api-key";

/// Search handler
pub async fn search(
    State(state): State<AppState>,
    headers: HeaderMap,
    RawQuery(query): RawQuery,
) -> Result<Json<SearchResponse>, ApiError> {
    // The key is checked before anything else so a bad key is always a 401
    let provided = headers
        .get(API_KEY_HEADER)
        .and_then(|value| value.to_str().ok());
    if !state.is_authorized(provided) {
        return Err(ApiError::Unauthorized);
    }

    let request = SearchParams::from_query_string(query.as_deref().unwrap_or_default())
        .into_request()?;
    tracing::info!(
        query = %request.query,
        engine = %request.engine,
        limit = request.limit,
        "Search requested"
    );

    let response = state.search.execute(&request).await?;
    Ok(Json(response))
}

/// Health check handler
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": crate::VERSION
    }))
}
