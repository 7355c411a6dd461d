use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

use super::{ApiError, ApiResponse, AppState, ResultsDto};

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    pub max_pages: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct HistoryRequest {
    pub query: String,
}

/// Runs a live scrape. Persists to the permanent and live scratch tables
/// as a side effect; an empty result set maps to 404 so clients can tell
/// "nothing found" from a transport failure.
pub async fn search_products(
    State(state): State<Arc<AppState>>,
    Query(request): Query<SearchRequest>,
) -> Result<Json<ApiResponse<ResultsDto>>, ApiError> {
    if request.query.trim().is_empty() {
        return Err(ApiError::validation("query must not be empty"));
    }

    let max_pages = request.max_pages.unwrap_or(1);
    info!(
        "/search called with query='{}' max_pages={max_pages}",
        request.query
    );

    let products = state.scraper.scrape(&request.query, max_pages).await?;

    if products.is_empty() {
        return Err(ApiError::not_found(format!(
            "No products found for query '{}'",
            request.query
        )));
    }

    Ok(Json(ApiResponse::success(ResultsDto::new(products))))
}

/// Replays a past query from permanent storage into the historical scratch
/// table and returns the rows, newest first.
pub async fn history(
    State(state): State<Arc<AppState>>,
    Query(request): Query<HistoryRequest>,
) -> Result<Json<ApiResponse<ResultsDto>>, ApiError> {
    if request.query.trim().is_empty() {
        return Err(ApiError::validation("query must not be empty"));
    }

    let products = state.query.history(&request.query).await?;

    if products.is_empty() {
        return Err(ApiError::not_found(format!(
            "No stored results for query '{}'",
            request.query
        )));
    }

    Ok(Json(ApiResponse::success(ResultsDto::new(products))))
}
