use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState, ResultsDto};
use crate::entities::StoreTable;
use crate::models::{ProductFilter, SortField, SortOrder};

#[derive(Debug, Deserialize, Default)]
pub struct FilterRequest {
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub min_rating: Option<f64>,
    pub sort_by: Option<String>,
    pub order: Option<String>,
    pub dedup: Option<bool>,
}

impl FilterRequest {
    /// Unrecognized sort fields fall back to price, unrecognized orders to
    /// ascending; thresholds default to zero, i.e. inactive.
    fn into_filter(self) -> ProductFilter {
        ProductFilter {
            min_price: self.min_price.unwrap_or(0.0),
            max_price: self.max_price.unwrap_or(0.0),
            min_rating: self.min_rating.unwrap_or(0.0),
            sort_by: self.sort_by.as_deref().map(SortField::parse).unwrap_or_default(),
            order: self.order.as_deref().map(SortOrder::parse).unwrap_or_default(),
            dedup: self.dedup.unwrap_or(false),
        }
    }
}

fn parse_scope(scope: &str) -> Result<StoreTable, ApiError> {
    match scope {
        "live" => Ok(StoreTable::LiveScratch),
        "history" | "hist" => Ok(StoreTable::HistoryScratch),
        other => Err(ApiError::validation(format!(
            "unknown scope '{other}', expected 'live' or 'history'"
        ))),
    }
}

fn parse_table(table: &str) -> Result<StoreTable, ApiError> {
    match table {
        "permanent" => Ok(StoreTable::Permanent),
        other => parse_scope(other).map_err(|_| {
            ApiError::validation(format!(
                "unknown table '{other}', expected 'permanent', 'live' or 'history'"
            ))
        }),
    }
}

pub async fn filter_live(
    State(state): State<Arc<AppState>>,
    Query(request): Query<FilterRequest>,
) -> Result<Json<ApiResponse<ResultsDto>>, ApiError> {
    let filter = request.into_filter();
    let products = state.query.filter_live(&filter).await?;
    Ok(Json(ApiResponse::success(ResultsDto::new(products))))
}

pub async fn filter_history(
    State(state): State<Arc<AppState>>,
    Query(request): Query<FilterRequest>,
) -> Result<Json<ApiResponse<ResultsDto>>, ApiError> {
    let filter = request.into_filter();
    let products = state.query.filter_history(&filter).await?;
    Ok(Json(ApiResponse::success(ResultsDto::new(products))))
}

/// Unfiltered dump of a scratch table, for "total found" counts.
pub async fn all_results(
    State(state): State<Arc<AppState>>,
    Path(scope): Path<String>,
) -> Result<Json<ApiResponse<ResultsDto>>, ApiError> {
    let table = parse_scope(&scope)?;
    let products = state.query.all_of(table).await?;
    Ok(Json(ApiResponse::success(ResultsDto::new(products))))
}

/// Transactional clear of any of the three tables.
pub async fn clear_table(
    State(state): State<Arc<AppState>>,
    Path(table): Path<String>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    let table = parse_table(&table)?;
    state.query.clear(table).await?;
    Ok(Json(ApiResponse::success(())))
}
