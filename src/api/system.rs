use axum::{Json, extract::State};
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState, HealthDto};

pub async fn health(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<HealthDto>>, ApiError> {
    let database = match state.store.ping().await {
        Ok(()) => "ok",
        Err(_) => "unreachable",
    };

    Ok(Json(ApiResponse::success(HealthDto {
        status: "ok",
        database,
    })))
}
