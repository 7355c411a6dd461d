use axum::{
    Router,
    http::HeaderValue,
    routing::{delete, get},
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

mod error;
mod filter;
mod search;
mod system;
mod types;

pub use error::ApiError;
pub use types::*;

use crate::clients::AmazonClient;
use crate::config::Config;
use crate::db::Store;
use crate::services::{QueryService, ScrapeService};

#[derive(Clone)]
pub struct AppState {
    pub store: Store,

    pub scraper: Arc<ScrapeService>,

    pub query: Arc<QueryService>,

    pub config: Config,
}

pub async fn create_app_state_from_config(config: Config) -> anyhow::Result<Arc<AppState>> {
    let store = Store::with_pool_options(
        &config.general.database_path,
        config.general.max_db_connections,
        config.general.min_db_connections,
    )
    .await?;

    let client = AmazonClient::new(&config.marketplace)?;
    let scraper = Arc::new(ScrapeService::new(
        store.clone(),
        client,
        &config.marketplace,
    ));
    let query = Arc::new(QueryService::new(store.clone()));

    Ok(Arc::new(AppState {
        store,
        scraper,
        query,
        config,
    }))
}

pub fn router(state: Arc<AppState>) -> Router {
    let cors_origins = state.config.server.cors_allowed_origins.clone();

    let cors = if cors_origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<HeaderValue> = cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    };

    Router::new()
        .route("/api/health", get(system::health))
        .route("/api/search", get(search::search_products))
        .route("/api/history", get(search::history))
        .route("/api/filter/live", get(filter::filter_live))
        .route("/api/filter/history", get(filter::filter_history))
        .route("/api/results/{scope}", get(filter::all_results))
        .route("/api/tables/{table}", delete(filter::clear_table))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
