use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::fmt;

use super::ApiResponse;
use crate::error::ScrapeError;

#[derive(Debug)]
pub enum ApiError {
    NotFound(String),

    ValidationError(String),

    Scrape(ScrapeError),

    InternalError(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            ApiError::Scrape(e) => write!(f, "Scrape error: {}", e),
            ApiError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            ApiError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::Scrape(e) => {
                tracing::warn!("Scrape failed: {}", e);
                match e {
                    ScrapeError::Timeout(_) => (StatusCode::GATEWAY_TIMEOUT, e.to_string()),
                    // An upstream 404 means the search page itself does not
                    // exist, which reads as "nothing found" to our callers.
                    ScrapeError::Http { status: 404 } => (StatusCode::NOT_FOUND, e.to_string()),
                    ScrapeError::Connection(_)
                    | ScrapeError::Http { .. }
                    | ScrapeError::Request(_) => (StatusCode::BAD_GATEWAY, e.to_string()),
                    ScrapeError::Parsing(_) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
                }
            }
            ApiError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = ApiResponse::<()>::error(error_message);
        (status, Json(body)).into_response()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::InternalError(err.to_string())
    }
}

impl From<ScrapeError> for ApiError {
    fn from(err: ScrapeError) -> Self {
        ApiError::Scrape(err)
    }
}

impl ApiError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        ApiError::NotFound(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        ApiError::ValidationError(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: ApiError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn scrape_errors_map_to_gateway_statuses() {
        let timeout = ApiError::Scrape(ScrapeError::Timeout("q".to_string()));
        assert_eq!(status_of(timeout), StatusCode::GATEWAY_TIMEOUT);

        let conn = ApiError::Scrape(ScrapeError::Connection("refused".to_string()));
        assert_eq!(status_of(conn), StatusCode::BAD_GATEWAY);

        let upstream = ApiError::Scrape(ScrapeError::Http { status: 503 });
        assert_eq!(status_of(upstream), StatusCode::BAD_GATEWAY);

        let parsing = ApiError::Scrape(ScrapeError::Parsing("bad page".to_string()));
        assert_eq!(status_of(parsing), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn upstream_404_reads_as_not_found() {
        let missing = ApiError::Scrape(ScrapeError::Http { status: 404 });
        assert_eq!(status_of(missing), StatusCode::NOT_FOUND);
    }

    #[test]
    fn internal_errors_hide_the_message() {
        let response = ApiError::InternalError("db exploded".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
