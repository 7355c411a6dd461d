use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub const fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Result payload for search/history/filter endpoints.
#[derive(Debug, Serialize)]
pub struct ResultsDto {
    pub total: usize,
    pub products: Vec<crate::models::Product>,
}

impl ResultsDto {
    #[must_use]
    pub fn new(products: Vec<crate::models::Product>) -> Self {
        Self {
            total: products.len(),
            products,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthDto {
    pub status: &'static str,
    pub database: &'static str,
}
