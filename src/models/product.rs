use serde::{Deserialize, Serialize};

/// One extracted search result, as returned to callers.
///
/// `valid` is a data-quality signal, not a storage gate: records with
/// missing fields are still persisted, they just carry `valid = false`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub title: String,
    pub price: Option<f64>,
    pub rating: Option<f64>,
    pub review_count: Option<i64>,
    pub product_url: Option<String>,
    pub image_url: Option<String>,
    pub valid: bool,
    /// RFC3339 UTC instant, set at extraction time.
    pub timestamp: String,
}

impl Product {
    #[must_use]
    pub fn new(
        title: String,
        price: Option<f64>,
        rating: Option<f64>,
        review_count: Option<i64>,
        product_url: Option<String>,
        image_url: Option<String>,
    ) -> Self {
        let valid = is_complete(
            &title,
            price,
            rating,
            review_count,
            product_url.as_deref(),
            image_url.as_deref(),
        );
        Self {
            title,
            price,
            rating,
            review_count,
            product_url,
            image_url,
            valid,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// True iff all six key fields are present and truthy.
///
/// Known wart, kept for compatibility with existing stored data: a numeric
/// zero counts as missing, so a free item or a zero-star rating marks the
/// record invalid even though the value was extracted fine.
#[must_use]
pub fn is_complete(
    title: &str,
    price: Option<f64>,
    rating: Option<f64>,
    review_count: Option<i64>,
    product_url: Option<&str>,
    image_url: Option<&str>,
) -> bool {
    !title.is_empty()
        && price.is_some_and(|p| p != 0.0)
        && rating.is_some_and(|r| r != 0.0)
        && review_count.is_some_and(|c| c != 0)
        && product_url.is_some_and(|u| !u.is_empty())
        && image_url.is_some_and(|u| !u.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_product() -> Product {
        Product::new(
            "Wireless Headphones".to_string(),
            Some(59.99),
            Some(4.5),
            Some(1234),
            Some("https://www.amazon.com/dp/B000".to_string()),
            Some("https://m.media-amazon.com/img.jpg".to_string()),
        )
    }

    #[test]
    fn complete_product_is_valid() {
        assert!(full_product().valid);
    }

    #[test]
    fn missing_price_is_invalid() {
        let p = Product::new(
            "Headphones".to_string(),
            None,
            Some(4.5),
            Some(10),
            Some("https://example.com".to_string()),
            Some("https://example.com/i.jpg".to_string()),
        );
        assert!(!p.valid);
    }

    #[test]
    fn zero_values_count_as_missing() {
        assert!(!is_complete(
            "Free item",
            Some(0.0),
            Some(4.0),
            Some(5),
            Some("u"),
            Some("i"),
        ));
        assert!(!is_complete(
            "Unrated",
            Some(9.99),
            Some(0.0),
            Some(5),
            Some("u"),
            Some("i"),
        ));
        assert!(!is_complete(
            "No reviews",
            Some(9.99),
            Some(4.0),
            Some(0),
            Some("u"),
            Some("i"),
        ));
    }

    #[test]
    fn empty_strings_count_as_missing() {
        assert!(!is_complete("", Some(1.0), Some(1.0), Some(1), Some("u"), Some("i")));
        assert!(!is_complete("t", Some(1.0), Some(1.0), Some(1), Some(""), Some("i")));
        assert!(!is_complete("t", Some(1.0), Some(1.0), Some(1), Some("u"), None));
    }

    #[test]
    fn timestamp_is_rfc3339() {
        let p = full_product();
        assert!(chrono::DateTime::parse_from_rfc3339(&p.timestamp).is_ok());
    }
}
