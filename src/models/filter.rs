use serde::{Deserialize, Serialize};

use crate::entities::SearchRecords;

/// Filter/sort configuration for scratch-table queries.
///
/// A threshold participates only when it is greater than zero, so the
/// all-zero configuration naturally applies no predicates at all. There is
/// no separate "no filtering requested" path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductFilter {
    pub min_price: f64,
    pub max_price: f64,
    pub min_rating: f64,
    pub sort_by: SortField,
    pub order: SortOrder,
    /// Collapse duplicate listings by (title, price). Honored only for the
    /// historical scratch table.
    pub dedup: bool,
}

impl Default for ProductFilter {
    fn default() -> Self {
        Self {
            min_price: 0.0,
            max_price: 0.0,
            min_rating: 0.0,
            sort_by: SortField::Price,
            order: SortOrder::Asc,
            dedup: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    #[default]
    Price,
    Rating,
    ReviewCount,
    Title,
}

impl SortField {
    /// Parses a sort-field name, falling back to price for anything
    /// unrecognized.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw {
            "rating" => Self::Rating,
            "review_count" => Self::ReviewCount,
            "title" => Self::Title,
            _ => Self::Price,
        }
    }

    #[must_use]
    pub const fn column(self) -> SearchRecords {
        match self {
            Self::Price => SearchRecords::Price,
            Self::Rating => SearchRecords::Rating,
            Self::ReviewCount => SearchRecords::ReviewCount,
            Self::Title => SearchRecords::Title,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw {
            "desc" => Self::Desc,
            _ => Self::Asc,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_field_falls_back_to_price() {
        assert_eq!(SortField::parse("rating"), SortField::Rating);
        assert_eq!(SortField::parse("review_count"), SortField::ReviewCount);
        assert_eq!(SortField::parse("title"), SortField::Title);
        assert_eq!(SortField::parse("price"), SortField::Price);
        assert_eq!(SortField::parse("bogus"), SortField::Price);
        assert_eq!(SortField::parse(""), SortField::Price);
    }

    #[test]
    fn sort_order_defaults_to_asc() {
        assert_eq!(SortOrder::parse("desc"), SortOrder::Desc);
        assert_eq!(SortOrder::parse("asc"), SortOrder::Asc);
        assert_eq!(SortOrder::parse("sideways"), SortOrder::Asc);
    }
}
