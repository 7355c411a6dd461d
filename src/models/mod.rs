pub mod filter;
pub mod product;

pub use filter::{ProductFilter, SortField, SortOrder};
pub use product::Product;
