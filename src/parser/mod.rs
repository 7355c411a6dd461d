pub mod normalize;
pub mod page;

pub use page::{parse_first, parse_results};
