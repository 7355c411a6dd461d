pub mod query;
pub mod scrape;

pub use query::QueryService;
pub use scrape::ScrapeService;
