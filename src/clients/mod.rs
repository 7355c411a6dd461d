pub mod amazon;

pub use amazon::AmazonClient;
