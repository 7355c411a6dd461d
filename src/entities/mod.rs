pub mod search_record;

pub use search_record::{SearchRecordRow, SearchRecords, StoreTable};
