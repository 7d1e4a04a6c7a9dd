mod block_verdict;
mod extracted_record;
mod fetch_result;

pub use block_verdict::{BlockVerdict, VerdictSource};
pub use extracted_record::ExtractedRecord;
pub use fetch_result::{FetchResult, TRANSPORT_FAILURE_STATUS};
