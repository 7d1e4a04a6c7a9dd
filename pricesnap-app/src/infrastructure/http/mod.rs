mod headers;
mod page_fetcher;

pub use headers::{HeaderRandomizer, USER_AGENTS};
pub use page_fetcher::PageFetcher;
