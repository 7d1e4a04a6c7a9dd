//! PriceSnap: fetch one product page, reject anti-bot walls, and pull out
//! name, price, currency and promotion with a hosted language model.
//!
//! ```text
//! PageFetcher → BlockDetector → ContentReducer → ProductExtractor
//!                   │ heuristics first,
//!                   └ classifier fallback (fail-open)
//! ```

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

mod app_context;

#[cfg(test)]
mod testing;

pub use app_context::AppContext;
pub use application::{ScrapeProduct, ScrapeStage};
pub use config::AppConfig;
pub use domain::{BlockVerdict, ExtractedRecord, FetchResult, VerdictSource};
pub use infrastructure::completion::CompletionService;
