mod scrape_product;

pub use scrape_product::{ScrapeProduct, ScrapeStage};
