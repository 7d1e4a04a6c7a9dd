mod block_detector;
mod content_reducer;
pub mod price;
mod product_extractor;

pub use block_detector::{heuristic_block_reason, BlockDetector};
pub use content_reducer::{ContentReducer, NO_PRODUCT_SECTION};
pub use product_extractor::{parse_product_reply, ProductExtractor};
