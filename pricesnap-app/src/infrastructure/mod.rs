pub mod azure_openai;
pub mod completion;
pub mod http;
pub mod scraper;
pub mod security;
