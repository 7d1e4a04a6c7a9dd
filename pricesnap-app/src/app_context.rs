use crate::application::ScrapeProduct;
use crate::config::AppConfig;
use crate::infrastructure::azure_openai::AzureOpenAiClient;
use crate::infrastructure::completion::CompletionService;
use crate::infrastructure::http::PageFetcher;
use pricesnap_errors::AppError;
use std::sync::Arc;

/// Long-lived handles shared by every scrape in the process.
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<AppConfig>,
    pub fetcher: Arc<PageFetcher>,
    pub completion: Arc<dyn CompletionService>,
}

impl AppContext {
    pub fn new(config: AppConfig) -> Result<Self, AppError> {
        let completion = Arc::new(AzureOpenAiClient::new(&config));
        Self::with_completion(config, completion)
    }

    pub fn with_completion(
        config: AppConfig,
        completion: Arc<dyn CompletionService>,
    ) -> Result<Self, AppError> {
        Ok(Self {
            config: Arc::new(config),
            fetcher: Arc::new(PageFetcher::new()?),
            completion,
        })
    }

    pub fn from_env() -> Result<Self, AppError> {
        Self::new(AppConfig::from_env()?)
    }

    /// A pipeline bound to `url`, sharing this context's clients.
    pub fn scrape_product(&self, url: &str) -> Result<ScrapeProduct, AppError> {
        Ok(
            ScrapeProduct::new(url, self.fetcher.clone(), self.completion.clone())?
                .with_debug_artifact(self.config.debug_artifact.clone()),
        )
    }
}
