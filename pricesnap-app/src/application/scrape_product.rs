use crate::domain::ExtractedRecord;
use crate::infrastructure::completion::CompletionService;
use crate::infrastructure::http::{HeaderRandomizer, PageFetcher};
use crate::infrastructure::scraper::{BlockDetector, ContentReducer, ProductExtractor};
use crate::infrastructure::security::InputSanitizer;
use pricesnap_errors::AppError;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrapeStage {
    Fetching,
    Checking,
    Extracting,
    Done,
    Failed,
}

impl fmt::Display for ScrapeStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Fetching => "fetching",
            Self::Checking => "checking",
            Self::Extracting => "extracting",
            Self::Done => "done",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Fetch → block check → reduce → extract, for one fixed product URL.
///
/// Holds no mutable state, so one instance can serve concurrent `scrape`
/// calls and separate instances never interfere.
pub struct ScrapeProduct {
    url: Url,
    source_url: String,
    domain: String,
    headers: HeaderRandomizer,
    fetcher: Arc<PageFetcher>,
    detector: BlockDetector,
    reducer: ContentReducer,
    extractor: ProductExtractor,
    debug_artifact: Option<PathBuf>,
}

impl ScrapeProduct {
    pub fn new(
        url: &str,
        fetcher: Arc<PageFetcher>,
        completion: Arc<dyn CompletionService>,
    ) -> Result<Self, AppError> {
        let parsed = InputSanitizer::validate_url(url)?;
        let domain = parsed.host_str().unwrap_or_default().to_string();

        Ok(Self {
            url: parsed,
            source_url: url.trim().to_string(),
            domain,
            headers: HeaderRandomizer::new(),
            fetcher,
            detector: BlockDetector::new(completion.clone()),
            reducer: ContentReducer::new(),
            extractor: ProductExtractor::new(completion),
            debug_artifact: None,
        })
    }

    pub fn with_debug_artifact(mut self, debug_artifact: Option<PathBuf>) -> Self {
        self.debug_artifact = debug_artifact;
        self
    }

    pub fn with_headers(mut self, headers: HeaderRandomizer) -> Self {
        self.headers = headers;
        self
    }

    pub fn url(&self) -> &str {
        &self.source_url
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Runs the pipeline once. Every failure is logged and becomes `None`.
    pub async fn scrape(&self) -> Option<ExtractedRecord> {
        match self.try_scrape().await {
            Ok(record) => {
                self.enter(ScrapeStage::Done);
                Some(record)
            }
            Err(err) => {
                tracing::error!(
                    domain = %self.domain,
                    stage = %ScrapeStage::Failed,
                    "Scraping failed: {}",
                    err
                );
                None
            }
        }
    }

    /// Same pipeline as [`scrape`](Self::scrape), returning the error that
    /// stopped it.
    pub async fn try_scrape(&self) -> Result<ExtractedRecord, AppError> {
        self.enter(ScrapeStage::Fetching);
        let headers = self.headers.headers(&mut rand::thread_rng());
        let fetched = self.fetcher.fetch(self.url.as_str(), headers).await;

        let Some(body) = fetched.body.as_deref() else {
            return Err(AppError::TransportFailure(format!(
                "no response body (status {})",
                fetched.status_code
            )));
        };

        self.save_debug_artifact(body).await;

        self.enter(ScrapeStage::Checking);
        let verdict = self.detector.detect(body, fetched.status_code).await;
        if verdict.is_blocked {
            let reason = verdict.reason.unwrap_or_default();
            return Err(AppError::BlockDetected(format!(
                "{} ({})",
                reason, verdict.source
            )));
        }

        self.enter(ScrapeStage::Extracting);
        let reduced = self.reducer.reduce(body);
        self.extractor.try_extract(&reduced, &self.source_url).await
    }

    async fn save_debug_artifact(&self, body: &str) {
        let Some(path) = &self.debug_artifact else {
            return;
        };

        match tokio::fs::write(path, body).await {
            Ok(()) => tracing::info!(path = %path.display(), "Saved HTML response"),
            Err(e) => {
                let err = AppError::from(e);
                tracing::warn!(path = %path.display(), "Could not save HTML response: {}", err);
            }
        }
    }

    fn enter(&self, stage: ScrapeStage) {
        tracing::debug!(domain = %self.domain, %stage, "Scrape stage");
    }
}
