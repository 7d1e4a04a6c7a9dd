use crate::domain::FetchResult;
use pricesnap_errors::AppError;
use reqwest::header::HeaderMap;

const MAX_REDIRECTS: usize = 5;

/// Issues a single GET per call. Transport errors never escape: they come
/// back as [`FetchResult::transport_failure`].
pub struct PageFetcher {
    http_client: reqwest::Client,
}

impl PageFetcher {
    pub fn new() -> Result<Self, AppError> {
        let http_client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .build()
            .map_err(|e| AppError::Config(format!("failed to create HTTP client: {}", e)))?;
        Ok(Self { http_client })
    }

    pub async fn fetch(&self, url: &str, headers: HeaderMap) -> FetchResult {
        match self.try_fetch(url, headers).await {
            Ok(result) => result,
            Err(e) => {
                tracing::error!(url, "Request failed: {}", e);
                FetchResult::transport_failure()
            }
        }
    }

    async fn try_fetch(&self, url: &str, headers: HeaderMap) -> Result<FetchResult, AppError> {
        let response = self
            .http_client
            .get(url)
            .headers(headers)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(transport_error)?;

        tracing::debug!(url, status, bytes = body.len(), "Fetched page");
        Ok(FetchResult::new(body, status))
    }
}

fn transport_error(err: reqwest::Error) -> AppError {
    if err.is_timeout() {
        AppError::TransportFailure(format!("timed out: {}", err))
    } else if err.is_connect() {
        AppError::TransportFailure(format!("connection failed: {}", err))
    } else {
        AppError::TransportFailure(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_connection_error_maps_to_transport_failure() {
        let fetcher = PageFetcher::new().unwrap();
        // Nothing listens on port 1.
        let result = fetcher.fetch("http://127.0.0.1:1/", HeaderMap::new()).await;

        assert!(result.is_transport_failure());
        assert_eq!(result.status_code, 500);
    }

    #[tokio::test]
    async fn test_unresolvable_host_maps_to_transport_failure() {
        let fetcher = PageFetcher::new().unwrap();
        let result = fetcher
            .fetch("http://does-not-exist.invalid/", HeaderMap::new())
            .await;

        assert_eq!(result, FetchResult::transport_failure());
    }
}
