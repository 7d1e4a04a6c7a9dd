use pricesnap_errors::AppError;
use url::Url;

const MAX_URL_LENGTH: usize = 2048;

const ALLOWED_SCHEMES: &[&str] = &["http", "https"];

pub struct InputSanitizer;

impl InputSanitizer {
    pub fn validate_url(url: &str) -> Result<Url, AppError> {
        let url = url.trim();

        if url.is_empty() {
            return Err(AppError::InvalidUrl("URL must not be empty".to_string()));
        }

        if url.len() > MAX_URL_LENGTH {
            return Err(AppError::InvalidUrl("URL is too long".to_string()));
        }

        let parsed = Url::parse(url)
            .map_err(|e| AppError::InvalidUrl(format!("{}: {}", url, e)))?;

        let scheme = parsed.scheme().to_lowercase();
        if !ALLOWED_SCHEMES.contains(&scheme.as_str()) {
            return Err(AppError::InvalidUrl(
                "only HTTP and HTTPS are supported".to_string(),
            ));
        }

        if parsed.host_str().map_or(true, str::is_empty) {
            return Err(AppError::InvalidUrl("URL must have a host".to_string()));
        }

        Ok(parsed)
    }
}
