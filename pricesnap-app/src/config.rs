use pricesnap_errors::AppError;
use std::path::PathBuf;

pub const DEFAULT_API_VERSION: &str = "2024-02-15-preview";
pub const DEFAULT_DEBUG_ARTIFACT: &str = "last_response.html";

/// Process-wide settings, read once at startup and shared read-only.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the Azure OpenAI resource, without the `/openai/...` path.
    pub endpoint: String,
    pub api_key: String,
    pub api_version: String,
    pub deployment: String,
    /// Where the last fetched page is written. `None` disables the write.
    pub debug_artifact: Option<PathBuf>,
}

impl AppConfig {
    pub fn new(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        deployment: impl Into<String>,
    ) -> Self {
        Self {
            endpoint: base_endpoint(&endpoint.into()),
            api_key: api_key.into(),
            api_version: DEFAULT_API_VERSION.to_string(),
            deployment: deployment.into(),
            debug_artifact: Some(PathBuf::from(DEFAULT_DEBUG_ARTIFACT)),
        }
    }

    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = api_version.into();
        self
    }

    pub fn with_debug_artifact(mut self, debug_artifact: Option<PathBuf>) -> Self {
        self.debug_artifact = debug_artifact;
        self
    }

    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let require = |key: &str| {
            get(key).ok_or_else(|| AppError::Config(format!("{} must be set", key)))
        };

        let endpoint = require("AZURE_OPENAI_ENDPOINT")?;
        let api_key = get("AZURE_OPENAI_KEY")
            .or_else(|| get("AZURE_OPENAI_API_KEY"))
            .ok_or_else(|| {
                AppError::Config("AZURE_OPENAI_KEY or AZURE_OPENAI_API_KEY must be set".to_string())
            })?;
        let deployment = require("AZURE_OPENAI_DEPLOYMENT_NAME")?;

        let mut config = Self::new(endpoint, api_key, deployment);
        if let Some(api_version) = get("AZURE_OPENAI_API_VERSION") {
            config.api_version = api_version;
        }
        if let Some(path) = get("PRICESNAP_DEBUG_ARTIFACT") {
            config.debug_artifact = Some(PathBuf::from(path));
        }
        Ok(config)
    }
}

/// Strips a pasted `/openai/deployments/...` suffix and trailing slashes.
fn base_endpoint(endpoint: &str) -> String {
    let base = endpoint.split("/openai/").next().unwrap_or(endpoint);
    base.trim().trim_end_matches('/').to_string()
}
