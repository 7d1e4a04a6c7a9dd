use super::types::{ChatCompletionRequest, ChatCompletionResponse};
use crate::config::AppConfig;
use crate::infrastructure::completion::CompletionService;
use async_trait::async_trait;
use pricesnap_errors::AppError;

pub struct AzureOpenAiClient {
    http_client: reqwest::Client,
    endpoint: String,
    api_key: String,
    api_version: String,
    deployment: String,
}

impl AzureOpenAiClient {
    pub fn new(config: &AppConfig) -> Self {
        tracing::info!(
            endpoint = %config.endpoint,
            deployment = %config.deployment,
            api_version = %config.api_version,
            "Azure OpenAI configuration"
        );

        Self {
            http_client: reqwest::Client::new(),
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
            api_version: config.api_version.clone(),
            deployment: config.deployment.clone(),
        }
    }

    pub fn completions_url(&self) -> String {
        format!(
            "{}/openai/deployments/{}/chat/completions?api-version={}",
            self.endpoint, self.deployment, self.api_version
        )
    }
}

#[async_trait]
impl CompletionService for AzureOpenAiClient {
    async fn complete_json(&self, instruction: &str, context: &str) -> Result<String, AppError> {
        let prompt = format!("{}\n\n{}", instruction, context);
        let request = ChatCompletionRequest::json_object(&self.deployment, prompt);

        let response = self
            .http_client
            .post(self.completions_url())
            .header("api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| AppError::CompletionFailed(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!("Azure OpenAI error: {} - {}", status, body);
            return Err(AppError::CompletionFailed(format!("API error: {}", status)));
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| AppError::CompletionFailed(e.to_string()))?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| AppError::CompletionFailed("No content in completion".to_string()))
    }
}
