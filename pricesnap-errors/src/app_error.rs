use serde::{Deserialize, Serialize};

/// Failure taxonomy shared by every pipeline stage.
///
/// Most variants never reach a caller: each external boundary recovers and
/// logs them, and the orchestrator only reports "no data". They exist so
/// the log lines say which boundary gave up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, thiserror::Error)]
pub enum AppError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Request failed: {0}")]
    TransportFailure(String),

    #[error("Blocked by website: {0}")]
    BlockDetected(String),

    #[error("Completion service failed: {0}")]
    CompletionFailed(String),

    #[error("Malformed completion reply: {0}")]
    MalformedReply(String),

    #[error("Malformed field: {0}")]
    MalformedField(String),

    #[error("I/O error: {0}")]
    Io(String),
}

impl AppError {
    pub fn user_message(&self) -> &str {
        match self {
            Self::InvalidUrl(_) => "The URL is not valid. Use an absolute http(s) URL.",
            Self::Config(_) => "Missing or invalid Azure OpenAI configuration.",
            Self::TransportFailure(_) => "Could not reach the website.",
            Self::BlockDetected(_) => "The website blocked the request.",
            Self::CompletionFailed(_) => "The completion service is unavailable.",
            Self::MalformedReply(_) => "The completion service returned an unusable reply.",
            Self::MalformedField(_) => "A product field could not be read.",
            Self::Io(_) => "Could not write to disk.",
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io(err.to_string())
    }
}
