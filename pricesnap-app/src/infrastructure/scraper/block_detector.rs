use crate::domain::{BlockVerdict, VerdictSource};
use crate::infrastructure::azure_openai::prompt::{
    build_block_check_context, BLOCK_CHECK_INSTRUCTION,
};
use crate::infrastructure::completion::{parse_json_object, CompletionService};
use pricesnap_errors::AppError;
use serde::Deserialize;
use std::sync::Arc;

const BLOCKING_STATUS_CODES: &[u16] = &[403, 429, 503];

const BLOCKING_PHRASES: &[&str] = &["captcha", "access denied", "rate limit"];

#[derive(Debug, Deserialize)]
struct BlockCheckReply {
    #[serde(default)]
    is_blocked: bool,
    #[serde(default)]
    reason: Option<String>,
}

/// Decides whether a fetched page is an anti-bot wall.
///
/// Cheap status and phrase checks run first and win outright. Only when
/// none fire is the semantic classifier asked, and an unusable answer from
/// it counts as "not blocked" so a classifier outage never halts scraping.
pub struct BlockDetector {
    completion: Arc<dyn CompletionService>,
}

impl BlockDetector {
    pub fn new(completion: Arc<dyn CompletionService>) -> Self {
        Self { completion }
    }

    pub async fn detect(&self, body: &str, status_code: u16) -> BlockVerdict {
        if let Some(reason) = heuristic_block_reason(body, status_code) {
            tracing::error!(status = status_code, %reason, "Blocking detected");
            return BlockVerdict::blocked(VerdictSource::Heuristic, reason);
        }

        match self.classify(body).await {
            Ok(verdict) => {
                if verdict.is_blocked {
                    tracing::error!(
                        reason = verdict.reason.as_deref().unwrap_or("unspecified"),
                        "Classifier detected blocking"
                    );
                }
                verdict
            }
            Err(e) => {
                tracing::error!(
                    "Error in blocking classifier, treating page as not blocked: {}",
                    e
                );
                BlockVerdict::clear(VerdictSource::Semantic)
            }
        }
    }

    async fn classify(&self, body: &str) -> Result<BlockVerdict, AppError> {
        let reply = self
            .completion
            .complete_json(BLOCK_CHECK_INSTRUCTION, &build_block_check_context(body))
            .await?;

        let parsed: BlockCheckReply = parse_json_object(&reply, "block check")?;

        let reason = parsed.reason.filter(|r| !r.trim().is_empty());
        let verdict = if parsed.is_blocked {
            BlockVerdict::blocked(
                VerdictSource::Semantic,
                reason.unwrap_or_else(|| "flagged by classifier".to_string()),
            )
        } else {
            BlockVerdict::clear(VerdictSource::Semantic).with_reason(reason)
        };
        Ok(verdict)
    }
}

/// The first heuristic that flags the response, if any.
pub fn heuristic_block_reason(body: &str, status_code: u16) -> Option<String> {
    if BLOCKING_STATUS_CODES.contains(&status_code) {
        return Some(format!("status code {}", status_code));
    }

    let lower = body.to_lowercase();
    BLOCKING_PHRASES
        .iter()
        .find(|phrase| lower.contains(*phrase))
        .map(|phrase| format!("page mentions \"{}\"", phrase))
}
