//! In-process stand-ins for the completion service.

use crate::infrastructure::completion::CompletionService;
use async_trait::async_trait;
use pricesnap_errors::AppError;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Replies with a canned result and records every call.
pub struct StubCompletion {
    reply: Result<String, AppError>,
    calls: AtomicUsize,
    contexts: Mutex<Vec<String>>,
}

impl StubCompletion {
    pub fn replying(reply: impl Into<String>) -> Self {
        Self::with_result(Ok(reply.into()))
    }

    pub fn failing(err: AppError) -> Self {
        Self::with_result(Err(err))
    }

    fn with_result(reply: Result<String, AppError>) -> Self {
        Self {
            reply,
            calls: AtomicUsize::new(0),
            contexts: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn contexts(&self) -> Vec<String> {
        self.contexts.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionService for StubCompletion {
    async fn complete_json(&self, _instruction: &str, context: &str) -> Result<String, AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.contexts.lock().unwrap().push(context.to_string());
        self.reply.clone()
    }
}
