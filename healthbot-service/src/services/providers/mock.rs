//! Mock provider implementation for testing.

use super::{FinishReason, GenerationRequest, ProviderError, ProviderResponse, TextProvider};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

enum Reply {
    Text(Option<String>),
    Fail(fn() -> ProviderError),
}

/// Mock text provider returning a canned reply and counting calls.
pub struct MockTextProvider {
    reply: Reply,
    calls: AtomicUsize,
    last_request: Mutex<Option<GenerationRequest>>,
}

impl MockTextProvider {
    /// Reply with the given text on every call.
    pub fn with_text(text: impl Into<String>) -> Self {
        Self::new(Reply::Text(Some(text.into())))
    }

    /// Reply successfully but without any text part.
    pub fn without_text() -> Self {
        Self::new(Reply::Text(None))
    }

    /// Fail every call with the error built by `error`.
    pub fn failing(error: fn() -> ProviderError) -> Self {
        Self::new(Reply::Fail(error))
    }

    fn new(reply: Reply) -> Self {
        Self {
            reply,
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    /// Number of `generate` calls so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// The most recent request, if any.
    pub fn last_request(&self) -> Option<GenerationRequest> {
        self.last_request
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl TextProvider for MockTextProvider {
    fn name(&self) -> &'static str {
        "mock"
    }

    fn model(&self) -> &str {
        "mock-model"
    }

    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<ProviderResponse, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.last_request.lock() {
            *last = Some(request.clone());
        }

        match &self.reply {
            Reply::Text(text) => Ok(ProviderResponse {
                text: text.clone(),
                input_tokens: request.user_message.len() as i32 / 4,
                output_tokens: text.as_ref().map_or(0, |t| t.len() as i32 / 4),
                finish_reason: FinishReason::Complete,
            }),
            Reply::Fail(error) => Err(error()),
        }
    }

    async fn health_check(&self) -> Result<(), ProviderError> {
        Ok(())
    }
}
