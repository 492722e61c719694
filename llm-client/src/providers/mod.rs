//! Provider implementations

pub mod openai_compatible;

use async_trait::async_trait;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::error::{LlmError, Result};
use crate::provider::{LlmProvider, LlmRequest, LlmResponse};

/// In-memory provider returning a canned result, for tests of code that
/// depends on `LlmProvider`
#[derive(Debug)]
pub struct MockProvider {
    outcome: std::result::Result<String, LlmError>,
    calls: AtomicUsize,
    last_request: Mutex<Option<LlmRequest>>,
}

impl MockProvider {
    pub fn always_succeeds(content: &str) -> Self {
        Self::with_outcome(Ok(content.to_string()))
    }

    pub fn always_fails(error: LlmError) -> Self {
        Self::with_outcome(Err(error))
    }

    fn with_outcome(outcome: std::result::Result<String, LlmError>) -> Self {
        Self {
            outcome,
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    /// Number of `complete` calls made so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<LlmRequest> {
        self.last_request
            .lock()
            .ok()
            .and_then(|guard| guard.clone())
    }
}

#[async_trait]
impl LlmProvider for MockProvider {
    async fn complete(&self, request: LlmRequest) -> Result<LlmResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.last_request.lock() {
            *last = Some(request);
        }

        self.outcome.clone().map(|content| LlmResponse {
            content,
            model: "mock".to_string(),
            usage: None,
        })
    }

    fn name(&self) -> &'static str {
        "Mock"
    }

    fn is_available(&self) -> Result<()> {
        Ok(())
    }
}
