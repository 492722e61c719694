//! Commit message generation
//!
//! Sends the commit prompt to the configured provider and turns the reply
//! into a draft message. Failures come back as [`GenerationError`], which
//! knows the literal text to show in place of a draft.

use anyhow::{Context, Result};
use llm_client::{LlmError, LlmProvider, LlmRequest, OpenAICompatibleProvider};
use std::time::Duration;
use thiserror::Error;

use crate::config::CommitGenConfig;
use crate::prompts;

/// Returned without a request when there is nothing to describe
pub const NO_CHANGES_MESSAGE: &str = "No changes found.";
pub const EMPTY_RESPONSE_MESSAGE: &str = "Failed to generate a commit message.";
pub const REQUEST_FAILED_MESSAGE: &str = "Error generating commit message.";

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("the model returned an empty message")]
    Empty,

    #[error(transparent)]
    Request(#[from] LlmError),
}

impl GenerationError {
    /// Text used as the draft message when generation fails
    pub fn fallback_message(&self) -> &'static str {
        match self {
            GenerationError::Empty => EMPTY_RESPONSE_MESSAGE,
            GenerationError::Request(_) => REQUEST_FAILED_MESSAGE,
        }
    }
}

pub struct MessageGenerator<P: LlmProvider = OpenAICompatibleProvider> {
    provider: P,
    max_tokens: u32,
}

impl MessageGenerator {
    /// Build a generator talking to the configured OpenAI-compatible endpoint
    pub fn from_config(config: &CommitGenConfig, model: &str, api_key: String) -> Result<Self> {
        let provider = OpenAICompatibleProvider::new(
            model,
            &config.base_url,
            Some(api_key),
            "OpenAI",
            Duration::from_secs(config.timeout_secs),
        )
        .context("Failed to initialize LLM provider")?;
        provider
            .is_available()
            .context("Invalid base_url in configuration")?;

        log::debug!(
            "Using LLM provider: {} (model: {})",
            provider.name(),
            provider.model()
        );

        Ok(Self::new(provider, config.max_tokens))
    }
}

impl<P: LlmProvider> MessageGenerator<P> {
    pub fn new(provider: P, max_tokens: u32) -> Self {
        Self {
            provider,
            max_tokens,
        }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Draft a commit message for `diff`.
    ///
    /// An empty diff short-circuits to [`NO_CHANGES_MESSAGE`] without a request.
    /// Otherwise exactly one request is sent and the first completion, trimmed,
    /// is returned.
    pub async fn generate(&self, diff: &str) -> std::result::Result<String, GenerationError> {
        if diff.is_empty() {
            return Ok(NO_CHANGES_MESSAGE.to_string());
        }

        let request = LlmRequest {
            prompt: String::new(),
            system_prompt: Some(prompts::build_commit_prompt(diff)),
            max_tokens: Some(self.max_tokens),
            temperature: None,
        };

        log::debug!("Sending request to {}", self.provider.name());

        let response = self.provider.complete(request).await?;

        if let Some(usage) = &response.usage {
            log::debug!(
                "Tokens: {} in, {} out",
                usage.input_tokens,
                usage.output_tokens
            );
        }

        let message = response.content.trim();
        if message.is_empty() {
            return Err(GenerationError::Empty);
        }

        Ok(message.to_string())
    }
}
