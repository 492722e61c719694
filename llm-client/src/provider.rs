use async_trait::async_trait;

use crate::error::{LlmError, Result};

/// A single completion request
#[derive(Debug, Clone, Default)]
pub struct LlmRequest {
    pub prompt: String,
    pub system_prompt: Option<String>,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
}

#[derive(Debug, Clone)]
pub struct LlmResponse {
    pub content: String,
    pub model: String,
    pub usage: Option<TokenUsage>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenUsage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

/// A backend capable of producing completions
#[async_trait]
pub trait LlmProvider: Send + Sync {
    async fn complete(&self, request: LlmRequest) -> Result<LlmResponse>;

    /// Human-readable provider name for diagnostics
    fn name(&self) -> &'static str;

    /// Check that the provider can be used (credentials, binaries, ...)
    fn is_available(&self) -> Result<()>;
}

/// Read an API key from the environment, treating an empty value as missing
pub fn api_key_from_env(provider: &str, env_var: &str) -> Result<String> {
    match std::env::var(env_var) {
        Ok(key) if !key.trim().is_empty() => Ok(key.trim().to_string()),
        _ => Err(LlmError::MissingApiKey {
            provider: provider.to_string(),
            env_var: env_var.to_string(),
        }),
    }
}
