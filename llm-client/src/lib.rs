//! Shared LLM client for the cli-programs workspace
//!
//! Exposes a provider-agnostic request/response API and the OpenAI-compatible
//! chat completions provider used by the workspace tools.

mod error;
mod provider;
pub mod providers;

pub use error::{LlmError, Result};
pub use provider::{LlmProvider, LlmRequest, LlmResponse, TokenUsage, api_key_from_env};
pub use providers::MockProvider;
pub use providers::openai_compatible::OpenAICompatibleProvider;
