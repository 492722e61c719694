use thiserror::Error;

pub type Result<T> = std::result::Result<T, LlmError>;

#[derive(Debug, Clone, Error)]
pub enum LlmError {
    #[error("API error{}: {message}", .status_code.map(|c| format!(" ({})", c)).unwrap_or_default())]
    ApiError {
        message: String,
        status_code: Option<u16>,
    },

    #[error("Server overloaded: {message}")]
    ServerOverloaded { message: String },

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("{provider} API key not found. Set the {env_var} environment variable")]
    MissingApiKey { provider: String, env_var: String },

    #[error("Configuration error: {0}")]
    ConfigError(String),
}
