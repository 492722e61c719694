// commit-gen configuration

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

const DEFAULT_MODEL: &str = "gpt-4o";
const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_MAX_TOKENS: u32 = 10000;
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Globs left out of the diff sent for generation, matched at any depth
const DEFAULT_EXCLUDE: &[&str] = &[
    "**/package-lock.json",
    "**/pnpm-lock.yaml",
    "**/yarn.lock",
    "**/*.svg",
];

/// Environment variable holding the API credential
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitGenConfig {
    #[serde(default = "default_model")]
    pub model: String,

    /// Base URL of an OpenAI-compatible chat completions API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Upper bound on generated tokens
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Request timeout for the generation call
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Glob patterns excluded from the staged diff, relative to the current
    /// directory; use a `**/` prefix to match in subdirectories
    #[serde(default = "default_exclude")]
    pub exclude: Vec<String>,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_max_tokens() -> u32 {
    DEFAULT_MAX_TOKENS
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_exclude() -> Vec<String> {
    DEFAULT_EXCLUDE.iter().map(|s| s.to_string()).collect()
}

impl Default for CommitGenConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            base_url: default_base_url(),
            max_tokens: DEFAULT_MAX_TOKENS,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            exclude: default_exclude(),
        }
    }
}

impl CommitGenConfig {
    /// Get the config file path: ~/.config/cli-programs/commit-gen.toml
    pub fn config_path() -> Result<PathBuf> {
        let home = std::env::var("HOME").or_else(|_| std::env::var("USERPROFILE"))?;
        Ok(PathBuf::from(home)
            .join(".config")
            .join("cli-programs")
            .join("commit-gen.toml"))
    }

    /// Load config from file, returning default if file doesn't exist
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: CommitGenConfig = toml::from_str(&content)
            .with_context(|| format!("Invalid configuration in {}", path.display()))?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CommitGenConfig::default();
        assert_eq!(config.model, "gpt-4o");
        assert_eq!(config.base_url, "https://api.openai.com/v1");
        assert_eq!(config.max_tokens, 10000);
        assert_eq!(config.timeout_secs, 60);
        assert_eq!(
            config.exclude,
            vec![
                "**/package-lock.json",
                "**/pnpm-lock.yaml",
                "**/yarn.lock",
                "**/*.svg"
            ]
        );
    }

    #[test]
    fn test_config_path() {
        let path = CommitGenConfig::config_path();
        assert!(path.is_ok());
        let path = path.unwrap();
        assert!(path.ends_with("cli-programs/commit-gen.toml"));
    }

    #[test]
    fn test_parse_config() {
        let toml_str = r#"
model = "gpt-4o-mini"
max_tokens = 2048
exclude = ["Cargo.lock", "*.png"]
"#;
        let config: CommitGenConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.max_tokens, 2048);
        assert_eq!(config.exclude, vec!["Cargo.lock", "*.png"]);
        assert_eq!(config.timeout_secs, 60); // default
    }

    #[test]
    fn test_parse_empty_config() {
        let config: CommitGenConfig = toml::from_str("").unwrap();
        assert_eq!(config.model, "gpt-4o");
        assert_eq!(config.exclude.len(), 4);
    }

    #[test]
    fn test_empty_exclude_list_is_kept() {
        let config: CommitGenConfig = toml::from_str("exclude = []").unwrap();
        assert!(config.exclude.is_empty());
    }

    #[test]
    fn test_rejects_wrong_type() {
        let result = toml::from_str::<CommitGenConfig>("max_tokens = \"lots\"");
        assert!(result.is_err());
    }
}
