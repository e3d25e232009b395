//! Inference provider configuration from TOML (`[provider]` section)

use buildpath_domain::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};

/// Provider names this build can talk to
pub const SUPPORTED_PROVIDERS: &[&str] = &["anthropic"];

/// Anthropic Messages API settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProviderConfig {
    /// Provider name (only "anthropic" today)
    pub name: String,
    /// Environment variable holding the API key (default: "ANTHROPIC_API_KEY").
    pub api_key_env: String,
    /// Direct API key. Prefer the environment variable.
    pub api_key: Option<String>,
    pub base_url: String,
    /// `anthropic-version` header value
    pub api_version: String,
    /// Max tokens per response.
    pub max_tokens: u32,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for FileProviderConfig {
    fn default() -> Self {
        Self {
            name: "anthropic".to_string(),
            api_key_env: "ANTHROPIC_API_KEY".to_string(),
            api_key: None,
            base_url: "https://api.anthropic.com".to_string(),
            api_version: "2023-06-01".to_string(),
            max_tokens: 4000,
            timeout_secs: 120,
        }
    }
}

impl FileProviderConfig {
    /// API key from config, falling back to the configured environment variable
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .or_else(|| std::env::var(&self.api_key_env).ok())
            .filter(|k| !k.trim().is_empty())
    }

    /// Issue describing a missing API key, checked separately from
    /// [`validate`](Self::validate) because it depends on the environment
    pub fn credential_issue(&self) -> Option<ConfigIssue> {
        if self.resolve_api_key().is_some() {
            return None;
        }
        Some(ConfigIssue::error(
            ConfigIssueCode::MissingApiKey {
                env_var: self.api_key_env.clone(),
            },
            format!(
                "No API key: set {} or provider.api_key",
                self.api_key_env
            ),
        ))
    }

    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        if !SUPPORTED_PROVIDERS.contains(&self.name.trim().to_lowercase().as_str()) {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::InvalidEnumValue {
                    field: "provider.name".to_string(),
                    value: self.name.clone(),
                    valid_values: SUPPORTED_PROVIDERS.iter().map(|s| s.to_string()).collect(),
                },
                format!("provider.name: unknown provider '{}'", self.name),
            ));
        }
        if self.max_tokens == 0 {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::ZeroValue {
                    field: "provider.max_tokens".to_string(),
                },
                "provider.max_tokens must be greater than 0",
            ));
        }
        if self.timeout_secs == 0 {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::ZeroValue {
                    field: "provider.timeout_secs".to_string(),
                },
                "provider.timeout_secs must be greater than 0",
            ));
        }

        issues
    }
}
