//! Tier-to-model mapping from TOML (`[models]` section)

use buildpath_domain::{ConfigIssue, ConfigIssueCode, ModelTier};
use serde::{Deserialize, Serialize};

/// Concrete model identifiers for each tier
///
/// # Example
///
/// ```toml
/// [models]
/// premium = "claude-opus-4-5-20251101"    # planner and its coach
/// standard = "claude-sonnet-4-20250514"   # everyone else
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileModelsConfig {
    pub premium: String,
    pub standard: String,
}

impl Default for FileModelsConfig {
    fn default() -> Self {
        Self {
            premium: "claude-opus-4-5-20251101".to_string(),
            standard: "claude-sonnet-4-20250514".to_string(),
        }
    }
}

impl FileModelsConfig {
    /// Model identifier serving `tier`
    pub fn model_for(&self, tier: ModelTier) -> &str {
        match tier {
            ModelTier::Premium => &self.premium,
            ModelTier::Standard => &self.standard,
        }
    }

    pub fn validate(&self) -> Vec<ConfigIssue> {
        ModelTier::all()
            .into_iter()
            .filter(|tier| self.model_for(*tier).trim().is_empty())
            .map(|tier| {
                ConfigIssue::error(
                    ConfigIssueCode::EmptyModelName {
                        field: tier.as_str().to_string(),
                    },
                    format!("models.{}: model name cannot be empty", tier),
                )
            })
            .collect()
    }
}
