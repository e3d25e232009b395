//! Coaching loop configuration from TOML (`[coaching]` section)

use buildpath_application::OrchestratorConfig;
use buildpath_domain::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};

/// # Example
///
/// ```toml
/// [coaching]
/// enabled = true
/// history_capacity = 5
/// auto_interval = 3       # 0 turns automatic rounds off
/// raw_directive_max_bytes = 500
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileCoachingConfig {
    pub enabled: bool,
    pub history_capacity: usize,
    pub auto_interval: u32,
    pub raw_directive_max_bytes: usize,
    /// Name used when a fresh session starts without one
    pub learner_name: String,
}

impl Default for FileCoachingConfig {
    fn default() -> Self {
        let defaults = OrchestratorConfig::default();
        Self {
            enabled: defaults.coaching_enabled,
            history_capacity: defaults.history_capacity,
            auto_interval: defaults.auto_interval,
            raw_directive_max_bytes: defaults.raw_directive_max_bytes,
            learner_name: defaults.default_learner_name,
        }
    }
}

impl FileCoachingConfig {
    pub fn to_orchestrator_config(&self) -> OrchestratorConfig {
        let mut config = OrchestratorConfig::default()
            .with_coaching(self.enabled)
            .with_history_capacity(self.history_capacity)
            .with_auto_interval(self.auto_interval)
            .with_raw_directive_max_bytes(self.raw_directive_max_bytes);
        if !self.learner_name.trim().is_empty() {
            config.default_learner_name = self.learner_name.trim().to_string();
        }
        config
    }

    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        if self.history_capacity == 0 {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::ZeroValue {
                    field: "coaching.history_capacity".to_string(),
                },
                "coaching.history_capacity must be greater than 0",
            ));
        }
        if self.raw_directive_max_bytes == 0 {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::ZeroValue {
                    field: "coaching.raw_directive_max_bytes".to_string(),
                },
                "coaching.raw_directive_max_bytes must be greater than 0",
            ));
        }
        if self.enabled && self.auto_interval == 0 {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::ZeroValue {
                    field: "coaching.auto_interval".to_string(),
                },
                "coaching.auto_interval is 0: coaching only runs when requested",
            ));
        }
        issues
    }
}
