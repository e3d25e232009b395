//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! Every section is optional; missing values fall back to defaults.

mod catalogue;
mod coaching;
mod logging;
mod models;
mod project;
mod provider;
mod storage;

pub use catalogue::FileCatalogueConfig;
pub use coaching::FileCoachingConfig;
pub use logging::FileLoggingConfig;
pub use models::FileModelsConfig;
pub use project::FileProjectConfig;
pub use provider::{FileProviderConfig, SUPPORTED_PROVIDERS};
pub use storage::FileStorageConfig;

use buildpath_domain::ConfigIssue;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use storage::expand_home;
use thiserror::Error;

/// Configuration that cannot be used.
#[derive(Debug, Error)]
pub enum ConfigValidationError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] Box<figment::Error>),

    #[error("Invalid configuration:\n  {}", .0.join("\n  "))]
    Invalid(Vec<String>),
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Tier to model mapping
    pub models: FileModelsConfig,
    /// Inference provider settings
    pub provider: FileProviderConfig,
    /// Coaching loop settings
    pub coaching: FileCoachingConfig,
    /// Learner state location
    pub storage: FileStorageConfig,
    /// Project inspection settings
    pub project: FileProjectConfig,
    /// Curriculum source
    pub catalogue: FileCatalogueConfig,
    /// Conversation transcript
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        issues.extend(self.models.validate());
        issues.extend(self.provider.validate());
        issues.extend(self.coaching.validate());
        issues.extend(self.project.validate());
        issues
    }

    pub fn state_path(&self) -> PathBuf {
        self.storage.resolve_state_path()
    }

    pub fn project_root(&self) -> PathBuf {
        expand_home(&self.project.root)
    }

    pub fn catalogue_path(&self) -> Option<PathBuf> {
        self.catalogue.path.as_deref().map(expand_home)
    }

    pub fn conversation_log_path(&self) -> Option<PathBuf> {
        self.logging.conversation_log.as_deref().map(expand_home)
    }

    /// Fail when any issue is an error; warnings are returned for display.
    pub fn ensure_valid(&self) -> Result<Vec<ConfigIssue>, ConfigValidationError> {
        let issues = self.validate();
        if ConfigIssue::has_errors(&issues) {
            let messages = issues
                .iter()
                .filter(|i| i.severity == buildpath_domain::Severity::Error)
                .map(|i| i.message.clone())
                .collect();
            return Err(ConfigValidationError::Invalid(messages));
        }
        Ok(issues)
    }
}
