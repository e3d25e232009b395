//! Project inspection settings (`[project]` section)

use buildpath_domain::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// # Example
///
/// ```toml
/// [project]
/// root = "."
/// command_timeout_secs = 60
/// source_extensions = ["py"]
/// max_tree_depth = 3
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProjectConfig {
    pub root: PathBuf,
    pub command_timeout_secs: u64,
    /// Extensions whose files are sent in full as project context
    pub source_extensions: Vec<String>,
    /// Build files included ahead of the sources
    pub config_files: Vec<String>,
    /// Directory names skipped everywhere
    pub ignore_dirs: Vec<String>,
    pub max_tree_depth: usize,
}

impl Default for FileProjectConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            command_timeout_secs: 60,
            source_extensions: vec!["py".to_string()],
            config_files: [
                "pyproject.toml",
                "setup.py",
                "setup.cfg",
                "requirements.txt",
            ]
            .map(String::from)
            .to_vec(),
            ignore_dirs: [
                ".git",
                "__pycache__",
                "venv",
                ".venv",
                "node_modules",
                ".mypy_cache",
                ".pytest_cache",
                "dist",
                "build",
                "target",
            ]
            .map(String::from)
            .to_vec(),
            max_tree_depth: 3,
        }
    }
}

impl FileProjectConfig {
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        if self.command_timeout_secs == 0 {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::ZeroValue {
                    field: "project.command_timeout_secs".to_string(),
                },
                "project.command_timeout_secs must be greater than 0",
            ));
        }
        if self.max_tree_depth == 0 {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::ZeroValue {
                    field: "project.max_tree_depth".to_string(),
                },
                "project.max_tree_depth is 0: the project tree will be empty",
            ));
        }
        issues
    }
}
