//! Learner state location (`[storage]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const DEFAULT_STATE_FILE: &str = ".buildpath_progress.json";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileStorageConfig {
    /// State file path; `~/.buildpath_progress.json` when unset
    pub state_path: Option<PathBuf>,
}

impl FileStorageConfig {
    /// Effective state path, expanding a leading `~/`
    pub fn resolve_state_path(&self) -> PathBuf {
        match &self.state_path {
            Some(path) => expand_home(path),
            None => dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(DEFAULT_STATE_FILE),
        }
    }
}

pub(crate) fn expand_home(path: &std::path::Path) -> PathBuf {
    if let Ok(rest) = path.strip_prefix("~")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    path.to_path_buf()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state_path_is_in_home() {
        let path = FileStorageConfig::default().resolve_state_path();
        assert!(path.ends_with(DEFAULT_STATE_FILE));
    }

    #[test]
    fn test_explicit_path_is_kept() {
        let config = FileStorageConfig {
            state_path: Some(PathBuf::from("/tmp/state.json")),
        };
        assert_eq!(config.resolve_state_path(), PathBuf::from("/tmp/state.json"));
    }
}
