//! Learner state persisted as a single pretty-printed JSON file.

use async_trait::async_trait;
use buildpath_application::ports::learner_store::{LearnerStore, StoreError};
use buildpath_domain::LearnerState;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// [`LearnerStore`] writing the whole state to one file on every save.
#[derive(Debug, Clone)]
pub struct JsonLearnerStore {
    path: PathBuf,
}

impl JsonLearnerStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl LearnerStore for JsonLearnerStore {
    async fn save(&self, state: &LearnerState) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(state)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| StoreError::Io(format!("{}: {}", parent.display(), e)))?;
        }
        tokio::fs::write(&self.path, json)
            .await
            .map_err(|e| StoreError::Io(format!("{}: {}", self.path.display(), e)))?;

        debug!("Saved progress to {}", self.path.display());
        Ok(())
    }

    async fn load(&self) -> Option<LearnerState> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                warn!("Could not read {}: {}", self.path.display(), e);
                return None;
            }
        };

        match serde_json::from_str(&content) {
            Ok(state) => Some(state),
            Err(e) => {
                warn!(
                    "Ignoring unreadable progress file {} ({}); starting fresh",
                    self.path.display(),
                    e
                );
                None
            }
        }
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use buildpath_domain::{ReviewVerdict, VerdictOutcome};

    #[tokio::test]
    async fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonLearnerStore::new(dir.path().join("nested/progress.json"));

        let mut state = LearnerState::new("Ada", "u1");
        state.assign_task("parse CSV");
        let mut verdict = ReviewVerdict::new(VerdictOutcome::NeedsWork);
        verdict.must_fix = vec!["add types".to_string()];
        state.record_verdict(verdict, "parse CSV");

        store.save(&state).await.unwrap();
        assert_eq!(store.load().await, Some(state));
    }

    #[tokio::test]
    async fn test_written_file_is_indented_flat_object() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonLearnerStore::new(dir.path().join("progress.json"));
        store.save(&LearnerState::new("Ada", "u1")).await.unwrap();

        let raw = std::fs::read_to_string(store.path()).unwrap();
        assert!(raw.contains("\n  \"name\": \"Ada\""));
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["pace"], "normal");
        assert_eq!(value["unit_status"], "not_started");
    }

    #[tokio::test]
    async fn test_missing_file_loads_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonLearnerStore::new(dir.path().join("absent.json"));
        assert!(store.load().await.is_none());
    }

    #[tokio::test]
    async fn test_corrupt_file_loads_none_and_is_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("progress.json");
        std::fs::write(&path, r#"{"name": "Ada"}"#).unwrap();

        let store = JsonLearnerStore::new(&path);
        assert!(store.load().await.is_none());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), r#"{"name": "Ada"}"#);
    }

    #[tokio::test]
    async fn test_save_into_unwritable_location_fails() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, "x").unwrap();
        let store = JsonLearnerStore::new(blocker.join("progress.json"));
        let err = store.save(&LearnerState::new("Ada", "u1")).await.unwrap_err();
        assert!(matches!(err, StoreError::Io(_)));
    }
}
