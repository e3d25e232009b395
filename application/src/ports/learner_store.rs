//! Durable learner-state store port

use async_trait::async_trait;
use buildpath_domain::LearnerState;
use thiserror::Error;

/// Errors from saving learner state
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Whole-object persistence of [`LearnerState`].
///
/// Every save fully overwrites the previous one. There is a single writer.
#[async_trait]
pub trait LearnerStore: Send + Sync {
    async fn save(&self, state: &LearnerState) -> Result<(), StoreError>;

    /// Previously saved state.
    ///
    /// Absent, unreadable and corrupt stores all yield `None`; a corrupt
    /// store is left untouched.
    async fn load(&self) -> Option<LearnerState>;

    /// Human-readable location, for messages
    fn location(&self) -> String;
}
