//! Project inspector port
//!
//! Read-only access to the learner's project, used only to enrich prompts.
//! The core never parses what comes back.

use async_trait::async_trait;
use thiserror::Error;

/// Errors from project inspection
#[derive(Error, Debug)]
pub enum InspectorError {
    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Path escapes the project root: {0}")]
    OutsideProject(String),

    #[error("Command timed out after {secs}s: {command}")]
    Timeout { command: String, secs: u64 },

    #[error("I/O error: {0}")]
    Io(String),
}

/// Read-only view of the learner's project
#[async_trait]
pub trait ProjectInspector: Send + Sync {
    /// Tree, project config and source listing in one block of text
    async fn full_context(&self) -> Result<String, InspectorError>;

    /// Directory tree only
    async fn tree(&self) -> Result<String, InspectorError>;

    /// Contents of one file, relative to the project root
    async fn read_file(&self, path: &str) -> Result<String, InspectorError>;

    /// Run a shell command in the project root with a bounded timeout.
    ///
    /// A non-zero exit status is not an error; its output is returned.
    async fn run(&self, command: &str) -> Result<String, InspectorError>;
}
