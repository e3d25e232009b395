//! Infrastructure layer for buildpath
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, plus configuration and catalogue loading.

pub mod anthropic;
pub mod catalogue;
pub mod config;
pub mod logging;
pub mod project;
pub mod storage;

// Re-export commonly used types
pub use anthropic::AnthropicGateway;
pub use catalogue::{CatalogueError, CatalogueLoader};
pub use config::{ConfigLoader, ConfigValidationError, FileConfig};
pub use logging::JsonlConversationLogger;
pub use project::LocalProjectInspector;
pub use storage::JsonLearnerStore;
