//! Application-level configuration.
//!
//! - [`OrchestratorConfig`]: coaching loop and history control

pub mod orchestrator_config;

pub use orchestrator_config::OrchestratorConfig;
