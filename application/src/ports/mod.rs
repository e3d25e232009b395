//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure and presentation adapters
//! implement.

pub mod conversation_logger;
pub mod inference;
pub mod learner_store;
pub mod progress;
pub mod project_inspector;
