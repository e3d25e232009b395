//! Application layer for buildpath
//!
//! This crate contains the orchestrator use case, the coaching engine,
//! port definitions and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::OrchestratorConfig;
pub use ports::{
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    inference::{GatewayError, InferenceGateway, UnavailableGateway},
    learner_store::{LearnerStore, StoreError},
    progress::{NoProgress, ProgressNotifier},
    project_inspector::{InspectorError, ProjectInspector},
};
pub use use_cases::coaching::{CoachingEngine, CoachingReport};
pub use use_cases::orchestrator::{
    CoachingOutcome, IssueOutcome, Orchestrator, OrchestratorError, SubmissionOutcome,
    TaskAssignment,
};
pub use use_cases::roster::RoleSet;
