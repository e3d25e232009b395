//! Domain layer for buildpath
//!
//! Pure logic for an adaptive, build-by-doing curriculum run by cooperating
//! language-model agents. Nothing here performs I/O.
//!
//! # Core Concepts
//!
//! ## Agents and coaches
//!
//! Four primary agents (planner, teacher, task-setter, reviewer) face the
//! learner. Each is paired with a coach that watches its recent outputs and
//! the learner's outcomes, then overwrites its steering directive.
//!
//! ## Progression
//!
//! Units of the curriculum catalogue are worked through one at a time. A unit
//! only completes after agent-verified passing work.

pub mod agent;
pub mod catalogue;
pub mod coaching;
pub mod core;
pub mod extract;
pub mod history;
pub mod learner;
pub mod progression;
pub mod prompt;
pub mod util;

// Re-export commonly used types
pub use agent::{Agent, AgentRole, InferenceRequest, PrimaryRole};
pub use catalogue::{Catalogue, Unit};
pub use coaching::{
    CoachDirective, CoachSignals, CoachingCadence, DirectiveSource, IssueAttribution,
    IssueResolution,
};
pub use core::{
    error::DomainError,
    model::ModelTier,
    validation::{ConfigIssue, ConfigIssueCode, Severity},
};
pub use extract::{JsonObject, RawFallback, extract, extract_or_raw};
pub use history::InteractionHistory;
pub use learner::{
    ExplanationDepth, LearnerState, LearningStyle, Pace, PreferenceUpdate, Preferences,
    ReviewVerdict, TaskSize, UnitStatus, VerdictOutcome,
};
pub use progression::{CompletionBlocked, UnitCompletion, check_completion, complete_unit};
pub use prompt::{PromptTemplate, RoleInstructions, STANDARDS_PREAMBLE};
