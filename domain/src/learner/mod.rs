//! Learner state, preferences and review verdicts

pub mod entities;
pub mod preferences;
pub mod verdict;

pub use entities::{LearnerState, UnitStatus};
pub use preferences::{
    ExplanationDepth, LearningStyle, Pace, PreferenceUpdate, Preferences, TaskSize,
};
pub use verdict::{ReviewVerdict, VerdictOutcome};
