//! Coaching rules: what coaches are asked, how their replies become
//! directives, and when a coaching round is due.

pub mod cadence;
pub mod directive;
pub mod signals;

pub use cadence::{CoachingCadence, DEFAULT_AUTO_INTERVAL};
pub use directive::{
    CoachDirective, DEFAULT_RAW_DIRECTIVE_MAX_BYTES, DirectiveSource, IssueAttribution,
    IssueResolution,
};
pub use signals::CoachSignals;
