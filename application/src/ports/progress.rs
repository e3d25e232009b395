//! Progress notification port
//!
//! Lets the presentation layer show which agent is working while a
//! learner-facing operation runs.

use buildpath_domain::{CoachDirective, ModelTier};

/// Callbacks fired during orchestrator operations
pub trait ProgressNotifier: Send + Sync {
    /// An agent request is about to be sent
    fn on_agent_start(&self, agent: &str, tier: ModelTier);

    /// The agent request finished
    fn on_agent_complete(&self, agent: &str, success: bool);

    /// An automatic coaching round is starting
    fn on_auto_coaching(&self) {}

    /// A directive was written to a primary agent
    fn on_directive_applied(&self, _directive: &CoachDirective) {}

    /// A review marked a task complete
    fn on_task_completed(&self, _task: &str) {}
}

/// No-op progress notifier
pub struct NoProgress;

impl ProgressNotifier for NoProgress {
    fn on_agent_start(&self, _agent: &str, _tier: ModelTier) {}
    fn on_agent_complete(&self, _agent: &str, _success: bool) {}
}
