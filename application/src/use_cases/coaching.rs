//! Coaching Engine use case.
//!
//! Owns the four coach agents and the auto-coaching cadence. A coaching
//! round asks the coach of every primary role that has recorded history to
//! evaluate it, then overwrites that role's steering directive. Issue
//! reports go to the planner coach, which has the broadest view.

use crate::config::OrchestratorConfig;
use crate::ports::conversation_logger::{ConversationEvent, ConversationLogger, events};
use crate::ports::inference::GatewayError;
use crate::ports::progress::ProgressNotifier;
use crate::use_cases::roster::{RoleSet, coach_agents};
use crate::use_cases::shared::AgentInvoker;
use buildpath_domain::util::preview;
use buildpath_domain::{
    Agent, CoachDirective, CoachSignals, CoachingCadence, InteractionHistory, IssueResolution,
    LearnerState, PrimaryRole,
};
use serde::Serialize;
use tracing::{debug, info, warn};

/// Role whose coach analyses learner-reported issues
pub const ISSUE_COACH: PrimaryRole = PrimaryRole::Planner;

/// Outcome of one coaching round
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CoachingReport {
    /// Directives written to primary agents, in coaching order
    pub applied: Vec<CoachDirective>,
    /// Roles skipped because they had no recorded history
    pub skipped: Vec<PrimaryRole>,
}

impl CoachingReport {
    pub fn degraded_count(&self) -> usize {
        self.applied.iter().filter(|d| d.source.is_degraded()).count()
    }
}

/// Coach agents plus the review counter that triggers automatic rounds.
pub struct CoachingEngine {
    coaches: RoleSet<Agent>,
    cadence: CoachingCadence,
    raw_directive_max_bytes: usize,
}

impl CoachingEngine {
    pub fn new(config: &OrchestratorConfig) -> Self {
        Self {
            coaches: coach_agents(),
            cadence: CoachingCadence::new(config.auto_interval),
            raw_directive_max_bytes: config.raw_directive_max_bytes,
        }
    }

    pub fn coach(&self, role: PrimaryRole) -> &Agent {
        self.coaches.get(role)
    }

    pub fn cadence(&self) -> &CoachingCadence {
        &self.cadence
    }

    /// Count one recorded review; `true` when an automatic round is due.
    pub fn record_review(&mut self) -> bool {
        self.cadence.record_review()
    }

    /// Evaluate every primary role with history and rewrite its directive.
    ///
    /// Roles without history are skipped entirely. A transport failure stops
    /// the round; directives applied before it stay applied.
    pub(crate) async fn run_round(
        &self,
        invoker: &AgentInvoker<'_>,
        history: &InteractionHistory,
        state: &LearnerState,
        learner_context: &str,
        primaries: &mut RoleSet<Agent>,
    ) -> Result<CoachingReport, GatewayError> {
        let mut report = CoachingReport::default();

        for role in PrimaryRole::ALL {
            if history.is_empty(role) {
                debug!("No history for {}, skipping its coach", role);
                report.skipped.push(role);
                continue;
            }

            let prompt = CoachSignals::evaluation_prompt(role, history, state);
            let raw = invoker
                .invoke(self.coaches.get(role), prompt, learner_context.to_string(), None)
                .await?;

            match CoachDirective::from_coach_output(role, &raw, self.raw_directive_max_bytes) {
                Some(directive) => {
                    apply_directive(primaries, &directive, invoker.logger, invoker.progress);
                    report.applied.push(directive);
                }
                None => warn!("Coach for {} returned nothing; directive unchanged", role),
            }
        }

        info!(
            "Coaching round: {} directive(s) applied, {} role(s) skipped",
            report.applied.len(),
            report.skipped.len()
        );
        Ok(report)
    }

    /// Route a learner-reported issue through the issue coach and apply the
    /// resulting directives.
    pub(crate) async fn resolve_issue(
        &self,
        invoker: &AgentInvoker<'_>,
        issue: &str,
        history: &InteractionHistory,
        learner_context: &str,
        primaries: &mut RoleSet<Agent>,
    ) -> Result<IssueResolution, GatewayError> {
        invoker.logger.log(ConversationEvent::new(
            events::ISSUE_REPORTED,
            serde_json::json!({ "issue": issue }),
        ));

        let prompt = CoachSignals::issue_prompt(issue, history);
        let raw = invoker
            .invoke(self.coaches.get(ISSUE_COACH), prompt, learner_context.to_string(), None)
            .await?;

        let resolution = IssueResolution::from_coach_output(&raw, issue);
        if resolution.is_broadcast() {
            warn!("Issue attribution unusable; broadcasting issue to learner-facing agents");
        }
        for directive in &resolution.directives {
            apply_directive(primaries, directive, invoker.logger, invoker.progress);
        }
        Ok(resolution)
    }
}

fn apply_directive(
    primaries: &mut RoleSet<Agent>,
    directive: &CoachDirective,
    logger: &dyn ConversationLogger,
    progress: &dyn ProgressNotifier,
) {
    primaries
        .get_mut(directive.target)
        .set_directive(directive.text.clone());

    if directive.source.is_degraded() {
        warn!(
            "Applied degraded directive to {} ({})",
            directive.target,
            directive.source.as_str()
        );
    } else {
        info!(
            "Applied directive to {}: {}",
            directive.target,
            preview(&directive.text, 100)
        );
    }

    logger.log(ConversationEvent::new(
        events::DIRECTIVE_APPLIED,
        serde_json::json!({
            "target": directive.target.as_str(),
            "source": directive.source.as_str(),
            "text": directive.text,
        }),
    ));
    progress.on_directive_applied(directive);
}
