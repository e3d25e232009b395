//! Evaluation requests for coach agents.
//!
//! Each coach sees its primary agent's recent outputs next to the learner
//! outcomes that role is responsible for.

use crate::agent::PrimaryRole;
use crate::history::InteractionHistory;
use crate::learner::LearnerState;
use crate::util::bullets;

/// Recent outputs shown to a coach
fn output_window(role: PrimaryRole) -> usize {
    match role {
        PrimaryRole::Teacher => 2,
        _ => 3,
    }
}

/// Recent outputs per role shown when analysing an issue report
const ISSUE_WINDOW: usize = 2;

/// Recurring-issue count above which the teacher is told mistakes repeat
const REPEATING_MISTAKES_THRESHOLD: usize = 3;

/// Builds the user message for each coach request
pub struct CoachSignals;

impl CoachSignals {
    /// Evaluation request for the coach of `role`.
    pub fn evaluation_prompt(role: PrimaryRole, history: &InteractionHistory, state: &LearnerState) -> String {
        let recent = history.recent(role, output_window(role));
        let outputs = render_outputs(&recent);

        let signals = match role {
            PrimaryRole::Planner => {
                let verdicts = state
                    .recent_verdicts(5)
                    .iter()
                    .map(|v| v.outcome.as_str())
                    .collect::<Vec<_>>();
                format!(
                    "Learner progress:\n\
                     - Units completed: {}\n\
                     - Tasks completed this unit: {}\n\
                     - Days on current unit: {}\n\
                     - Recent review verdicts: {}\n\
                     - Recurring issues: {}",
                    list_or(&state.units_completed, "none"),
                    state.tasks_completed.len(),
                    state.days_on_current_unit,
                    list_or(&verdicts, "none"),
                    state.recurring_issues.len(),
                )
            }
            PrimaryRole::Teacher => format!(
                "Are lessons landing?\n\
                 - Recurring issues in reviews ({}):\n{}\n\
                 - Same mistakes repeating: {}",
                state.recurring_issues.len(),
                bullets(&state.recurring_issues, "None yet"),
                state.recurring_issues.len() > REPEATING_MISTAKES_THRESHOLD,
            ),
            PrimaryRole::TaskSetter => {
                let (passed, total) = state.pass_rate();
                format!(
                    "Task performance:\n\
                     - Tasks completed ({}):\n{}\n\
                     - Review pass rate: {passed} / {total}",
                    state.tasks_completed.len(),
                    bullets(&state.tasks_completed, "None yet"),
                )
            }
            PrimaryRole::Reviewer => {
                let trend = if state.review_history.len() >= 3 {
                    state
                        .recent_verdicts(3)
                        .iter()
                        .map(|v| format!("{} ({} must-fix)", v.outcome, v.must_fix.len()))
                        .collect::<Vec<_>>()
                        .join(" -> ")
                } else {
                    "Not enough data".to_string()
                };
                format!(
                    "Review effectiveness:\n\
                     - Recurring issues (not being fixed):\n{}\n\
                     - Improvement trend: {trend}",
                    bullets(&state.recurring_issues, "None yet"),
                )
            }
        };

        format!(
            "Evaluate the {name} agent's recent outputs:\n{outputs}\n\n{signals}\n\n\
             Respond with JSON containing a \"recommendation\" field holding a direct instruction for the {name} agent.",
            name = role.display_name(),
        )
    }

    /// Issue-report analysis request for the broadest-scope coach.
    pub fn issue_prompt(issue: &str, history: &InteractionHistory) -> String {
        let section = |role: PrimaryRole| {
            let recent = history.recent(role, ISSUE_WINDOW);
            if recent.is_empty() {
                "None".to_string()
            } else {
                render_outputs(&recent)
            }
        };

        format!(
            r#"THE LEARNER REPORTED AN ISSUE:
"{issue}"

RECENT TEACHER OUTPUT:
{teacher}

RECENT TASKS:
{tasks}

RECENT REVIEWS:
{reviews}

RECENT PLANNER OUTPUT:
{planner}

Analyse:
1. Which agent is at fault (planner, teacher, task_setter, reviewer, or several)?
2. What specifically went wrong?
3. What directive should each responsible agent receive?

Respond with JSON:
{{
    "fault": ["teacher", "task_setter"],
    "analysis": "what went wrong",
    "directives": {{
        "planner": "instruction or null",
        "teacher": "instruction or null",
        "task_setter": "instruction or null",
        "reviewer": "instruction or null"
    }}
}}"#,
            issue = issue.trim(),
            teacher = section(PrimaryRole::Teacher),
            tasks = section(PrimaryRole::TaskSetter),
            reviews = section(PrimaryRole::Reviewer),
            planner = section(PrimaryRole::Planner),
        )
    }
}

fn render_outputs(outputs: &[&str]) -> String {
    outputs
        .iter()
        .enumerate()
        .map(|(i, out)| format!("--- output {} ---\n{}", i + 1, out.trim()))
        .collect::<Vec<_>>()
        .join("\n")
}

fn list_or<S: AsRef<str>>(items: &[S], empty: &str) -> String {
    if items.is_empty() {
        empty.to_string()
    } else {
        items.iter().map(AsRef::as_ref).collect::<Vec<_>>().join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::learner::{ReviewVerdict, VerdictOutcome};

    #[test]
    fn test_task_setter_signals_pass_rate() {
        let mut history = InteractionHistory::default();
        history.record(PrimaryRole::TaskSetter, r#"{"task": "a"}"#);
        let mut state = LearnerState::new("Ada", "u1");
        state.record_verdict(ReviewVerdict::new(VerdictOutcome::NeedsWork), "");
        state.record_verdict(ReviewVerdict::new(VerdictOutcome::ShipIt), "cli");

        let prompt = CoachSignals::evaluation_prompt(PrimaryRole::TaskSetter, &history, &state);
        assert!(prompt.contains("Task Setter agent"));
        assert!(prompt.contains("Review pass rate: 1 / 2"));
        assert!(prompt.contains(r#"{"task": "a"}"#));
    }

    #[test]
    fn test_teacher_window_is_two() {
        let mut history = InteractionHistory::default();
        for lesson in ["l1", "l2", "l3"] {
            history.record(PrimaryRole::Teacher, lesson);
        }
        let state = LearnerState::new("Ada", "u1");
        let prompt = CoachSignals::evaluation_prompt(PrimaryRole::Teacher, &history, &state);
        assert!(!prompt.contains("l1"));
        assert!(prompt.contains("l2") && prompt.contains("l3"));
        assert!(prompt.contains("Same mistakes repeating: false"));
    }

    #[test]
    fn test_reviewer_trend_needs_three_reviews() {
        let history = InteractionHistory::default();
        let mut state = LearnerState::new("Ada", "u1");
        let prompt = CoachSignals::evaluation_prompt(PrimaryRole::Reviewer, &history, &state);
        assert!(prompt.contains("Not enough data"));

        for _ in 0..3 {
            state.record_verdict(ReviewVerdict::new(VerdictOutcome::NeedsWork), "");
        }
        let prompt = CoachSignals::evaluation_prompt(PrimaryRole::Reviewer, &history, &state);
        assert!(prompt.contains("needs_work (0 must-fix) -> needs_work"));
    }

    #[test]
    fn test_issue_prompt_sections() {
        let mut history = InteractionHistory::default();
        history.record(PrimaryRole::Reviewer, "harsh review");
        let prompt = CoachSignals::issue_prompt(" reviews are harsh ", &history);
        assert!(prompt.contains("\"reviews are harsh\""));
        assert!(prompt.contains("harsh review"));
        assert!(prompt.contains("RECENT TEACHER OUTPUT:\nNone"));
    }
}
