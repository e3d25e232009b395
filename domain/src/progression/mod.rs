//! Unit completion gate.
//!
//! Advancing to the next unit requires agent-verified passing work: at
//! least one review, a `ship_it` as the most recent verdict, and at least
//! one completed task. A blocked completion is an ordinary value carrying
//! the unmet precondition, never an error.

use serde::Serialize;
use std::fmt;

use crate::catalogue::Catalogue;
use crate::learner::{LearnerState, UnitStatus, VerdictOutcome};

/// Why a unit cannot be completed yet
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum CompletionBlocked {
    NoReviews,
    NotPassing {
        outcome: VerdictOutcome,
        start_here: Option<String>,
    },
    NoTasksCompleted,
    UnknownUnit { unit: String },
}

impl fmt::Display for CompletionBlocked {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompletionBlocked::NoReviews => write!(
                f,
                "Can't complete: nothing has been submitted for review yet. Submit your code first."
            ),
            CompletionBlocked::NotPassing { outcome, start_here } => {
                let hint = start_here.as_deref().unwrap_or("See review feedback");
                match outcome {
                    VerdictOutcome::MajorIssues => write!(
                        f,
                        "Can't complete: the last review found MAJOR ISSUES. Fix them first.\n  Start here: {hint}"
                    ),
                    _ => write!(
                        f,
                        "Can't complete: the last review says NEEDS WORK. Address the feedback first.\n  Start here: {hint}"
                    ),
                }
            }
            CompletionBlocked::NoTasksCompleted => write!(
                f,
                "Can't complete: no tasks marked done. Complete at least one task."
            ),
            CompletionBlocked::UnknownUnit { unit } => {
                write!(f, "Can't complete: '{unit}' is not in the curriculum.")
            }
        }
    }
}

/// Result of a completion attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum UnitCompletion {
    /// Moved on to `next_id`
    Advanced {
        completed: String,
        next_id: String,
        next_name: String,
    },
    /// The final unit is done
    AllComplete { completed: String },
    Rejected { blocked: CompletionBlocked },
}

impl UnitCompletion {
    pub fn is_rejected(&self) -> bool {
        matches!(self, UnitCompletion::Rejected { .. })
    }

    /// Whether learner state changed and should be persisted
    pub fn changed_state(&self) -> bool {
        !self.is_rejected()
    }
}

impl fmt::Display for UnitCompletion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnitCompletion::Advanced { next_name, .. } => {
                write!(f, "UNIT COMPLETE!\n\nMoving to: {next_name}")
            }
            UnitCompletion::AllComplete { .. } => {
                write!(f, "ALL UNITS COMPLETE! You've built your portfolio!")
            }
            UnitCompletion::Rejected { blocked } => write!(f, "{blocked}"),
        }
    }
}

/// Check the three completion preconditions, in order.
pub fn check_completion(state: &LearnerState) -> Result<(), CompletionBlocked> {
    let last = state.last_verdict().ok_or(CompletionBlocked::NoReviews)?;
    if !last.is_ship_it() {
        return Err(CompletionBlocked::NotPassing {
            outcome: last.outcome,
            start_here: last.start_here.clone(),
        });
    }
    if state.tasks_completed.is_empty() {
        return Err(CompletionBlocked::NoTasksCompleted);
    }
    Ok(())
}

/// Complete the current unit and advance through `catalogue`.
///
/// On success the unit joins the completed list (once) and, if another unit
/// follows, per-unit state is reset for it. Recurring issues carry over.
/// At the end of the catalogue the unit is marked complete in place.
pub fn complete_unit(state: &mut LearnerState, catalogue: &Catalogue) -> UnitCompletion {
    if let Err(blocked) = check_completion(state) {
        return UnitCompletion::Rejected { blocked };
    }
    if catalogue.position(&state.current_unit).is_none() {
        return UnitCompletion::Rejected {
            blocked: CompletionBlocked::UnknownUnit {
                unit: state.current_unit.clone(),
            },
        };
    }

    let completed = state.current_unit.clone();
    state.mark_unit_completed();

    match catalogue.next_after(&completed) {
        Some(next) => {
            state.enter_unit(next.id.clone());
            UnitCompletion::Advanced {
                completed,
                next_id: next.id.clone(),
                next_name: next.name.clone(),
            }
        }
        None => {
            state.unit_status = UnitStatus::Complete;
            UnitCompletion::AllComplete { completed }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalogue::test_catalogue;
    use crate::learner::ReviewVerdict;

    fn passing_state(unit: &str) -> LearnerState {
        let mut state = LearnerState::new("Ada", unit);
        state.assign_task("parse CSV");
        state.record_verdict(ReviewVerdict::new(VerdictOutcome::ShipIt), "");
        state
    }

    #[test]
    fn test_rejects_without_reviews() {
        let state = LearnerState::new("Ada", "u1");
        assert_eq!(check_completion(&state), Err(CompletionBlocked::NoReviews));
    }

    #[test]
    fn test_rejects_failing_last_review() {
        let mut state = passing_state("u1");
        let mut v = ReviewVerdict::new(VerdictOutcome::MajorIssues);
        v.must_fix.push("no error handling".to_string());
        state.record_verdict(v, "");

        let catalogue = test_catalogue(&["u1", "u2"]);
        let result = complete_unit(&mut state, &catalogue);
        assert!(result.is_rejected());
        assert!(result.to_string().contains("MAJOR ISSUES"));
        assert!(result.to_string().contains("See review feedback"));
        assert_eq!(state.current_unit, "u1");
        assert!(state.recurring_issues.contains(&"no error handling".to_string()));
    }

    #[test]
    fn test_needs_work_surfaces_start_here() {
        let mut state = passing_state("u1");
        let mut v = ReviewVerdict::new(VerdictOutcome::NeedsWork);
        v.start_here = Some("add types".to_string());
        state.record_verdict(v, "");
        let err = check_completion(&state).unwrap_err();
        assert!(err.to_string().contains("NEEDS WORK"));
        assert!(err.to_string().contains("add types"));
    }

    #[test]
    fn test_rejects_without_completed_tasks() {
        let mut state = LearnerState::new("Ada", "u1");
        state.record_verdict(ReviewVerdict::new(VerdictOutcome::ShipIt), "");
        assert_eq!(check_completion(&state), Err(CompletionBlocked::NoTasksCompleted));
    }

    #[test]
    fn test_advances_and_resets_unit_state() {
        let catalogue = test_catalogue(&["u1", "u2"]);
        let mut state = passing_state("u1");
        state.recurring_issues.push("bare except".to_string());
        state.record_day();

        let result = complete_unit(&mut state, &catalogue);
        assert_eq!(
            result,
            UnitCompletion::Advanced {
                completed: "u1".to_string(),
                next_id: "u2".to_string(),
                next_name: "Unit u2".to_string(),
            }
        );
        assert_eq!(state.units_completed, vec!["u1"]);
        assert_eq!(state.current_unit, "u2");
        assert!(state.tasks_completed.is_empty());
        assert!(state.review_history.is_empty());
        assert!(state.current_task.is_empty());
        assert_eq!(state.days_on_current_unit, 0);
        assert_eq!(state.recurring_issues, vec!["bare except"]);
    }

    #[test]
    fn test_last_unit_is_terminal() {
        let catalogue = test_catalogue(&["u1"]);
        let mut state = passing_state("u1");
        let result = complete_unit(&mut state, &catalogue);
        assert!(matches!(result, UnitCompletion::AllComplete { .. }));
        assert!(result.to_string().contains("ALL UNITS COMPLETE"));
        assert_eq!(state.unit_status, UnitStatus::Complete);

        // Completing again stays terminal and does not duplicate the entry
        let again = complete_unit(&mut state, &catalogue);
        assert!(matches!(again, UnitCompletion::AllComplete { .. }));
        assert_eq!(state.units_completed, vec!["u1"]);
    }

    #[test]
    fn test_unknown_current_unit_rejected() {
        let catalogue = test_catalogue(&["u1"]);
        let mut state = passing_state("gone");
        assert!(complete_unit(&mut state, &catalogue).is_rejected());
        assert!(state.units_completed.is_empty());
    }
}
