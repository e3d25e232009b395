//! The learner's progress record.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::preferences::Preferences;
use super::verdict::ReviewVerdict;
use crate::catalogue::Catalogue;

/// Lifecycle of the current curriculum unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitStatus {
    #[default]
    NotStarted,
    InProgress,
    InReview,
    Complete,
}

impl UnitStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnitStatus::NotStarted => "not_started",
            UnitStatus::InProgress => "in_progress",
            UnitStatus::InReview => "in_review",
            UnitStatus::Complete => "complete",
        }
    }
}

impl fmt::Display for UnitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Single mutable record of a learner's progress.
///
/// Persisted as one flat JSON object. There is no schema version: a
/// payload missing any field fails to deserialize.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearnerState {
    pub name: String,
    pub current_unit: String,
    pub units_completed: Vec<String>,
    pub unit_status: UnitStatus,
    pub current_task: String,
    pub tasks_completed: Vec<String>,
    pub review_history: Vec<ReviewVerdict>,
    pub recurring_issues: Vec<String>,
    pub days_on_current_unit: u32,
    pub total_days: u32,
    #[serde(flatten)]
    pub preferences: Preferences,
}

impl LearnerState {
    pub fn new(name: impl Into<String>, unit_id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            current_unit: unit_id.into(),
            units_completed: Vec::new(),
            unit_status: UnitStatus::NotStarted,
            current_task: String::new(),
            tasks_completed: Vec::new(),
            review_history: Vec::new(),
            recurring_issues: Vec::new(),
            days_on_current_unit: 0,
            total_days: 0,
            preferences: Preferences::default(),
        }
    }

    /// Set the task the learner is working on.
    pub fn assign_task(&mut self, task: impl Into<String>) {
        self.current_task = task.into();
        if self.unit_status == UnitStatus::NotStarted {
            self.unit_status = UnitStatus::InProgress;
        }
    }

    /// Append a verdict and fold it into progress.
    ///
    /// Must-fix entries join the recurring-issue watch-list once. A
    /// `ship_it` marks the current task (or `fallback_task` when no task is
    /// assigned) complete, without duplicates. Returns the task name if this
    /// call newly completed it.
    pub fn record_verdict(&mut self, verdict: ReviewVerdict, fallback_task: &str) -> Option<String> {
        for issue in &verdict.must_fix {
            if !self.recurring_issues.contains(issue) {
                self.recurring_issues.push(issue.clone());
            }
        }

        let shipped = verdict.is_ship_it();
        self.review_history.push(verdict);
        if self.unit_status != UnitStatus::Complete {
            self.unit_status = UnitStatus::InReview;
        }

        if !shipped {
            return None;
        }
        let task_name = if self.current_task.is_empty() {
            fallback_task.trim().to_string()
        } else {
            self.current_task.clone()
        };
        if task_name.is_empty() || self.tasks_completed.contains(&task_name) {
            return None;
        }
        self.tasks_completed.push(task_name.clone());
        Some(task_name)
    }

    pub fn last_verdict(&self) -> Option<&ReviewVerdict> {
        self.review_history.last()
    }

    /// Last `n` verdicts, oldest first
    pub fn recent_verdicts(&self, n: usize) -> &[ReviewVerdict] {
        let start = self.review_history.len().saturating_sub(n);
        &self.review_history[start..]
    }

    /// `(ship_it count, total reviews)` for the current unit
    pub fn pass_rate(&self) -> (usize, usize) {
        let passed = self.review_history.iter().filter(|v| v.is_ship_it()).count();
        (passed, self.review_history.len())
    }

    /// What the reviewer said was built, for every passing review
    pub fn shipped_targets(&self) -> Vec<String> {
        self.review_history
            .iter()
            .filter(|v| v.is_ship_it())
            .map(|v| v.task_reviewed.clone().unwrap_or_else(|| "unknown".to_string()))
            .collect()
    }

    /// Add the current unit to the completed list (idempotent).
    pub fn mark_unit_completed(&mut self) {
        if !self.units_completed.contains(&self.current_unit) {
            self.units_completed.push(self.current_unit.clone());
        }
    }

    /// Move to `unit_id`, clearing per-unit state.
    ///
    /// Recurring issues are kept across units.
    pub fn enter_unit(&mut self, unit_id: impl Into<String>) {
        self.current_unit = unit_id.into();
        self.unit_status = UnitStatus::NotStarted;
        self.current_task.clear();
        self.tasks_completed.clear();
        self.review_history.clear();
        self.days_on_current_unit = 0;
    }

    pub fn record_day(&mut self) {
        self.days_on_current_unit += 1;
        self.total_days += 1;
    }

    /// Snapshot handed to every agent as learner context
    pub fn to_context(&self, catalogue: &Catalogue) -> String {
        let unit_name = catalogue
            .get(&self.current_unit)
            .map(|u| u.name.as_str())
            .unwrap_or("Unknown");
        let recurring = if self.recurring_issues.is_empty() {
            "None yet".to_string()
        } else {
            self.recurring_issues.join("; ")
        };
        let completed = if self.units_completed.is_empty() {
            "none".to_string()
        } else {
            self.units_completed.join(", ")
        };

        format!(
            "BUILDER: {name}\n\n\
             CURRENT UNIT: {unit}\n  {unit_name}\n  Status: {status}\n  Days on unit: {days}\n\n\
             PROGRESS:\n  Units completed: {done}/{total}\n  Completed: {completed}\n\n\
             PATTERNS TO WATCH:\n  Recurring issues: {recurring}\n\n\
             {prefs}\n\n\
             TOTAL TIME: {total_days} days",
            name = self.name,
            unit = self.current_unit,
            status = self.unit_status,
            days = self.days_on_current_unit,
            done = self.units_completed.len(),
            total = catalogue.len(),
            prefs = self.preferences.to_context(),
            total_days = self.total_days,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalogue::test_catalogue;
    use crate::learner::verdict::VerdictOutcome;

    fn verdict(outcome: VerdictOutcome, must_fix: &[&str]) -> ReviewVerdict {
        let mut v = ReviewVerdict::new(outcome);
        v.must_fix = must_fix.iter().map(|s| s.to_string()).collect();
        v
    }

    #[test]
    fn test_assign_task_starts_unit() {
        let mut state = LearnerState::new("Ada", "u1");
        state.assign_task("parse CSV");
        assert_eq!(state.current_task, "parse CSV");
        assert_eq!(state.unit_status, UnitStatus::InProgress);
    }

    #[test]
    fn test_ship_it_is_idempotent() {
        let mut state = LearnerState::new("Ada", "u1");
        state.assign_task("parse CSV");
        let first = state.record_verdict(verdict(VerdictOutcome::ShipIt, &[]), "");
        let second = state.record_verdict(verdict(VerdictOutcome::ShipIt, &[]), "");
        assert_eq!(first.as_deref(), Some("parse CSV"));
        assert!(second.is_none());
        assert_eq!(state.tasks_completed, vec!["parse CSV"]);
        assert_eq!(state.review_history.len(), 2);
        assert!(state.recurring_issues.is_empty());
        assert_eq!(state.unit_status, UnitStatus::InReview);
    }

    #[test]
    fn test_fallback_task_name() {
        let mut state = LearnerState::new("Ada", "u1");
        let done = state.record_verdict(verdict(VerdictOutcome::ShipIt, &[]), "Review: src/main.py");
        assert_eq!(done.as_deref(), Some("Review: src/main.py"));

        let mut blank = LearnerState::new("Ada", "u1");
        assert!(blank.record_verdict(verdict(VerdictOutcome::ShipIt, &[]), "  ").is_none());
        assert!(blank.tasks_completed.is_empty());
    }

    #[test]
    fn test_must_fix_feeds_recurring_once() {
        let mut state = LearnerState::new("Ada", "u1");
        state.record_verdict(verdict(VerdictOutcome::MajorIssues, &["no error handling"]), "");
        state.record_verdict(
            verdict(VerdictOutcome::NeedsWork, &["no error handling", "no types"]),
            "",
        );
        assert_eq!(state.recurring_issues, vec!["no error handling", "no types"]);
        assert!(state.tasks_completed.is_empty());
    }

    #[test]
    fn test_enter_unit_keeps_recurring_issues() {
        let mut state = LearnerState::new("Ada", "u1");
        state.assign_task("t");
        state.record_verdict(verdict(VerdictOutcome::ShipIt, &["x"]), "");
        state.record_day();
        state.enter_unit("u2");

        assert_eq!(state.current_unit, "u2");
        assert!(state.current_task.is_empty());
        assert!(state.tasks_completed.is_empty());
        assert!(state.review_history.is_empty());
        assert_eq!(state.days_on_current_unit, 0);
        assert_eq!(state.total_days, 1);
        assert_eq!(state.unit_status, UnitStatus::NotStarted);
        assert_eq!(state.recurring_issues, vec!["x"]);
    }

    #[test]
    fn test_pass_rate_and_shipped_targets() {
        let mut state = LearnerState::new("Ada", "u1");
        let mut shipped = verdict(VerdictOutcome::ShipIt, &[]);
        shipped.task_reviewed = Some("cli.py".to_string());
        state.record_verdict(verdict(VerdictOutcome::NeedsWork, &[]), "");
        state.record_verdict(shipped, "");
        state.record_verdict(verdict(VerdictOutcome::ShipIt, &[]), "");
        assert_eq!(state.pass_rate(), (2, 3));
        assert_eq!(state.shipped_targets(), vec!["cli.py", "unknown"]);
        assert_eq!(state.recent_verdicts(2).len(), 2);
        assert_eq!(state.recent_verdicts(10).len(), 3);
    }

    #[test]
    fn test_mark_unit_completed_idempotent() {
        let mut state = LearnerState::new("Ada", "u1");
        state.mark_unit_completed();
        state.mark_unit_completed();
        assert_eq!(state.units_completed, vec!["u1"]);
    }

    #[test]
    fn test_json_roundtrip_is_flat() {
        let mut state = LearnerState::new("Ada", "u1");
        state.assign_task("t");
        state.record_verdict(verdict(VerdictOutcome::NeedsWork, &["x"]), "");
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["pace"], "normal");
        assert_eq!(json["unit_status"], "in_review");
        let back: LearnerState = serde_json::from_value(json).unwrap();
        assert_eq!(back, state);
    }

    #[test]
    fn test_missing_field_fails_load() {
        let mut json = serde_json::to_value(LearnerState::new("Ada", "u1")).unwrap();
        json.as_object_mut().unwrap().remove("recurring_issues");
        assert!(serde_json::from_value::<LearnerState>(json).is_err());
    }

    #[test]
    fn test_context_snapshot() {
        let catalogue = test_catalogue(&["u1", "u2"]);
        let mut state = LearnerState::new("Ada", "u1");
        state.recurring_issues.push("no types".to_string());
        let ctx = state.to_context(&catalogue);
        assert!(ctx.contains("BUILDER: Ada"));
        assert!(ctx.contains("Units completed: 0/2"));
        assert!(ctx.contains("no types"));
        assert!(ctx.contains("LEARNER PREFERENCES"));
    }
}
