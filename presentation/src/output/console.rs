//! Console output for orchestrator results

use buildpath_application::{
    CoachingOutcome, CoachingReport, IssueOutcome, SubmissionOutcome, TaskAssignment,
};
use buildpath_domain::extract::payload::{get_bool, get_string, get_string_list};
use buildpath_domain::{
    Catalogue, CoachDirective, ConfigIssue, JsonObject, LearnerState, Preferences, Severity, Unit,
    UnitCompletion, VerdictOutcome,
};
use buildpath_domain::extract::{RAW_KEY, is_raw_fallback};
use colored::{ColoredString, Colorize};
use serde::Serialize;
use serde_json::Value;

/// Formats orchestrator results for terminal display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Pretty JSON for `--output json`
    pub fn json<T: Serialize + ?Sized>(value: &T) -> String {
        serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
    }

    // ==================== Progress ====================

    pub fn status(learner: &LearnerState, catalogue: &Catalogue) -> String {
        let mut output = Self::header(&format!("{}'s build path", learner.name));
        output.push('\n');

        let unit_name = catalogue
            .get(&learner.current_unit)
            .map_or("(not in catalogue)", |u| u.name.as_str());
        let position = catalogue
            .position(&learner.current_unit)
            .map_or_else(|| "?".to_string(), |i| (i + 1).to_string());

        output.push_str(&format!(
            "{} {}/{} {}\n",
            "Unit:".cyan().bold(),
            position,
            catalogue.len(),
            unit_name.bold()
        ));
        output.push_str(&format!(
            "{} {}  ({} day(s) on unit, {} total)\n",
            "Status:".cyan().bold(),
            learner.unit_status,
            learner.days_on_current_unit,
            learner.total_days
        ));
        if !learner.current_task.is_empty() {
            output.push_str(&format!(
                "{} {}\n",
                "Current task:".cyan().bold(),
                learner.current_task
            ));
        }

        let (passed, total) = learner.pass_rate();
        output.push_str(&format!(
            "{} {} shipped of {} reviewed, {} task(s) complete\n",
            "Reviews:".cyan().bold(),
            passed,
            total,
            learner.tasks_completed.len()
        ));
        if let Some(last) = learner.last_verdict() {
            output.push_str(&format!(
                "{} {}\n",
                "Last verdict:".cyan().bold(),
                Self::verdict_label(last.outcome)
            ));
        }
        if !learner.recurring_issues.is_empty() {
            output.push_str(&format!("\n{}\n", "Recurring issues:".yellow().bold()));
            output.push_str(&Self::list(&learner.recurring_issues));
        }
        output.push_str(&format!(
            "\n{} {}/{}\n",
            "Units completed:".dimmed(),
            learner.units_completed.len(),
            catalogue.len()
        ));
        output
    }

    pub fn unit_brief(unit: &Unit, number: Option<usize>) -> String {
        let title = match number {
            Some(n) => format!("Unit {n}: {}", unit.name),
            None => unit.name.clone(),
        };
        let mut output = Self::header(&title);
        output.push_str(&format!("\n{} {}\n", "Build:".cyan().bold(), unit.goal));
        if !unit.rationale.is_empty() {
            output.push_str(&format!("{} {}\n", "Why:".cyan().bold(), unit.rationale));
        }
        if !unit.ships_as.is_empty() {
            output.push_str(&format!("{} {}\n", "Ships as:".cyan().bold(), unit.ships_as));
        }
        if !unit.duration.is_empty() {
            output.push_str(&format!("{} {}\n", "Time:".cyan().bold(), unit.duration));
        }
        if !unit.skills.is_empty() {
            output.push_str(&Self::section_header("Skills"));
            output.push_str(&Self::list(&unit.skills));
        }
        if !unit.requirements.is_empty() {
            output.push_str(&Self::section_header("Production requirements"));
            output.push_str(&Self::list(&unit.requirements));
        }
        output
    }

    pub fn roadmap(units: &[Unit], learner: &LearnerState) -> String {
        let mut output = Self::header("Roadmap");
        output.push('\n');
        for (i, unit) in units.iter().enumerate() {
            let marker: ColoredString = if learner.units_completed.contains(&unit.id) {
                "done".green()
            } else if unit.id == learner.current_unit {
                "here".yellow().bold()
            } else {
                "    ".normal()
            };
            output.push_str(&format!(
                "[{}] {:>2}. {}  {}\n",
                marker,
                i + 1,
                unit.name,
                unit.duration.dimmed()
            ));
        }
        output
    }

    // ==================== Agent replies ====================

    pub fn task(assignment: &TaskAssignment) -> String {
        let payload = &assignment.payload;
        if let Some(raw) = Self::raw_text(payload) {
            return format!("{}\n{}\n", "Task setter:".yellow().bold(), raw);
        }

        let mut output = format!(
            "{} {}\n",
            "Task:".green().bold(),
            assignment.task.as_deref().unwrap_or("(none given)")
        );
        output.push_str(&Self::fields(
            payload,
            &[("context", "Context"), ("estimated_time", "Time")],
        ));
        output.push_str(&Self::list_field(payload, "includes", "Include"));
        output.push_str(&Self::list_field(payload, "acceptance_criteria", "Done when"));
        output
    }

    pub fn planner(payload: &JsonObject) -> String {
        if let Some(raw) = Self::raw_text(payload) {
            return format!("{}\n{}\n", "Planner:".yellow().bold(), raw);
        }
        let mut output = Self::fields(
            payload,
            &[
                ("status", "Status"),
                ("next_action", "Next"),
                ("time_estimate", "Time to move on"),
                ("motivation", ""),
            ],
        );
        output.push_str(&Self::list_field(payload, "blockers", "Blockers"));
        output
    }

    /// Free-text reply from an agent (lessons, answers)
    pub fn reply(agent: &str, text: &str) -> String {
        format!("{}\n\n{}\n", format!("── {agent} ──").yellow().bold(), text.trim())
    }

    pub fn submission(outcome: &SubmissionOutcome) -> String {
        let Some(verdict) = &outcome.verdict else {
            let body = Self::raw_text(&outcome.payload)
                .map(str::to_string)
                .unwrap_or_else(|| Self::json(&outcome.payload));
            return format!(
                "{}\n{}\n\n{}\n",
                "Reviewer:".yellow().bold(),
                body,
                "(No verdict recognised; nothing was recorded.)".dimmed()
            );
        };

        let mut output = format!(
            "{} {}\n",
            "Verdict:".bold(),
            Self::verdict_label(verdict.outcome)
        );
        if let Some(task) = &verdict.task_reviewed {
            output.push_str(&format!("{} {}\n", "Reviewed:".cyan().bold(), task));
        }

        let checks: Vec<String> = [
            ("works", verdict.works),
            ("typed", verdict.typed),
            ("clean", verdict.clean),
            ("robust", verdict.robust),
        ]
        .into_iter()
        .filter_map(|(label, value)| {
            value.map(|ok| {
                if ok {
                    format!("{} {label}", "v".green())
                } else {
                    format!("{} {label}", "x".red())
                }
            })
        })
        .collect();
        if !checks.is_empty() {
            output.push_str(&format!("{}\n", checks.join("  ")));
        }

        if let Some(hint) = verdict
            .start_here
            .as_deref()
            .filter(|h| !h.eq_ignore_ascii_case("none"))
        {
            output.push_str(&format!("{} {}\n", "Start here:".yellow().bold(), hint));
        }
        if !verdict.must_fix.is_empty() {
            output.push_str(&format!("\n{}\n", "Must fix:".red().bold()));
            output.push_str(&Self::list(&verdict.must_fix));
        }
        if !verdict.should_fix.is_empty() {
            output.push_str(&format!("\n{}\n", "Should fix:".yellow()));
            output.push_str(&Self::list(&verdict.should_fix));
        }
        if !verdict.summary.is_empty() {
            output.push_str(&format!("\n{}\n", verdict.summary));
        }
        if let Some(task) = &outcome.completed_task {
            output.push_str(&format!("\n{} {}\n", "Task complete:".green().bold(), task));
        }
        if let Some(report) = &outcome.auto_coaching {
            output.push_str(&format!("\n{}\n", "Auto-coaching ran:".magenta().bold()));
            output.push_str(&Self::coaching_report(report));
        }
        output
    }

    pub fn completion(result: &UnitCompletion) -> String {
        match result {
            UnitCompletion::Rejected { .. } => format!("{}\n", result.to_string().red()),
            _ => format!("{}\n", result.to_string().green().bold()),
        }
    }

    // ==================== Coaching ====================

    pub fn coaching(outcome: &CoachingOutcome) -> String {
        match outcome {
            CoachingOutcome::Disabled => Self::coaching_disabled(),
            CoachingOutcome::Completed { report } => Self::coaching_report(report),
        }
    }

    pub fn coaching_report(report: &CoachingReport) -> String {
        let mut output = String::new();
        for directive in &report.applied {
            output.push_str(&Self::directive(directive));
        }
        if !report.skipped.is_empty() {
            let names: Vec<&str> = report.skipped.iter().map(|r| r.display_name()).collect();
            output.push_str(&format!(
                "{} {}\n",
                "No history yet:".dimmed(),
                names.join(", ")
            ));
        }
        if report.applied.is_empty() {
            output.push_str("No directives changed.\n");
        }
        output
    }

    pub fn issue(outcome: &IssueOutcome) -> String {
        let IssueOutcome::Resolved { resolution } = outcome else {
            return Self::coaching_disabled();
        };

        let mut output = String::new();
        if let Some(attribution) = &resolution.attribution {
            if !attribution.fault.is_empty() {
                let names: Vec<&str> = attribution.fault.iter().map(|r| r.display_name()).collect();
                output.push_str(&format!("{} {}\n", "Fault:".cyan().bold(), names.join(", ")));
            }
            if let Some(analysis) = &attribution.analysis {
                output.push_str(&format!("{} {}\n", "Analysis:".cyan().bold(), analysis));
            }
        }
        if resolution.is_broadcast() {
            output.push_str(&format!(
                "{}\n",
                "No usable directive from the coach; passing your report to the teacher and task setter."
                    .yellow()
            ));
        }
        for directive in &resolution.directives {
            output.push_str(&Self::directive(directive));
        }
        output
    }

    fn directive(directive: &CoachDirective) -> String {
        let source = if directive.source.is_degraded() {
            format!(" ({})", directive.source.as_str()).yellow()
        } else {
            "".normal()
        };
        format!(
            "{}{} {}\n",
            format!("{}:", directive.target.display_name()).magenta().bold(),
            source,
            directive.text
        )
    }

    fn coaching_disabled() -> String {
        format!(
            "{}\n",
            "Coaching is disabled ([coaching] enabled = false).".dimmed()
        )
    }

    // ==================== Settings ====================

    pub fn preferences(prefs: &Preferences) -> String {
        format!(
            "{}\n  Task size:         {} ({})\n  Explanation depth: {} ({})\n  Learning style:    {} ({})\n  Pace:              {} ({})\n",
            "Preferences:".cyan().bold(),
            prefs.task_size.as_str(),
            prefs.task_size.gloss(),
            prefs.explanation_depth.as_str(),
            prefs.explanation_depth.gloss(),
            prefs.learning_style.as_str(),
            prefs.learning_style.gloss(),
            prefs.pace.as_str(),
            prefs.pace.gloss(),
        )
    }

    pub fn day(learner: &LearnerState) -> String {
        format!(
            "Day {} on this unit ({} total)\n",
            learner.days_on_current_unit, learner.total_days
        )
    }

    pub fn config_issues(issues: &[ConfigIssue]) -> String {
        issues
            .iter()
            .map(|issue| match issue.severity {
                Severity::Error => format!("{} {}\n", "error:".red().bold(), issue.message),
                Severity::Warning => format!("{} {}\n", "warning:".yellow().bold(), issue.message),
            })
            .collect()
    }

    // ==================== Helpers ====================

    fn verdict_label(outcome: VerdictOutcome) -> ColoredString {
        match outcome {
            VerdictOutcome::ShipIt => "SHIP IT".green().bold(),
            VerdictOutcome::NeedsWork => "NEEDS WORK".yellow().bold(),
            VerdictOutcome::MajorIssues => "MAJOR ISSUES".red().bold(),
        }
    }

    /// The raw text of an extraction fallback payload
    fn raw_text(payload: &JsonObject) -> Option<&str> {
        if !is_raw_fallback(payload) {
            return None;
        }
        payload.get(RAW_KEY).and_then(Value::as_str)
    }

    fn fields(payload: &JsonObject, keys: &[(&str, &str)]) -> String {
        keys.iter()
            .filter_map(|(key, label)| {
                let value = get_string(payload, key)
                    .or_else(|| get_bool(payload, key).map(|b| b.to_string()))?;
                Some(if label.is_empty() {
                    format!("{}\n", value.italic())
                } else {
                    format!("{} {}\n", format!("{label}:").cyan().bold(), value)
                })
            })
            .collect()
    }

    fn list_field(payload: &JsonObject, key: &str, label: &str) -> String {
        let items = get_string_list(payload, key);
        if items.is_empty() {
            return String::new();
        }
        format!("{}\n{}", format!("{label}:").cyan().bold(), Self::list(&items))
    }

    fn list(items: &[String]) -> String {
        items.iter().map(|item| format!("  * {item}\n")).collect()
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{prefix}{line}"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
