//! User-message templates for each learner-facing operation

use crate::catalogue::Unit;
use crate::learner::LearnerState;
use crate::util::bullets;

/// Number of verdicts the planner sees when checking progress
const PLANNER_VERDICT_WINDOW: usize = 5;

/// Templates for the user message of each primary-agent request
pub struct PromptTemplate;

impl PromptTemplate {
    /// Planner progress assessment
    pub fn planner_check(state: &LearnerState) -> String {
        let verdicts = state
            .recent_verdicts(PLANNER_VERDICT_WINDOW)
            .iter()
            .map(|v| {
                serde_json::json!({
                    "verdict": v.outcome.as_str(),
                    "must_fix": v.must_fix,
                })
            })
            .collect::<Vec<_>>();
        let verdicts = serde_json::to_string_pretty(&verdicts).unwrap_or_else(|_| "[]".to_string());

        format!(
            r#"Current unit: {unit}
Units completed: {completed}
Tasks completed in current unit:
{tasks}
Days on current unit: {days}

Recent review history:
{verdicts}

Recurring issues:
{recurring}

Assess their progress and recommend next steps. Respond with JSON only."#,
            unit = state.current_unit,
            completed = if state.units_completed.is_empty() {
                "none".to_string()
            } else {
                state.units_completed.join(", ")
            },
            tasks = bullets(&state.tasks_completed, "None yet"),
            days = state.days_on_current_unit,
            recurring = bullets(&state.recurring_issues, "None yet"),
        )
    }

    /// Next-task request; lists finished work so it is not handed out again
    pub fn next_task(unit: Option<&Unit>, state: &LearnerState) -> String {
        format!(
            r#"Current unit: {name}
Skills to learn: {skills}

COMPLETED TASKS (do not repeat these):
{tasks}

WORK THAT ALREADY PASSED REVIEW:
{shipped}

RECURRING ISSUES to address:
{recurring}

Look at the project code below. Do not assign tasks for things that are already built.
Give the next task that builds on what exists. Respond with JSON only, no text before or after."#,
            name = unit_name(unit),
            skills = unit.map(|u| u.skills.join(", ")).unwrap_or_default(),
            tasks = bullets(&state.tasks_completed, "None yet"),
            shipped = bullets(&state.shipped_targets(), "None yet"),
            recurring = bullets(&state.recurring_issues, "None yet"),
        )
    }

    /// Focused lesson on one topic
    pub fn lesson(unit: Option<&Unit>, topic: &str, current_task: &str) -> String {
        format!(
            r#"They're building: {name}
They need to learn: {topic}
Their current task: {task}

Teach {topic} with production-quality examples they can use right now.
Keep it under 500 words. They should be coding, not reading."#,
            name = unit_name(unit),
            task = or_none(current_task),
        )
    }

    /// Free-form question about the learner's own code
    pub fn chat(question: &str) -> String {
        format!(
            r#"The learner asks: {question}

Look at their code and teach:
- If there is a bug, show exactly where it is and why it is wrong
- If they ask how to do something, show complete working code and explain it
- Be specific to their code and their current task

No "go read the docs" and no placeholders."#
        )
    }

    /// Review of pasted code against the unit requirements
    pub fn review_code(
        unit: Option<&Unit>,
        current_task: &str,
        code: &str,
        description: &str,
    ) -> String {
        format!(
            r#"UNIT: {name}
REQUIREMENTS:
{requirements}

CURRENT TASK: {task}

SUBMITTED CODE:
```
{code}
```

DESCRIPTION: {description}

Review this code. Be direct. Respond with JSON only."#,
            name = unit_name(unit),
            requirements = requirements(unit),
            task = or_none(current_task),
            description = or_none(description),
        )
    }

    /// Review of a single file, scoped to the current task
    pub fn review_file(unit: Option<&Unit>, current_task: &str, path: &str, contents: &str) -> String {
        format!(
            r#"UNIT: {name}
REQUIREMENTS:
{requirements}

CURRENT TASK: {task}

REVIEW ONLY THIS FILE ({path}), ignore everything else:
{contents}

Review only the code shown above. Does it complete the current task?
Do not mention other files, tests or anything unrelated to this task.
Respond with JSON only."#,
            name = unit_name(unit),
            requirements = requirements(unit),
            task = or_none(current_task),
        )
    }
}

fn unit_name(unit: Option<&Unit>) -> &str {
    unit.map(|u| u.name.as_str()).unwrap_or("Unknown unit")
}

fn requirements(unit: Option<&Unit>) -> String {
    bullets(unit.map(|u| u.requirements.as_slice()).unwrap_or(&[]), "None listed")
}

fn or_none(s: &str) -> &str {
    if s.trim().is_empty() { "None" } else { s }
}
