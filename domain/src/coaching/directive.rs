//! Turning coach output into steering directives.

use serde::Serialize;
use serde_json::Value;

use crate::agent::PrimaryRole;
use crate::extract::payload::{get_string, get_string_list};
use crate::extract::{COACH_KEYS, ISSUE_KEYS, JsonObject, extract};
use crate::util::truncate_str;

/// Default cap on raw coach text used as a degraded directive
pub const DEFAULT_RAW_DIRECTIVE_MAX_BYTES: usize = 500;

/// How a directive was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DirectiveSource {
    /// The coach's `recommendation` field
    Recommendation,
    /// Truncated raw coach text (no usable recommendation)
    RawFeedback,
    /// A per-role directive from an issue attribution
    IssueAttribution,
    /// The learner's issue text broadcast to learner-facing roles
    IssueBroadcast,
}

impl DirectiveSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            DirectiveSource::Recommendation => "recommendation",
            DirectiveSource::RawFeedback => "raw_feedback",
            DirectiveSource::IssueAttribution => "issue_attribution",
            DirectiveSource::IssueBroadcast => "issue_broadcast",
        }
    }

    /// Whether the directive came from degraded parsing
    pub fn is_degraded(&self) -> bool {
        matches!(self, DirectiveSource::RawFeedback | DirectiveSource::IssueBroadcast)
    }
}

/// A directive bound for exactly one primary agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoachDirective {
    pub target: PrimaryRole,
    pub text: String,
    pub source: DirectiveSource,
}

impl CoachDirective {
    /// Read a coach reply for `target`.
    ///
    /// A `recommendation` field wins. Anything else non-blank degrades to
    /// `"Coach feedback: "` plus the first `max_bytes` of the raw reply.
    /// A blank reply yields nothing.
    pub fn from_coach_output(target: PrimaryRole, raw: &str, max_bytes: usize) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }

        if let Ok(payload) = extract(trimmed, COACH_KEYS)
            && let Some(recommendation) = get_string(&payload, "recommendation")
        {
            return Some(Self {
                target,
                text: recommendation,
                source: DirectiveSource::Recommendation,
            });
        }

        Some(Self {
            target,
            text: format!("Coach feedback: {}", truncate_str(trimmed, max_bytes)),
            source: DirectiveSource::RawFeedback,
        })
    }
}

/// Structured fault attribution for a learner-reported issue.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IssueAttribution {
    /// Roles the coach holds responsible
    pub fault: Vec<PrimaryRole>,
    pub analysis: Option<String>,
    /// Non-null directives, in payload order, one per named role
    pub directives: Vec<(PrimaryRole, String)>,
}

impl IssueAttribution {
    /// Read an attribution payload.
    ///
    /// Role names are matched leniently; unknown names and null or blank
    /// directives are skipped.
    pub fn from_payload(payload: &JsonObject) -> Self {
        let fault = get_string_list(payload, "fault")
            .iter()
            .filter_map(|name| name.parse().ok())
            .fold(Vec::new(), |mut acc: Vec<PrimaryRole>, role| {
                if !acc.contains(&role) {
                    acc.push(role);
                }
                acc
            });

        let mut directives: Vec<(PrimaryRole, String)> = Vec::new();
        if let Some(Value::Object(map)) = payload.get("directives") {
            for (name, value) in map {
                let Ok(role) = name.parse::<PrimaryRole>() else {
                    continue;
                };
                let Value::String(text) = value else {
                    continue;
                };
                let text = text.trim();
                if text.is_empty() || text.eq_ignore_ascii_case("null") {
                    continue;
                }
                // Later entries for the same role replace earlier ones
                directives.retain(|(r, _)| *r != role);
                directives.push((role, text.to_string()));
            }
        }

        Self {
            fault,
            analysis: get_string(payload, "analysis"),
            directives,
        }
    }
}

/// What to apply in response to an issue report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssueResolution {
    /// Parsed attribution, when the coach reply was structured
    pub attribution: Option<IssueAttribution>,
    pub directives: Vec<CoachDirective>,
}

impl IssueResolution {
    /// Resolve the coach reply to an issue report.
    ///
    /// Structured directives are applied per role. When the reply does not
    /// parse, or parses without a single usable directive, the issue text is
    /// broadcast to the learner-facing roles.
    pub fn from_coach_output(raw: &str, issue: &str) -> Self {
        let attribution = extract(raw, ISSUE_KEYS)
            .ok()
            .map(|payload| IssueAttribution::from_payload(&payload));

        let mut directives: Vec<CoachDirective> = attribution
            .iter()
            .flat_map(|a| a.directives.iter())
            .map(|(role, text)| CoachDirective {
                target: *role,
                text: text.clone(),
                source: DirectiveSource::IssueAttribution,
            })
            .collect();

        if directives.is_empty() {
            let text = broadcast_text(issue);
            directives = PrimaryRole::LEARNER_FACING
                .iter()
                .map(|role| CoachDirective {
                    target: *role,
                    text: text.clone(),
                    source: DirectiveSource::IssueBroadcast,
                })
                .collect();
        }

        Self {
            attribution,
            directives,
        }
    }

    pub fn is_broadcast(&self) -> bool {
        self.directives
            .iter()
            .all(|d| d.source == DirectiveSource::IssueBroadcast)
    }
}

fn broadcast_text(issue: &str) -> String {
    format!("Learner reported issue: {}", issue.trim())
}
