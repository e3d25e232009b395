//! Review verdicts produced by the reviewer agent.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::error::DomainError;
use crate::extract::JsonObject;
use crate::extract::payload::{get_bool, get_string, get_string_list};

/// Categorical judgment of a submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerdictOutcome {
    ShipIt,
    NeedsWork,
    MajorIssues,
}

impl VerdictOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            VerdictOutcome::ShipIt => "ship_it",
            VerdictOutcome::NeedsWork => "needs_work",
            VerdictOutcome::MajorIssues => "major_issues",
        }
    }

    pub fn is_passing(&self) -> bool {
        matches!(self, VerdictOutcome::ShipIt)
    }
}

impl fmt::Display for VerdictOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for VerdictOutcome {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['-', ' '], "_").as_str() {
            "ship_it" => Ok(VerdictOutcome::ShipIt),
            "needs_work" => Ok(VerdictOutcome::NeedsWork),
            "major_issues" => Ok(VerdictOutcome::MajorIssues),
            _ => Err(DomainError::UnknownVerdict(s.to_string())),
        }
    }
}

/// One reviewer judgment, as appended to the learner's review history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewVerdict {
    #[serde(rename = "verdict")]
    pub outcome: VerdictOutcome,
    pub must_fix: Vec<String>,
    pub should_fix: Vec<String>,
    pub summary: String,
    /// What the reviewer says was actually built
    pub task_reviewed: Option<String>,
    /// The single most important fix
    pub start_here: Option<String>,
    pub works: Option<bool>,
    pub typed: Option<bool>,
    pub clean: Option<bool>,
    pub robust: Option<bool>,
}

impl ReviewVerdict {
    pub fn new(outcome: VerdictOutcome) -> Self {
        Self {
            outcome,
            must_fix: Vec::new(),
            should_fix: Vec::new(),
            summary: String::new(),
            task_reviewed: None,
            start_here: None,
            works: None,
            typed: None,
            clean: None,
            robust: None,
        }
    }

    /// Read a verdict out of an extracted reviewer payload.
    ///
    /// Fails when the `verdict` field is missing or not one of the three
    /// known outcomes. Everything else is optional.
    pub fn from_payload(payload: &JsonObject) -> Result<Self, DomainError> {
        let raw = get_string(payload, "verdict")
            .ok_or_else(|| DomainError::UnknownVerdict(String::new()))?;
        let outcome = raw.parse::<VerdictOutcome>()?;

        Ok(Self {
            outcome,
            must_fix: get_string_list(payload, "must_fix"),
            should_fix: get_string_list(payload, "should_fix"),
            summary: get_string(payload, "overall")
                .or_else(|| get_string(payload, "summary"))
                .unwrap_or_default(),
            task_reviewed: get_string(payload, "task_reviewed"),
            start_here: get_string(payload, "start_here"),
            works: get_bool(payload, "works"),
            typed: get_bool(payload, "typed"),
            clean: get_bool(payload, "clean"),
            robust: get_bool(payload, "robust"),
        })
    }

    pub fn is_ship_it(&self) -> bool {
        self.outcome.is_passing()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(value: serde_json::Value) -> JsonObject {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_outcome_parse() {
        assert_eq!("ship_it".parse::<VerdictOutcome>().unwrap(), VerdictOutcome::ShipIt);
        assert_eq!("Needs Work".parse::<VerdictOutcome>().unwrap(), VerdictOutcome::NeedsWork);
        assert_eq!(
            "major-issues".parse::<VerdictOutcome>().unwrap(),
            VerdictOutcome::MajorIssues
        );
        assert!("lgtm".parse::<VerdictOutcome>().is_err());
    }

    #[test]
    fn test_from_payload_full() {
        let v = ReviewVerdict::from_payload(&payload(json!({
            "verdict": "needs_work",
            "must_fix": ["no error handling"],
            "should_fix": "add docstrings",
            "overall": "Close.",
            "start_here": "wrap the open call",
            "works": true,
            "typed": "false"
        })))
        .unwrap();
        assert_eq!(v.outcome, VerdictOutcome::NeedsWork);
        assert_eq!(v.must_fix, vec!["no error handling"]);
        assert_eq!(v.should_fix, vec!["add docstrings"]);
        assert_eq!(v.summary, "Close.");
        assert_eq!(v.start_here.as_deref(), Some("wrap the open call"));
        assert_eq!(v.works, Some(true));
        assert_eq!(v.typed, Some(false));
        assert_eq!(v.clean, None);
    }

    #[test]
    fn test_from_payload_minimal() {
        let v = ReviewVerdict::from_payload(&payload(json!({
            "verdict": "ship_it",
            "must_fix": [],
            "task_reviewed": "parse CSV"
        })))
        .unwrap();
        assert!(v.is_ship_it());
        assert!(v.must_fix.is_empty());
        assert_eq!(v.task_reviewed.as_deref(), Some("parse CSV"));
    }

    #[test]
    fn test_from_payload_rejects_missing_or_unknown() {
        assert!(ReviewVerdict::from_payload(&payload(json!({"overall": "ok"}))).is_err());
        assert!(ReviewVerdict::from_payload(&payload(json!({"verdict": "maybe"}))).is_err());
    }

    #[test]
    fn test_serializes_outcome_as_verdict() {
        let json = serde_json::to_value(ReviewVerdict::new(VerdictOutcome::MajorIssues)).unwrap();
        assert_eq!(json["verdict"], "major_issues");
    }

    #[test]
    fn test_deserialize_requires_lists() {
        let err = serde_json::from_value::<ReviewVerdict>(json!({"verdict": "ship_it"}));
        assert!(err.is_err());
    }
}
