//! Agent roles.
//!
//! Four primary roles face the learner. Each primary role is paired with
//! exactly one coach role that observes it and rewrites its directive.

use serde::{Deserialize, Serialize};

use crate::core::error::DomainError;
use crate::core::model::ModelTier;

/// One of the four learner-facing roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimaryRole {
    /// Decides whether the learner should keep going or move on
    Planner,
    /// Explains concepts and answers questions about the learner's code
    Teacher,
    /// Hands out the next small, concrete piece of work
    TaskSetter,
    /// Judges submissions and gates progression
    Reviewer,
}

impl PrimaryRole {
    /// All primary roles, in coaching order
    pub const ALL: [PrimaryRole; 4] = [
        PrimaryRole::Planner,
        PrimaryRole::Teacher,
        PrimaryRole::TaskSetter,
        PrimaryRole::Reviewer,
    ];

    /// The roles that talk to the learner directly every day.
    ///
    /// A learner-reported issue that cannot be attributed is broadcast to these.
    pub const LEARNER_FACING: [PrimaryRole; 2] = [PrimaryRole::Teacher, PrimaryRole::TaskSetter];

    pub fn as_str(&self) -> &'static str {
        match self {
            PrimaryRole::Planner => "planner",
            PrimaryRole::Teacher => "teacher",
            PrimaryRole::TaskSetter => "task_setter",
            PrimaryRole::Reviewer => "reviewer",
        }
    }

    /// Human-readable name
    pub fn display_name(&self) -> &'static str {
        match self {
            PrimaryRole::Planner => "Planner",
            PrimaryRole::Teacher => "Teacher",
            PrimaryRole::TaskSetter => "Task Setter",
            PrimaryRole::Reviewer => "Reviewer",
        }
    }

    /// Tier used by this role and by its coach.
    pub fn default_tier(&self) -> ModelTier {
        match self {
            PrimaryRole::Planner => ModelTier::Premium,
            _ => ModelTier::Standard,
        }
    }
}

impl std::fmt::Display for PrimaryRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for PrimaryRole {
    type Err = DomainError;

    /// Accepts canonical names plus the aliases models tend to produce
    /// ("curriculum", "challenger", "task-setter", ...).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['-', ' '], "_");
        match normalized.as_str() {
            "planner" | "curriculum" => Ok(PrimaryRole::Planner),
            "teacher" | "lecturer" => Ok(PrimaryRole::Teacher),
            "task_setter" | "tasksetter" | "challenger" => Ok(PrimaryRole::TaskSetter),
            "reviewer" => Ok(PrimaryRole::Reviewer),
            _ => Err(DomainError::UnknownRole(s.to_string())),
        }
    }
}

/// Identity of any agent in a session: a primary role or the coach of one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AgentRole {
    Primary(PrimaryRole),
    Coach(PrimaryRole),
}

impl AgentRole {
    /// Unique role name within a session ("teacher", "teacher_coach", ...)
    pub fn name(&self) -> String {
        match self {
            AgentRole::Primary(role) => role.as_str().to_string(),
            AgentRole::Coach(role) => format!("{}_coach", role.as_str()),
        }
    }

    /// The primary role this agent is, or coaches
    pub fn primary(&self) -> PrimaryRole {
        match self {
            AgentRole::Primary(role) | AgentRole::Coach(role) => *role,
        }
    }

    pub fn is_coach(&self) -> bool {
        matches!(self, AgentRole::Coach(_))
    }

    pub fn default_tier(&self) -> ModelTier {
        self.primary().default_tier()
    }
}

impl std::fmt::Display for AgentRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_aliases() {
        assert_eq!("curriculum".parse::<PrimaryRole>().unwrap(), PrimaryRole::Planner);
        assert_eq!("Challenger".parse::<PrimaryRole>().unwrap(), PrimaryRole::TaskSetter);
        assert_eq!("task-setter".parse::<PrimaryRole>().unwrap(), PrimaryRole::TaskSetter);
        assert_eq!("reviewer".parse::<PrimaryRole>().unwrap(), PrimaryRole::Reviewer);
        assert!("janitor".parse::<PrimaryRole>().is_err());
    }

    #[test]
    fn test_agent_role_names_are_unique() {
        let mut names: Vec<String> = PrimaryRole::ALL
            .iter()
            .flat_map(|r| [AgentRole::Primary(*r).name(), AgentRole::Coach(*r).name()])
            .collect();
        let total = names.len();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), total);
        assert!(names.contains(&"task_setter_coach".to_string()));
    }

    #[test]
    fn test_planner_runs_on_premium() {
        assert_eq!(PrimaryRole::Planner.default_tier(), ModelTier::Premium);
        assert_eq!(AgentRole::Coach(PrimaryRole::Planner).default_tier(), ModelTier::Premium);
        assert_eq!(AgentRole::Coach(PrimaryRole::Teacher).default_tier(), ModelTier::Standard);
    }
}
