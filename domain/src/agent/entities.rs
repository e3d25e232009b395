//! Agent entity.

use super::request::InferenceRequest;
use super::role::AgentRole;
use crate::core::model::ModelTier;
use crate::prompt::STANDARDS_PREAMBLE;

/// A role-specific agent: fixed instructions plus a mutable steering directive.
///
/// The agent never talks to a provider itself. It only turns a request into
/// an [`InferenceRequest`]; the caller sends it and mutates learner state.
#[derive(Debug, Clone)]
pub struct Agent {
    role: AgentRole,
    instructions: String,
    tier: ModelTier,
    directive: Option<String>,
}

impl Agent {
    pub fn new(role: AgentRole, instructions: impl Into<String>, tier: ModelTier) -> Self {
        Self {
            role,
            instructions: instructions.into(),
            tier,
            directive: None,
        }
    }

    pub fn role(&self) -> AgentRole {
        self.role
    }

    pub fn name(&self) -> String {
        self.role.name()
    }

    pub fn instructions(&self) -> &str {
        &self.instructions
    }

    pub fn tier(&self) -> ModelTier {
        self.tier
    }

    /// Current steering directive, if one is active
    pub fn directive(&self) -> Option<&str> {
        self.directive.as_deref()
    }

    /// Replace the steering directive wholesale.
    ///
    /// Directives never accumulate. A blank directive clears the slot.
    pub fn set_directive(&mut self, directive: impl Into<String>) {
        let directive = directive.into();
        self.directive = if directive.trim().is_empty() {
            None
        } else {
            Some(directive)
        };
    }

    pub fn clear_directive(&mut self) {
        self.directive = None;
    }

    /// Build the request for one turn.
    pub fn request(
        &self,
        user_message: impl Into<String>,
        learner_context: impl Into<String>,
        auxiliary_context: Option<String>,
    ) -> InferenceRequest {
        InferenceRequest {
            agent: self.name(),
            tier: self.tier,
            role_instructions: self.instructions.clone(),
            steering_directive: self.directive.clone(),
            standards_preamble: STANDARDS_PREAMBLE.to_string(),
            learner_context: learner_context.into(),
            auxiliary_context,
            user_message: user_message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::role::PrimaryRole;

    fn teacher() -> Agent {
        Agent::new(
            AgentRole::Primary(PrimaryRole::Teacher),
            "You teach.",
            ModelTier::Standard,
        )
    }

    #[test]
    fn test_new_agent_has_no_directive() {
        let agent = teacher();
        assert!(agent.directive().is_none());
        assert_eq!(agent.name(), "teacher");
    }

    #[test]
    fn test_set_directive_replaces_previous() {
        let mut agent = teacher();
        agent.set_directive("Use more examples");
        agent.set_directive("Slow down");
        assert_eq!(agent.directive(), Some("Slow down"));
    }

    #[test]
    fn test_blank_directive_clears() {
        let mut agent = teacher();
        agent.set_directive("Use more examples");
        agent.set_directive("  ");
        assert!(agent.directive().is_none());
    }

    #[test]
    fn test_request_carries_directive_and_standards() {
        let mut agent = teacher();
        agent.set_directive("Keep it short");
        let req = agent.request("Explain traits", "BUILDER: Ada", None);
        assert_eq!(req.agent, "teacher");
        assert_eq!(req.steering_directive.as_deref(), Some("Keep it short"));
        assert_eq!(req.standards_preamble, STANDARDS_PREAMBLE);
        assert_eq!(req.user_message, "Explain traits");
        assert_eq!(req.role_instructions, "You teach.");
    }
}
