//! Inference request assembled by an [`Agent`](super::entities::Agent).
//!
//! The request keeps every prompt ingredient as a separate field so that
//! adapters can map them onto a provider's wire format however they like.
//! [`InferenceRequest::system_prompt`] is the canonical flattening.

use crate::core::model::ModelTier;

/// Everything an inference provider needs to answer one agent turn.
#[derive(Debug, Clone, PartialEq)]
pub struct InferenceRequest {
    /// Name of the requesting agent (for logs and transcripts)
    pub agent: String,
    /// Tier selecting the concrete model
    pub tier: ModelTier,
    /// Fixed role prompt
    pub role_instructions: String,
    /// Active coaching directive, if any
    pub steering_directive: Option<String>,
    /// Cross-role standards applied to every agent
    pub standards_preamble: String,
    /// Snapshot of the learner's progress and preferences
    pub learner_context: String,
    /// Extra material such as source code
    pub auxiliary_context: Option<String>,
    /// The actual request
    pub user_message: String,
}

impl InferenceRequest {
    /// Flatten into a single system prompt.
    ///
    /// Order is directive, standards, role instructions, learner context,
    /// auxiliary context. The directive header states that it wins over
    /// everything after it, and role instructions win over standards.
    pub fn system_prompt(&self) -> String {
        let mut sections: Vec<String> = Vec::with_capacity(5);

        if let Some(directive) = self.steering_directive.as_deref()
            && !directive.trim().is_empty()
        {
            sections.push(format!(
                "MANDATORY COACHING DIRECTIVE (highest priority, overrides anything below):\n\
                 {directive}\n\n\
                 This directive comes from your coach, based on how the learner is doing. Follow it.\n---"
            ));
        }

        sections.push(format!(
            "SHARED STANDARDS (your role instructions take precedence where they differ):\n{}",
            self.standards_preamble.trim()
        ));
        sections.push(self.role_instructions.trim().to_string());
        sections.push(self.learner_context.trim().to_string());

        if let Some(aux) = self.auxiliary_context.as_deref()
            && !aux.trim().is_empty()
        {
            sections.push(format!("CURRENT PROJECT CODE:\n{}", aux.trim()));
        }

        sections.join("\n\n")
    }

    pub fn has_directive(&self) -> bool {
        self.steering_directive
            .as_deref()
            .is_some_and(|d| !d.trim().is_empty())
    }
}
