//! Shared helpers for use cases.
//!
//! [`AgentInvoker`] is the single path by which any agent talks to the
//! inference gateway, so every turn is traced, transcribed and reported
//! the same way.

use crate::ports::conversation_logger::{ConversationEvent, ConversationLogger, events};
use crate::ports::inference::{GatewayError, InferenceGateway};
use crate::ports::progress::ProgressNotifier;
use buildpath_domain::Agent;
use buildpath_domain::util::truncate_str;
use tracing::{debug, info, warn};

/// Borrowed collaborators needed to run one agent turn.
pub(crate) struct AgentInvoker<'a> {
    pub gateway: &'a dyn InferenceGateway,
    pub logger: &'a dyn ConversationLogger,
    pub progress: &'a dyn ProgressNotifier,
}

impl AgentInvoker<'_> {
    /// Run one turn for `agent`. Gateway errors propagate unchanged.
    pub(crate) async fn invoke(
        &self,
        agent: &Agent,
        user_message: String,
        learner_context: String,
        auxiliary_context: Option<String>,
    ) -> Result<String, GatewayError> {
        let request = agent.request(user_message, learner_context, auxiliary_context);
        let name = agent.name();

        info!(
            "Invoking {} ({} tier{})",
            name,
            request.tier,
            if request.has_directive() { ", directed" } else { "" }
        );
        debug!("{} request: {}", name, truncate_str(&request.user_message, 200));

        self.logger.log(ConversationEvent::new(
            events::AGENT_REQUEST,
            serde_json::json!({
                "agent": name,
                "tier": request.tier.as_str(),
                "directive": request.steering_directive,
                "message": request.user_message,
                "auxiliary_bytes": request.auxiliary_context.as_ref().map_or(0, String::len),
            }),
        ));

        self.progress.on_agent_start(&name, request.tier);
        let result = self.gateway.invoke(&request).await;
        self.progress.on_agent_complete(&name, result.is_ok());

        match &result {
            Ok(text) => {
                debug!("{} responded with {} bytes", name, text.len());
                self.logger.log(ConversationEvent::new(
                    events::AGENT_RESPONSE,
                    serde_json::json!({
                        "agent": name,
                        "bytes": text.len(),
                        "text": text,
                    }),
                ));
            }
            Err(e) => warn!("{} failed: {}", name, e),
        }

        result
    }
}
