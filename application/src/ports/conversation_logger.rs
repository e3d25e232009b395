//! Session transcript port.
//!
//! Every agent exchange and every state change the learner would care about
//! (verdicts, coaching directives, unit transitions, issue reports) is
//! emitted as a [`ConversationEvent`]. Adapters decide where the transcript
//! goes; the shipped one appends JSONL.
//!
//! Diagnostics still go through `tracing`. The transcript is the record of
//! what the agents were asked and what changed as a result.

use serde_json::Value;

/// Event names written to the transcript.
pub mod events {
    pub const AGENT_REQUEST: &str = "agent_request";
    pub const AGENT_RESPONSE: &str = "agent_response";
    pub const VERDICT_RECORDED: &str = "verdict_recorded";
    pub const DIRECTIVE_APPLIED: &str = "directive_applied";
    pub const UNIT_COMPLETED: &str = "unit_completed";
    pub const ISSUE_REPORTED: &str = "issue_reported";

    pub const ALL: [&str; 6] = [
        AGENT_REQUEST,
        AGENT_RESPONSE,
        VERDICT_RECORDED,
        DIRECTIVE_APPLIED,
        UNIT_COMPLETED,
        ISSUE_REPORTED,
    ];
}

/// One transcript entry: a name from [`events`] and its fields.
///
/// The adapter stamps the time when it writes the entry.
pub struct ConversationEvent {
    pub event_type: &'static str,
    pub payload: Value,
}

impl ConversationEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Sink for transcript entries.
///
/// Writing never fails from the caller's side: an adapter that cannot write
/// drops the entry, and the learner-facing operation carries on.
pub trait ConversationLogger: Send + Sync {
    fn log(&self, event: ConversationEvent);
}

/// Sink used when no transcript path is configured.
pub struct NoConversationLogger;

impl ConversationLogger for NoConversationLogger {
    fn log(&self, _event: ConversationEvent) {}
}
