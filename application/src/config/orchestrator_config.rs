//! Orchestrator parameters: coaching loop control.
//!
//! [`OrchestratorConfig`] groups the values that shape one session: whether
//! the coach layer exists, how much history it sees and how often it runs
//! on its own. These are application-layer concerns, not domain policy.

use buildpath_domain::coaching::{DEFAULT_AUTO_INTERVAL, DEFAULT_RAW_DIRECTIVE_MAX_BYTES};
use buildpath_domain::history::DEFAULT_HISTORY_CAPACITY;
use serde::{Deserialize, Serialize};

/// Session-wide orchestration settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrchestratorConfig {
    /// Create coach agents and allow coaching rounds and issue reports.
    pub coaching_enabled: bool,
    /// Outputs retained per primary role.
    pub history_capacity: usize,
    /// Reviews between automatic coaching rounds (0 disables).
    pub auto_interval: u32,
    /// Cap on raw coach text used as a degraded directive.
    pub raw_directive_max_bytes: usize,
    /// Default learner name for fresh sessions.
    pub default_learner_name: String,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            coaching_enabled: true,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            auto_interval: DEFAULT_AUTO_INTERVAL,
            raw_directive_max_bytes: DEFAULT_RAW_DIRECTIVE_MAX_BYTES,
            default_learner_name: "Builder".to_string(),
        }
    }
}

impl OrchestratorConfig {
    // ==================== Builder Methods ====================

    pub fn with_coaching(mut self, enabled: bool) -> Self {
        self.coaching_enabled = enabled;
        self
    }

    pub fn with_history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = capacity;
        self
    }

    pub fn with_auto_interval(mut self, interval: u32) -> Self {
        self.auto_interval = interval;
        self
    }

    pub fn with_raw_directive_max_bytes(mut self, max: usize) -> Self {
        self.raw_directive_max_bytes = max;
        self
    }
}
