//! Model tier value object

use serde::{Deserialize, Serialize};

use super::error::DomainError;

/// Inference cost/capability tier an agent runs on.
///
/// The set is closed: every agent picks one of these, and the
/// infrastructure layer maps each tier to a concrete model identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelTier {
    /// Strongest model, used for strategic decisions (planning and its coach)
    Premium,
    /// Faster, cheaper model for day-to-day teaching, tasks and reviews
    #[default]
    Standard,
}

impl ModelTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelTier::Premium => "premium",
            ModelTier::Standard => "standard",
        }
    }

    pub fn all() -> [ModelTier; 2] {
        [ModelTier::Premium, ModelTier::Standard]
    }
}

impl std::fmt::Display for ModelTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ModelTier {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "premium" | "opus" => Ok(ModelTier::Premium),
            "standard" | "sonnet" => Ok(ModelTier::Standard),
            other => Err(DomainError::UnknownTier(other.to_string())),
        }
    }
}
