//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Unknown agent role: {0}")]
    UnknownRole(String),

    #[error("Unknown model tier: {0}")]
    UnknownTier(String),

    #[error("Invalid value '{value}' for {field}")]
    InvalidPreference { field: &'static str, value: String },

    #[error("Unknown verdict: {0}")]
    UnknownVerdict(String),

    #[error("Unknown curriculum unit: {0}")]
    UnknownUnit(String),

    #[error("Curriculum catalogue is empty")]
    EmptyCatalogue,

    #[error("Duplicate curriculum unit id: {0}")]
    DuplicateUnit(String),
}

impl DomainError {
    /// Check if this error refers to a curriculum lookup
    pub fn is_catalogue_error(&self) -> bool {
        matches!(
            self,
            DomainError::UnknownUnit(_) | DomainError::EmptyCatalogue | DomainError::DuplicateUnit(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_role_display() {
        let error = DomainError::UnknownRole("janitor".to_string());
        assert_eq!(error.to_string(), "Unknown agent role: janitor");
    }

    #[test]
    fn test_invalid_preference_display() {
        let error = DomainError::InvalidPreference {
            field: "pace",
            value: "warp".to_string(),
        };
        assert_eq!(error.to_string(), "Invalid value 'warp' for pace");
    }

    #[test]
    fn test_is_catalogue_error() {
        assert!(DomainError::EmptyCatalogue.is_catalogue_error());
        assert!(DomainError::UnknownUnit("x".to_string()).is_catalogue_error());
        assert!(!DomainError::UnknownTier("x".to_string()).is_catalogue_error());
    }
}
