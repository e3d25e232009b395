//! Curriculum catalogue: the ordered, immutable table of units.
//!
//! The catalogue is injected configuration. Nothing in the core mutates it;
//! the orchestrator holds a shared reference for the whole session.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::core::error::DomainError;

/// One curriculum item with its own task/review lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    /// Stable identifier persisted in learner state (e.g. "01_cli_file_processor")
    pub id: String,
    pub name: String,
    /// What the learner builds
    pub goal: String,
    #[serde(default)]
    pub rationale: String,
    /// How the result ships ("Installable CLI tool", ...)
    #[serde(default)]
    pub ships_as: String,
    #[serde(default)]
    pub skills: Vec<String>,
    /// Requirements the reviewer checks against
    #[serde(default)]
    pub requirements: Vec<String>,
    /// Rough expected duration ("2-3 days")
    #[serde(default)]
    pub duration: String,
}

/// Ordered sequence of units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalogue {
    #[serde(rename = "unit")]
    units: Vec<Unit>,
}

impl Catalogue {
    /// Build a catalogue, rejecting empty tables and duplicate ids.
    pub fn new(units: Vec<Unit>) -> Result<Self, DomainError> {
        let catalogue = Self { units };
        catalogue.validate()?;
        Ok(catalogue)
    }

    /// Check invariants on a deserialized catalogue.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.units.is_empty() {
            return Err(DomainError::EmptyCatalogue);
        }
        let mut seen = HashSet::new();
        for unit in &self.units {
            if !seen.insert(unit.id.as_str()) {
                return Err(DomainError::DuplicateUnit(unit.id.clone()));
            }
        }
        Ok(())
    }

    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn first(&self) -> Option<&Unit> {
        self.units.first()
    }

    pub fn get(&self, id: &str) -> Option<&Unit> {
        self.units.iter().find(|u| u.id == id)
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.units.iter().position(|u| u.id == id)
    }

    /// The unit after `id` in catalogue order; `None` at the end or for unknown ids.
    pub fn next_after(&self, id: &str) -> Option<&Unit> {
        let idx = self.position(id)?;
        self.units.get(idx + 1)
    }

    /// Resolve a 1-based index ("3") or a unit id.
    pub fn resolve(&self, selector: &str) -> Result<&Unit, DomainError> {
        let selector = selector.trim();
        if let Ok(n) = selector.parse::<usize>() {
            return n
                .checked_sub(1)
                .and_then(|i| self.units.get(i))
                .ok_or_else(|| DomainError::UnknownUnit(selector.to_string()));
        }
        self.get(selector)
            .ok_or_else(|| DomainError::UnknownUnit(selector.to_string()))
    }
}

#[cfg(test)]
pub(crate) fn test_unit(id: &str) -> Unit {
    Unit {
        id: id.to_string(),
        name: format!("Unit {id}"),
        goal: "Build it".to_string(),
        rationale: String::new(),
        ships_as: String::new(),
        skills: vec![],
        requirements: vec!["Has tests".to_string()],
        duration: String::new(),
    }
}

#[cfg(test)]
pub(crate) fn test_catalogue(ids: &[&str]) -> Catalogue {
    Catalogue {
        units: ids.iter().map(|id| test_unit(id)).collect(),
    }
}
