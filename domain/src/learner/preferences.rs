//! Learner preferences: four fixed enumerated choices.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::core::error::DomainError;

/// Preferred size of a single task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl TaskSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskSize::Small => "small",
            TaskSize::Medium => "medium",
            TaskSize::Large => "large",
        }
    }

    pub fn gloss(&self) -> &'static str {
        match self {
            TaskSize::Small => "15-30 min tasks",
            TaskSize::Medium => "30-60 min tasks",
            TaskSize::Large => "1-2 hour tasks",
        }
    }
}

impl FromStr for TaskSize {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "s" | "small" => Ok(TaskSize::Small),
            "m" | "medium" => Ok(TaskSize::Medium),
            "l" | "large" => Ok(TaskSize::Large),
            _ => Err(invalid("task size", s)),
        }
    }
}

/// How much explanation the teacher gives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ExplanationDepth {
    #[serde(rename = "brief")]
    Brief,
    #[default]
    #[serde(rename = "detailed")]
    Detailed,
    #[serde(rename = "deep-dive")]
    DeepDive,
}

impl ExplanationDepth {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExplanationDepth::Brief => "brief",
            ExplanationDepth::Detailed => "detailed",
            ExplanationDepth::DeepDive => "deep-dive",
        }
    }

    pub fn gloss(&self) -> &'static str {
        match self {
            ExplanationDepth::Brief => "quick and minimal",
            ExplanationDepth::Detailed => "thorough with examples",
            ExplanationDepth::DeepDive => "comprehensive with theory",
        }
    }
}

impl FromStr for ExplanationDepth {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "b" | "brief" => Ok(ExplanationDepth::Brief),
            "d" | "detailed" => Ok(ExplanationDepth::Detailed),
            "deep" | "deep-dive" | "deep_dive" => Ok(ExplanationDepth::DeepDive),
            _ => Err(invalid("explanation depth", s)),
        }
    }
}

/// How the learner likes new material introduced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LearningStyle {
    #[default]
    #[serde(rename = "examples")]
    Examples,
    #[serde(rename = "theory-first")]
    TheoryFirst,
    #[serde(rename = "trial-error")]
    TrialError,
}

impl LearningStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            LearningStyle::Examples => "examples",
            LearningStyle::TheoryFirst => "theory-first",
            LearningStyle::TrialError => "trial-error",
        }
    }

    pub fn gloss(&self) -> &'static str {
        match self {
            LearningStyle::Examples => "show code first, explain after",
            LearningStyle::TheoryFirst => "explain concept, then show code",
            LearningStyle::TrialError => "give task, let them struggle, then help",
        }
    }
}

impl FromStr for LearningStyle {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "e" | "examples" => Ok(LearningStyle::Examples),
            "t" | "theory" | "theory-first" => Ok(LearningStyle::TheoryFirst),
            "trial" | "trial-error" => Ok(LearningStyle::TrialError),
            _ => Err(invalid("learning style", s)),
        }
    }
}

/// Overall pace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pace {
    Slow,
    #[default]
    Normal,
    Fast,
}

impl Pace {
    pub fn as_str(&self) -> &'static str {
        match self {
            Pace::Slow => "slow",
            Pace::Normal => "normal",
            Pace::Fast => "fast",
        }
    }

    pub fn gloss(&self) -> &'static str {
        match self {
            Pace::Slow => "extra scaffolding and smaller steps",
            Pace::Normal => "standard progression",
            Pace::Fast => "minimal hand-holding, challenge them",
        }
    }
}

impl FromStr for Pace {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "s" | "slow" => Ok(Pace::Slow),
            "n" | "normal" => Ok(Pace::Normal),
            "f" | "fast" => Ok(Pace::Fast),
            _ => Err(invalid("pace", s)),
        }
    }
}

fn invalid(field: &'static str, value: &str) -> DomainError {
    DomainError::InvalidPreference {
        field,
        value: value.to_string(),
    }
}

/// All four preferences together.
///
/// Flattened into the persisted learner state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Preferences {
    pub task_size: TaskSize,
    pub explanation_depth: ExplanationDepth,
    pub learning_style: LearningStyle,
    pub pace: Pace,
}

/// A partial update; `None` leaves a preference unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PreferenceUpdate {
    pub task_size: Option<TaskSize>,
    pub explanation_depth: Option<ExplanationDepth>,
    pub learning_style: Option<LearningStyle>,
    pub pace: Option<Pace>,
}

impl PreferenceUpdate {
    pub fn is_empty(&self) -> bool {
        self.task_size.is_none()
            && self.explanation_depth.is_none()
            && self.learning_style.is_none()
            && self.pace.is_none()
    }
}

impl Preferences {
    pub fn apply(&mut self, update: PreferenceUpdate) {
        if let Some(v) = update.task_size {
            self.task_size = v;
        }
        if let Some(v) = update.explanation_depth {
            self.explanation_depth = v;
        }
        if let Some(v) = update.learning_style {
            self.learning_style = v;
        }
        if let Some(v) = update.pace {
            self.pace = v;
        }
    }

    /// Prompt section asking agents to adapt to these preferences
    pub fn to_context(&self) -> String {
        format!(
            "LEARNER PREFERENCES (adapt your style to match):\n\
             - Task size: {} ({})\n\
             - Explanation depth: {} ({})\n\
             - Learning style: {} ({})\n\
             - Pace: {} ({})",
            self.task_size.as_str(),
            self.task_size.gloss(),
            self.explanation_depth.as_str(),
            self.explanation_depth.gloss(),
            self.learning_style.as_str(),
            self.learning_style.gloss(),
            self.pace.as_str(),
            self.pace.gloss(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aliases() {
        assert_eq!("s".parse::<TaskSize>().unwrap(), TaskSize::Small);
        assert_eq!("deep".parse::<ExplanationDepth>().unwrap(), ExplanationDepth::DeepDive);
        assert_eq!("theory".parse::<LearningStyle>().unwrap(), LearningStyle::TheoryFirst);
        assert_eq!("F".parse::<Pace>().unwrap(), Pace::Fast);
        assert!("huge".parse::<TaskSize>().is_err());
    }

    #[test]
    fn test_serde_names() {
        let prefs = Preferences {
            explanation_depth: ExplanationDepth::DeepDive,
            learning_style: LearningStyle::TrialError,
            ..Default::default()
        };
        let json = serde_json::to_value(prefs).unwrap();
        assert_eq!(json["explanation_depth"], "deep-dive");
        assert_eq!(json["learning_style"], "trial-error");
        assert_eq!(json["task_size"], "medium");
        assert_eq!(json["pace"], "normal");
    }

    #[test]
    fn test_partial_update() {
        let mut prefs = Preferences::default();
        prefs.apply(PreferenceUpdate {
            pace: Some(Pace::Slow),
            ..Default::default()
        });
        assert_eq!(prefs.pace, Pace::Slow);
        assert_eq!(prefs.task_size, TaskSize::Medium);
    }

    #[test]
    fn test_context_mentions_glosses() {
        let ctx = Preferences::default().to_context();
        assert!(ctx.contains("30-60 min tasks"));
        assert!(ctx.contains("show code first"));
    }
}
