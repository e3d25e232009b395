//! Progress reporting for agent requests

use buildpath_application::ProgressNotifier;
use buildpath_domain::{CoachDirective, ModelTier};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

/// Spinner per in-flight agent request
pub struct ProgressReporter {
    bars: Mutex<HashMap<String, ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            bars: Mutex::new(HashMap::new()),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold.cyan} {msg} {elapsed:.dim}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn tier_label(tier: ModelTier) -> &'static str {
        match tier {
            ModelTier::Premium => "premium model",
            ModelTier::Standard => "standard model",
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressNotifier for ProgressReporter {
    fn on_agent_start(&self, agent: &str, tier: ModelTier) {
        let pb = ProgressBar::new_spinner();
        pb.set_style(Self::spinner_style());
        pb.set_prefix(agent.to_string());
        pb.set_message(format!("thinking ({})", Self::tier_label(tier)));
        pb.enable_steady_tick(Duration::from_millis(100));

        if let Ok(mut bars) = self.bars.lock()
            && let Some(previous) = bars.insert(agent.to_string(), pb)
        {
            previous.finish_and_clear();
        }
    }

    fn on_agent_complete(&self, agent: &str, success: bool) {
        let Some(pb) = self.bars.lock().ok().and_then(|mut bars| bars.remove(agent)) else {
            return;
        };
        if success {
            pb.finish_and_clear();
        } else {
            pb.abandon_with_message(format!("{}", "failed".red()));
        }
    }

    fn on_auto_coaching(&self) {
        eprintln!("{} {}", "->".magenta(), "Coaches are reviewing recent work".bold());
    }

    fn on_directive_applied(&self, directive: &CoachDirective) {
        eprintln!(
            "  {} {} directive updated",
            "v".green(),
            directive.target.display_name()
        );
    }

    fn on_task_completed(&self, task: &str) {
        eprintln!("{} {}", "Task complete:".green().bold(), task);
    }
}

/// Plain line-based progress for non-interactive output
pub struct SimpleProgress;

impl ProgressNotifier for SimpleProgress {
    fn on_agent_start(&self, agent: &str, tier: ModelTier) {
        eprintln!(
            "{} {} ({})",
            "->".cyan(),
            agent.bold(),
            ProgressReporter::tier_label(tier)
        );
    }

    fn on_agent_complete(&self, agent: &str, success: bool) {
        if success {
            eprintln!("  {} {}", "v".green(), agent);
        } else {
            eprintln!("  {} {} (failed)", "x".red(), agent);
        }
    }

    fn on_auto_coaching(&self) {
        eprintln!("{} auto-coaching", "->".magenta());
    }

    fn on_directive_applied(&self, directive: &CoachDirective) {
        eprintln!("  {} {} directive", "v".green(), directive.target.display_name());
    }

    fn on_task_completed(&self, task: &str) {
        eprintln!("{} {}", "Task complete:".green(), task);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reporter_tracks_and_clears_bars() {
        let reporter = ProgressReporter::new();
        reporter.on_agent_start("Reviewer", ModelTier::Standard);
        assert_eq!(reporter.bars.lock().unwrap().len(), 1);

        reporter.on_agent_complete("Reviewer", true);
        assert!(reporter.bars.lock().unwrap().is_empty());
    }

    #[test]
    fn test_complete_without_start_is_ignored() {
        let reporter = ProgressReporter::new();
        reporter.on_agent_complete("Planner", false);
        assert!(reporter.bars.lock().unwrap().is_empty());
    }
}
