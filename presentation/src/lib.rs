//! Presentation layer for buildpath
//!
//! CLI definitions, console formatting and progress reporting.

pub mod cli;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use cli::commands::{Cli, Command, OutputFormat, PrefsArgs, SessionLine};
pub use output::console::ConsoleFormatter;
pub use progress::reporter::{ProgressReporter, SimpleProgress};
