//! CLI command definitions

use buildpath_domain::{ExplanationDepth, LearningStyle, Pace, PreferenceUpdate, TaskSize};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// How results are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Colored, human-readable text
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
}

/// CLI arguments for buildpath
#[derive(Parser, Debug)]
#[command(name = "buildpath")]
#[command(author, version, about = "Build-first curriculum with coached AI mentors")]
#[command(long_about = r#"
buildpath walks you through a sequence of units, each ending in something
you ship. Four agents work with you:

  planner      tracks your progress and decides what comes next
  teacher      explains concepts in the context of your current task
  task setter  hands you one small, concrete task at a time
  reviewer     reviews what you built and decides if it ships

Behind each agent sits a coach that watches its recent output and steers it
when it is not working for you. `buildpath issue` tells the coaches directly.

Interaction history and coaching directives live for one process. Use
`buildpath session` to keep them across commands.

Configuration files are loaded from (in priority order):
1. BUILDPATH_* environment variables
2. --config <path>        Explicit config file
3. ./buildpath.toml       Project-level config
4. ~/.config/buildpath/config.toml   Global config

Example:
  buildpath init --name Ada
  buildpath task
  buildpath review src/app/cli.py
  buildpath done
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text", global = true)]
    pub output: OutputFormat,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// Write diagnostic logs to this file instead of stderr
    #[arg(long, value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Project directory the agents can see (overrides `[project] root`)
    #[arg(long, value_name = "DIR", global = true)]
    pub project: Option<PathBuf>,
}

/// Learner-facing operations
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Show progress on the current unit (default)
    Status,
    /// Describe a unit: the current one, or one given by number or id
    Brief {
        unit: Option<String>,
    },
    /// List every unit in order
    Roadmap,
    /// Start over with fresh progress
    Init {
        /// Your name
        #[arg(long)]
        name: Option<String>,
        /// Unit to start on (number or id)
        #[arg(long, value_name = "UNIT")]
        start: Option<String>,
    },
    /// Ask the task setter for your next task
    Task,
    /// Get a lesson on a topic
    Lesson {
        #[arg(required = true, num_args = 1..)]
        topic: Vec<String>,
    },
    /// Ask the teacher a question about your code
    Ask {
        #[arg(required = true, num_args = 1..)]
        question: Vec<String>,
    },
    /// Planner assessment of where you stand
    Check,
    /// Submit pasted code for review (read from --file or stdin)
    Submit {
        /// Read the code from this file instead of stdin
        #[arg(long, value_name = "PATH")]
        file: Option<PathBuf>,
        /// What the code is supposed to do
        #[arg(short, long, default_value = "")]
        description: String,
    },
    /// Review one project file against the current task
    Review {
        /// Path relative to the project root
        path: String,
    },
    /// Complete the current unit and move on
    Done,
    /// Run a coaching round over all agents
    Coach,
    /// Tell the coaches something is not working
    Issue {
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// Show or change learning preferences
    Prefs(PrefsArgs),
    /// Count a day of work
    Day,
    /// Read commands from stdin, one per line, in a single process
    Session,
    /// Show the project tree
    Tree,
    /// Print a project file
    Read {
        path: String,
    },
    /// Run a shell command in the project directory
    Run {
        #[arg(required = true, num_args = 1.., trailing_var_arg = true, allow_hyphen_values = true)]
        command: Vec<String>,
    },
}

impl Command {
    /// Whether the command sends anything to a model
    pub fn needs_agents(&self) -> bool {
        matches!(
            self,
            Command::Task
                | Command::Lesson { .. }
                | Command::Ask { .. }
                | Command::Check
                | Command::Submit { .. }
                | Command::Review { .. }
                | Command::Coach
                | Command::Issue { .. }
        )
    }
}

/// Preference flags; omitted flags keep their current value
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct PrefsArgs {
    /// small, medium or large
    #[arg(long)]
    pub task_size: Option<TaskSize>,
    /// brief, detailed or deep-dive
    #[arg(long)]
    pub depth: Option<ExplanationDepth>,
    /// examples, theory-first or trial-error
    #[arg(long)]
    pub style: Option<LearningStyle>,
    /// slow, normal or fast
    #[arg(long)]
    pub pace: Option<Pace>,
}

impl PrefsArgs {
    pub fn to_update(&self) -> PreferenceUpdate {
        PreferenceUpdate {
            task_size: self.task_size,
            explanation_depth: self.depth,
            learning_style: self.style,
            pace: self.pace,
        }
    }
}

/// One line of a `session`, parsed without a binary name.
#[derive(Parser, Debug)]
#[command(no_binary_name = true, name = "buildpath>")]
pub struct SessionLine {
    #[command(subcommand)]
    pub command: Command,
}

impl SessionLine {
    /// Parse one line, honouring single and double quotes.
    pub fn parse_line(line: &str) -> Result<Self, clap::Error> {
        let words = split_words(line).ok_or_else(|| {
            clap::Error::raw(clap::error::ErrorKind::InvalidValue, "unterminated quote\n")
        })?;
        Self::try_parse_from(words)
    }
}

/// Split a line into words the way a POSIX shell would for plain arguments:
/// whitespace separates, quotes group, and a backslash escapes the next
/// character outside single quotes. `None` when a quote is left open.
fn split_words(line: &str) -> Option<Vec<String>> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match c {
            '\'' => {
                in_word = true;
                loop {
                    match chars.next()? {
                        '\'' => break,
                        ch => current.push(ch),
                    }
                }
            }
            '"' => {
                in_word = true;
                loop {
                    match chars.next()? {
                        '"' => break,
                        '\\' => current.push(chars.next()?),
                        ch => current.push(ch),
                    }
                }
            }
            '\\' => {
                in_word = true;
                if let Some(next) = chars.next() {
                    current.push(next);
                }
            }
            c if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            c => {
                in_word = true;
                current.push(c);
            }
        }
    }
    if in_word {
        words.push(current);
    }
    Some(words)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_subcommand_means_status() {
        let cli = Cli::try_parse_from(["buildpath"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.output, OutputFormat::Text);
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["buildpath", "roadmap", "-o", "json", "-vv"]).unwrap();
        assert_eq!(cli.command, Some(Command::Roadmap));
        assert_eq!(cli.output, OutputFormat::Json);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_prefs_parse_aliases() {
        let cli =
            Cli::try_parse_from(["buildpath", "prefs", "--task-size", "s", "--depth", "deep"])
                .unwrap();
        let Some(Command::Prefs(args)) = cli.command else {
            panic!("expected prefs");
        };
        let update = args.to_update();
        assert_eq!(update.task_size, Some(TaskSize::Small));
        assert_eq!(update.explanation_depth, Some(ExplanationDepth::DeepDive));
        assert!(update.pace.is_none());
    }

    #[test]
    fn test_run_keeps_hyphenated_arguments() {
        let cli = Cli::try_parse_from(["buildpath", "run", "pytest", "-x", "-q"]).unwrap();
        assert_eq!(
            cli.command,
            Some(Command::Run {
                command: vec!["pytest".into(), "-x".into(), "-q".into()]
            })
        );
    }

    #[test]
    fn test_session_line() {
        let line = SessionLine::parse_line("lesson error handling").unwrap();
        assert_eq!(
            line.command,
            Command::Lesson {
                topic: vec!["error".into(), "handling".into()]
            }
        );
        assert!(SessionLine::parse_line("dance").is_err());
    }

    #[test]
    fn test_session_line_honours_quotes() {
        let line = SessionLine::parse_line(r#"submit -d "parse CSV" --file 'my file.py'"#).unwrap();
        assert_eq!(
            line.command,
            Command::Submit {
                file: Some(PathBuf::from("my file.py")),
                description: "parse CSV".to_string(),
            }
        );

        let line = SessionLine::parse_line(r#"review "src/my file.py""#).unwrap();
        assert_eq!(
            line.command,
            Command::Review {
                path: "src/my file.py".to_string()
            }
        );
    }

    #[test]
    fn test_session_line_unterminated_quote_is_error() {
        assert!(SessionLine::parse_line(r#"issue "too hard"#).is_err());
    }

    #[test]
    fn test_split_words() {
        assert_eq!(
            split_words(r#"a "b c" d\ e '' "x\"y""#).unwrap(),
            vec!["a", "b c", "d e", "", "x\"y"]
        );
        assert!(split_words("  ").unwrap().is_empty());
    }

    #[test]
    fn test_offline_commands_do_not_need_agents() {
        assert!(Command::Task.needs_agents());
        assert!(Command::Review { path: "a.py".into() }.needs_agents());
        assert!(!Command::Status.needs_agents());
        assert!(!Command::Prefs(PrefsArgs::default()).needs_agents());
        assert!(!Command::Session.needs_agents());
    }
}
