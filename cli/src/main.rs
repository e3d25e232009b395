//! CLI entrypoint for buildpath
//!
//! Wires configuration, adapters and the orchestrator together, then runs
//! one command (or a `session` of commands) against them.

use anyhow::{Context, Result, bail};
use buildpath_application::{
    InferenceGateway, Orchestrator, ProgressNotifier, UnavailableGateway,
};
use buildpath_infrastructure::{
    AnthropicGateway, CatalogueLoader, ConfigLoader, FileConfig, JsonLearnerStore,
    JsonlConversationLogger, LocalProjectInspector,
};
use buildpath_presentation::{
    Cli, Command, ConsoleFormatter, OutputFormat, ProgressReporter, SessionLine, SimpleProgress,
};
use clap::Parser;
use serde::Serialize;
use serde_json::json;
use std::io::IsTerminal;
use std::path::Path;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncReadExt, BufReader, Lines, Stdin};
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Line that ends pasted code inside a session
const END_OF_CODE: &str = "END";

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let _log_guard = init_logging(&cli)?;

    info!("Starting buildpath");

    if cli.show_config {
        println!("Configuration sources (lowest to highest priority):");
        for source in ConfigLoader::describe_sources(cli.config.as_deref()) {
            println!("  {source}");
        }
        return Ok(());
    }

    let config = load_config(&cli)?;
    let command = cli.command.clone().unwrap_or(Command::Status);
    let mut orchestrator = build_orchestrator(&cli, &config, &command)?;
    orchestrator.resume().await;

    if command == Command::Session {
        return run_session(&mut orchestrator, cli.output).await;
    }

    let pasted = match &command {
        Command::Submit { file: None, .. } => {
            let mut code = String::new();
            tokio::io::stdin()
                .read_to_string(&mut code)
                .await
                .context("failed to read code from stdin")?;
            Some(code)
        }
        _ => None,
    };

    let output = execute(&mut orchestrator, command, cli.output, pasted).await?;
    print!("{output}");
    Ok(())
}

fn init_logging(cli: &Cli) -> Result<Option<WorkerGuard>> {
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    let Some(path) = &cli.log_file else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
        return Ok(None);
    };

    let directory = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let file_name = path
        .file_name()
        .with_context(|| format!("invalid log file path: {}", path.display()))?;
    std::fs::create_dir_all(directory)
        .with_context(|| format!("cannot create log directory {}", directory.display()))?;

    let (writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::never(directory, file_name));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(writer)
        .init();
    Ok(Some(guard))
}

fn load_config(cli: &Cli) -> Result<FileConfig> {
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref()).context("failed to load configuration")?
    };

    match config.ensure_valid() {
        Ok(warnings) => {
            if !warnings.is_empty() {
                eprint!("{}", ConsoleFormatter::config_issues(&warnings));
            }
        }
        Err(e) => {
            eprint!("{}", ConsoleFormatter::config_issues(&config.validate()));
            bail!("{e}");
        }
    }
    Ok(config)
}

// === Dependency Injection ===
fn build_orchestrator(cli: &Cli, config: &FileConfig, command: &Command) -> Result<Orchestrator> {
    let catalogue = CatalogueLoader::load(config.catalogue_path().as_deref())
        .context("failed to load curriculum catalogue")?;

    let gateway: Arc<dyn InferenceGateway> =
        match AnthropicGateway::new(&config.provider, config.models.clone()) {
            Ok(gateway) => Arc::new(gateway),
            Err(e) => {
                if command.needs_agents() {
                    if let Some(issue) = config.provider.credential_issue() {
                        eprint!("{}", ConsoleFormatter::config_issues(&[issue]));
                    }
                    bail!("cannot reach the model provider: {e}");
                }
                if *command == Command::Session {
                    eprintln!("Agents are unavailable this session: {e}");
                }
                Arc::new(UnavailableGateway::new(e.to_string()))
            }
        };

    let project_root = cli.project.clone().unwrap_or_else(|| config.project_root());
    let inspector = Arc::new(LocalProjectInspector::new(
        project_root,
        config.project.clone(),
    ));
    let store = Arc::new(JsonLearnerStore::new(config.state_path()));

    let progress: Arc<dyn ProgressNotifier> = if cli.quiet {
        Arc::new(buildpath_application::NoProgress)
    } else if std::io::stderr().is_terminal() {
        Arc::new(ProgressReporter::new())
    } else {
        Arc::new(SimpleProgress)
    };

    let mut orchestrator = Orchestrator::new(
        gateway,
        inspector,
        store,
        Arc::new(catalogue),
        config.coaching.to_orchestrator_config(),
    )
    .with_progress(progress);

    if let Some(path) = config.conversation_log_path() {
        match JsonlConversationLogger::open(&path) {
            Some(logger) => orchestrator = orchestrator.with_conversation_logger(Arc::new(logger)),
            None => warn!("Conversation log disabled: cannot open {}", path.display()),
        }
    }

    Ok(orchestrator)
}

/// Run one command and render its result.
async fn execute(
    orchestrator: &mut Orchestrator,
    command: Command,
    format: OutputFormat,
    pasted: Option<String>,
) -> Result<String> {
    let output = match command {
        Command::Status | Command::Session => render(format, orchestrator.learner(), |l| {
            ConsoleFormatter::status(l, orchestrator.catalogue())
        }),
        Command::Brief { unit } => {
            let selected = orchestrator.unit_brief(unit.as_deref())?;
            let number = orchestrator.catalogue().position(&selected.id).map(|i| i + 1);
            render(format, selected, |u| ConsoleFormatter::unit_brief(u, number))
        }
        Command::Roadmap => render(format, orchestrator.roadmap(), |units| {
            ConsoleFormatter::roadmap(units, orchestrator.learner())
        }),
        Command::Init { name, start } => {
            let name = name.unwrap_or_default();
            orchestrator.start_session(&name, start.as_deref()).await?;
            render(format, orchestrator.learner(), |l| {
                ConsoleFormatter::status(l, orchestrator.catalogue())
            })
        }
        Command::Task => {
            let assignment = orchestrator.next_task().await?;
            render(format, &assignment, ConsoleFormatter::task)
        }
        Command::Lesson { topic } => {
            let reply = orchestrator.lesson(&topic.join(" ")).await?;
            render_reply(format, "Teacher", &reply)
        }
        Command::Ask { question } => {
            let reply = orchestrator.chat(&question.join(" ")).await?;
            render_reply(format, "Teacher", &reply)
        }
        Command::Check => {
            let payload = orchestrator.planner_check().await?;
            render(format, &payload, ConsoleFormatter::planner)
        }
        Command::Submit { file, description } => {
            let code = match (file, pasted) {
                (Some(path), _) => tokio::fs::read_to_string(&path)
                    .await
                    .with_context(|| format!("cannot read {}", path.display()))?,
                (None, Some(code)) => code,
                (None, None) => String::new(),
            };
            if code.trim().is_empty() {
                bail!("no code to submit");
            }
            let outcome = orchestrator.submit_code(&code, &description).await?;
            render(format, &outcome, ConsoleFormatter::submission)
        }
        Command::Review { path } => {
            let outcome = orchestrator.review_file(&path).await?;
            render(format, &outcome, ConsoleFormatter::submission)
        }
        Command::Done => {
            let result = orchestrator.complete_unit().await;
            render(format, &result, ConsoleFormatter::completion)
        }
        Command::Coach => {
            let outcome = orchestrator.request_coaching().await?;
            render(format, &outcome, ConsoleFormatter::coaching)
        }
        Command::Issue { text } => {
            let outcome = orchestrator.report_issue(&text.join(" ")).await?;
            render(format, &outcome, ConsoleFormatter::issue)
        }
        Command::Prefs(args) => {
            let prefs = orchestrator.update_preferences(args.to_update()).await;
            render(format, &prefs, ConsoleFormatter::preferences)
        }
        Command::Day => {
            let learner = orchestrator.record_day().await;
            render(format, learner, ConsoleFormatter::day)
        }
        Command::Tree => {
            let tree = orchestrator.project_tree().await?;
            render(format, &json!({ "tree": tree }), |_| format!("{tree}\n"))
        }
        Command::Read { path } => {
            let contents = orchestrator.read_project_file(&path).await?;
            render(format, &json!({ "path": path, "contents": contents }), |_| {
                format!("{contents}\n")
            })
        }
        Command::Run { command } => {
            let line = command.join(" ");
            let result = orchestrator.run_command(&line).await?;
            render(format, &json!({ "command": line, "output": result }), |_| {
                format!("{result}\n")
            })
        }
    };
    Ok(output)
}

fn render<T: Serialize + ?Sized>(
    format: OutputFormat,
    value: &T,
    text: impl FnOnce(&T) -> String,
) -> String {
    match format {
        OutputFormat::Text => text(value),
        OutputFormat::Json => format!("{}\n", ConsoleFormatter::json(value)),
    }
}

fn render_reply(format: OutputFormat, agent: &str, reply: &str) -> String {
    render(format, &json!({ "agent": agent, "reply": reply }), |_| {
        ConsoleFormatter::reply(agent, reply)
    })
}

/// Read commands line by line in one process, so interaction history and
/// coaching directives carry over between them.
async fn run_session(orchestrator: &mut Orchestrator, format: OutputFormat) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let interactive = std::io::stdin().is_terminal();
    if interactive {
        eprintln!("buildpath session. Type `help` for commands, `quit` to leave.");
    }

    loop {
        if interactive {
            eprint!("buildpath> ");
        }
        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if matches!(line, "quit" | "exit") {
            break;
        }

        let command = match SessionLine::parse_line(line) {
            Ok(parsed) => parsed.command,
            Err(e) => {
                // Covers `help` and `--help`, which clap reports as errors
                eprintln!("{e}");
                continue;
            }
        };
        if command == Command::Session {
            eprintln!("Already in a session.");
            continue;
        }

        let pasted = match &command {
            Command::Submit { file: None, .. } => {
                if interactive {
                    eprintln!("Paste your code, then a line with {END_OF_CODE}:");
                }
                Some(read_until_end(&mut lines).await?)
            }
            _ => None,
        };

        match execute(orchestrator, command, format, pasted).await {
            Ok(output) => print!("{output}"),
            Err(e) => eprintln!("Error: {e:#}"),
        }
    }
    Ok(())
}

async fn read_until_end(lines: &mut Lines<BufReader<Stdin>>) -> Result<String> {
    let mut code = String::new();
    while let Some(line) = lines.next_line().await? {
        if line.trim() == END_OF_CODE {
            break;
        }
        code.push_str(&line);
        code.push('\n');
    }
    Ok(code)
}
