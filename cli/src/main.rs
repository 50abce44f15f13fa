//! CLI entrypoint for AkaNamen
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use akanamen_application::{GameParams, ImportRosterUseCase, Questioner};
use akanamen_domain::{MemberId, Orchestra};
use akanamen_infrastructure::{ConfigLoader, FileConfig, JsonlGameLogger, TomlRosterSource};
use akanamen_presentation::{Cli, Command, ConsoleFormatter, PlayArgs, QuizRepl};
use anyhow::{Result, anyhow, bail};
use clap::{CommandFactory, Parser};
use std::path::Path;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Keep the guard alive so buffered log lines reach the file
    let _guard = init_logging(cli.verbose, cli.log_file.as_deref())?;

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_deref());
        return Ok(());
    }

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };
    check_config(&config)?;

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    info!("Starting AkaNamen");

    // === Dependency Injection ===
    let orchestra = Arc::new(Orchestra::new());
    match cli.roster.as_ref().or(config.roster.path.as_ref()) {
        Some(path) => {
            let source = Arc::new(TomlRosterSource::new(path));
            let summary = ImportRosterUseCase::new(source).execute(&orchestra).await?;
            if summary.skipped > 0 {
                warn!("Skipped {} duplicate roster entries", summary.skipped);
            }
        }
        None => warn!("No roster configured, the member directory is empty"),
    }

    match command {
        Command::Pairs { free_text } => {
            let multiple_choice = !free_text;
            let pairs: Vec<_> = orchestra
                .questionable(multiple_choice, &[])
                .into_iter()
                .map(|(hint, question)| (hint.attribute(), question.attribute()))
                .collect();
            println!("{}", ConsoleFormatter::format_pairs(&pairs, multiple_choice));
        }
        Command::Members => {
            println!("{}", ConsoleFormatter::format_members(&orchestra));
        }
        Command::Play(args) => {
            let seed = args.seed;
            let player = MemberId::new(args.player);
            let params = game_params(config.game_params(), args);

            let mut questioner = Questioner::new(orchestra.clone(), player, params)?;
            if let Some(path) = &config.log.game_log {
                match JsonlGameLogger::new(path) {
                    Some(logger) => {
                        info!("Logging game events to {}", logger.path().display());
                        questioner = questioner.with_logger(Arc::new(logger));
                    }
                    None => warn!("Game events will not be logged"),
                }
            }

            QuizRepl::new(questioner, orchestra, seed).run().await?;
        }
    }

    Ok(())
}

/// Install the tracing subscriber
///
/// Verbosity: 0 = warn, 1 = info, 2 = debug, 3+ = trace. With a log file,
/// diagnostics go there through a non-blocking writer instead of stderr.
fn init_logging(verbose: u8, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let filter = match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    let Some(path) = log_file else {
        subscriber.with_writer(std::io::stderr).init();
        return Ok(None);
    };
    let Some(file_name) = path.file_name() else {
        bail!("Invalid log file path: {}", path.display());
    };
    let directory = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));

    let appender = tracing_appender::rolling::never(directory, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    subscriber.with_writer(writer).with_ansi(false).init();
    Ok(Some(guard))
}

/// Log configuration issues, failing on errors
fn check_config(config: &FileConfig) -> Result<()> {
    let issues = config.validate();
    for issue in &issues {
        if issue.is_error() {
            error!("{}", issue.message);
        } else {
            warn!("{}", issue.message);
        }
    }
    let errors = issues.iter().filter(|i| i.is_error()).count();
    if errors > 0 {
        bail!("Configuration has {} error(s)", errors);
    }
    Ok(())
}

/// Apply the command line overrides to the configured game
fn game_params(configured: GameParams, args: PlayArgs) -> GameParams {
    let mut params = configured;
    if let Some(questions) = args.questions {
        params = params.with_questions(questions);
    }
    if args.free_text {
        params = params.with_multiple_choice(false);
    }
    if !args.hints.is_empty() {
        params = params.with_hints(args.hints);
    }
    if !args.ask.is_empty() {
        params = params.with_questions_attributes(args.ask);
    }
    params
}
