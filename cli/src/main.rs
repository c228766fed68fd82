//! CLI entrypoint for trivia-bot
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use clap::{CommandFactory, Parser};
use colored::Colorize;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};
use trivia_application::{
    NoQuizEventLogger, QuestionGenerator, QuizEventLogger, RunQuizInput, RunQuizUseCase,
    ScoreLedger, ShowLeaderboardUseCase,
};
use trivia_domain::{Difficulty, OutputFormat, PlayerId};
use trivia_infrastructure::{
    ConfigLoader, FileConfig, FileQuestionGenerator, GeneratorProvider, JsonFileScoreStore,
    JsonlQuizEventLogger, OpenAiQuestionGenerator,
};
use trivia_presentation::{Cli, Command, ConsoleQuizPresenter, OutputFormatter, formatter_for};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

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

    // Keep the guard alive so buffered file logs are flushed on exit
    let _log_guard = init_logging(cli.verbose, config.logging.dir.as_deref());

    check_config(&config)?;

    if cli.no_color || !config.output.color {
        colored::control::set_override(false);
    }

    let format = cli
        .output
        .map(OutputFormat::from)
        .or(config.output.format)
        .unwrap_or_default();
    let formatter = formatter_for(format);

    // === Dependency Injection ===
    let store = Arc::new(JsonFileScoreStore::new(&config.store.path));
    let ledger = Arc::new(ScoreLedger::new(store));

    match cli.command {
        Some(Command::Quiz {
            category,
            difficulty,
            count,
            player,
            deadline,
        }) => {
            let session = QuizCommand {
                category,
                difficulty,
                count,
                player,
                deadline,
            };
            run_quiz(&config, session, ledger, formatter.as_ref()).await
        }
        Some(Command::Leaderboard { top }) => {
            let entries = ShowLeaderboardUseCase::new(ledger)
                .execute(top)
                .await
                .context("Failed to read the leaderboard")?;
            println!("{}", formatter.format_leaderboard(&entries));
            Ok(())
        }
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    }
}

/// Arguments of the `quiz` subcommand.
struct QuizCommand {
    category: String,
    difficulty: Difficulty,
    count: Option<usize>,
    player: Option<String>,
    deadline: Option<u64>,
}

async fn run_quiz(
    config: &FileConfig,
    command: QuizCommand,
    ledger: Arc<ScoreLedger>,
    formatter: &dyn OutputFormatter,
) -> Result<()> {
    let player: PlayerId = command
        .player
        .or_else(|| std::env::var("USER").ok())
        .or_else(|| std::env::var("USERNAME").ok())
        .unwrap_or_else(|| "player".to_string())
        .parse()?;

    let (mut params, _) = config.quiz.to_quiz_params();
    if let Some(secs) = command.deadline {
        if secs == 0 {
            bail!("--deadline must be at least 1 second");
        }
        params = params.with_deadline(Duration::from_secs(secs));
    }

    let generator: Arc<dyn QuestionGenerator> = match config.generator.parse_provider().0 {
        GeneratorProvider::OpenAi => {
            Arc::new(OpenAiQuestionGenerator::from_config(&config.generator.openai)?)
        }
        GeneratorProvider::File => {
            let path = config
                .generator
                .questions_file
                .as_deref()
                .context("generator.questions_file is not set")?;
            Arc::new(FileQuestionGenerator::new(path))
        }
    };

    let event_logger: Arc<dyn QuizEventLogger> = match config
        .logging
        .events_file
        .as_deref()
        .and_then(JsonlQuizEventLogger::new)
    {
        Some(logger) => {
            info!("Logging quiz events to {}", logger.path().display());
            Arc::new(logger)
        }
        None => Arc::new(NoQuizEventLogger),
    };

    // Ctrl-C abandons the session; committed points stay in the store
    let cancellation = CancellationToken::new();
    {
        let token = cancellation.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                token.cancel();
            }
        });
    }

    let use_case = RunQuizUseCase::new(generator, Arc::new(ConsoleQuizPresenter::new()), ledger)
        .with_params(params)
        .with_event_logger(event_logger)
        .with_cancellation(cancellation);

    let mut input = RunQuizInput::new(player, command.category, command.difficulty);
    if let Some(count) = command.count {
        input = input.with_count(count);
    }

    let run = match use_case.execute(input).await {
        Ok(run) => run,
        Err(e) if e.is_cancelled() => {
            eprintln!("\n{}", "Quiz cancelled.".yellow());
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    println!("{}", formatter.format_report(&run.report));

    if !run.is_fully_persisted() {
        eprintln!(
            "{} {} score update(s) could not be saved to {}",
            "warning:".yellow().bold(),
            run.ledger_errors.len(),
            config.store.path
        );
        for e in &run.ledger_errors {
            warn!("{}: {}", e, e.store_error());
        }
    }

    Ok(())
}

/// Report configuration issues; errors stop the program.
fn check_config(config: &FileConfig) -> Result<()> {
    let issues = config.validate();
    for issue in &issues {
        if issue.is_error() {
            eprintln!("{} {}", "config error:".red().bold(), issue.message);
        } else {
            warn!("{}", issue.message);
        }
    }
    if issues.iter().any(|i| i.is_error()) {
        bail!("Invalid configuration (see --show-config for the files in use)");
    }
    Ok(())
}

/// Initialize logging based on verbosity level, plus an optional daily
/// rolling log file.
fn init_logging(verbose: u8, log_dir: Option<&str>) -> Option<WorkerGuard> {
    let filter = match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "trivia-bot.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(file_layer)
        .init();

    guard
}
