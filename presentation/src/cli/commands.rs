//! CLI command definitions

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use trivia_application::DEFAULT_LEADERBOARD_SIZE;
use trivia_domain::Difficulty;

/// Output format for reports and leaderboards
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Colored text for a terminal
    Text,
    /// JSON output
    Json,
}

impl From<OutputFormat> for trivia_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Text => trivia_domain::OutputFormat::Text,
            OutputFormat::Json => trivia_domain::OutputFormat::Json,
        }
    }
}

/// CLI arguments for trivia-bot
#[derive(Parser, Debug)]
#[command(name = "trivia-bot")]
#[command(author, version, about = "Timed multiple-choice trivia quiz")]
#[command(long_about = r#"
trivia-bot runs timed multiple-choice quiz sessions.

A session fetches a batch of generated questions and presents them one at a
time. A correct answer earns points (Easy 5, Medium 10, Hard 15) and moves
on; a wrong answer or a missed deadline ends the session. Points are added
to a persistent leaderboard as they are earned.

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file
2. ./trivia.toml       Project-level config
3. ~/.config/trivia-bot/config.toml   Global config

Example:
  trivia-bot quiz --category Gaming --difficulty medium
  trivia-bot quiz -c Anime -d hard --count 10 --player alice
  trivia-bot leaderboard --top 5
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Output format for the final report or leaderboard
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Play one quiz session
    Quiz {
        /// Topic of the questions
        #[arg(short, long)]
        category: String,

        /// easy, medium or hard
        #[arg(short, long)]
        difficulty: Difficulty,

        /// Number of questions (defaults to [quiz] question_count)
        #[arg(short = 'n', long)]
        count: Option<usize>,

        /// Player the score is credited to (defaults to $USER)
        #[arg(short, long)]
        player: Option<String>,

        /// Seconds allowed per question (defaults to [quiz] deadline_secs)
        #[arg(long, value_name = "SECS")]
        deadline: Option<u64>,
    },

    /// Show the top scores
    Leaderboard {
        /// How many entries to show
        #[arg(short, long, default_value_t = DEFAULT_LEADERBOARD_SIZE)]
        top: usize,
    },
}
